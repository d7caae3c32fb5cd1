use serde::Serialize;

use crate::error::SponsorMatchError;

pub fn to_pretty<T: Serialize>(value: &T) -> Result<String, SponsorMatchError> {
    Ok(serde_json::to_string_pretty(value)?)
}
