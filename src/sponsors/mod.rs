//! Sponsor/manufacturer name cleanup: normalization, canonical matching, and
//! the table workflows built on top of them.

pub mod canonical;
pub mod normalize;
mod table;

pub use crate::utils::serde::RawName;
pub use canonical::{FDA_SPONSORS, canonicalize, canonicalize_names};
pub use normalize::{normalize_name, normalize_names};
use serde::Serialize;

pub use table::{
    DEFAULT_TOP_SPONSORS, RenameOptions, Row, SponsorCount, SponsorMapping, TopSponsorOptions,
    rename_sponsors, top_sponsors,
};

/// Normalizes then canonicalizes a batch against `canonical`.
pub fn match_sponsors<I, T, S>(raw_names: I, canonical: &[S]) -> Vec<String>
where
    I: IntoIterator<Item = T>,
    T: Into<RawName>,
    S: AsRef<str>,
{
    canonicalize_names(&normalize_names(raw_names), canonical)
}

/// Each stage of the cleanup for a single raw name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SponsorName {
    pub raw: String,
    pub normalized: String,
    pub canonical: String,
}

pub fn explain_sponsors<S: AsRef<str>>(
    raw_names: &[String],
    canonical: &[S],
) -> Vec<SponsorName> {
    let normalized = normalize_names(raw_names);
    let canonicalized = canonicalize_names(&normalized, canonical);
    raw_names
        .iter()
        .zip(normalized)
        .zip(canonicalized)
        .map(|((raw, normalized), canonical)| SponsorName {
            raw: raw.clone(),
            normalized,
            canonical,
        })
        .collect()
}
