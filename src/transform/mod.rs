//! Transform adapters from upstream API shapes into sponsor table rows.

pub(crate) mod drugsfda;
