//! Small shared helpers: openFDA query escaping and tolerant table cells.

pub(crate) mod query;
pub(crate) mod serde;
