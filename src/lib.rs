#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stderr)]
#![deny(clippy::print_stdout)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]

pub mod cli;
pub mod error;
pub mod fuzzy;
pub mod sponsors;

mod render;
mod sources;
mod transform;
mod utils;

pub use transform::drugsfda::clean_drug_name;
