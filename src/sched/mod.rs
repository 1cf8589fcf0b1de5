//! Weighted round robin selection.

mod parse;
mod wrr;

pub use parse::ParseError;
pub use wrr::WeightedSelector;
