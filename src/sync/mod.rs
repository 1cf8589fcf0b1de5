//! Shared access to named selectors.

mod registry;

pub use registry::{SelectorRegistry, SharedSelector};
