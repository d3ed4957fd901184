//! Path and test-fixture helpers
pub mod path_helpers;
pub mod test;
