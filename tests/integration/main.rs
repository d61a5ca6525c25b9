//! End-to-end integration tests
//!
//! Tests complete builds from metadata sources to document graphs.

mod reload;
