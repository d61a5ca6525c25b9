//! Integration tests for Layer 2: Schema
//!
//! Tests field classification, document resolution, and graph queries.

mod classification;
mod paths;
mod resolution;
