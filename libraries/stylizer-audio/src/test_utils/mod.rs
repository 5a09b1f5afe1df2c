//! Test utilities for audio testing
//!
//! Signal generators and measurement probes shared by the stylizer's unit
//! and integration tests. Enabled with the `test-utils` feature.

pub mod analysis;
pub mod signals;

pub use analysis::*;
pub use signals::*;
