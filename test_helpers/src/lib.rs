//! Test helpers shared across crates.
//!
//! [`jail`] isolates the process environment for a test body and
//! [`output`] captures text written to a configurator's output sink.

pub mod jail;
pub mod output;
