//! Collaborator traits shared across service crates.

pub mod activity;

pub use activity::{ActivitySink, NullActivitySink};
