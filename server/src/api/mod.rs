//! Invocation boundary

pub mod types;

pub use types::InvocationResponse;
