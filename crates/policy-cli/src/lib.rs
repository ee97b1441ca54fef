//! CLI library components for the policy master builder.

pub mod logging;
pub mod pipeline;
pub mod types;
