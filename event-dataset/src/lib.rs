//! Image dataset adapters that feed normalized image tensors to a
//! training or inference loop.

mod common;
pub mod dataset;
pub mod processor;
pub mod report;
