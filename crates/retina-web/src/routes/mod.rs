//! Route handlers.

pub mod dashboard;
pub mod pipeline;
pub mod service;
