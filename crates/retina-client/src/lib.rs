//! # Retina Client
//!
//! `reqwest` implementation of the prediction service contract.

pub mod client;

pub use client::PredictionClient;
