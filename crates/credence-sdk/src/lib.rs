//! Credence Rust SDK
//!
//! Client library for the credibility scoring API.
//!
//! # Example
//!
//! ```no_run
//! use credence_domain::Submission;
//! use credence_sdk::{CredenceClient, DEFAULT_API_URL};
//!
//! # async fn run() -> Result<(), credence_sdk::SdkError> {
//! let client = CredenceClient::new(DEFAULT_API_URL);
//! let result = client.evaluate(&Submission::new("The moon is made of cheese")).await?;
//! println!("{} ({})", result.score, result.level);
//! # Ok(())
//! # }
//! ```
//!
//! The `mock` module provides in-memory stand-ins for the scorer and the
//! knowledge base.

#![warn(missing_docs)]

mod client;
mod envelope;
mod error;
pub mod mock;

pub use client::{CredenceClient, DEFAULT_API_URL};
pub use error::SdkError;
