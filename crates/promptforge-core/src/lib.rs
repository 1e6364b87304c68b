//! Shared building blocks for PromptForge
//!
//! Holds the error-to-HTTP contract used by the feature crates, the
//! C.R.A.F.T. prompt template and small vocabulary types shared between
//! configuration and the Ollama client.

#![allow(clippy::must_use_candidate)]

pub mod craft;
mod error;
mod policy;

pub use craft::CraftFields;
pub use error::HttpError;
pub use policy::MalformedLinePolicy;
