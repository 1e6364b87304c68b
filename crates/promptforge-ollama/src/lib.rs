//! Ollama generation client for PromptForge
//!
//! Sends one generation request and reduces whatever comes back into a
//! single canonical string. The pipeline has four stages:
//!
//! 1. [`request`] builds and issues the `POST /api/generate` call
//! 2. [`transport`] rejects connection failures and non-200 statuses
//! 3. [`decode`] parses the body as one JSON value, falling back to NDJSON
//! 4. [`normalize`] extracts text from whichever response shape was decoded

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod decode;
pub mod error;
pub mod normalize;
pub mod request;
pub mod transport;

pub use decode::{MalformedLinePolicy, decode};
pub use error::OllamaError;
pub use normalize::normalize;
pub use request::{GenerationRequest, generate, generate_with_policy};
