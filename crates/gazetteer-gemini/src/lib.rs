//! Google generative-language API client for Gazetteer.
//!
//! Implements [`gazetteer_core::upstream::FactGenerator`] over the
//! `generateContent` REST endpoint. Transport, timeout, and response-shape
//! concerns live here; the fact service sees only trait-level success or
//! failure.

mod client;

pub mod error;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient, GeminiConfig, fact_prompt};
pub use error::{Error, Result};
