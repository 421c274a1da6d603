//! Core types and trait definitions for the Gazetteer city-facts service.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod city;
pub mod error;
pub mod facts;
pub mod store;
pub mod upstream;

pub use error::{Error, Result};
