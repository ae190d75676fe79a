//! # weft-std
//!
//! Standard interceptor implementations for the Weft interception framework,
//! plus utilities for testing interceptors against the dispatch pipeline.

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod interceptors;
pub mod testing;
