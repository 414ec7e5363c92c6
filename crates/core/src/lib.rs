//! Core library for linesplit
//!
//! This crate implements the **Functional Core** of the linesplit application,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! - **`linesplit_core`** (this crate): Pure transformation functions with zero I/O
//! - **`linesplit`**: The HTTP server and CLI (the Imperative Shell)
//!
//! All functions in this crate are deterministic and side-effect free. Even the
//! request timestamp is passed in by the caller.
//!
//! # Module Organization
//!
//! - [`transform`]: Mode selection and the two extraction rules (hash markers, whitespace)
//! - [`stats`]: Size statistics comparing input and output
//! - [`envelope`]: Request validation and the JSON response envelope
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use linesplit_core::{compute_stats, transform};
//!
//! let result = transform("#apple #banana grape", "auto")?;
//! assert_eq!(result, "apple\nbanana");
//!
//! let stats = compute_stats("#apple #banana grape", &result);
//! assert_eq!(stats.hash_count, 2);
//! ```

pub mod envelope;
pub mod stats;
pub mod transform;

pub use stats::{compute_stats, ReductionPercentage, Stats};
pub use transform::{transform, transform_with, Mode, TransformError};
