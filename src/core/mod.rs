//! Core components of `esg-insights-rs`.
//!
//! This module contains the foundational building blocks shared by every feature area:
//! - The primary [`EsgError`] type.
//! - Shared data models like [`Company`], [`Quartile`] and [`PerformanceMetrics`].

/// The primary error type (`EsgError`) for the crate.
pub mod error;
/// Shared data models used across multiple modules (e.g., `Company`, `PerformanceMetrics`).
pub mod models;

// convenient re-exports so most code can just `use crate::core::EsgError`
pub use error::EsgError;
pub use models::{Company, DailyReturn, EsgScore, PerformanceMetrics, Quartile, Sector};
