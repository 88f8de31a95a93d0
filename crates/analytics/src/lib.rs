//! # Pricewatch Analytics Engine
//!
//! This crate turns filtered pricing observations into the derived views the
//! dashboard shows: base-versus-promo box-plots and promotion analytics.
//!
//! ## Architectural Principles
//!
//! - **Layer 2 Logic:** This is a pure logic crate. It has no knowledge of I/O.
//!   It depends only on `core-types` and `filters`.
//! - **Stateless Calculation:** The `AnalyticsEngine` is a stateless calculator. Every
//!   call recomputes fresh report values from an immutable row slice, and no input
//!   makes it fail: empty inputs produce zeroed sentinels instead.
//!
//! ## Public API
//!
//! - `AnalyticsEngine`: grouping, box-plot comparison and promotion analysis.
//! - `compute_stats`: nearest-rank box-plot statistics for one sequence.
//! - `BoxplotStats`, `BoxplotComparison`, `PromoAnalysis`, `CompetitorPromo`: the report structs.

// Declare the modules that constitute this crate.
pub mod collate;
pub mod engine;
pub mod report;
pub mod stats;

// Re-export the key components to create a clean, public-facing API.
pub use collate::locale_cmp;
pub use engine::{ALL_GROUP_LABEL, AnalyticsEngine};
pub use report::{BoxplotComparison, BoxplotStats, CompetitorPromo, PromoAnalysis};
pub use stats::{compute_stats, percentage_diff};
