//! # VAIC Analytics Engine
//!
//! This crate turns four financial statement figures into the intellectual
//! capital (VAIC) and profitability (ROA/ROE) indicators.
//!
//! ## Architectural Principles
//!
//! - **Pure Logic:** No I/O and no knowledge of the web server or the PDF
//!   report. It depends only on `core-types`.
//! - **Stateless Calculation:** `IndicatorEngine` is a stateless calculator;
//!   the only mutable state is the caller-owned `SessionState`.
//!
//! ## Public API
//!
//! - `IndicatorEngine`: the calculation entry point.
//! - `coefficients`: the fixed per-sector regression models for ROA and ROE.
//! - `RadarProfile` / `ReturnComparison`: the data behind the two charts.
//! - `summary_rows`, `format_currency`, `format_ratio`: display formatting.
//! - `SessionState`: inputs, results and current page of one user.

// Declare the modules that constitute this crate.
pub mod coefficients;
pub mod engine;
pub mod series;
pub mod session;
pub mod summary;

// Re-export the key components to create a clean, public-facing API.
pub use engine::IndicatorEngine;
pub use series::{RadarProfile, ReturnComparison};
pub use session::SessionState;
pub use summary::{SummaryRow, format_currency, format_ratio, summary_rows};
