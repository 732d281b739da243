//! numlab: client-side toolkit for a numerical-methods solver service.
//!
//! The solver (root finding, interpolation, linear systems) runs remotely.
//! This crate covers what a front end needs around it: REST clients for the
//! solver endpoints, canonicalization of typed math expressions, result
//! plotting and export of a rendered chart as an SVG file.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod export;
pub mod render;
pub mod telemetry;

pub use api::{ApiClients, ApiMode, Operation};
pub use config::ClientConfig;
pub use core::{ExpressionSanitizer, SanitizeRules, sanitize_expression};
pub use error::{NumlabError, NumlabResult};
pub use export::{ChartExporter, ExportOutcome};
