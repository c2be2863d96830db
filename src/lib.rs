//! chartboard: data-normalization and incremental-redraw core.
//!
//! This crate owns the chart state with real invariants: canonical series
//! storage, visibility bookkeeping, cached aggregates, ratio math,
//! hit-testing and redraw orchestration. Actual drawing stays behind the
//! [`render::RenderSurface`] seam.

pub mod api;
pub mod config;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{ChartCore, RedrawOptions};
pub use config::ChartConfig;
pub use error::{ChartError, ChartResult};
