//! chart-layout: chart layout and legend-pagination core.
//!
//! This crate computes geometry, never pixels: axis ranges and tick
//! intervals, legend row/column/page layout, selection and highlight state,
//! and value-to-pixel coordinate mapping. A host renderer consumes the
//! resulting primitives and owns the display surface.

pub mod axis;
pub mod chart;
pub mod coords;
pub mod error;
pub mod geometry;
pub mod legend;
pub mod render;
pub mod selection;
pub mod series;
pub mod telemetry;
pub mod text;

pub use chart::{AxisConfig, ChartConfig, ChartModel, ChartSession};
pub use error::{ChartError, ChartResult};
