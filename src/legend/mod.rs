//! Legend layout engine: row/column wrapping, pagination, alignment.

mod entry;
mod layout;

pub use entry::{LegendEntry, LegendShape, entries_for_series};
pub use layout::{
    LegendAlignment, LegendConfig, LegendLayout, LegendOrientation, LegendRow, PlacedEntry,
    align_legend, layout_legend,
};
