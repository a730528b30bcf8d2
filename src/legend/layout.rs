use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::error::{ChartError, ChartResult};
use crate::geometry::{Point, Rect, Size};
use crate::legend::LegendEntry;
use crate::text::{Font, TextMeasurer, TextSize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendOrientation {
    #[default]
    Horizontal,
    Vertical,
}

/// Placement of the legend block inside its bounds along the cross axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum LegendAlignment {
    #[default]
    Near,
    Center,
    Far,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendConfig {
    pub orientation: LegendOrientation,
    pub alignment: LegendAlignment,
    /// Padding on each side of an item (shape gap and trailing gap).
    pub item_padding: f64,
    pub shape_size: Size,
    pub font: Font,
    /// Use the widest item width uniformly for every item.
    pub fixed_item_width: bool,
    pub title: Option<String>,
    pub title_font: Font,
    pub max_title_width: Option<f64>,
    /// Height reserved for forward/backward paging affordances.
    pub nav_reservation: f64,
    /// Per-page layout without navigation affordances.
    pub page_mode: bool,
}

impl Default for LegendConfig {
    fn default() -> Self {
        Self {
            orientation: LegendOrientation::Horizontal,
            alignment: LegendAlignment::Near,
            item_padding: 8.0,
            shape_size: Size::new(10.0, 10.0),
            font: Font::default(),
            fixed_item_width: false,
            title: None,
            title_font: Font::default(),
            max_title_width: None,
            nav_reservation: 24.0,
            page_mode: false,
        }
    }
}

impl LegendConfig {
    fn validate(&self) -> ChartResult<()> {
        if !self.item_padding.is_finite() || self.item_padding < 0.0 {
            return Err(ChartError::InvalidConfig(
                "legend item padding must be finite and >= 0".to_owned(),
            ));
        }
        if !self.shape_size.is_valid() {
            return Err(ChartError::InvalidConfig(
                "legend shape size must be finite and >= 0".to_owned(),
            ));
        }
        if !self.nav_reservation.is_finite() || self.nav_reservation < 0.0 {
            return Err(ChartError::InvalidConfig(
                "legend nav reservation must be finite and >= 0".to_owned(),
            ));
        }
        Ok(())
    }
}

/// One laid-out legend entry with its row and page assignment.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedEntry {
    pub entry: LegendEntry,
    pub row: usize,
    pub page: usize,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LegendRow {
    pub width: f64,
    pub height: f64,
    /// Vertical offset of the row top, relative to the item grid origin.
    pub y: f64,
    pub page: usize,
}

/// Result of one legend layout pass.
///
/// Identical inputs always produce an identical layout; the only mutable
/// state afterwards is the current page.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendLayout {
    pub entries: Vec<PlacedEntry>,
    pub rows: Vec<LegendRow>,
    /// Tight bounds of the aligned legend block, title included.
    pub bounds: Rect,
    pub title_lines: Vec<String>,
    pub title_height: f64,
    pub is_paging: bool,
    pub page_count: usize,
    current_page: usize,
}

impl LegendLayout {
    /// 1-based current page, always within `[1, page_count]`.
    #[must_use]
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Moves to a page, clamping into `[1, page_count]`.
    pub fn set_current_page(&mut self, page: usize) {
        self.current_page = page.clamp(1, self.page_count.max(1));
    }

    /// Whether forward/backward affordances should render.
    #[must_use]
    pub fn shows_navigation(&self, config: &LegendConfig) -> bool {
        self.is_paging && !config.page_mode
    }

    /// Vertical translation applied to the item grid for the current page:
    /// the summed heights of all previous pages.
    #[must_use]
    pub fn page_offset(&self) -> f64 {
        self.rows
            .iter()
            .filter(|row| row.page + 1 < self.current_page)
            .map(|row| row.height)
            .sum()
    }

    /// Entries belonging to the current page, in input order.
    pub fn visible_entries(&self) -> impl Iterator<Item = &PlacedEntry> {
        let page = self.current_page - 1;
        self.entries.iter().filter(move |placed| placed.page == page)
    }
}

/// Lays legend entries out into rows, columns, and pages.
///
/// Entries are processed strictly in input order; each entry's position
/// depends on its predecessor's. Hidden entries are skipped entirely; the
/// first rendered entry anchors the start coordinate. An entry whose start
/// offset falls outside the bounds wraps to the next row; an entry that
/// merely overflows past the right edge stays and is clipped by the host.
pub fn layout_legend(
    entries: &[LegendEntry],
    bounds: Rect,
    config: &LegendConfig,
    measurer: &dyn TextMeasurer,
) -> ChartResult<LegendLayout> {
    config.validate()?;
    let bounds = bounds.validate()?;

    let (title_lines, title_height) = layout_title(bounds, config, measurer);

    // Pass one: measure.
    let measured: Vec<LegendEntry> = entries
        .iter()
        .filter(|entry| entry.visible)
        .cloned()
        .map(|mut entry| {
            entry.text_size = if entry.text.is_empty() {
                // Zero text width still reserves shape and padding.
                TextSize::new(0.0, config.font.size)
            } else {
                measurer.measure(&entry.text, &config.font)
            };
            entry
        })
        .collect();

    let fixed_width = if config.fixed_item_width {
        measured
            .iter()
            .map(|entry| OrderedFloat(item_width(entry.text_size, config)))
            .max()
            .map(|width| width.into_inner())
    } else {
        None
    };

    // Pass two: walk in order, accumulating row extents.
    let mut rows: SmallVec<[LegendRow; 8]> = SmallVec::new();
    let mut placements: Vec<(usize, f64)> = Vec::with_capacity(measured.len());
    let mut row_width = 0.0f64;
    let mut row_height = 0.0f64;
    let mut row_index = 0usize;
    let mut legend_width = 0.0f64;

    for (index, entry) in measured.iter().enumerate() {
        let width = fixed_width.unwrap_or_else(|| item_width(entry.text_size, config));
        let height = entry.text_size.height.max(config.shape_size.height);

        let vertical = config.orientation == LegendOrientation::Vertical;
        let wraps = index > 0 && (vertical || row_width > bounds.width);
        if wraps {
            rows.push(LegendRow {
                width: row_width,
                height: row_height,
                y: 0.0,
                page: 0,
            });
            row_index += 1;
            row_width = 0.0;
            row_height = 0.0;
        }

        placements.push((row_index, row_width));
        row_width += width;
        row_height = row_height.max(height);
        legend_width = legend_width.max(row_width);
    }

    if !measured.is_empty() {
        rows.push(LegendRow {
            width: row_width,
            height: row_height,
            y: 0.0,
            page: 0,
        });
    }

    // Row tops and pagination.
    let item_area_height = (bounds.height - title_height).max(0.0);
    let total_height: f64 = rows.iter().map(|row| row.height).sum();
    let is_paging = total_height > item_area_height;
    let page_height_budget = if is_paging && !config.page_mode {
        (item_area_height - config.nav_reservation).max(0.0)
    } else {
        item_area_height
    };

    let mut page = 0usize;
    let mut page_used = 0.0f64;
    let mut y_in_page = 0.0f64;
    for row in rows.iter_mut() {
        if is_paging && page_used > 0.0 && page_used + row.height > page_height_budget {
            page += 1;
            page_used = 0.0;
            y_in_page = 0.0;
        }
        row.y = y_in_page;
        row.page = page;
        page_used += row.height;
        y_in_page += row.height;
    }
    let page_count = if rows.is_empty() { 1 } else { page + 1 };

    // Alignment of the whole block along the horizontal axis.
    let legend_width = legend_width.min(bounds.width);
    let aligned_x = align_legend(bounds.x, bounds.width, legend_width, config.alignment);

    let entries = measured
        .into_iter()
        .zip(placements)
        .map(|(mut entry, (row, offset))| {
            let row_meta = rows[row];
            entry.location = Point::new(aligned_x + offset, bounds.y + title_height + row_meta.y);
            PlacedEntry {
                entry,
                row,
                page: row_meta.page,
            }
        })
        .collect();

    let block_height = (title_height + total_height).min(bounds.height);
    debug!(
        rows = rows.len(),
        page_count, is_paging, legend_width, "legend layout complete"
    );

    Ok(LegendLayout {
        entries,
        rows: rows.into_vec(),
        bounds: Rect::new(aligned_x, bounds.y, legend_width, block_height),
        title_lines,
        title_height,
        is_paging,
        page_count,
        current_page: 1,
    })
}

/// Horizontal offset of a legend block inside its available span.
#[must_use]
pub fn align_legend(start: f64, available: f64, legend_size: f64, alignment: LegendAlignment) -> f64 {
    match alignment {
        LegendAlignment::Far => available - legend_size - start,
        LegendAlignment::Center => (available - legend_size) / 2.0,
        LegendAlignment::Near => start,
    }
}

/// Full cell width of one item: shape, text, and padding on both sides.
fn item_width(text_size: TextSize, config: &LegendConfig) -> f64 {
    config.shape_size.width + text_size.width + 2.0 * config.item_padding
}

/// Greedy word wrap of the title against its width limit.
fn layout_title(
    bounds: Rect,
    config: &LegendConfig,
    measurer: &dyn TextMeasurer,
) -> (Vec<String>, f64) {
    let Some(title) = config.title.as_deref() else {
        return (Vec::new(), 0.0);
    };
    if title.is_empty() {
        return (Vec::new(), 0.0);
    }

    let limit = config.max_title_width.unwrap_or(bounds.width);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();

    for word in title.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if !current.is_empty() && measurer.measure(&candidate, &config.title_font).width > limit {
            lines.push(std::mem::take(&mut current));
            current = word.to_owned();
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }

    let line_height = measurer.measure(title, &config.title_font).height;
    let height = lines.len() as f64 * line_height;
    (lines, height)
}
