//! Selection and highlight state engine.
//!
//! Elements are addressed by a typed identity instead of parsed id strings;
//! clicks resolve to a mode-dependent selection key, and every transition
//! recomputes the full visual diff so no stale partial state survives.

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::render::VisualStyle;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    SeriesSegment,
    Marker,
    LegendItem,
    NavControl,
    Background,
}

/// Stable identity of one renderable element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementId {
    pub series_index: usize,
    pub point_index: Option<usize>,
    pub kind: ElementKind,
}

impl ElementId {
    #[must_use]
    pub const fn series_segment(series_index: usize, point_index: usize) -> Self {
        Self {
            series_index,
            point_index: Some(point_index),
            kind: ElementKind::SeriesSegment,
        }
    }

    #[must_use]
    pub const fn marker(series_index: usize, point_index: usize) -> Self {
        Self {
            series_index,
            point_index: Some(point_index),
            kind: ElementKind::Marker,
        }
    }

    #[must_use]
    pub const fn legend_item(series_index: usize) -> Self {
        Self {
            series_index,
            point_index: None,
            kind: ElementKind::LegendItem,
        }
    }

    #[must_use]
    pub const fn nav_control() -> Self {
        Self {
            series_index: 0,
            point_index: None,
            kind: ElementKind::NavControl,
        }
    }

    #[must_use]
    pub const fn background() -> Self {
        Self {
            series_index: 0,
            point_index: None,
            kind: ElementKind::Background,
        }
    }

    /// Chrome elements never participate in selection or dimming.
    #[must_use]
    fn is_chrome(self) -> bool {
        matches!(self.kind, ElementKind::NavControl | ElementKind::Background)
    }
}

/// Granularity of what a click affects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum SelectionMode {
    #[default]
    None,
    Series,
    Point,
    Cluster,
}

/// Mode-resolved selection key stored in the selected set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionKey {
    /// Every element of one series, point index ignored.
    Series(usize),
    /// Exactly one `(series, point)` pair, paired markers included.
    Point {
        series_index: usize,
        point_index: usize,
    },
    /// All elements across all series sharing one point index.
    Cluster(usize),
}

impl SelectionKey {
    #[must_use]
    fn matches(self, element: ElementId) -> bool {
        if element.is_chrome() {
            return false;
        }
        match self {
            SelectionKey::Series(series_index) => element.series_index == series_index,
            SelectionKey::Point {
                series_index,
                point_index,
            } => {
                element.series_index == series_index && element.point_index == Some(point_index)
            }
            SelectionKey::Cluster(point_index) => element.point_index == Some(point_index),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionConfig {
    pub mode: SelectionMode,
    pub multi_select: bool,
    /// Opacity applied to non-selected elements while a selection exists.
    pub dim_opacity: f64,
    /// Stroke width added to selected rectangular elements.
    pub selected_stroke_extra: f64,
    /// Configured stroke width non-selected elements revert to.
    pub base_stroke_width: f64,
    /// Pattern URL applied to selected entries' fill, when set.
    pub pattern_fill: Option<String>,
    /// Explicit highlight fill, used when no pattern is configured.
    pub highlight_fill: Option<String>,
}

impl Default for SelectionConfig {
    fn default() -> Self {
        Self {
            mode: SelectionMode::None,
            multi_select: false,
            dim_opacity: 0.3,
            selected_stroke_extra: 1.0,
            base_stroke_width: 1.0,
            pattern_fill: None,
            highlight_fill: None,
        }
    }
}

/// Full visual state for every rendered element, recomputed per transition.
pub type VisualDiff = IndexMap<ElementId, VisualStyle>;

/// Per-chart selection state.
///
/// Persists across measuring passes; only click events and batch restores
/// mutate it. When `multi_select` is disabled the selected set never holds
/// more than one key.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    config: SelectionConfig,
    selected: IndexSet<SelectionKey>,
    previously_affected: SmallVec<[ElementId; 8]>,
}

impl SelectionState {
    #[must_use]
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            config,
            selected: IndexSet::new(),
            previously_affected: SmallVec::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &SelectionConfig {
        &self.config
    }

    #[must_use]
    pub fn selected_keys(&self) -> impl Iterator<Item = SelectionKey> + '_ {
        self.selected.iter().copied()
    }

    #[must_use]
    pub fn is_selected(&self, key: SelectionKey) -> bool {
        self.selected.contains(&key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Elements styled away from baseline by the last transition.
    #[must_use]
    pub fn previously_affected(&self) -> &[ElementId] {
        &self.previously_affected
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    /// Applies one abstracted click and returns the full visual diff.
    ///
    /// Navigation controls are a selection no-op; clicks resolving to no
    /// selectable key clear the whole selection.
    pub fn handle_click(&mut self, target: ElementId, elements: &[ElementId]) -> VisualDiff {
        if target.kind != ElementKind::NavControl {
            match self.resolve(target) {
                Some(key) => self.toggle(key),
                None => {
                    debug!("click outside selectable elements, clearing selection");
                    self.selected.clear();
                }
            }
        }
        self.compute_visual_diff(elements)
    }

    /// Restores a persisted selection, applying keys sequentially in list
    /// order; each application mutates state before the next begins.
    pub fn apply_selection(&mut self, keys: &[SelectionKey], elements: &[ElementId]) -> VisualDiff {
        for &key in keys {
            self.toggle(key);
        }
        self.compute_visual_diff(elements)
    }

    fn resolve(&self, target: ElementId) -> Option<SelectionKey> {
        if target.is_chrome() {
            return None;
        }
        match self.config.mode {
            SelectionMode::None => None,
            SelectionMode::Series => Some(SelectionKey::Series(target.series_index)),
            SelectionMode::Point => target.point_index.map(|point_index| SelectionKey::Point {
                series_index: target.series_index,
                point_index,
            }),
            SelectionMode::Cluster => target.point_index.map(SelectionKey::Cluster),
        }
    }

    fn toggle(&mut self, key: SelectionKey) {
        if self.selected.shift_remove(&key) {
            debug!(?key, "deselected");
            return;
        }
        if !self.config.multi_select {
            self.selected.clear();
        }
        self.selected.insert(key);
        debug!(?key, selected = self.selected.len(), "selected");
    }

    /// Recomputes the visual state of every element from scratch.
    ///
    /// The previously-affected list is drained before this pass writes to it,
    /// so no stale handles leak across passes.
    pub fn compute_visual_diff(&mut self, elements: &[ElementId]) -> VisualDiff {
        self.previously_affected.clear();

        let base = self.config.base_stroke_width;
        let mut diff = VisualDiff::with_capacity(elements.len());

        if self.selected.is_empty() {
            for &element in elements {
                diff.insert(element, VisualStyle::full(base));
            }
            return diff;
        }

        let selected_fill = self
            .config
            .pattern_fill
            .clone()
            .or_else(|| self.config.highlight_fill.clone());

        for &element in elements {
            let style = if element.is_chrome() {
                VisualStyle::full(base)
            } else if self.selected.iter().any(|key| key.matches(element)) {
                let stroke = if element.kind == ElementKind::SeriesSegment {
                    base + self.config.selected_stroke_extra
                } else {
                    base
                };
                self.previously_affected.push(element);
                VisualStyle {
                    opacity: 1.0,
                    stroke_width: stroke,
                    fill_override: selected_fill.clone(),
                }
            } else {
                self.previously_affected.push(element);
                VisualStyle {
                    opacity: self.config.dim_opacity,
                    stroke_width: base,
                    fill_override: None,
                }
            };
            diff.insert(element, style);
        }

        diff
    }
}
