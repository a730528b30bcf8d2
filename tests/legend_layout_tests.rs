use chart_layout::geometry::{Rect, Size};
use chart_layout::legend::{
    LegendAlignment, LegendConfig, LegendEntry, LegendOrientation, align_legend, layout_legend,
};
use chart_layout::render::Color;
use chart_layout::text::{Font, TextMeasurer, TextSize};

/// Measurer with one fixed answer for every string, for exact geometry.
struct FixedMeasurer {
    size: TextSize,
}

impl TextMeasurer for FixedMeasurer {
    fn measure(&self, text: &str, _font: &Font) -> TextSize {
        if text.is_empty() {
            return TextSize::new(0.0, self.size.height);
        }
        self.size
    }
}

/// Measurer scaling width with character count (10px per char, 10px tall).
struct PerCharMeasurer;

impl TextMeasurer for PerCharMeasurer {
    fn measure(&self, text: &str, _font: &Font) -> TextSize {
        TextSize::new(text.chars().count() as f64 * 10.0, 10.0)
    }
}

fn entry(text: &str) -> LegendEntry {
    LegendEntry::new(text, Color::rgb(0.2, 0.4, 0.8), 0)
}

fn base_config() -> LegendConfig {
    LegendConfig {
        item_padding: 8.0,
        shape_size: Size::new(10.0, 10.0),
        ..LegendConfig::default()
    }
}

#[test]
fn three_items_wrap_into_two_rows_at_width_60() {
    let entries = vec![entry("A"), entry("B"), entry("C")];
    let bounds = Rect::new(0.0, 0.0, 60.0, 100.0);
    let measurer = FixedMeasurer {
        size: TextSize::new(20.0, 10.0),
    };

    let layout =
        layout_legend(&entries, bounds, &base_config(), &measurer).expect("valid layout");

    // Per-item width is 20 + 10 + 8 + 8 = 46: A and B start inside the
    // bounds, C starts at 92 and wraps.
    assert_eq!(layout.rows.len(), 2);
    assert_eq!(layout.entries[0].row, 0);
    assert_eq!(layout.entries[1].row, 0);
    assert_eq!(layout.entries[2].row, 1);

    assert_eq!(layout.entries[0].entry.location.x, 0.0);
    assert_eq!(layout.entries[1].entry.location.x, 46.0);
    assert_eq!(layout.entries[2].entry.location.x, 0.0);
    assert_eq!(layout.entries[2].entry.location.y, 10.0);
}

#[test]
fn layout_is_idempotent() {
    let entries = vec![entry("alpha"), entry("beta"), entry("gamma"), entry("d")];
    let bounds = Rect::new(5.0, 5.0, 120.0, 80.0);
    let measurer = PerCharMeasurer;
    let config = base_config();

    let first = layout_legend(&entries, bounds, &config, &measurer).expect("valid layout");
    let second = layout_legend(&entries, bounds, &config, &measurer).expect("valid layout");
    assert_eq!(first, second);
}

#[test]
fn fixed_item_width_uses_the_widest_item() {
    let entries = vec![entry("a"), entry("abc")];
    let bounds = Rect::new(0.0, 0.0, 200.0, 50.0);
    let config = LegendConfig {
        fixed_item_width: true,
        ..base_config()
    };

    let layout = layout_legend(&entries, bounds, &config, &PerCharMeasurer).expect("valid layout");

    // Widest item is 30 + 10 + 16 = 56; the narrow one occupies the same cell.
    assert_eq!(layout.entries[1].entry.location.x, 56.0);
}

#[test]
fn empty_text_still_reserves_shape_and_padding() {
    let entries = vec![entry(""), entry("b")];
    let bounds = Rect::new(0.0, 0.0, 200.0, 50.0);

    let layout =
        layout_legend(&entries, bounds, &base_config(), &PerCharMeasurer).expect("valid layout");

    // Empty-text cell is shape + both paddings = 26.
    assert_eq!(layout.entries[1].entry.location.x, 26.0);
}

#[test]
fn hidden_entries_are_skipped_entirely() {
    let entries = vec![entry("a").hidden(), entry("b")];
    let bounds = Rect::new(0.0, 0.0, 200.0, 50.0);

    let layout =
        layout_legend(&entries, bounds, &base_config(), &PerCharMeasurer).expect("valid layout");

    assert_eq!(layout.entries.len(), 1);
    // The first rendered entry anchors the start coordinate.
    assert_eq!(layout.entries[0].entry.location.x, 0.0);
    assert_eq!(layout.entries[0].entry.text, "b");
}

#[test]
fn alignment_offsets_the_whole_block() {
    assert_eq!(align_legend(0.0, 100.0, 36.0, LegendAlignment::Near), 0.0);
    assert_eq!(align_legend(0.0, 100.0, 36.0, LegendAlignment::Center), 32.0);
    assert_eq!(align_legend(0.0, 100.0, 36.0, LegendAlignment::Far), 64.0);

    let entries = vec![entry("a")];
    let bounds = Rect::new(0.0, 0.0, 100.0, 50.0);
    let config = LegendConfig {
        alignment: LegendAlignment::Far,
        ..base_config()
    };
    let layout = layout_legend(&entries, bounds, &config, &PerCharMeasurer).expect("valid layout");
    assert_eq!(layout.bounds.x, 64.0);
}

#[test]
fn title_is_wrapped_and_reserved_above_items() {
    let entries = vec![entry("a")];
    let bounds = Rect::new(0.0, 0.0, 100.0, 80.0);
    let config = LegendConfig {
        title: Some("Metrics Overview".to_owned()),
        ..base_config()
    };

    let layout = layout_legend(&entries, bounds, &config, &PerCharMeasurer).expect("valid layout");

    // "Metrics Overview" is 160px wide, over the 100px limit: two lines.
    assert_eq!(layout.title_lines, vec!["Metrics", "Overview"]);
    assert_eq!(layout.title_height, 20.0);
    assert_eq!(layout.entries[0].entry.location.y, 20.0);
}

#[test]
fn max_title_width_overrides_bounds_width() {
    let entries = vec![entry("a")];
    let bounds = Rect::new(0.0, 0.0, 300.0, 80.0);
    let config = LegendConfig {
        title: Some("Metrics Overview".to_owned()),
        max_title_width: Some(100.0),
        ..base_config()
    };

    let layout = layout_legend(&entries, bounds, &config, &PerCharMeasurer).expect("valid layout");
    assert_eq!(layout.title_lines.len(), 2);
}

#[test]
fn vertical_legend_paginates_rows() {
    let entries: Vec<LegendEntry> = (0..10).map(|i| entry(&format!("s{i}"))).collect();
    let bounds = Rect::new(0.0, 0.0, 120.0, 35.0);
    let config = LegendConfig {
        orientation: LegendOrientation::Vertical,
        nav_reservation: 5.0,
        ..base_config()
    };

    let mut layout =
        layout_legend(&entries, bounds, &config, &PerCharMeasurer).expect("valid layout");

    // Ten 10px rows against a 30px page budget: three rows per page.
    assert!(layout.is_paging);
    assert_eq!(layout.rows.len(), 10);
    assert_eq!(layout.page_count, 4);
    assert!(layout.shows_navigation(&config));

    assert_eq!(layout.current_page(), 1);
    assert_eq!(layout.visible_entries().count(), 3);
    assert_eq!(layout.page_offset(), 0.0);

    layout.set_current_page(2);
    assert_eq!(layout.page_offset(), 30.0);
    assert_eq!(layout.visible_entries().count(), 3);

    layout.set_current_page(4);
    assert_eq!(layout.visible_entries().count(), 1);

    // Clamping on both ends.
    layout.set_current_page(99);
    assert_eq!(layout.current_page(), 4);
    layout.set_current_page(0);
    assert_eq!(layout.current_page(), 1);
}

#[test]
fn page_mode_drops_navigation_affordances() {
    let entries: Vec<LegendEntry> = (0..10).map(|i| entry(&format!("s{i}"))).collect();
    let bounds = Rect::new(0.0, 0.0, 120.0, 35.0);
    let config = LegendConfig {
        orientation: LegendOrientation::Vertical,
        page_mode: true,
        ..base_config()
    };

    let layout = layout_legend(&entries, bounds, &config, &PerCharMeasurer).expect("valid layout");
    assert!(layout.is_paging);
    assert!(!layout.shows_navigation(&config));
}

#[test]
fn oversized_entry_is_clipped_not_an_error() {
    let entries = vec![entry("an-extremely-long-series-name")];
    let bounds = Rect::new(0.0, 0.0, 50.0, 40.0);

    let layout =
        layout_legend(&entries, bounds, &base_config(), &PerCharMeasurer).expect("valid layout");
    assert_eq!(layout.rows.len(), 1);
    assert!(layout.bounds.width <= 50.0);
}

#[test]
fn invalid_bounds_fail_validation() {
    let entries = vec![entry("a")];
    let bounds = Rect::new(0.0, 0.0, 0.0, 40.0);
    assert!(layout_legend(&entries, bounds, &base_config(), &PerCharMeasurer).is_err());
}
