use chart_layout::geometry::Rect;
use chart_layout::legend::{LegendConfig, LegendEntry, layout_legend};
use chart_layout::render::Color;
use chart_layout::text::CharGridMeasurer;
use proptest::prelude::*;

proptest! {
    #[test]
    fn layout_is_idempotent_for_arbitrary_entries(
        texts in prop::collection::vec("[a-z]{0,12}", 1..24),
        width in 40.0f64..400.0,
        height in 20.0f64..200.0
    ) {
        let entries: Vec<LegendEntry> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| LegendEntry::new(text.clone(), Color::rgb(0.1, 0.3, 0.7), index))
            .collect();

        let bounds = Rect::new(0.0, 0.0, width, height);
        let config = LegendConfig::default();
        let measurer = CharGridMeasurer::default();

        let first = layout_legend(&entries, bounds, &config, &measurer).expect("valid layout");
        let second = layout_legend(&entries, bounds, &config, &measurer).expect("valid layout");
        prop_assert_eq!(&first, &second);
    }

    #[test]
    fn every_entry_is_assigned_to_a_valid_page(
        texts in prop::collection::vec("[a-z]{1,10}", 1..32),
        width in 60.0f64..300.0,
        height in 20.0f64..120.0
    ) {
        let entries: Vec<LegendEntry> = texts
            .iter()
            .enumerate()
            .map(|(index, text)| LegendEntry::new(text.clone(), Color::rgb(0.1, 0.3, 0.7), index))
            .collect();

        let bounds = Rect::new(0.0, 0.0, width, height);
        let layout = layout_legend(
            &entries,
            bounds,
            &LegendConfig::default(),
            &CharGridMeasurer::default(),
        )
        .expect("valid layout");

        prop_assert_eq!(layout.entries.len(), entries.len());
        for placed in &layout.entries {
            prop_assert!(placed.page < layout.page_count);
            prop_assert!(placed.row < layout.rows.len());
        }
    }
}
