use chart_layout::axis::{Axis, Orientation, RangeOptions};
use chart_layout::coords::{pixel_to_value, value_to_pixel};
use chart_layout::geometry::Rect;
use proptest::prelude::*;

fn linear_axis(start: f64, span: f64) -> Axis {
    Axis::numeric(
        Orientation::Horizontal,
        &[start, start + span],
        RangeOptions::default(),
    )
    .expect("valid axis")
}

fn log_axis(exp_lo: f64, exp_hi: f64) -> Axis {
    Axis::logarithmic(
        Orientation::Horizontal,
        &[10f64.powf(exp_lo), 10f64.powf(exp_hi)],
        RangeOptions::default(),
        10.0,
    )
    .expect("valid axis")
}

proptest! {
    #[test]
    fn linear_round_trip_property(
        start in -1.0e6f64..1.0e6,
        span in 0.001f64..1.0e6,
        value_factor in 0.0f64..1.0
    ) {
        let axis = linear_axis(start, span);
        let value = start + value_factor * span;
        let plot = Rect::new(0.0, 0.0, 2048.0, 1024.0);

        let px = value_to_pixel(value, &axis, plot).expect("to pixel");
        let recovered = pixel_to_value(px, &axis, plot).expect("from pixel");

        prop_assert!((recovered - value).abs() <= span * 1e-7 + 1e-7);
    }

    #[test]
    fn mapping_is_monotonic(
        start in -1.0e6f64..1.0e6,
        span in 0.001f64..1.0e6,
        factor_a in 0.0f64..1.0,
        factor_b in 0.0f64..1.0,
        inverted in any::<bool>()
    ) {
        let mut axis = linear_axis(start, span);
        axis.set_inverted(inverted);

        let low = start + factor_a.min(factor_b) * span;
        let high = start + factor_a.max(factor_b) * span;
        let plot = Rect::new(0.0, 0.0, 2048.0, 1024.0);

        let px_low = value_to_pixel(low, &axis, plot).expect("to pixel");
        let px_high = value_to_pixel(high, &axis, plot).expect("to pixel");

        if inverted {
            prop_assert!(px_high <= px_low + 1e-9);
        } else {
            prop_assert!(px_low <= px_high + 1e-9);
        }
    }

    #[test]
    fn log_round_trip_property(
        exp_lo in -3.0f64..3.0,
        span in 0.1f64..4.0,
        value_factor in 0.0f64..1.0
    ) {
        let axis = log_axis(exp_lo, exp_lo + span);
        let value = 10f64.powf(exp_lo + value_factor * span);
        let plot = Rect::new(0.0, 0.0, 2048.0, 1024.0);

        let px = value_to_pixel(value, &axis, plot).expect("to pixel");
        let recovered = pixel_to_value(px, &axis, plot).expect("from pixel");

        prop_assert!((recovered - value).abs() <= value * 1e-6);
    }

    #[test]
    fn log_mapping_is_monotonic(
        exp_lo in -3.0f64..3.0,
        span in 0.1f64..4.0,
        factor_a in 0.0f64..1.0,
        factor_b in 0.0f64..1.0
    ) {
        let axis = log_axis(exp_lo, exp_lo + span);
        let low = 10f64.powf(exp_lo + factor_a.min(factor_b) * span);
        let high = 10f64.powf(exp_lo + factor_a.max(factor_b) * span);
        let plot = Rect::new(0.0, 0.0, 2048.0, 1024.0);

        let px_low = value_to_pixel(low, &axis, plot).expect("to pixel");
        let px_high = value_to_pixel(high, &axis, plot).expect("to pixel");
        prop_assert!(px_low <= px_high + 1e-9);
    }
}
