use chart_layout::axis::{
    CalendarUnit, RangeOptions, compute_time_range, select_calendar_interval,
};
use chart_layout::error::ChartError;
use chrono::{TimeZone, Utc};

#[test]
fn five_minute_span_selects_minutes() {
    let (unit, interval) = select_calendar_interval(300.0, 5).expect("valid span");
    assert_eq!(unit, CalendarUnit::Minutes);
    assert_eq!(interval, 60.0);
}

#[test]
fn five_day_span_selects_days() {
    let (unit, interval) = select_calendar_interval(5.0 * 86_400.0, 5).expect("valid span");
    assert_eq!(unit, CalendarUnit::Days);
    assert_eq!(interval, 86_400.0);
}

#[test]
fn tick_budget_is_one_and_a_half_times_desired() {
    // Seven days at five desired intervals stays within the 7.5-tick budget.
    let (unit, _) = select_calendar_interval(7.0 * 86_400.0, 5).expect("valid span");
    assert_eq!(unit, CalendarUnit::Days);

    // Eight days overflows it and moves up to months.
    let (unit, _) = select_calendar_interval(8.0 * 86_400.0, 5).expect("valid span");
    assert_eq!(unit, CalendarUnit::Months);
}

#[test]
fn millennium_span_uses_year_multiples() {
    let span = 1_000.0 * CalendarUnit::Years.seconds();
    let (unit, interval) = select_calendar_interval(span, 5).expect("valid span");

    assert_eq!(unit, CalendarUnit::Years);
    assert_eq!(interval, 200.0 * CalendarUnit::Years.seconds());
}

#[test]
fn degenerate_span_is_rejected() {
    assert!(select_calendar_interval(0.0, 5).is_err());
    assert!(select_calendar_interval(f64::NAN, 5).is_err());
}

#[test]
fn time_range_over_two_days_uses_day_interval() {
    let start = Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).single().expect("valid date");
    let end = Utc.with_ymd_and_hms(2024, 3, 3, 0, 0, 0).single().expect("valid date");

    let options = RangeOptions {
        desired_interval_count: 4,
        ..RangeOptions::default()
    };
    let range = compute_time_range(&[start, end], options).expect("valid time range");

    assert_eq!(range.interval(), 86_400.0);
    assert!((range.delta() - 2.0 * 86_400.0).abs() <= 1e-6);
    assert_eq!(range.tick_values().len(), 3);
}

#[test]
fn single_timestamp_expands_to_a_minute() {
    let only = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).single().expect("valid date");
    let range = compute_time_range(&[only], RangeOptions::default()).expect("valid time range");
    assert!((range.delta() - 60.0).abs() <= 1e-6);
}

#[test]
fn empty_time_data_is_an_error() {
    let error =
        compute_time_range(&[], RangeOptions::default()).expect_err("empty data must fail");
    assert!(matches!(error, ChartError::EmptyData));
}
