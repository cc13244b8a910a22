use super::*;

#[test]
fn span_round_trips_through_minutes() {
    let s = Span::from_minutes(5.0);
    assert_eq!(s.seconds(), 300);
    assert_eq!(s.minutes(), 5.0);
}

#[test]
fn span_addition_and_negation() {
    let a = Span::from_seconds(120);
    let b = Span::from_seconds(-45);
    assert_eq!((a + b).seconds(), 75);
    assert_eq!((-a).seconds(), -120);
}

#[test]
fn instant_minus_instant_yields_span() {
    let a = Instant::from_seconds_since_epoch(1_000);
    let b = Instant::from_seconds_since_epoch(700);
    assert_eq!((a - b).seconds(), 300);
    assert_eq!((b - a).seconds(), -300);
}

#[test]
fn instant_plus_span_is_inverse_of_minus() {
    let a = Instant::from_seconds_since_epoch(500);
    let shifted = a + Span::from_seconds(90);
    assert_eq!(shifted - a, Span::from_seconds(90));
}

#[test]
fn instant_display_wraps_to_hh_mm_ss_of_day() {
    let a = Instant::from_seconds_since_epoch(8 * 3600 + 5 * 60);
    assert_eq!(a.to_string(), "08:05:00");
}
