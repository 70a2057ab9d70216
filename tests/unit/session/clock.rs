use super::*;

#[test]
fn manual_clock_moves_only_when_told() {
    let mut clock = ManualClock::new();
    assert_eq!(clock.now(), Duration::ZERO);
    assert_eq!(clock.now(), Duration::ZERO);

    clock.advance(Duration::from_millis(5));
    assert_eq!(clock.now(), Duration::from_millis(5));

    clock.sleep(Duration::from_millis(3));
    assert_eq!(clock.now(), Duration::from_millis(8));
    assert_eq!(clock.sleeps(), &[Duration::from_millis(3)]);
}

#[test]
fn manual_clock_tick_applies_per_read() {
    let clock = ManualClock::with_tick(Duration::from_millis(2));
    assert_eq!(clock.now(), Duration::ZERO);
    assert_eq!(clock.now(), Duration::from_millis(2));
    assert_eq!(clock.now(), Duration::from_millis(4));
}

#[test]
fn system_clock_is_monotonic() {
    let mut clock = SystemClock::new();
    let a = clock.now();
    clock.sleep(Duration::from_millis(1));
    let b = clock.now();
    assert!(b >= a + Duration::from_millis(1));
}
