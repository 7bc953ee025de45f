use super::*;
use std::thread;

#[test]
fn test_search_limits_depth_only() {
    let limits = SearchLimits::depth(5);
    assert_eq!(limits.depth, 5);
    assert!(limits.move_time.is_none());
}

#[test]
fn test_search_limits_time_only_is_unbounded_in_depth() {
    let limits = SearchLimits::time(Duration::from_millis(100));
    assert_eq!(limits.depth, u8::MAX);
    assert_eq!(limits.move_time, Some(Duration::from_millis(100)));
}

#[test]
fn test_time_control_expiry() {
    let tc = TimeControl::start(Some(Duration::from_millis(10)));
    assert!(!tc.check_time());

    thread::sleep(Duration::from_millis(20));
    assert!(tc.check_time());
    assert!(tc.is_stopped());
}

#[test]
fn test_time_control_no_limit() {
    let tc = TimeControl::start(None);
    thread::sleep(Duration::from_millis(5));
    assert!(!tc.check_time());
    assert!(!tc.is_stopped());
}

#[test]
fn test_manual_stop_latches() {
    let tc = TimeControl::start(None);
    tc.stop();
    assert!(tc.is_stopped());
    assert!(tc.check_time());
}

#[test]
fn test_check_interval() {
    let tc = TimeControl::start(None);
    assert!(tc.should_check_time(0));
    assert!(!tc.should_check_time(1));
    assert!(tc.should_check_time(1024));
}
