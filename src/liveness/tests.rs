use super::{LivenessTracker, Reachability, spawn_expiry_monitor};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::Instant;

const EXPIRY: Duration = Duration::from_secs(60);
const EPSILON: Duration = Duration::from_millis(10);

#[test]
fn test_tracker_starts_unreachable() {
    let tracker = LivenessTracker::new(EXPIRY);
    assert!(!tracker.is_alive());
    assert!(tracker.is_not_alive());
    assert_eq!(tracker.state(), Reachability::Unreachable);
    assert!(tracker.last_seen().is_none());
}

#[test]
fn test_from_minutes() {
    let tracker = LivenessTracker::from_minutes(5);
    assert_eq!(tracker.expiry(), Duration::from_secs(300));
}

#[test]
fn test_from_minutes_saturates() {
    let tracker = LivenessTracker::from_minutes(u64::MAX / 30);
    assert_eq!(tracker.expiry(), Duration::from_secs(u64::MAX));

    let now = Instant::now();
    tracker.mark_alive_at(now);
    assert!(!tracker.expiry_check_at(now + Duration::from_secs(3600)));
    assert!(tracker.is_alive());
}

#[test]
fn test_mark_alive_makes_reachable_immediately() {
    let tracker = LivenessTracker::new(EXPIRY);
    tracker.mark_alive();
    assert!(tracker.is_alive());
    assert_eq!(tracker.state(), Reachability::Alive);
    assert!(tracker.last_seen().is_some());
}

#[test]
fn test_mark_alive_reports_transition_only_once() {
    let tracker = LivenessTracker::new(EXPIRY);
    let now = Instant::now();
    assert!(tracker.mark_alive_at(now));
    assert!(!tracker.mark_alive_at(now + Duration::from_secs(1)));
    assert_eq!(tracker.last_seen(), Some(now + Duration::from_secs(1)));
}

#[test]
fn test_expiry_check_before_expiry_keeps_alive() {
    let tracker = LivenessTracker::new(EXPIRY);
    let t = Instant::now();
    tracker.mark_alive_at(t);

    assert!(!tracker.expiry_check_at(t + EXPIRY - EPSILON));
    assert!(tracker.is_alive());
}

#[test]
fn test_expiry_check_exactly_at_expiry_keeps_alive() {
    let tracker = LivenessTracker::new(EXPIRY);
    let t = Instant::now();
    tracker.mark_alive_at(t);

    assert!(!tracker.expiry_check_at(t + EXPIRY));
    assert!(tracker.is_alive());
}

#[test]
fn test_expiry_check_after_expiry_marks_unreachable() {
    let tracker = LivenessTracker::new(EXPIRY);
    let t = Instant::now();
    tracker.mark_alive_at(t);

    assert!(tracker.expiry_check_at(t + EXPIRY + EPSILON));
    assert!(tracker.is_not_alive());
    assert_eq!(tracker.state(), Reachability::Unreachable);
}

#[test]
fn test_expiry_check_on_unreachable_is_noop() {
    let tracker = LivenessTracker::new(EXPIRY);
    assert!(!tracker.expiry_check_at(Instant::now() + EXPIRY * 10));
    assert!(tracker.is_not_alive());
}

#[test]
fn test_later_poll_postpones_expiry() {
    let tracker = LivenessTracker::new(EXPIRY);
    let t = Instant::now();
    tracker.mark_alive_at(t);
    tracker.mark_alive_at(t + Duration::from_secs(30));

    assert!(!tracker.expiry_check_at(t + EXPIRY + EPSILON));
    assert!(tracker.is_alive());
    assert!(tracker.expiry_check_at(t + Duration::from_secs(30) + EXPIRY + EPSILON));
}

#[test]
fn test_mark_alive_revives_after_expiry() {
    let tracker = LivenessTracker::new(EXPIRY);
    let t = Instant::now();
    tracker.mark_alive_at(t);
    tracker.expiry_check_at(t + EXPIRY * 2);
    assert!(tracker.is_not_alive());

    assert!(tracker.mark_alive_at(t + EXPIRY * 3));
    assert!(tracker.is_alive());
}

#[test]
fn test_concurrent_mark_alive() {
    let tracker = Arc::new(LivenessTracker::new(EXPIRY));

    let transitions: usize = (0..8)
        .map(|_| {
            let tracker = tracker.clone();
            thread::spawn(move || {
                (0..100)
                    .filter(|_| tracker.mark_alive_at(Instant::now()))
                    .count()
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().unwrap())
        .sum();

    assert_eq!(transitions, 1);
    assert!(tracker.is_alive());
    assert!(tracker.last_seen().is_some());
}

#[tokio::test(start_paused = true)]
async fn test_monitor_expires_silent_consumer() {
    let tracker = Arc::new(LivenessTracker::new(EXPIRY));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = spawn_expiry_monitor(tracker.clone(), Duration::from_secs(5), shutdown_rx);

    tracker.mark_alive();
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(tracker.is_alive());

    tokio::time::sleep(Duration::from_secs(40)).await;
    assert!(tracker.is_not_alive());

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_monitor_keeps_polling_consumer_alive() {
    let tracker = Arc::new(LivenessTracker::new(EXPIRY));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = spawn_expiry_monitor(tracker.clone(), Duration::from_secs(5), shutdown_rx);

    for _ in 0..6 {
        tracker.mark_alive();
        tokio::time::sleep(Duration::from_secs(30)).await;
        assert!(tracker.is_alive());
    }

    shutdown_tx.send(true).unwrap();
    handle.await.unwrap();
}

#[tokio::test]
async fn test_monitor_stops_when_sender_dropped() {
    let tracker = Arc::new(LivenessTracker::new(EXPIRY));
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let handle = spawn_expiry_monitor(tracker, Duration::from_millis(10), shutdown_rx);

    drop(shutdown_tx);
    tokio::time::timeout(Duration::from_secs(2), handle)
        .await
        .expect("monitor did not stop")
        .unwrap();
}
