use super::MessageBuffer;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

fn bodies(buffer: &MessageBuffer) -> Vec<String> {
    let mut out: Vec<String> = buffer
        .drain_all()
        .into_iter()
        .map(|m| m.into_body())
        .collect();
    out.sort();
    out
}

#[test]
fn test_buffer_new_is_empty() {
    let buffer = MessageBuffer::new(10);
    assert!(buffer.is_empty());
    assert_eq!(buffer.len(), 0);
    assert_eq!(buffer.limit(), 10);
}

#[test]
fn test_insert_accepts_up_to_limit() {
    let buffer = MessageBuffer::new(3);
    assert!(buffer.insert("one"));
    assert!(buffer.insert("two"));
    assert!(buffer.insert("three"));
    assert_eq!(buffer.len(), 3);
}

// Boundary policy: the insert that would exceed the limit is rejected, so the
// buffer never holds more than `limit` messages (no `limit + 1` overshoot).
#[test]
fn test_insert_rejected_once_limit_reached() {
    let buffer = MessageBuffer::new(3);
    for body in ["one", "two", "three"] {
        assert!(buffer.insert(body));
    }

    assert!(!buffer.insert("four"));
    assert!(!buffer.insert("five"));
    assert_eq!(buffer.len(), 3);
}

#[test]
fn test_rejected_insert_leaves_buffer_unchanged() {
    let buffer = MessageBuffer::new(2);
    buffer.insert("a");
    buffer.insert("b");

    assert!(!buffer.insert("c"));
    assert_eq!(bodies(&buffer), vec!["a", "b"]);
}

#[test]
fn test_zero_limit_rejects_everything() {
    let buffer = MessageBuffer::new(0);
    assert!(!buffer.insert("a"));
    assert!(buffer.is_empty());
}

#[test]
fn test_insert_accepts_empty_body() {
    let buffer = MessageBuffer::new(2);
    assert!(buffer.insert(""));
    assert_eq!(buffer.len(), 1);
    assert_eq!(bodies(&buffer), vec![""]);
}

#[test]
fn test_drain_empty_buffer() {
    let buffer = MessageBuffer::new(5);
    let drained = buffer.drain_all();
    assert!(drained.is_empty());
    assert_eq!(drained.capacity(), 0);
}

#[test]
fn test_drain_returns_each_message_once() {
    let buffer = MessageBuffer::new(10);
    for i in 0..5 {
        assert!(buffer.insert(format!("msg-{i}")));
    }

    let drained = buffer.drain_all();
    assert_eq!(drained.len(), 5);
    assert!(buffer.is_empty());

    let ids: HashSet<_> = drained.iter().map(|m| m.id()).collect();
    assert_eq!(ids.len(), 5);

    let mut got: Vec<_> = drained.iter().map(|m| m.body().to_string()).collect();
    got.sort();
    assert_eq!(got, vec!["msg-0", "msg-1", "msg-2", "msg-3", "msg-4"]);

    assert!(buffer.drain_all().is_empty());
}

#[test]
fn test_drain_frees_capacity() {
    let buffer = MessageBuffer::new(1);
    assert!(buffer.insert("first"));
    assert!(!buffer.insert("second"));

    assert_eq!(bodies(&buffer), vec!["first"]);
    assert!(buffer.insert("second"));
}

#[test]
fn test_duplicate_bodies_are_distinct_messages() {
    let buffer = MessageBuffer::new(5);
    buffer.insert("same");
    buffer.insert("same");
    assert_eq!(bodies(&buffer), vec!["same", "same"]);
}

#[test]
fn test_limit_two_scenario() {
    let buffer = MessageBuffer::new(2);
    assert!(buffer.insert("a"));
    assert!(buffer.insert("b"));
    assert!(!buffer.insert("c"));

    assert_eq!(bodies(&buffer), vec!["a", "b"]);
    assert!(buffer.is_empty());
}

#[test]
fn test_concurrent_inserts_never_exceed_limit() {
    let limit = 50;
    let buffer = Arc::new(MessageBuffer::new(limit));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let buffer = buffer.clone();
            thread::spawn(move || {
                (0..25)
                    .filter(|i| buffer.insert(format!("t{t}-{i}")))
                    .count()
            })
        })
        .collect();

    let accepted: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();

    assert_eq!(accepted, limit);
    assert_eq!(buffer.len(), limit);
    assert_eq!(buffer.drain_all().len(), limit);
}

#[test]
fn test_concurrent_insert_and_drain_loses_nothing() {
    let buffer = Arc::new(MessageBuffer::new(usize::MAX));
    let producers = 4;
    let per_producer = 500;

    let handles: Vec<_> = (0..producers)
        .map(|t| {
            let buffer = buffer.clone();
            thread::spawn(move || {
                for i in 0..per_producer {
                    assert!(buffer.insert(format!("{t}-{i}")));
                }
            })
        })
        .collect();

    let mut seen = Vec::new();
    while handles.iter().any(|h| !h.is_finished()) {
        seen.extend(buffer.drain_all().into_iter().map(|m| m.into_body()));
    }
    for h in handles {
        h.join().unwrap();
    }
    seen.extend(buffer.drain_all().into_iter().map(|m| m.into_body()));

    let unique: HashSet<_> = seen.iter().cloned().collect();
    assert_eq!(seen.len(), producers * per_producer);
    assert_eq!(unique.len(), seen.len());
}
