use super::*;
use std::sync::Arc;

#[test]
fn starts_at_zero_and_increments() {
    let tracker = ModificationTracker::new();
    assert_eq!(tracker.modification_count(), 0);
    assert_eq!(tracker.increment(), 1);
    assert_eq!(tracker.increment(), 2);
    assert_eq!(tracker.modification_count(), 2);
}

#[test]
fn concurrent_increments_are_not_lost() {
    let tracker = Arc::new(ModificationTracker::new());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let tracker = Arc::clone(&tracker);
            std::thread::spawn(move || {
                for _ in 0..1000 {
                    tracker.increment();
                }
            })
        })
        .collect();
    for handle in handles {
        assert!(handle.join().is_ok());
    }
    assert_eq!(tracker.modification_count(), 4000);
}
