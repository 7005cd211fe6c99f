//! # Event Flow
//!
//! Publish/subscribe through the shared bus, with subscriptions and
//! delayed actions owned by lifecycle hosts.

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use proptest::prelude::*;
    use shared_bus::{EventBus, Handler};
    use st_03_lifecycle::{LifecycleHost, Scheduler};
    use std::sync::Arc;
    use std::time::Duration;

    const FRAME: Duration = Duration::from_millis(16);

    #[test]
    fn test_score_scenario() {
        let bus = EventBus::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let h = Handler::unary(move |score: &u32| sink.lock().push(*score));

        bus.subscribe("score", &h).unwrap();
        bus.trigger_with("score", &5u32).unwrap();
        assert_eq!(*seen.lock(), vec![5]);

        assert!(bus.unsubscribe("score", &h));
        bus.trigger_with("score", &6u32).unwrap();
        assert_eq!(*seen.lock(), vec![5]);
    }

    #[test]
    fn test_absent_unsubscribe_leaves_others_untouched() {
        let bus = EventBus::new();
        let hits = Arc::new(Mutex::new(0u32));
        let sink = hits.clone();
        let registered = Handler::nullary(move || *sink.lock() += 1);
        let stranger = Handler::nullary(|| {});

        bus.subscribe("tick", &registered).unwrap();
        assert!(!bus.unsubscribe("tick", &stranger));
        assert!(!bus.unsubscribe("nowhere", &stranger));

        bus.trigger("tick").unwrap();
        assert_eq!(*hits.lock(), 1);
        assert_eq!(bus.handler_count("tick"), 1);
    }

    #[test]
    fn test_host_owned_subscription_and_delay() {
        let bus = Arc::new(EventBus::new());
        let scheduler = Scheduler::new();
        let log = Arc::new(Mutex::new(Vec::new()));

        let mut host = LifecycleHost::new("ScorePanel", bus.clone(), scheduler.clone());
        let sink = log.clone();
        host.subscribe(
            "score",
            &Handler::unary(move |s: &u32| sink.lock().push(format!("score {s}"))),
        )
        .unwrap();
        let sink = log.clone();
        let bus_for_action = bus.clone();
        host.delay(Duration::from_millis(30), move || {
            sink.lock().push("delayed".to_string());
            let _ = bus_for_action.trigger_with("score", &10u32);
        })
        .unwrap();

        scheduler.tick(FRAME);
        bus.trigger_with("score", &1u32).unwrap();
        scheduler.tick(FRAME);
        assert_eq!(*log.lock(), vec!["score 1", "delayed", "score 10"]);

        host.teardown();
        bus.trigger_with("score", &2u32).unwrap();
        assert_eq!(log.lock().len(), 3);
    }

    #[test]
    fn test_teardown_cancels_before_due() {
        let bus = Arc::new(EventBus::new());
        let scheduler = Scheduler::new();
        let fired = Arc::new(Mutex::new(false));
        let sink = fired.clone();

        {
            let mut host = LifecycleHost::new("Toast", bus, scheduler.clone());
            host.delay_frames(3, move || *sink.lock() = true).unwrap();
            scheduler.tick(FRAME);
        }

        for _ in 0..5 {
            scheduler.tick(FRAME);
        }
        assert!(!*fired.lock());
    }

    proptest! {
        #[test]
        fn prop_handlers_fire_in_subscription_order(count in 1usize..12, triggers in 1usize..4) {
            let bus = EventBus::new();
            let order = Arc::new(Mutex::new(Vec::new()));
            for i in 0..count {
                let sink = order.clone();
                bus.subscribe("n", &Handler::nullary(move || sink.lock().push(i))).unwrap();
            }

            for _ in 0..triggers {
                bus.trigger("n").unwrap();
            }

            let expected: Vec<usize> = (0..triggers).flat_map(|_| 0..count).collect();
            prop_assert_eq!(order.lock().clone(), expected);
        }
    }
}
