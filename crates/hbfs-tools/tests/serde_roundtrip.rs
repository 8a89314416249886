#![cfg(feature = "serde")]

use hbfs_tools::{tags, TraceEvent, TraceLog};

#[test]
fn trace_log_json_roundtrip() {
    let log = TraceLog {
        events: vec![
            TraceEvent::new(1, tags::INIT).with_a(5),
            TraceEvent::new(9, tags::SOLUTION).with_a(3).with_b(120),
            TraceEvent::new(12, tags::TEARDOWN),
        ],
    };

    let json = serde_json::to_string(&log).expect("serialize");
    let roundtrip: TraceLog = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(roundtrip, log);
}

#[test]
fn event_fields_are_flat() {
    let value = serde_json::to_value(TraceEvent::new(2, tags::REPORT).with_a(10).with_b(11)).expect("serialize");
    assert_eq!(value["tag"], "hbfs.report");
    assert_eq!(value["a"], 10);
}
