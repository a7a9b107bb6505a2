use serde_json::json;
use tracesheet_core::extract::{KEY_TAG, PARTITION_TAG, PRINT_SPAN, PRODUCE_SPAN, RECEIVE_SPAN};
use tracesheet_core::model::{Span, Tag, Trace};

fn span(id: &str, name: &str, duration: i64, start_time: i64, tags: Vec<Tag>) -> Span {
    Span {
        span_id: id.to_string(),
        operation_name: name.to_string(),
        start_time,
        duration,
        tags,
    }
}

fn tag(key: &str, value: serde_json::Value) -> Tag {
    Tag {
        key: key.to_string(),
        value,
    }
}

/// Three traces: one fully qualifying, one missing its receive span, and
/// one with a numeric partition tag, no consumer key and skewed clocks.
pub fn sample_traces() -> Vec<Trace> {
    vec![
        Trace {
            trace_id: "a1".to_string(),
            spans: vec![
                span("s1", PRODUCE_SPAN, 100, 1000, Vec::new()),
                span(
                    "s2",
                    PRINT_SPAN,
                    200,
                    1050,
                    vec![tag(PARTITION_TAG, json!("p0")), tag(KEY_TAG, json!("k1"))],
                ),
                span("s3", RECEIVE_SPAN, 50, 1120, Vec::new()),
                span("s4", "ship order", 10, 1010, Vec::new()),
            ],
        },
        Trace {
            trace_id: "b2".to_string(),
            spans: vec![
                span("s5", PRODUCE_SPAN, 90, 1500, Vec::new()),
                span("s6", PRINT_SPAN, 120, 1540, Vec::new()),
            ],
        },
        Trace {
            trace_id: "c3".to_string(),
            spans: vec![
                span("s7", PRODUCE_SPAN, 80, 2000, Vec::new()),
                span("s8", PRINT_SPAN, 150, 2040, vec![tag(PARTITION_TAG, json!(3))]),
                span("s9", RECEIVE_SPAN, 60, 1990, Vec::new()),
            ],
        },
    ]
}

/// The same fixtures in the backend's wire envelope.
pub fn sample_traces_json() -> serde_json::Value {
    json!({
        "data": serde_json::to_value(sample_traces()).expect("serialize fixtures"),
        "total": 0,
        "limit": 0,
        "offset": 0,
        "errors": null
    })
}
