use serde::{Deserialize, Serialize};

/// Envelope of the backend's trace search endpoint. Fields other than
/// `data` (totals, offsets, error lists) are ignored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TracesResponse {
    pub data: Vec<Trace>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    #[serde(rename = "traceID")]
    pub trace_id: String,
    #[serde(default)]
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Span {
    #[serde(rename = "spanID")]
    pub span_id: String,
    #[serde(rename = "operationName")]
    pub operation_name: String,
    /// Microsecond epoch timestamp.
    #[serde(rename = "startTime")]
    pub start_time: i64,
    /// Microseconds.
    pub duration: i64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub key: String,
    pub value: serde_json::Value,
}

impl Tag {
    /// Tag values arrive as strings or numbers depending on how the
    /// instrumented service set the attribute.
    pub fn value_str(&self) -> String {
        match &self.value {
            serde_json::Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_backend_response() {
        let raw = r#"{
            "data": [{
                "traceID": "1f2e3d",
                "spans": [{
                    "traceID": "1f2e3d",
                    "spanID": "a1b2",
                    "operationName": "print message",
                    "startTime": 1690000000000000,
                    "duration": 200,
                    "tags": [
                        {"key": "consumer.key", "type": "string", "value": "k1"},
                        {"key": "message_bus.destination", "type": "int64", "value": 3}
                    ],
                    "processID": "p1",
                    "warnings": null
                }],
                "processes": {"p1": {"serviceName": "consumer"}}
            }],
            "total": 0,
            "limit": 0,
            "offset": 0,
            "errors": null
        }"#;

        let parsed: TracesResponse = serde_json::from_str(raw).unwrap();
        assert_eq!(parsed.data.len(), 1);
        let span = &parsed.data[0].spans[0];
        assert_eq!(span.operation_name, "print message");
        assert_eq!(span.duration, 200);
        assert_eq!(span.tags[0].value_str(), "k1");
        assert_eq!(span.tags[1].value_str(), "3");
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let raw = r#"{"spanID": "a1", "operationName": "x", "startTime": 1, "duration": 2}"#;
        let span: Span = serde_json::from_str(raw).unwrap();
        assert!(span.tags.is_empty());
    }
}
