use serde::Serialize;

use crate::model::{Span, Trace};
use crate::time::Micros;

pub const PRODUCE_SPAN: &str = "produce message";
pub const PRINT_SPAN: &str = "print message";
pub const RECEIVE_SPAN: &str = "OrderGo receive";

pub const PARTITION_TAG: &str = "message_bus.destination";
pub const KEY_TAG: &str = "consumer.key";

/// One flattened timing record per qualifying trace.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FlatRecord {
    pub trace_id: String,
    pub recv_duration: Micros,
    pub print_duration: Micros,
    pub partition: Option<String>,
    pub key: Option<String>,
    pub start_time_diff: Micros,
}

/// Flattens raw traces into timing records, preserving input order.
/// Traces missing any of the three role spans are dropped without a
/// record or a warning.
pub fn extract_records(traces: &[Trace]) -> Vec<FlatRecord> {
    traces.iter().filter_map(extract_one).collect()
}

fn extract_one(trace: &Trace) -> Option<FlatRecord> {
    let mut produce: Option<&Span> = None;
    let mut print: Option<&Span> = None;
    let mut receive: Option<&Span> = None;

    // Single pass in backend order; each match overwrites its slot, so
    // when a trace carries several spans with the same operation name the
    // last one seen wins.
    for span in &trace.spans {
        match span.operation_name.as_str() {
            PRODUCE_SPAN => produce = Some(span),
            PRINT_SPAN => print = Some(span),
            RECEIVE_SPAN => receive = Some(span),
            _ => {}
        }
    }

    let (produce, print, receive) = (produce?, print?, receive?);

    let mut partition = None;
    let mut key = None;
    for tag in &print.tags {
        match tag.key.as_str() {
            PARTITION_TAG => partition = Some(tag.value_str()),
            KEY_TAG => key = Some(tag.value_str()),
            _ => {}
        }
    }

    Some(FlatRecord {
        trace_id: trace.trace_id.clone(),
        recv_duration: Micros(receive.duration),
        print_duration: Micros(print.duration),
        partition,
        key,
        start_time_diff: Micros(receive.start_time - produce.start_time),
    })
}
