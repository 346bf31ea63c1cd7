//! Wire schema for the observe service.

use chrono::{DateTime, Utc};
use models::common::Metadata;
use models::observe as domain;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Span {
    pub trace_id: String,
    pub span_id: String,
    pub parent_span_id: String,
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: String,
    pub status_message: String,
    pub attributes: Metadata,
    pub service_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct Trace {
    pub trace_id: String,
    pub spans: Vec<Span>,
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct MetricDataPoint {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    pub value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct IngestSpansRequest {
    pub spans: Vec<Span>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct IngestSpansResponse {
    pub accepted_count: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetTraceRequest {
    pub trace_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct GetTraceResponse {
    pub trace: Trace,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QueryTracesRequest {
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub limit: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QueryTracesResponse {
    pub traces: Vec<Trace>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QueryMetricsRequest {
    pub metric_name: String,
    pub service_name: String,
    /// sum, avg, min, max, count
    pub aggregation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step_seconds: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub(crate) struct QueryMetricsResponse {
    pub data_points: Vec<MetricDataPoint>,
}

pub(crate) fn span_kind_to_wire(kind: domain::SpanKind) -> &'static str {
    match kind {
        domain::SpanKind::Unspecified => "SPAN_KIND_UNSPECIFIED",
        domain::SpanKind::Internal => "SPAN_KIND_INTERNAL",
        domain::SpanKind::Server => "SPAN_KIND_SERVER",
        domain::SpanKind::Client => "SPAN_KIND_CLIENT",
        domain::SpanKind::Producer => "SPAN_KIND_PRODUCER",
        domain::SpanKind::Consumer => "SPAN_KIND_CONSUMER",
    }
}

pub(crate) fn span_kind_from_wire(value: &str) -> domain::SpanKind {
    match value {
        "SPAN_KIND_INTERNAL" => domain::SpanKind::Internal,
        "SPAN_KIND_SERVER" => domain::SpanKind::Server,
        "SPAN_KIND_CLIENT" => domain::SpanKind::Client,
        "SPAN_KIND_PRODUCER" => domain::SpanKind::Producer,
        "SPAN_KIND_CONSUMER" => domain::SpanKind::Consumer,
        _ => domain::SpanKind::Unspecified,
    }
}

pub(crate) fn span_status_to_wire(status: domain::SpanStatus) -> &'static str {
    match status {
        domain::SpanStatus::Unset => "SPAN_STATUS_UNSET",
        domain::SpanStatus::Ok => "SPAN_STATUS_OK",
        domain::SpanStatus::Error => "SPAN_STATUS_ERROR",
    }
}

pub(crate) fn span_status_from_wire(value: &str) -> domain::SpanStatus {
    match value {
        "SPAN_STATUS_OK" => domain::SpanStatus::Ok,
        "SPAN_STATUS_ERROR" => domain::SpanStatus::Error,
        _ => domain::SpanStatus::Unset,
    }
}

pub(crate) fn span_to_wire(span: &domain::Span) -> Span {
    Span {
        trace_id: span.trace_id.clone(),
        span_id: span.span_id.clone(),
        parent_span_id: span.parent_span_id.clone().unwrap_or_default(),
        name: span.name.clone(),
        kind: span_kind_to_wire(span.kind).to_string(),
        start_time: Some(span.start_time),
        end_time: span.end_time,
        status: span_status_to_wire(span.status).to_string(),
        status_message: span.status_message.clone().unwrap_or_default(),
        attributes: span.attributes.clone(),
        service_name: span.service_name.clone(),
    }
}

pub(crate) fn span_from_wire(span: Span) -> domain::Span {
    domain::Span {
        trace_id: span.trace_id,
        span_id: span.span_id,
        parent_span_id: if span.parent_span_id.is_empty() {
            None
        } else {
            Some(span.parent_span_id)
        },
        name: span.name,
        kind: span_kind_from_wire(&span.kind),
        // A span always carries a start time; a wire default decodes to the
        // epoch like any other unset wire scalar.
        start_time: span.start_time.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        end_time: span.end_time,
        status: span_status_from_wire(&span.status),
        status_message: if span.status_message.is_empty() {
            None
        } else {
            Some(span.status_message)
        },
        attributes: span.attributes,
        service_name: span.service_name,
    }
}

pub(crate) fn trace_from_wire(trace: Trace) -> domain::Trace {
    domain::Trace {
        trace_id: trace.trace_id,
        spans: trace.spans.into_iter().map(span_from_wire).collect(),
        service_name: trace.service_name,
        start_time: trace.start_time,
        end_time: trace.end_time,
    }
}

pub(crate) fn metric_point_from_wire(point: MetricDataPoint) -> domain::MetricDataPoint {
    domain::MetricDataPoint {
        timestamp: point.timestamp.unwrap_or(DateTime::<Utc>::UNIX_EPOCH),
        value: point.value,
    }
}
