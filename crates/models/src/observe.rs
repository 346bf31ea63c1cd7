//! Models for the observe service.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::common::Metadata;

/// Kind of span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanKind {
    #[default]
    Unspecified,
    Internal,
    Server,
    Client,
    Producer,
    Consumer,
}

/// Status of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpanStatus {
    #[default]
    Unset,
    Ok,
    Error,
}

/// A single span in a trace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub trace_id: String,
    pub span_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_span_id: Option<String>,
    pub name: String,
    pub kind: SpanKind,
    pub start_time: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    pub status: SpanStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_message: Option<String>,
    pub attributes: Metadata,
    pub service_name: String,
}

impl Span {
    /// Span duration in milliseconds, or `None` while the span is open.
    pub fn duration_ms(&self) -> Option<f64> {
        self.end_time
            .map(|end| (end - self.start_time).num_milliseconds() as f64)
    }
}

/// A complete trace with all its spans.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    pub trace_id: String,
    pub spans: Vec<Span>,
    pub service_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

impl Trace {
    /// Total trace duration in milliseconds, or `None` if either bound is
    /// missing.
    pub fn duration_ms(&self) -> Option<f64> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => Some((end - start).num_milliseconds() as f64),
            _ => None,
        }
    }

    /// The first span with no parent, scanning in list order.
    ///
    /// Spans are not guaranteed to arrive ordered; if several spans lack a
    /// parent this returns whichever appears first, and if all spans have
    /// parents it returns `None`.
    pub fn root_span(&self) -> Option<&Span> {
        self.spans.iter().find(|s| s.parent_span_id.is_none())
    }
}

/// A single metric measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricDataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn span(span_id: &str, parent: Option<&str>) -> Span {
        Span {
            trace_id: "trace-1".to_string(),
            span_id: span_id.to_string(),
            parent_span_id: parent.map(str::to_string),
            name: "op".to_string(),
            kind: SpanKind::Internal,
            start_time: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            end_time: None,
            status: SpanStatus::Unset,
            status_message: None,
            attributes: Metadata::new(),
            service_name: "runtime".to_string(),
        }
    }

    #[test]
    fn span_duration_requires_end_time() {
        let mut s = span("a", None);
        assert_eq!(s.duration_ms(), None);

        s.end_time = Some(s.start_time + chrono::Duration::milliseconds(1500));
        assert_eq!(s.duration_ms(), Some(1500.0));
    }

    #[test]
    fn trace_duration_requires_both_bounds() {
        let start = Utc.timestamp_opt(1_700_000_000, 0).unwrap();
        let mut trace = Trace {
            trace_id: "trace-1".to_string(),
            start_time: Some(start),
            ..Trace::default()
        };
        assert_eq!(trace.duration_ms(), None);

        trace.end_time = Some(start + chrono::Duration::milliseconds(1500));
        assert_eq!(trace.duration_ms(), Some(1500.0));

        trace.start_time = None;
        assert_eq!(trace.duration_ms(), None);
    }

    #[test]
    fn root_span_is_first_parentless_span() {
        let trace = Trace {
            trace_id: "trace-1".to_string(),
            spans: vec![span("a", Some("x")), span("b", None), span("c", None)],
            ..Trace::default()
        };
        assert_eq!(trace.root_span().map(|s| s.span_id.as_str()), Some("b"));

        let orphanless = Trace {
            trace_id: "trace-2".to_string(),
            spans: vec![span("a", Some("x"))],
            ..Trace::default()
        };
        assert!(orphanless.root_span().is_none());
    }
}
