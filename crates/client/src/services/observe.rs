//! Client for the observe service.

use std::time::Duration;

use chrono::{DateTime, Utc};
use config::ServiceEndpoint;
use models::observe::{MetricDataPoint, Span, Trace};

use crate::channel::{Channel, ClientSettings};
use crate::error::Result;
use crate::wire::observe as wire;

const SERVICE: &str = "lattice.observe.v1.ObserveService";

/// Filters for [`ObserveClient::query_traces`].
#[derive(Debug, Clone)]
pub struct QueryTracesOptions {
    pub service_name: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub limit: u32,
}

impl Default for QueryTracesOptions {
    fn default() -> Self {
        Self {
            service_name: String::new(),
            start_time: None,
            end_time: None,
            limit: 100,
        }
    }
}

/// Filters for [`ObserveClient::query_metrics`].
#[derive(Debug, Clone, Default)]
pub struct QueryMetricsOptions {
    pub service_name: String,
    /// sum, avg, min, max, count
    pub aggregation: String,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub step: Option<Duration>,
}

/// Client for the observe service.
pub struct ObserveClient {
    channel: Channel,
}

impl ObserveClient {
    pub fn new(endpoint: ServiceEndpoint, settings: ClientSettings) -> Self {
        Self {
            channel: Channel::new(endpoint, settings),
        }
    }

    /// Release the underlying connection. Idempotent; the next call
    /// reconnects.
    pub fn close(&self) {
        self.channel.close();
    }

    /// Ingest spans; returns how many the service accepted.
    pub async fn ingest_spans(&self, spans: &[Span]) -> Result<u32> {
        let request = wire::IngestSpansRequest {
            spans: spans.iter().map(wire::span_to_wire).collect(),
        };
        let response: wire::IngestSpansResponse = self
            .channel
            .unary(&format!("{SERVICE}/IngestSpans"), &request)
            .await?;
        Ok(response.accepted_count)
    }

    /// Fetch a trace by id, or `None` if the service does not know it.
    pub async fn get_trace(&self, trace_id: &str) -> Result<Option<Trace>> {
        let request = wire::GetTraceRequest {
            trace_id: trace_id.to_string(),
        };
        let result: Result<wire::GetTraceResponse> = self
            .channel
            .unary(&format!("{SERVICE}/GetTrace"), &request)
            .await;
        match result {
            Ok(response) => Ok(Some(wire::trace_from_wire(response.trace))),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub async fn query_traces(&self, options: QueryTracesOptions) -> Result<Vec<Trace>> {
        let request = wire::QueryTracesRequest {
            service_name: options.service_name,
            start_time: options.start_time,
            end_time: options.end_time,
            limit: options.limit,
        };
        let response: wire::QueryTracesResponse = self
            .channel
            .unary(&format!("{SERVICE}/QueryTraces"), &request)
            .await?;
        Ok(response
            .traces
            .into_iter()
            .map(wire::trace_from_wire)
            .collect())
    }

    pub async fn query_metrics(
        &self,
        metric_name: &str,
        options: QueryMetricsOptions,
    ) -> Result<Vec<MetricDataPoint>> {
        let request = wire::QueryMetricsRequest {
            metric_name: metric_name.to_string(),
            service_name: options.service_name,
            aggregation: options.aggregation,
            start_time: options.start_time,
            end_time: options.end_time,
            step_seconds: options.step.map(|s| s.as_secs_f64()),
        };
        let response: wire::QueryMetricsResponse = self
            .channel
            .unary(&format!("{SERVICE}/QueryMetrics"), &request)
            .await?;
        Ok(response
            .data_points
            .into_iter()
            .map(wire::metric_point_from_wire)
            .collect())
    }
}
