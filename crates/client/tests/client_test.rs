//! Integration tests for the service clients, backed by a mock HTTP server.

use std::time::Duration;

use client::services::{
    GetEvalResultsOptions, ListPromptsOptions, QueryTracesOptions,
};
use client::{ClientError, ClientSettings, LatticeClient, RemoteCode};
use config::{LatticeConfig, ServiceEndpoint};
use futures_util::StreamExt;
use httpmock::prelude::*;
use models::runtime::{CompletionParams, Message};

fn endpoint_for(server: &MockServer) -> ServiceEndpoint {
    let addr = server.address();
    ServiceEndpoint {
        host: addr.ip().to_string(),
        port: addr.port(),
        use_tls: false,
    }
}

fn test_settings() -> ClientSettings {
    ClientSettings {
        api_key: None,
        timeout: Duration::from_secs(5),
        connect_timeout: Duration::from_secs(2),
    }
}

#[tokio::test]
async fn create_prompt_returns_server_assigned_fields() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.prompt.v1.PromptService/CreatePrompt");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "prompt": {
                        "id": "prm_42",
                        "name": "summarizer",
                        "slug": "summarizer",
                        "current_version": 1,
                        "versions": [{
                            "version": 1,
                            "template": "Summarize: {{text}}",
                            "created_at": "2026-03-01T12:00:00Z"
                        }],
                        "created_at": "2026-03-01T12:00:00Z"
                    }
                }));
        })
        .await;

    let client = client::PromptClient::new(endpoint_for(&server), test_settings());
    let prompt = client
        .create("summarizer", Default::default())
        .await
        .unwrap();

    mock.assert_async().await;
    // Server-assigned fields come from the response, not the inputs.
    assert_eq!(prompt.id, "prm_42");
    assert_eq!(prompt.current_version, 1);
    assert!(prompt.created_at.is_some());
    assert_eq!(prompt.latest().unwrap().template, "Summarize: {{text}}");
}

#[tokio::test]
async fn get_missing_resources_return_none_for_every_service() {
    let server = MockServer::start_async().await;
    let not_found = serde_json::json!({
        "code": "not_found",
        "message": "no such resource"
    });
    for path in [
        "/lattice.prompt.v1.PromptService/GetPrompt",
        "/lattice.datasets.v1.DatasetsService/GetDataset",
        "/lattice.eval.v1.EvalService/GetEvalRun",
        "/lattice.deploy.v1.DeployService/GetDeployment",
        "/lattice.observe.v1.ObserveService/GetTrace",
    ] {
        server
            .mock_async(|when, then| {
                when.method(POST).path(path);
                then.status(404)
                    .header("content-type", "application/json")
                    .json_body(not_found.clone());
            })
            .await;
    }

    let endpoint = endpoint_for(&server);
    let prompts = client::PromptClient::new(endpoint.clone(), test_settings());
    let datasets = client::DatasetsClient::new(endpoint.clone(), test_settings());
    let eval = client::EvalClient::new(endpoint.clone(), test_settings());
    let deploy = client::DeployClient::new(endpoint.clone(), test_settings());
    let observe = client::ObserveClient::new(endpoint, test_settings());

    assert!(prompts.get("ghost", None).await.unwrap().is_none());
    assert!(datasets.get("ghost").await.unwrap().is_none());
    assert!(eval.get_run("ghost").await.unwrap().is_none());
    assert!(deploy.get("ghost").await.unwrap().is_none());
    assert!(observe.get_trace("ghost").await.unwrap().is_none());
}

#[tokio::test]
async fn get_propagates_non_not_found_failures() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.prompt.v1.PromptService/GetPrompt");
            then.status(403)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "code": "permission_denied",
                    "message": "caller may not read prompts"
                }));
        })
        .await;

    let client = client::PromptClient::new(endpoint_for(&server), test_settings());
    let error = client.get("prm_1", None).await.unwrap_err();
    match error {
        ClientError::Remote { code, message } => {
            assert_eq!(code, RemoteCode::PermissionDenied);
            assert_eq!(message, "caller may not read prompts");
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[tokio::test]
async fn list_prompts_paginates() {
    let server = MockServer::start_async().await;
    let prompts: Vec<_> = (20..25)
        .map(|i| {
            serde_json::json!({
                "id": format!("prm_{i}"),
                "name": format!("prompt-{i}"),
                "current_version": 1
            })
        })
        .collect();
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.prompt.v1.PromptService/ListPrompts")
                .json_body_partial(r#"{"limit": 10, "offset": 20}"#);
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "prompts": prompts,
                    "total_count": 25
                }));
        })
        .await;

    let client = client::PromptClient::new(endpoint_for(&server), test_settings());
    let page = client
        .list(ListPromptsOptions {
            limit: 10,
            offset: 20,
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(page.items.len(), 5);
    assert_eq!(page.total_count, 25);
    assert!(!page.has_more());
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let server = MockServer::start_async().await;
    let mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.prompt.v1.PromptService/DeletePrompt")
                .header("authorization", "Bearer sk-lattice-test");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "success": true }));
        })
        .await;

    let settings = ClientSettings {
        api_key: Some("sk-lattice-test".to_string()),
        ..test_settings()
    };
    let client = client::PromptClient::new(endpoint_for(&server), settings);
    assert!(client.delete("prm_1").await.unwrap());
    mock.assert_async().await;
}

#[tokio::test]
async fn rollback_returns_both_deployments() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.deploy.v1.DeployService/RollbackDeployment");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "deployment": {
                        "id": "dep_1",
                        "prompt_id": "prm_1",
                        "status": "DEPLOYMENT_STATUS_ROLLED_BACK"
                    },
                    "rollback_deployment": {
                        "id": "dep_2",
                        "prompt_id": "prm_1",
                        "status": "DEPLOYMENT_STATUS_IN_PROGRESS"
                    }
                }));
        })
        .await;

    let client = client::DeployClient::new(endpoint_for(&server), test_settings());
    let result = client.rollback("dep_1", "latency regression").await.unwrap();

    assert_eq!(result.deployment.id, "dep_1");
    assert!(result.deployment.is_complete());
    assert_eq!(result.rollback.id, "dep_2");
    assert!(result.rollback.is_active());
}

#[tokio::test]
async fn deployment_status_carries_rollout_and_gates() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.deploy.v1.DeployService/GetDeploymentStatus");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "status": "DEPLOYMENT_STATUS_IN_PROGRESS",
                    "rollout": { "current_percentage": 40, "target_percentage": 100 },
                    "gate_results": [{
                        "gate_id": "gate_1",
                        "gate_name": "quality-floor",
                        "passed": true,
                        "condition_results": [
                            { "type": "eval_score", "expected": 0.8, "actual": 0.93, "passed": true }
                        ]
                    }]
                }));
        })
        .await;

    let client = client::DeployClient::new(endpoint_for(&server), test_settings());
    let info = client.get_status("dep_1").await.unwrap();

    assert_eq!(
        info.status,
        models::deploy::DeploymentStatus::InProgress
    );
    assert_eq!(info.rollout.unwrap().current_percentage, 40);
    assert_eq!(info.gate_results.len(), 1);
    assert!(info.gate_results[0].passed);
    assert_eq!(info.gate_results[0].condition_results[0].actual, 0.93);
}

#[tokio::test]
async fn ingest_spans_reports_accepted_count() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.observe.v1.ObserveService/IngestSpans");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "accepted_count": 2 }));
        })
        .await;

    let spans = vec![
        models::observe::Span {
            trace_id: "t1".to_string(),
            span_id: "s1".to_string(),
            parent_span_id: None,
            name: "complete".to_string(),
            kind: models::observe::SpanKind::Client,
            start_time: chrono::Utc::now(),
            end_time: None,
            status: models::observe::SpanStatus::Ok,
            status_message: None,
            attributes: Default::default(),
            service_name: "runtime".to_string(),
        },
        models::observe::Span {
            trace_id: "t1".to_string(),
            span_id: "s2".to_string(),
            parent_span_id: Some("s1".to_string()),
            name: "provider".to_string(),
            kind: models::observe::SpanKind::Internal,
            start_time: chrono::Utc::now(),
            end_time: None,
            status: models::observe::SpanStatus::Unset,
            status_message: None,
            attributes: Default::default(),
            service_name: "runtime".to_string(),
        },
    ];

    let client = client::ObserveClient::new(endpoint_for(&server), test_settings());
    assert_eq!(client.ingest_spans(&spans).await.unwrap(), 2);
}

#[tokio::test]
async fn query_traces_decodes_spans() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.observe.v1.ObserveService/QueryTraces");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "traces": [{
                        "trace_id": "t1",
                        "service_name": "runtime",
                        "start_time": "2026-03-01T12:00:00Z",
                        "end_time": "2026-03-01T12:00:01.500Z",
                        "spans": [{
                            "trace_id": "t1",
                            "span_id": "s1",
                            "name": "complete",
                            "kind": "SPAN_KIND_SERVER",
                            "status": "SPAN_STATUS_OK",
                            "start_time": "2026-03-01T12:00:00Z",
                            "end_time": "2026-03-01T12:00:01.500Z"
                        }]
                    }]
                }));
        })
        .await;

    let client = client::ObserveClient::new(endpoint_for(&server), test_settings());
    let traces = client
        .query_traces(QueryTracesOptions::default())
        .await
        .unwrap();

    assert_eq!(traces.len(), 1);
    assert_eq!(traces[0].duration_ms(), Some(1500.0));
    let root = traces[0].root_span().unwrap();
    assert_eq!(root.kind, models::observe::SpanKind::Server);
    assert_eq!(root.duration_ms(), Some(1500.0));
}

#[tokio::test]
async fn complete_stream_yields_non_empty_fragments() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.runtime.v1.RuntimeService/CompleteStream");
            then.status(200)
                .header("content-type", "text/event-stream")
                .body(concat!(
                    "data: {\"content\":\"The\"}\n\n",
                    "data: {\"content\":\"\"}\n\n",
                    "data: {\"content\":\" answer\"}\n\n",
                    "data: {\"content\":\"\",\"finish_reason\":\"stop\"}\n\n",
                    "data: [DONE]\n\n",
                ));
        })
        .await;

    let client = client::RuntimeClient::new(endpoint_for(&server), test_settings());
    let params = CompletionParams {
        messages: vec![Message::new("user", "say something")],
        ..Default::default()
    };
    let stream = client.complete_stream(params).await.unwrap();
    let fragments: Vec<String> = stream.map(|f| f.unwrap()).collect().await;

    assert_eq!(fragments, vec!["The".to_string(), " answer".to_string()]);
}

#[tokio::test]
async fn eval_results_page_decodes_payloads() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.eval.v1.EvalService/GetEvalResults");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({
                    "results": [{
                        "id": "res_1",
                        "eval_run_id": "run_1",
                        "example_id": "ex_1",
                        "input": { "question": "2+2?" },
                        "actual_output": { "answer": 4 },
                        "evaluator_results": {
                            "exact_match": {
                                "evaluator_type": "exact_match",
                                "score": 1.0,
                                "passed": true
                            }
                        },
                        "overall_score": 1.0,
                        "passed": true
                    }],
                    "total_count": 1
                }));
        })
        .await;

    let client = client::EvalClient::new(endpoint_for(&server), test_settings());
    let page = client
        .get_results("run_1", GetEvalResultsOptions::default())
        .await
        .unwrap();

    assert_eq!(page.items.len(), 1);
    let result = &page.items[0];
    assert_eq!(result.input["question"], serde_json::json!("2+2?"));
    assert!(result.evaluator_results["exact_match"].passed);
    assert!(!page.has_more());
}

#[tokio::test]
async fn timeout_surfaces_as_distinct_error() {
    // A listener that never answers: the connection lands in the accept
    // backlog and the request waits until the client timeout fires.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let endpoint = ServiceEndpoint {
        host: addr.ip().to_string(),
        port: addr.port(),
        use_tls: false,
    };

    let settings = ClientSettings {
        timeout: Duration::from_millis(250),
        ..test_settings()
    };
    let client = client::PromptClient::new(endpoint, settings);
    let error = client.get("prm_1", None).await.unwrap_err();
    assert!(error.is_timeout(), "expected timeout, got {error:?}");
}

#[tokio::test]
async fn undecodable_response_is_a_decode_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.prompt.v1.PromptService/ListVersions");
            then.status(200)
                .header("content-type", "application/json")
                .body("this is not json");
        })
        .await;

    let client = client::PromptClient::new(endpoint_for(&server), test_settings());
    let error = client.list_versions("prm_1").await.unwrap_err();
    assert!(matches!(error, ClientError::Decode { .. }));
}

#[tokio::test]
async fn client_close_is_idempotent_and_reconnects() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/lattice.prompt.v1.PromptService/DeletePrompt");
            then.status(200)
                .header("content-type", "application/json")
                .json_body(serde_json::json!({ "success": true }));
        })
        .await;

    let client = client::PromptClient::new(endpoint_for(&server), test_settings());
    assert!(client.delete("prm_1").await.unwrap());

    client.close();
    client.close();

    // A fresh connection is established after close.
    assert!(client.delete("prm_1").await.unwrap());
}

#[tokio::test]
async fn health_check_reports_every_service() {
    let server = MockServer::start_async().await;
    let endpoint = endpoint_for(&server);
    let config = LatticeConfig {
        observe: endpoint.clone(),
        runtime: endpoint.clone(),
        prompt: endpoint.clone(),
        datasets: endpoint.clone(),
        eval: endpoint.clone(),
        deploy: endpoint,
        ..LatticeConfig::default()
    };

    let client = LatticeClient::new(config);
    let health = client.health_check().await;

    assert_eq!(health.len(), 6);
    for service in ["observe", "runtime", "prompt", "datasets", "eval", "deploy"] {
        assert_eq!(health.get(service), Some(&true), "{service} should be up");
    }
}
