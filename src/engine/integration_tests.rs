// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! End-to-end routing tests: raw request in, wire envelope out, with a
//! recording invoker and the in-memory object store as collaborators.

use rstest::rstest;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::backends::stub::{sample_task_json, CapturedLogs, RecordingInvoker};
use crate::config::ArtefactsConfig;
use crate::engine::{
    ArtefactStager, EngineKind, FailurePolicy, InvocationGateway, Router, StagingPolicy,
};
use crate::errors::InvokerError;
use crate::model::{TaskAction, TaskDescription, TaskResult, TaskType};
use crate::storage::InMemoryObjectStore;

const SOURCE_KEY: &str = "packages/test-portfolio/test-app/main/latest/package.zip";
const ARTEFACT_KEY: &str = "artefacts/test-portfolio/test-app/main/latest/package.zip";

struct Harness {
    router: Router,
    invoker: Arc<RecordingInvoker>,
    store: Arc<InMemoryObjectStore>,
}

fn harness_with(invoker: RecordingInvoker, staging: StagingPolicy, policy: FailurePolicy) -> Harness {
    let invoker = Arc::new(invoker);
    let store = Arc::new(InMemoryObjectStore::new());
    store.put_object("acme-uploads", SOURCE_KEY, b"package".to_vec());

    let stager = ArtefactStager::new(
        store.clone(),
        ArtefactsConfig {
            bucket_name: "acme-artefacts".to_string(),
            bucket_region: "eu-west-1".to_string(),
        },
    );
    let router = Router::new(InvocationGateway::new(invoker.clone()), stager)
        .with_staging_policy(staging)
        .with_failure_policy(policy);

    Harness {
        router,
        invoker,
        store,
    }
}

fn harness() -> Harness {
    harness_with(
        RecordingInvoker::answering_all(),
        StagingPolicy::default(),
        FailurePolicy::Envelope,
    )
}

fn request(task_type: &str, task: &str) -> Value {
    let mut raw = sample_task_json();
    raw["Type"] = json!(task_type);
    raw["Task"] = json!(task);
    raw
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Expected {
    Engine(EngineKind),
    NotImplemented,
    Unsupported,
}

#[rstest]
#[case::pipeline_compile("pipeline", "compile", Expected::Engine(EngineKind::PipelineCompiler))]
#[case::pipeline_plan("pipeline", "plan", Expected::Unsupported)]
#[case::pipeline_apply("pipeline", "apply", Expected::Unsupported)]
#[case::pipeline_deploy("pipeline", "deploy", Expected::Engine(EngineKind::Runner))]
#[case::pipeline_release("pipeline", "release", Expected::Engine(EngineKind::Runner))]
#[case::pipeline_teardown("pipeline", "teardown", Expected::Engine(EngineKind::Runner))]
#[case::deployspec_compile("deployspec", "compile", Expected::Engine(EngineKind::DeploySpecCompiler))]
#[case::deployspec_plan("deployspec", "plan", Expected::NotImplemented)]
#[case::deployspec_apply("deployspec", "apply", Expected::NotImplemented)]
#[case::deployspec_deploy("deployspec", "deploy", Expected::Engine(EngineKind::Runner))]
#[case::deployspec_release("deployspec", "release", Expected::Unsupported)]
#[case::deployspec_teardown("deployspec", "teardown", Expected::Engine(EngineKind::Runner))]
#[tokio::test]
async fn transition_table(#[case] task_type: &str, #[case] task: &str, #[case] expected: Expected) {
    let h = harness_with(
        RecordingInvoker::answering_all(),
        StagingPolicy::default(),
        FailurePolicy::Propagate,
    );

    let outcome = h.router.handle(request(task_type, task), None).await;

    match expected {
        Expected::Engine(kind) => {
            assert!(matches!(outcome, Ok(TaskResult::Success(_))));
            assert_eq!(h.invoker.total_calls(), 1);
            assert_eq!(h.invoker.call_count(kind), 1);
        }
        Expected::NotImplemented => {
            assert_eq!(outcome.unwrap(), TaskResult::NotImplemented);
            assert_eq!(h.invoker.total_calls(), 0);
        }
        Expected::Unsupported => {
            assert!(matches!(
                outcome,
                Err(InvokerError::UnsupportedOperation { .. })
            ));
            assert_eq!(h.invoker.total_calls(), 0);
        }
    }
}

#[rstest]
#[case::defaults(StagingPolicy::default(), 1, 0)]
#[case::both(StagingPolicy { pipeline: true, deployspec: true }, 1, 1)]
#[case::neither(StagingPolicy { pipeline: false, deployspec: false }, 0, 0)]
#[case::deployspec_only(StagingPolicy { pipeline: false, deployspec: true }, 0, 1)]
#[tokio::test]
async fn staging_follows_policy_per_type(
    #[case] staging: StagingPolicy,
    #[case] pipeline_copies: usize,
    #[case] deployspec_copies: usize,
) {
    let h = harness_with(RecordingInvoker::answering_all(), staging, FailurePolicy::Propagate);
    h.router.handle(request("pipeline", "compile"), None).await.unwrap();
    assert_eq!(h.store.copy_count(), pipeline_copies);

    let h = harness_with(RecordingInvoker::answering_all(), staging, FailurePolicy::Propagate);
    h.router.handle(request("deployspec", "compile"), None).await.unwrap();
    assert_eq!(h.store.copy_count(), deployspec_copies);
}

#[tokio::test]
async fn non_compile_tasks_never_stage() {
    let h = harness_with(
        RecordingInvoker::answering_all(),
        StagingPolicy {
            pipeline: true,
            deployspec: true,
        },
        FailurePolicy::Envelope,
    );

    for task_type in ["pipeline", "deployspec"] {
        for task in TaskAction::ALL.iter().filter(|a| **a != TaskAction::Compile) {
            h.router
                .handler(request(task_type, task.as_str()), None)
                .await
                .unwrap();
        }
    }

    assert_eq!(h.store.copy_count(), 0);
}

#[tokio::test]
async fn staged_artefact_lands_at_canonical_key() {
    let h = harness();

    h.router.handler(request("pipeline", "compile"), None).await.unwrap();

    let staged = h.store.get_object("acme-artefacts", ARTEFACT_KEY).unwrap();
    assert_eq!(staged.bytes, b"package".to_vec());
}

#[tokio::test]
async fn scenario_pipeline_compile_unwraps_compiler_result() {
    let h = harness_with(
        RecordingInvoker::new().with_response(
            EngineKind::PipelineCompiler,
            json!({"Response": {"Status": "COMPILE_COMPLETE"}}),
        ),
        StagingPolicy::default(),
        FailurePolicy::Envelope,
    );

    let response = h.router.handler(request("pipeline", "compile"), None).await.unwrap();

    assert_eq!(response, json!({"Status": "COMPILE_COMPLETE"}));
    assert_eq!(h.store.copy_count(), 1);
}

#[tokio::test]
async fn scenario_deployspec_plan_is_not_implemented() {
    let h = harness();

    let response = h.router.handler(request("deployspec", "plan"), None).await.unwrap();

    assert_eq!(response, json!({"Error": "Not implemented"}));
    assert_eq!(h.invoker.total_calls(), 0);
    assert_eq!(h.store.copy_count(), 0);
}

#[tokio::test]
async fn scenario_pipeline_teardown_passes_runner_envelope_through() {
    let envelope = json!({
        "Response": {"Status": "ok", "Message": "teardown started"},
        "Extra": [1, 2, {"nested": null}]
    });
    let h = harness_with(
        RecordingInvoker::new().with_response(EngineKind::Runner, envelope.clone()),
        StagingPolicy::default(),
        FailurePolicy::Envelope,
    );

    let response = h.router.handler(request("pipeline", "teardown"), None).await.unwrap();

    assert_eq!(response, envelope);
    assert_eq!(h.invoker.call_count(EngineKind::Runner), 1);
}

#[tokio::test]
async fn scenario_region_mismatch_stops_before_copy_and_compile() {
    let h = harness();
    let mut raw = request("pipeline", "compile");
    raw["Package"]["BucketRegion"] = json!("us-east-1");

    let response = h.router.handler(raw, None).await.unwrap();

    assert_eq!(response["Response"]["Status"], "error");
    let message = response["Response"]["Message"].as_str().unwrap();
    assert!(message.contains("eu-west-1"));
    assert!(message.contains("us-east-1"));
    assert_eq!(h.store.copy_count(), 0);
    assert_eq!(h.invoker.total_calls(), 0);
}

#[tokio::test]
async fn scenario_unknown_type_is_unsupported_without_side_effects() {
    let h = harness_with(
        RecordingInvoker::answering_all(),
        StagingPolicy::default(),
        FailurePolicy::Propagate,
    );

    let err = h
        .router
        .handler(request("Widget", "compile"), None)
        .await
        .unwrap_err();

    assert!(matches!(err, InvokerError::UnsupportedOperation { .. }));
    assert_eq!(h.invoker.total_calls(), 0);
    assert_eq!(h.store.copy_count(), 0);
}

#[tokio::test]
async fn scenario_missing_result_key_differs_from_business_error() {
    let broken = harness_with(
        RecordingInvoker::new().with_response(EngineKind::Runner, json!({"Status": "ok"})),
        StagingPolicy::default(),
        FailurePolicy::Propagate,
    );
    let err = broken
        .router
        .handler(request("pipeline", "deploy"), None)
        .await
        .unwrap_err();
    assert!(matches!(err, InvokerError::EngineProtocol { engine: EngineKind::Runner, .. }));

    let business = json!({"Response": {"Error": "stack rollback failed"}});
    let failing = harness_with(
        RecordingInvoker::new().with_response(EngineKind::Runner, business.clone()),
        StagingPolicy::default(),
        FailurePolicy::Propagate,
    );
    let response = failing
        .router
        .handler(request("pipeline", "deploy"), None)
        .await
        .unwrap();
    assert_eq!(response, business);
}

#[tokio::test]
async fn envelope_policy_converts_faults() {
    let h = harness_with(
        RecordingInvoker::new().with_response(EngineKind::Runner, json!({"Status": "ok"})),
        StagingPolicy::default(),
        FailurePolicy::Envelope,
    );

    let response = h.router.handler(request("pipeline", "release"), None).await.unwrap();

    assert_eq!(
        response,
        json!({"Response": {
            "Status": "error",
            "Message": "Runner response does not contain a response: {\"Status\":\"ok\"}"
        }})
    );
}

#[tokio::test]
async fn malformed_request_is_validation_fault() {
    let h = harness_with(
        RecordingInvoker::answering_all(),
        StagingPolicy::default(),
        FailurePolicy::Propagate,
    );
    let mut raw = sample_task_json();
    raw.as_object_mut().unwrap().remove("DeploymentDetails");

    let err = h.router.handler(raw, None).await.unwrap_err();
    assert!(matches!(err, InvokerError::Validation(_)));
    assert_eq!(h.invoker.total_calls(), 0);
}

#[tokio::test]
async fn identical_requests_yield_identical_envelopes() {
    let h = harness();

    let first = h.router.handler(request("pipeline", "compile"), None).await.unwrap();
    let second = h.router.handler(request("pipeline", "compile"), None).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(h.invoker.call_count(EngineKind::PipelineCompiler), 2);
}

#[tokio::test]
async fn replayed_task_routes_by_reassigned_action() {
    let h = harness();
    let task = TaskDescription::parse(sample_task_json()).unwrap();

    let compiled = h.router.dispatch(&task).await.unwrap();
    let torn_down = h
        .router
        .dispatch(&task.with_task(TaskAction::Teardown).with_type(TaskType::DeploySpec))
        .await
        .unwrap();

    assert!(compiled.is_success());
    assert!(torn_down.is_success());
    assert_eq!(h.invoker.call_count(EngineKind::PipelineCompiler), 1);
    assert_eq!(h.invoker.call_count(EngineKind::Runner), 1);
}

#[tokio::test]
async fn context_is_accepted_but_not_forwarded() {
    let h = harness();
    let context = crate::model::InvocationContext::new("req-1")
        .with_remaining_time(std::time::Duration::from_secs(30));

    h.router
        .handler(request("pipeline", "deploy"), Some(&context))
        .await
        .unwrap();

    let (_, payload) = &h.invoker.calls()[0];
    assert!(payload.get("RequestId").is_none());
    assert_eq!(payload["Identity"], "prn:test-portfolio:test-app:main:latest");
}

#[tokio::test]
async fn request_log_lines_carry_the_task_span() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let h = harness();
    let context = crate::model::InvocationContext::new("req-span");

    h.router
        .handle(request("pipeline", "deploy"), Some(&context))
        .await
        .unwrap();

    for needle in ["Invoker started", "Execution context"] {
        let line = logs
            .line_containing(needle)
            .unwrap_or_else(|| panic!("no log line containing {needle:?}"));
        assert!(line.contains("task{"), "{needle:?} logged outside the task span: {line}");
        assert!(line.contains("prn:test-portfolio:test-app:main:latest"));
    }
}

#[tokio::test]
async fn task_failure_is_logged_with_correlation_identity() {
    let logs = CapturedLogs::default();
    let _guard = logs.install();
    let h = harness_with(
        RecordingInvoker::new(),
        StagingPolicy::default(),
        FailurePolicy::Envelope,
    );

    let result = h.router.handle(request("pipeline", "deploy"), None).await.unwrap();
    assert!(matches!(result, TaskResult::Error(_)));

    let line = logs
        .line_containing("Error executing task")
        .expect("task failure was not logged");
    // Concurrent tests overwrite the process-wide identity, so only its shape is checked
    assert!(line.contains("identity=\"prn:"), "{line}");
}
