mod auth_support;

use std::sync::Arc;

use auth_support::{credential_expiring_in, FakeAcquirer, InMemoryCredentialStore};
use garmin_workouts::auth::CredentialManager;
use garmin_workouts::config::GarminConfig;
use garmin_workouts::connect::ConnectClient;
use garmin_workouts::tools::{all_tools, AuthStatusTool, CreateWorkoutTool, Tool, WorkoutContext};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn context(
    store: Arc<InMemoryCredentialStore>,
    acquirer: Arc<FakeAcquirer>,
    api_base_url: &str,
) -> WorkoutContext {
    let config = GarminConfig::default().with_api_base_url(api_base_url);
    WorkoutContext::new(
        Arc::new(CredentialManager::new(store, acquirer)),
        ConnectClient::new(&config).expect("client"),
    )
}

fn interval_args() -> serde_json::Value {
    json!({
        "name": "4x1k",
        "sport": "running",
        "steps": [
            {"duration": "10:00", "target": "Zone 2", "intensity": "warmup"},
            {"duration": "1.0 km", "target": "Zone 4", "intensity": "active"},
            {"duration": "2:00", "target": "Open", "intensity": "rest"},
            {"duration": "10:00", "target": "Zone 2", "intensity": "cooldown"}
        ]
    })
}

#[test]
fn tools_expose_names_and_schemas() {
    let ctx = context(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(FakeAcquirer::failing()),
        "http://127.0.0.1:9",
    );
    let tools = all_tools(ctx);
    let names: Vec<&str> = tools.iter().map(|tool| tool.name()).collect();
    assert_eq!(
        names,
        vec!["garmin_auth_status", "garmin_authenticate", "garmin_create_workout"]
    );

    let create = &tools[2];
    assert_eq!(create.parameters().required(), vec!["name", "sport", "steps"]);
    assert_eq!(
        create.parameters().schema["properties"]["steps"]["items"]["properties"]["intensity"]["enum"],
        json!(["warmup", "active", "rest", "cooldown"])
    );
}

#[tokio::test]
async fn status_reports_missing_and_valid_sessions() {
    let missing = AuthStatusTool::new(context(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(FakeAcquirer::failing()),
        "http://127.0.0.1:9",
    ));
    let output = missing.execute(&json!({})).await;
    assert!(!output.success);
    assert!(output.summary.contains("garmin_authenticate"), "{}", output.summary);

    let valid = AuthStatusTool::new(context(
        Arc::new(InMemoryCredentialStore::seeded(credential_expiring_in(3600))),
        Arc::new(FakeAcquirer::failing()),
        "http://127.0.0.1:9",
    ));
    let output = valid.execute(&json!({})).await;
    assert!(output.success);
    assert!(output.summary.contains("expires at"), "{}", output.summary);
}

#[tokio::test]
async fn create_workout_submits_translated_payload() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workout-service/workout"))
        .and(body_partial_json(json!({
            "workoutName": "4x1k",
            "workoutSegments": [{"segmentOrder": 1}],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "workoutId": 777,
            "workoutName": "4x1k",
        })))
        .expect(1)
        .mount(&server)
        .await;

    let acquirer = Arc::new(FakeAcquirer::failing());
    let tool = CreateWorkoutTool::new(context(
        Arc::new(InMemoryCredentialStore::seeded(credential_expiring_in(3600))),
        acquirer.clone(),
        &server.uri(),
    ));

    let output = tool.execute(&interval_args()).await;

    assert!(output.success, "{}", output.summary);
    assert!(output.summary.contains("/modern/workout/777"), "{}", output.summary);
    assert!(output.summary.contains("4 steps"), "{}", output.summary);
    assert_eq!(acquirer.calls(), 0);
}

#[tokio::test]
async fn create_workout_clears_rejected_credential() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workout-service/workout"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryCredentialStore::seeded(credential_expiring_in(3600)));
    let tool = CreateWorkoutTool::new(context(
        store.clone(),
        Arc::new(FakeAcquirer::failing()),
        &server.uri(),
    ));

    let output = tool.execute(&interval_args()).await;

    assert!(!output.success);
    assert!(output.summary.contains("garmin_authenticate"), "{}", output.summary);
    assert!(store.get().is_none());
}

#[tokio::test]
async fn create_workout_acquires_when_no_session_is_stored() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/workout-service/workout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"workoutId": "42"})))
        .expect(1)
        .mount(&server)
        .await;

    let store = Arc::new(InMemoryCredentialStore::new());
    let acquirer = Arc::new(FakeAcquirer::returning(credential_expiring_in(3600)));
    let tool = CreateWorkoutTool::new(context(store.clone(), acquirer.clone(), &server.uri()));

    let output = tool.execute(&interval_args()).await;

    assert!(output.success, "{}", output.summary);
    assert_eq!(acquirer.calls(), 1);
    assert!(store.get().is_some());
}

#[tokio::test]
async fn create_workout_reports_failed_login() {
    let tool = CreateWorkoutTool::new(context(
        Arc::new(InMemoryCredentialStore::new()),
        Arc::new(FakeAcquirer::failing()),
        "http://127.0.0.1:9",
    ));

    let output = tool.execute(&interval_args()).await;

    assert!(!output.success);
    assert!(output.summary.contains("No bearer token"), "{}", output.summary);
}

#[tokio::test]
async fn malformed_arguments_are_reported_not_panicked() {
    let acquirer = Arc::new(FakeAcquirer::failing());
    let tool = CreateWorkoutTool::new(context(
        Arc::new(InMemoryCredentialStore::new()),
        acquirer.clone(),
        "http://127.0.0.1:9",
    ));

    for args in [json!(null), json!({"name": 5}), json!({"name": "X", "steps": []})] {
        let output = tool.execute(&args).await;
        assert!(!output.success);
        assert!(output.summary.contains("Invalid argument"), "{}", output.summary);
    }
    assert_eq!(acquirer.calls(), 0);
}
