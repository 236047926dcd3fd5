//! Integration tests for the API server.

use std::sync::OnceLock;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use metrics_exporter_prometheus::PrometheusHandle;
use tower::ServiceExt;

use api::config::Config;

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

fn get_metrics_handle() -> PrometheusHandle {
    METRICS_HANDLE
        .get_or_init(|| {
            let builder = metrics_exporter_prometheus::PrometheusBuilder::new();
            builder
                .install_recorder()
                .expect("failed to install Prometheus recorder")
        })
        .clone()
}

fn setup() -> (axum::Router, api::DefaultServices) {
    let config = Config::default();
    let (state, services) = api::create_default_state(&config);
    let app = api::create_app(state, get_metrics_handle());
    (app, services)
}

fn closed_schedule() -> serde_json::Value {
    let days = [
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];
    serde_json::Value::Array(
        days.iter()
            .map(|day| {
                serde_json::json!({
                    "day": day,
                    "is_open": false,
                    "time_ranges": [],
                })
            })
            .collect(),
    )
}

fn registration_body(code: &str) -> String {
    serde_json::json!({
        "gym_name": "Fit Center",
        "email": "a@b.com",
        "address": "123 Main St, Springfield",
        "theme_color": "blue",
        "gym_code": code,
        "schedule": closed_schedule(),
        "acknowledged": true,
    })
    .to_string()
}

fn post_registration(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/registrations")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

async fn response_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_health_check() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = response_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_metrics_endpoint_responds() {
    let (app, _) = setup();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/metrics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_successful_registration() {
    let (app, services) = setup();

    let response = app
        .oneshot(post_registration(registration_body("FIT01")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["gym_name"], "Fit Center");
    assert_eq!(json["slug"], "FIT01");
    assert!(json["gym_id"].is_i64());

    assert_eq!(services.gym_directory.gym_count(), 1);
    assert_eq!(services.identity.user_count(), 1);
    assert_eq!(services.registration_log.record_count(), 1);
    assert_eq!(services.mailer.sent_count(), 1);
}

#[tokio::test]
async fn test_lowercase_code_is_rejected_before_the_saga() {
    let (app, services) = setup();

    let response = app
        .oneshot(post_registration(registration_body("fit01")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["error"], "validation failed");
    assert_eq!(json["fields"][0]["field"], "gym_code");
    assert_eq!(
        json["fields"][0]["message"],
        "code may only contain uppercase letters and digits"
    );

    // No remote call was made.
    assert_eq!(services.gym_directory.gym_count(), 0);
    assert_eq!(services.identity.user_count(), 0);
}

#[tokio::test]
async fn test_inverted_time_range_is_rejected_before_the_saga() {
    let (app, services) = setup();

    let mut body: serde_json::Value =
        serde_json::from_str(&registration_body("FIT01")).unwrap();
    body["schedule"][0] = serde_json::json!({
        "day": "monday",
        "is_open": true,
        "time_ranges": [{"start": "18:00", "end": "09:00"}],
    });

    let response = app
        .oneshot(post_registration(body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["fields"][0]["field"], "schedule");
    assert_eq!(
        json["fields"][0]["message"],
        "closing time must be after opening time"
    );
    assert_eq!(services.gym_directory.gym_count(), 0);
}

#[tokio::test]
async fn test_duplicate_code_conflicts() {
    let (app, services) = setup();

    let first = app
        .clone()
        .oneshot(post_registration(registration_body("FIT01")))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = app
        .oneshot(post_registration(registration_body("FIT01")))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let json = response_json(second).await;
    assert_eq!(json["error"], "gym code 'FIT01' is already in use");

    assert_eq!(services.gym_directory.gym_count(), 1);
}

#[tokio::test]
async fn test_identity_failure_compensates_and_reports_bad_gateway() {
    let (app, services) = setup();
    services.identity.set_fail_on_create(true);

    let response = app
        .oneshot(post_registration(registration_body("FIT01")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let json = response_json(response).await;
    assert!(
        json["error"]
            .as_str()
            .unwrap()
            .contains("administrator")
    );

    // The gym created in step 1 was rolled back.
    assert_eq!(services.gym_directory.gym_count(), 0);
    assert_eq!(services.mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_email_failure_still_registers() {
    let (app, services) = setup();
    services.mailer.set_fail_on_send(true);

    let response = app
        .oneshot(post_registration(registration_body("FIT01")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let json = response_json(response).await;
    assert_eq!(json["slug"], "FIT01");

    assert_eq!(services.gym_directory.gym_count(), 1);
    assert_eq!(services.mailer.sent_count(), 0);
}

#[tokio::test]
async fn test_unacknowledged_submission_is_rejected() {
    let (app, services) = setup();

    let mut body: serde_json::Value =
        serde_json::from_str(&registration_body("FIT01")).unwrap();
    body["acknowledged"] = serde_json::json!(false);

    let response = app
        .oneshot(post_registration(body.to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = response_json(response).await;
    assert_eq!(json["fields"][0]["field"], "acknowledged");
    assert_eq!(json["fields"][0]["message"], "must confirm to continue");
    assert_eq!(services.gym_directory.gym_count(), 0);
}
