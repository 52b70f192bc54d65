mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use chrono::{Duration, Utc};
use common::{AuthSession, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_setup(app: &TestApp, capacity: Option<i64>) -> (AuthSession, String) {
    let owner = app.signup("Owner", "owner@campus.edu", "pw").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/societies/create")
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": "Robotics Club", "category": "tech"}).to_string())).unwrap()
    ).await.unwrap();
    let sid = parse_body(res).await["id"].as_str().unwrap().to_string();

    let mut payload = json!({
        "societyId": sid, "title": "Hack Night", "description": "Overnight hack",
        "eventType": "hackathon",
        "startDate": (Utc::now() + Duration::days(7)).to_rfc3339()
    });
    if let Some(cap) = capacity {
        payload["capacity"] = json!(cap);
    }

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/events")
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap();
    let eid = parse_body(res).await["id"].as_str().unwrap().to_string();

    (owner, eid)
}

async fn register(app: &TestApp, auth: &AuthSession, event_id: &str) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/events/{}/register", event_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", auth.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_register_ok() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, None).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    let res = register(&app, &student, &eid).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let body = parse_body(res).await;
    assert_eq!(body["eventId"], eid.as_str());
    assert_eq!(body["userId"], student.user_id.as_str());
    assert_eq!(body["attended"], false);
}

#[tokio::test]
async fn test_register_unknown_event() {
    let app = TestApp::new().await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    let res = register(&app, &student, "no-such-event").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_register_twice_rejected() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, None).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    let res = register(&app, &student, &eid).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = register(&app, &student, &eid).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations")
        .fetch_one(&app.pool).await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn test_register_full_event_rejected() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, Some(1)).await;
    let first = app.signup("First", "first@campus.edu", "pw").await;
    let second = app.signup("Second", "second@campus.edu", "pw").await;

    let res = register(&app, &first, &eid).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = register(&app, &second, &eid).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Event is full");
}

#[tokio::test]
async fn test_register_zero_capacity_always_full() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, Some(0)).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    let res = register(&app, &student, &eid).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_register_after_deadline_rejected() {
    let app = TestApp::new().await;
    let (owner, eid) = create_setup(&app, None).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    // Close registration in the past; the event itself is still upcoming.
    let res = app.router.clone().oneshot(
        Request::builder().method("PUT").uri(format!("/api/events/{}", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "registrationDeadline": (Utc::now() - Duration::hours(1)).to_rfc3339()
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = register(&app, &student, &eid).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = parse_body(res).await;
    assert_eq!(body["error"], "Registration closed");
}

#[tokio::test]
async fn test_unregister_frees_slot() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, Some(1)).await;
    let first = app.signup("First", "first@campus.edu", "pw").await;
    let second = app.signup("Second", "second@campus.edu", "pw").await;

    assert_eq!(register(&app, &first, &eid).await.status(), StatusCode::CREATED);
    assert_eq!(register(&app, &second, &eid).await.status(), StatusCode::BAD_REQUEST);

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/events/{}/register", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", first.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    assert_eq!(register(&app, &second, &eid).await.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_unregister_without_registration() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, None).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE").uri(format!("/api/events/{}/register", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_my_registrations_lists_events() {
    let app = TestApp::new().await;
    let (_, eid) = create_setup(&app, None).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    register(&app, &student, &eid).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri("/api/users/me/registrations")
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["eventTitle"], "Hack Night");
    assert_eq!(list[0]["attended"], false);
}
