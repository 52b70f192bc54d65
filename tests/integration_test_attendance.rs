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

async fn create_setup(app: &TestApp) -> (AuthSession, String, String) {
    let owner = app.signup("Owner", "owner@campus.edu", "pw").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/societies/create")
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": "Robotics Club", "category": "tech"}).to_string())).unwrap()
    ).await.unwrap();
    let sid = parse_body(res).await["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/events")
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "societyId": sid, "title": "Hack Night", "description": "Overnight hack",
                "eventType": "hackathon",
                "startDate": (Utc::now() + Duration::days(7)).to_rfc3339()
            }).to_string())).unwrap()
    ).await.unwrap();
    let eid = parse_body(res).await["id"].as_str().unwrap().to_string();

    (owner, sid, eid)
}

async fn check_in(app: &TestApp, auth: &AuthSession, event_id: &str, user_id: &str, status: bool) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/events/{}/attendees/{}/check-in", event_id, user_id))
            .header(header::AUTHORIZATION, format!("Bearer {}", auth.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"status": status}).to_string())).unwrap()
    ).await.unwrap()
}

#[tokio::test]
async fn test_attendee_list_organizer_only() {
    let app = TestApp::new().await;
    let (owner, _, eid) = create_setup(&app).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/events/{}/register", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    // A registered student is still not an organizer.
    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/events/{}/attendees", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    let res = app.router.clone().oneshot(
        Request::builder().method("GET").uri(format!("/api/events/{}/attendees", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    let list = body.as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["studentName"], "Student");
    assert_eq!(list[0]["studentEmail"], "student@campus.edu");
    assert_eq!(list[0]["attended"], false);
    assert!(list[0]["registeredAt"].as_str().is_some());
}

#[tokio::test]
async fn test_check_in_toggle_round_trip() {
    let app = TestApp::new().await;
    let (owner, _, eid) = create_setup(&app).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/events/{}/register", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    // false -> true -> false, every hop a 200.
    let res = check_in(&app, &owner, &eid, &student.user_id, true).await;
    assert_eq!(res.status(), StatusCode::OK);

    let res = check_in(&app, &owner, &eid, &student.user_id, false).await;
    assert_eq!(res.status(), StatusCode::OK);

    let attended: bool = sqlx::query_scalar("SELECT attended FROM registrations WHERE event_id = ? AND user_id = ?")
        .bind(&eid)
        .bind(&student.user_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert!(!attended, "Final toggle state must be false");
}

#[tokio::test]
async fn test_check_in_by_non_organizer_forbidden() {
    let app = TestApp::new().await;
    let (_, _, eid) = create_setup(&app).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;
    let other = app.signup("Other", "other@campus.edu", "pw").await;

    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/events/{}/register", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let res = check_in(&app, &other, &eid, &student.user_id, true).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_check_in_unregistered_user_not_found() {
    let app = TestApp::new().await;
    let (owner, _, eid) = create_setup(&app).await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    let res = check_in(&app, &owner, &eid, &student.user_id, true).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_society_owner_can_check_in_for_managers_event() {
    let app = TestApp::new().await;
    let (owner, sid, _) = create_setup(&app).await;
    let manager = app.signup("Manager", "manager@campus.edu", "pw").await;
    let student = app.signup("Student", "student@campus.edu", "pw").await;

    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/societies/{}/managers", sid))
            .header(header::AUTHORIZATION, format!("Bearer {}", owner.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"email": "manager@campus.edu"}).to_string())).unwrap()
    ).await.unwrap();

    // Event created by the manager; the owner is still an organizer of it.
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/events")
            .header(header::AUTHORIZATION, format!("Bearer {}", manager.token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "societyId": sid, "title": "Managed Event", "description": "x",
                "eventType": "workshop",
                "startDate": (Utc::now() + Duration::days(3)).to_rfc3339()
            }).to_string())).unwrap()
    ).await.unwrap();
    let eid = parse_body(res).await["id"].as_str().unwrap().to_string();

    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/events/{}/register", eid))
            .header(header::AUTHORIZATION, format!("Bearer {}", student.token))
            .body(Body::empty()).unwrap()
    ).await.unwrap();

    let res = check_in(&app, &owner, &eid, &student.user_id, true).await;
    assert_eq!(res.status(), StatusCode::OK);
}
