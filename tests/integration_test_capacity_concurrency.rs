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

async fn create_event_with_capacity(app: &TestApp, owner: &AuthSession, capacity: i64) -> String {
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
                "societyId": sid, "title": "Limited Seats", "description": "Small room",
                "eventType": "workshop", "capacity": capacity,
                "startDate": (Utc::now() + Duration::days(7)).to_rfc3339()
            }).to_string())).unwrap()
    ).await.unwrap();
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

fn register_request(token: &str, event_id: &str) -> Request<Body> {
    Request::builder().method("POST").uri(format!("/api/events/{}/register", event_id))
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty()).unwrap()
}

// capacity=2, 3 concurrent registrations from distinct users: exactly two
// must be admitted no matter how the requests interleave.
#[tokio::test]
async fn test_concurrent_registrations_respect_capacity() {
    let app = TestApp::new().await;
    let owner = app.signup("Owner", "owner@campus.edu", "pw").await;
    let eid = create_event_with_capacity(&app, &owner, 2).await;

    let u1 = app.signup("U1", "u1@campus.edu", "pw").await;
    let u2 = app.signup("U2", "u2@campus.edu", "pw").await;
    let u3 = app.signup("U3", "u3@campus.edu", "pw").await;

    let (r1, r2, r3) = tokio::join!(
        app.router.clone().oneshot(register_request(&u1.token, &eid)),
        app.router.clone().oneshot(register_request(&u2.token, &eid)),
        app.router.clone().oneshot(register_request(&u3.token, &eid)),
    );

    let statuses = [r1.unwrap().status(), r2.unwrap().status(), r3.unwrap().status()];
    let created = statuses.iter().filter(|s| **s == StatusCode::CREATED).count();
    let rejected = statuses.iter().filter(|s| **s == StatusCode::BAD_REQUEST).count();

    assert_eq!(created, 2, "Exactly two registrations may be admitted: {:?}", statuses);
    assert_eq!(rejected, 1, "The third attempt must be rejected as full: {:?}", statuses);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE event_id = ?")
        .bind(&eid)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 2, "The store may never hold more rows than capacity");
}

// Same property across repeated bursts: the accepted count never drifts
// past capacity even when every burst races against a partially full event.
#[tokio::test]
async fn test_capacity_holds_across_bursts() {
    let app = TestApp::new().await;
    let owner = app.signup("Owner", "owner@campus.edu", "pw").await;
    let eid = create_event_with_capacity(&app, &owner, 3).await;

    let mut sessions = Vec::new();
    for i in 0..6 {
        sessions.push(app.signup(&format!("U{}", i), &format!("u{}@campus.edu", i), "pw").await);
    }

    for pair in sessions.chunks(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let (ra, rb) = tokio::join!(
            app.router.clone().oneshot(register_request(&a.token, &eid)),
            app.router.clone().oneshot(register_request(&b.token, &eid)),
        );
        // Each request either succeeds or is rejected as full; both are
        // terminal for this property.
        for res in [ra.unwrap(), rb.unwrap()] {
            assert!(
                res.status() == StatusCode::CREATED || res.status() == StatusCode::BAD_REQUEST,
                "Unexpected status {}", res.status()
            );
        }
    }

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM registrations WHERE event_id = ?")
        .bind(&eid)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(count, 3);
}
