use axum::{
    body::Body,
    extract::Request,
    routing::{get, patch, post},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{attendance, auth, event, health, notification, profile, registration, society};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{info_span, Span, error, info};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Auth
        .route("/api/auth/signup", post(auth::signup))
        .route("/api/auth/login", post(auth::login))

        // Societies
        .route("/api/societies/create", post(society::create_society))
        .route("/api/societies", get(society::list_societies))
        .route("/api/societies/my", get(society::my_societies))
        .route("/api/societies/{society_id}", get(society::get_society).put(society::update_society).delete(society::delete_society))
        .route("/api/societies/{society_id}/managers", post(society::add_manager))
        .route("/api/societies/{society_id}/managers/{user_id}", axum::routing::delete(society::remove_manager))
        .route("/api/societies/{society_id}/stats", get(society::society_stats))

        // Events
        .route("/api/events", get(event::list_events).post(event::create_event))
        .route("/api/events/{event_id}", get(event::get_event).put(event::update_event).delete(event::delete_event))

        // Registration
        .route("/api/events/{event_id}/register", post(registration::register).delete(registration::unregister))

        // Attendance
        .route("/api/events/{event_id}/attendees", get(attendance::list_attendees))
        .route("/api/events/{event_id}/attendees/{user_id}/check-in", patch(attendance::check_in))

        // Profile & dashboard
        .route("/api/users/me/profile", get(profile::get_profile))
        .route("/api/users/me", axum::routing::put(profile::update_profile))
        .route("/api/users/me/registrations", get(registration::my_registrations))

        // Notifications
        .route("/api/users/me/notifications", get(notification::my_notifications))
        .route("/api/notifications/{notification_id}/read", patch(notification::mark_read))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        user_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
