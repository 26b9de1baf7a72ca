mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
};
use common::{AuthHeaders, TestApp};
use serde_json::{json, Value};
use tower::ServiceExt;

async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn create_club(app: &TestApp, auth: &AuthHeaders, name: &str) -> String {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri("/api/clubs")
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"name": name}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::CREATED);
    parse_body(res).await["id"].as_str().unwrap().to_string()
}

async fn create_schedule(app: &TestApp, auth: &AuthHeaders, club_id: &str, payload: Value) -> axum::response::Response {
    app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/clubs/{}/schedules", club_id))
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .header("X-CSRF-Token", &auth.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(payload.to_string())).unwrap()
    ).await.unwrap()
}

async fn list_schedules(app: &TestApp, auth: &AuthHeaders, club_id: &str, query: &str) -> axum::response::Response {
    let uri = if query.is_empty() {
        format!("/api/clubs/{}/schedules", club_id)
    } else {
        format!("/api/clubs/{}/schedules?{}", club_id, query)
    };
    app.router.clone().oneshot(
        Request::builder().method("GET").uri(uri)
            .header(header::COOKIE, format!("access_token={}", auth.access_token))
            .body(Body::empty()).unwrap()
    ).await.unwrap()
}

async fn join_and_approve(app: &TestApp, leader: &AuthHeaders, member: &AuthHeaders, club_id: &str) -> String {
    let res = app.router.clone().oneshot(
        Request::builder().method("POST").uri(format!("/api/clubs/{}/join", club_id))
            .header(header::COOKIE, format!("access_token={}", member.access_token))
            .header("X-CSRF-Token", &member.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    let member_id = parse_body(res).await["request"]["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("POST")
            .uri(format!("/api/clubs/{}/members/{}/approve", club_id, member_id))
            .header(header::COOKIE, format!("access_token={}", leader.access_token))
            .header("X-CSRF-Token", &leader.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    member_id
}

#[tokio::test]
async fn test_range_query_uses_interval_overlap() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let res = create_schedule(&app, &leader, &club_id, json!({
        "title": "Multi-day trek",
        "start_at": "2024-01-10T00:00:00Z",
        "end_at": "2024-01-15T00:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    // The event starts before `from` but ends inside the window: included.
    let res = list_schedules(&app, &leader, &club_id, "from=2024-01-14&to=2024-01-20").await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["schedules"].as_array().unwrap().len(), 1);

    // The window opens after the event has ended: excluded.
    let res = list_schedules(&app, &leader, &club_id, "from=2024-01-16").await;
    let body = parse_body(res).await;
    assert_eq!(body["schedules"].as_array().unwrap().len(), 0);

    // A `to` before the event starts: excluded.
    let res = list_schedules(&app, &leader, &club_id, "to=2024-01-09").await;
    let body = parse_body(res).await;
    assert_eq!(body["schedules"].as_array().unwrap().len(), 0);

    // One-sided `from` at the start boundary: included.
    let res = list_schedules(&app, &leader, &club_id, "from=2024-01-15").await;
    let body = parse_body(res).await;
    assert_eq!(body["schedules"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_single_day_schedule_and_inverted_update() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    // Zero-length range is valid (end == start).
    let res = create_schedule(&app, &leader, &club_id, json!({
        "title": "Kickoff",
        "start_at": "2024-03-01T00:00:00Z",
        "end_at": "2024-03-01T00:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let schedule_id = parse_body(res).await["schedule"]["id"].as_str().unwrap().to_string();

    // Inverting the range in an update is rejected.
    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/clubs/{}/schedules/{}", club_id, schedule_id))
            .header(header::COOKIE, format!("access_token={}", leader.access_token))
            .header("X-CSRF-Token", &leader.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({
                "start_at": "2024-03-05T00:00:00Z",
                "end_at": "2024-03-01T00:00:00Z"
            }).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_rejects_inverted_range() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let res = create_schedule(&app, &leader, &club_id, json!({
        "title": "Backwards",
        "start_at": "2024-03-05T00:00:00Z",
        "end_at": "2024-03-01T00:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_reader_cannot_mutate_schedules() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let (_, reader) = app.register_and_login("reader@example.com", "Reader").await;
    join_and_approve(&app, &leader, &reader, &club_id).await;

    let res = create_schedule(&app, &reader, &club_id, json!({
        "title": "Not allowed",
        "start_at": "2024-03-01T00:00:00Z",
        "end_at": "2024-03-02T00:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    // But an approved READER can list.
    let res = list_schedules(&app, &reader, &club_id, "").await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_writer_can_mutate_schedules() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let (_, writer) = app.register_and_login("writer@example.com", "Writer").await;
    let member_id = join_and_approve(&app, &leader, &writer, &club_id).await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/clubs/{}/members/{}", club_id, member_id))
            .header(header::COOKIE, format!("access_token={}", leader.access_token))
            .header("X-CSRF-Token", &leader.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"role": "WRITER"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = create_schedule(&app, &writer, &club_id, json!({
        "title": "Writer event",
        "start_at": "2024-03-01T00:00:00Z",
        "end_at": "2024-03-02T00:00:00Z"
    })).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let schedule_id = parse_body(res).await["schedule"]["id"].as_str().unwrap().to_string();

    let res = app.router.clone().oneshot(
        Request::builder().method("DELETE")
            .uri(format!("/api/clubs/{}/schedules/{}", club_id, schedule_id))
            .header(header::COOKIE, format!("access_token={}", writer.access_token))
            .header("X-CSRF-Token", &writer.csrf_token)
            .body(Body::empty()).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = list_schedules(&app, &writer, &club_id, "").await;
    let body = parse_body(res).await;
    assert_eq!(body["schedules"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_non_member_cannot_list() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let (_, outsider) = app.register_and_login("out@example.com", "Outsider").await;
    let res = list_schedules(&app, &outsider, &club_id, "").await;
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_listing_sorted_ascending_with_limit() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    for (title, start, end) in [
        ("March", "2024-03-01T00:00:00Z", "2024-03-02T00:00:00Z"),
        ("January", "2024-01-01T00:00:00Z", "2024-01-02T00:00:00Z"),
        ("February", "2024-02-01T00:00:00Z", "2024-02-02T00:00:00Z"),
    ] {
        let res = create_schedule(&app, &leader, &club_id, json!({
            "title": title, "start_at": start, "end_at": end
        })).await;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = list_schedules(&app, &leader, &club_id, "").await;
    let body = parse_body(res).await;
    let titles: Vec<&str> = body["schedules"].as_array().unwrap().iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["January", "February", "March"]);

    let res = list_schedules(&app, &leader, &club_id, "limit=2").await;
    let body = parse_body(res).await;
    let titles: Vec<&str> = body["schedules"].as_array().unwrap().iter()
        .map(|s| s["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["January", "February"]);

    let res = list_schedules(&app, &leader, &club_id, "limit=0").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_invalid_range_bounds_rejected() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let res = list_schedules(&app, &leader, &club_id, "from=not-a-date").await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_partial_patch_and_content_clearing() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let res = create_schedule(&app, &leader, &club_id, json!({
        "title": "Original",
        "start_at": "2024-03-01T00:00:00Z",
        "end_at": "2024-03-02T00:00:00Z",
        "content": "Bring boots"
    })).await;
    let schedule_id = parse_body(res).await["schedule"]["id"].as_str().unwrap().to_string();

    // Title-only patch: the range and content stay as they were.
    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/clubs/{}/schedules/{}", club_id, schedule_id))
            .header(header::COOKIE, format!("access_token={}", leader.access_token))
            .header("X-CSRF-Token", &leader.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"title": "Renamed"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert_eq!(body["schedule"]["title"], "Renamed");
    assert_eq!(body["schedule"]["start_at"], "2024-03-01T00:00:00Z");
    assert_eq!(body["schedule"]["content"], "Bring boots");

    // An explicit null clears the nullable field.
    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/clubs/{}/schedules/{}", club_id, schedule_id))
            .header(header::COOKIE, format!("access_token={}", leader.access_token))
            .header("X-CSRF-Token", &leader.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"content": null}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body = parse_body(res).await;
    assert!(body["schedule"]["content"].is_null());
    assert_eq!(body["schedule"]["title"], "Renamed");
}

#[tokio::test]
async fn test_update_authorizes_against_owning_club() {
    let app = TestApp::new().await;
    let (_, leader_a) = app.register_and_login("a@example.com", "Leader A").await;
    let club_a = create_club(&app, &leader_a, "Club A").await;

    let (_, leader_b) = app.register_and_login("b@example.com", "Leader B").await;
    let club_b = create_club(&app, &leader_b, "Club B").await;

    let res = create_schedule(&app, &leader_a, &club_a, json!({
        "title": "Club A event",
        "start_at": "2024-03-01T00:00:00Z",
        "end_at": "2024-03-02T00:00:00Z"
    })).await;
    let schedule_id = parse_body(res).await["schedule"]["id"].as_str().unwrap().to_string();

    // Leader B addresses A's schedule through B's own club path; the
    // permission check runs against the schedule's real club and denies.
    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/clubs/{}/schedules/{}", club_b, schedule_id))
            .header(header::COOKIE, format!("access_token={}", leader_b.access_token))
            .header("X-CSRF-Token", &leader_b.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"title": "Hijacked"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_update_missing_schedule_not_found() {
    let app = TestApp::new().await;
    let (_, leader) = app.register_and_login("lead@example.com", "Leader").await;
    let club_id = create_club(&app, &leader, "Hiking Club").await;

    let res = app.router.clone().oneshot(
        Request::builder().method("PATCH")
            .uri(format!("/api/clubs/{}/schedules/no-such-id", club_id))
            .header(header::COOKIE, format!("access_token={}", leader.access_token))
            .header("X-CSRF-Token", &leader.csrf_token)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"title": "Ghost"}).to_string())).unwrap()
    ).await.unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
