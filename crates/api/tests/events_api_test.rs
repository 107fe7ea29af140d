// HTTP tests for the event routes
// Drive the full router in-process; no listener or external database needed.

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::NaiveDate;
use evently_api::{
    api::events::AppState, build_app_with_state, EventService, ServerConfig, StorageBackend,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use tower::ServiceExt;

const TODAY: (i32, u32, u32) = (2024, 1, 10);

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
}

fn app_with(store: StorageBackend, config: &ServerConfig) -> Router {
    let kind = store.kind();
    let service = EventService::new(Arc::new(store)).with_clock(Arc::new(today));
    build_app_with_state(AppState::from_service(service), kind, config)
}

fn memory_app() -> Router {
    app_with(StorageBackend::in_memory(), &ServerConfig::default())
}

async fn sqlite_app() -> Router {
    let store = StorageBackend::sqlite("sqlite::memory:", true).await.unwrap();
    app_with(store, &ServerConfig::default())
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

async fn delete(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::builder()
            .method(Method::DELETE)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post_json(app: &Router, body: Value) -> (StatusCode, Value) {
    send(
        app,
        Request::post("/event")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn post_form(app: &Router, body: &str) -> (StatusCode, Value) {
    send(
        app,
        Request::post("/event")
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

async fn create(app: &Router, name: &str, date: &str) -> i64 {
    let (status, body) = post_json(app, json!({"event": name, "date": date})).await;
    assert_eq!(status, StatusCode::OK, "create failed: {body}");
    body["id"].as_i64().unwrap()
}

fn names(body: &Value) -> Vec<String> {
    body.as_array()
        .unwrap()
        .iter()
        .map(|e| e["event"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_then_get_returns_same_event() {
    for app in [memory_app(), sqlite_app().await] {
        let (status, created) =
            post_json(&app, json!({"event": "Standup", "date": "2024-01-10"})).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(created["message"], "The event has been added!");
        assert_eq!(created["event"], "Standup");
        assert_eq!(created["date"], "2024-01-10");

        let id = created["id"].as_i64().unwrap();
        let (status, fetched) = get(&app, &format!("/event/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            fetched,
            json!({"id": id, "event": "Standup", "date": "2024-01-10"})
        );
    }
}

#[tokio::test]
async fn test_create_from_form_body() {
    let app = sqlite_app().await;
    let (status, created) = post_form(&app, "event=Team+lunch&date=2024-03-05").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["event"], "Team lunch");
    assert_eq!(created["date"], "2024-03-05");
}

#[tokio::test]
async fn test_create_from_multipart_body() {
    let app = memory_app();
    let boundary = "evently-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"event\"\r\n\r\n\
         Standup\r\n\
         --{boundary}\r\n\
         Content-Disposition: form-data; name=\"date\"\r\n\r\n\
         2024-01-10\r\n\
         --{boundary}--\r\n"
    );

    let (status, created) = send(
        &app,
        Request::post("/event")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "create failed: {created}");
    assert_eq!(created["event"], "Standup");
    assert_eq!(created["date"], "2024-01-10");
}

#[tokio::test]
async fn test_create_from_query_args() {
    let app = sqlite_app().await;
    let (status, created) = send(
        &app,
        Request::post("/event?event=Standup&date=2024-01-10")
            .body(Body::empty())
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK, "create failed: {created}");
    assert_eq!(created["event"], "Standup");

    let id = created["id"].as_i64().unwrap();
    let (status, fetched) = get(&app, &format!("/event/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["date"], "2024-01-10");
}

#[tokio::test]
async fn test_create_body_fields_take_precedence_over_query() {
    let app = memory_app();
    let (status, created) = send(
        &app,
        Request::post("/event?event=FromQuery&date=2024-02-01")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json!({"event": "FromBody"}).to_string()))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["event"], "FromBody");
    assert_eq!(created["date"], "2024-02-01");
}

#[tokio::test]
async fn test_create_normalizes_date_format() {
    let app = memory_app();
    let (status, created) = post_json(&app, json!({"event": "Dentist", "date": "2024-3-5"})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["date"], "2024-03-05");
}

#[tokio::test]
async fn test_create_missing_event_name() {
    let app = memory_app();
    let (status, body) = post_json(&app, json!({"date": "2024-01-10"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": {"event": "The event name is required!"}})
    );
}

#[tokio::test]
async fn test_create_blank_event_name() {
    let app = memory_app();
    let (status, body) = post_json(&app, json!({"event": "   ", "date": "2024-01-10"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"]["event"], "The event name is required!");
}

#[tokio::test]
async fn test_create_missing_or_malformed_date() {
    let app = memory_app();
    let expected = json!({"message": {
        "date": "The event date with the correct format is required! The correct format is YYYY-MM-DD!"
    }});

    let (status, body) = post_json(&app, json!({"event": "Standup"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);

    let (status, body) = post_json(&app, json!({"event": "Standup", "date": "10/01/2024"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, expected);
}

#[tokio::test]
async fn test_create_with_empty_body() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Request::post("/event").body(Body::empty()).unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"]["event"], "The event name is required!");
}

#[tokio::test]
async fn test_create_with_invalid_json() {
    let app = memory_app();
    let (status, body) = send(
        &app,
        Request::post("/event")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_rejected_create_stores_nothing() {
    let app = memory_app();
    post_json(&app, json!({"event": "No date"})).await;

    let (_, body) = get(&app, "/event").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_get_unknown_event_is_404() {
    let app = sqlite_app().await;

    let (status, body) = get(&app, "/event/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"message": "The event doesn't exist!"}));

    let (status, _) = get(&app, "/event/not-a-number").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_then_get_is_404() {
    for app in [memory_app(), sqlite_app().await] {
        let id = create(&app, "Standup", "2024-01-10").await;

        let (status, body) = get(&app, &format!("/event/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["id"], id);

        let (status, body) = delete(&app, &format!("/event/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "The event has been deleted!"}));

        let (status, body) = get(&app, &format!("/event/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "The event doesn't exist!");

        let (status, _) = delete(&app, &format!("/event/{id}")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn test_round_trip_for_many_events() {
    let app = sqlite_app().await;
    let cases = [
        ("New year", "2024-01-01"),
        ("Leap day", "2024-02-29"),
        ("Ünïcödé ☃", "1999-12-31"),
        ("x", "2100-06-15"),
    ];

    for (name, date) in cases {
        let id = create(&app, name, date).await;

        let (status, body) = get(&app, &format!("/event/{id}")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"id": id, "event": name, "date": date}));

        assert_eq!(delete(&app, &format!("/event/{id}")).await.0, StatusCode::OK);
        assert_eq!(
            get(&app, &format!("/event/{id}")).await.0,
            StatusCode::NOT_FOUND
        );
    }
}

#[tokio::test]
async fn test_list_all_events() {
    let app = sqlite_app().await;
    create(&app, "A", "2024-01-05").await;
    create(&app, "B", "2023-06-01").await;

    let (status, body) = get(&app, "/event").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["A", "B"]);
}

#[tokio::test]
async fn test_filter_inclusive_range_regardless_of_order() {
    for app in [memory_app(), sqlite_app().await] {
        create(&app, "after", "2024-02-01").await;
        create(&app, "last-day", "2024-01-31").await;
        create(&app, "before", "2023-12-31").await;
        create(&app, "mid", "2024-01-15").await;
        create(&app, "first-day", "2024-01-01").await;

        let (status, body) = get(&app, "/event?start_time=2024-01-01&end_time=2024-01-31").await;
        assert_eq!(status, StatusCode::OK);

        let got: HashSet<String> = names(&body).into_iter().collect();
        let expected: HashSet<String> = ["last-day", "mid", "first-day"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(got, expected);
    }
}

#[tokio::test]
async fn test_filter_with_reversed_bounds_is_empty() {
    let app = memory_app();
    create(&app, "mid", "2024-01-15").await;

    let (status, body) = get(&app, "/event?start_time=2024-01-31&end_time=2024-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn test_single_bound_returns_unfiltered_list() {
    let app = sqlite_app().await;
    create(&app, "old", "2020-01-01").await;
    create(&app, "new", "2030-01-01").await;

    let (status, body) = get(&app, "/event?start_time=2024-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["old", "new"]);

    let (status, body) = get(&app, "/event?end_time=2024-01-01").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&body), vec!["old", "new"]);
}

#[tokio::test]
async fn test_malformed_bound_is_400() {
    let app = memory_app();

    let (status, body) = get(&app, "/event?start_time=yesterday&end_time=2024-01-31").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body,
        json!({"message": {"start_time": "The start date of the events! The correct format is YYYY-MM-DD!"}})
    );

    let (status, body) = get(&app, "/event?end_time=31-01-2024").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["message"]["end_time"],
        "The end date of the events! The correct format is YYYY-MM-DD!"
    );
}

#[tokio::test]
async fn test_duplicate_bound_is_json_400() {
    let app = memory_app();
    let (status, body) = get(
        &app,
        "/event?start_time=2024-01-01&start_time=2024-01-02&end_time=2024-01-31",
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["message"].is_string(), "unexpected body: {body}");
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let store = StorageBackend::sqlite("sqlite::memory:", true).await.unwrap();
    let app = app_with(store.clone(), &ServerConfig::default());
    store.close().await;

    for (status, body) in [
        get(&app, "/event").await,
        get(&app, "/event/today").await,
        get(&app, "/event/1").await,
        post_json(&app, json!({"event": "Standup", "date": "2024-01-10"})).await,
    ] {
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"message": "Internal server error"}));
    }
}

#[tokio::test]
async fn test_today_sentinel_when_no_events() {
    for app in [memory_app(), sqlite_app().await] {
        create(&app, "Tomorrow", "2024-01-11").await;

        let (status, body) = get(&app, "/event/today").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"data": "There are no events for today!"}));
    }
}

#[tokio::test]
async fn test_today_lists_matching_events() {
    for app in [memory_app(), sqlite_app().await] {
        create(&app, "Standup", "2024-01-10").await;
        create(&app, "Yesterday", "2024-01-09").await;
        create(&app, "Retro", "2024-01-10").await;

        let (status, body) = get(&app, "/event/today").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_array());
        assert_eq!(names(&body), vec!["Standup", "Retro"]);
        assert!(body
            .as_array()
            .unwrap()
            .iter()
            .all(|e| e["date"] == "2024-01-10"));
    }
}

#[tokio::test]
async fn test_concurrent_creates_yield_distinct_ids() {
    const N: usize = 50;

    for app in [memory_app(), sqlite_app().await] {
        let mut handles = Vec::with_capacity(N);
        for i in 0..N {
            let app = app.clone();
            handles.push(tokio::spawn(async move {
                create(&app, &format!("event-{i}"), "2024-01-10").await
            }));
        }

        let mut ids = HashSet::new();
        for handle in handles {
            ids.insert(handle.await.unwrap());
        }
        assert_eq!(ids.len(), N);

        let (_, body) = get(&app, "/event").await;
        assert_eq!(body.as_array().unwrap().len(), N);
    }
}

#[tokio::test]
async fn test_routes_respect_api_prefix() {
    let config = ServerConfig {
        api_prefix: "/api".to_string(),
        ..ServerConfig::default()
    };
    let app = app_with(StorageBackend::in_memory(), &config);

    assert_eq!(get(&app, "/api/event").await.0, StatusCode::OK);
    assert_eq!(get(&app, "/event").await.0, StatusCode::NOT_FOUND);
    assert_eq!(get(&app, "/health").await.0, StatusCode::OK);
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let app = memory_app();
    let (status, body) = get(&app, "/api-doc/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["info"]["title"], "Evently API");
}
