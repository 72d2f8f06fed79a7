//! HTTP Request Handlers
//!
//! This module contains all HTTP request handlers organized by domain.

pub mod health;
pub mod judging;
pub mod results;
pub mod roster;
pub mod settings;

use axum::Router;

use crate::state::AppState;

/// Create all API routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(health::routes())
        .merge(roster::routes())
        .nest("/settings", settings::routes())
        .nest("/judging", judging::routes())
        .nest("/results", results::routes())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        Router,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::{db::test_pool, state::AppState};

    async fn app() -> Router {
        Router::new()
            .nest("/api/v1", super::routes())
            .with_state(AppState::new(test_pool().await))
    }

    async fn call(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, json)
    }

    #[tokio::test]
    async fn test_health() {
        let app = app().await;
        let (status, body) = call(&app, "GET", "/api/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["database"], "connected");
    }

    #[tokio::test]
    async fn test_judging_flow_over_http() {
        let app = app().await;

        let (status, _) = call(
            &app,
            "PUT",
            "/api/v1/settings/grades",
            Some(json!({ "thresholds": [
                { "grade": "A", "min_marks": 25 },
                { "grade": "B", "min_marks": 15 },
                { "grade": "C", "min_marks": 0 }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = call(
            &app,
            "PUT",
            "/api/v1/settings/classes",
            Some(json!({ "classes": [
                { "class": "7", "category": "Junior" },
                { "class": "11", "category": "Senior" }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) =
            call(&app, "POST", "/api/v1/events", Some(json!({ "name": "Essay" }))).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = call(
            &app,
            "POST",
            "/api/v1/students/import",
            Some(json!({ "students": [
                { "admission_number": "1001", "name": "Anna", "class": "7", "division": "A",
                  "house": "Red" },
                { "admission_number": "1002", "name": "Bala", "class": "7", "division": "B",
                  "house": "Blue" }
            ]})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        for adm in ["1001", "1002"] {
            let (status, _) = call(
                &app,
                "PUT",
                &format!("/api/v1/students/{}/registration", adm),
                Some(json!({ "events": ["Essay"] })),
            )
            .await;
            assert_eq!(status, StatusCode::OK);
        }

        let (status, sheet) = call(&app, "GET", "/api/v1/judging/Junior/Essay", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(sheet["kind"], "individual");
        assert_eq!(sheet["rows"].as_array().unwrap().len(), 2);

        // Unjudged rows cannot be submitted
        let (status, body) =
            call(&app, "POST", "/api/v1/judging/Junior/Essay/submit", Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

        let edits = json!({ "rows": [
            { "key": "1001", "marks": [9, 9, 9] },
            { "key": "1002", "marks": [5, 6, null], "remarks": "late" }
        ]});
        let (status, preview) =
            call(&app, "POST", "/api/v1/judging/Junior/Essay/preview", Some(edits)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(preview["error"]["message"].as_str().unwrap().contains("1002"));

        let edits = json!({ "rows": [
            { "key": "1001", "marks": [9, 9, 9] },
            { "key": "1002", "marks": [5, 6, 7], "remarks": "late" }
        ]});
        let (status, submitted) =
            call(&app, "POST", "/api/v1/judging/Junior/Essay/submit", Some(edits)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(submitted["saved"], 2);

        let (status, results) = call(&app, "GET", "/api/v1/results/Junior/Essay", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(results["results"][0]["admission_number"], "1001");
        assert_eq!(results["results"][0]["rank"], "FIRST");
        assert_eq!(results["results"][0]["grade"], "A");
        assert_eq!(results["results"][1]["rank"], "SECOND");

        let (status, certificates) =
            call(&app, "GET", "/api/v1/results/Junior/Essay/certificates", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(certificates["certificates"][0]["class_division"], "VII - A");
        assert_eq!(certificates["certificates"][0]["event_title"], "Junior - Essay");

        let (status, participation) = call(
            &app,
            "GET",
            "/api/v1/results/participation?category=Junior",
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(participation["total_participants"], 2);
        assert_eq!(participation["events"][0]["event_name"], "Essay");
        assert_eq!(participation["events"][0]["participants"], 2);
    }

    #[tokio::test]
    async fn test_unknown_event_is_not_found() {
        let app = app().await;
        let (status, body) = call(&app, "GET", "/api/v1/judging/Junior/Chess", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"]["code"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn test_invalid_parameters_rejected() {
        let app = app().await;
        let (status, _) = call(
            &app,
            "PUT",
            "/api/v1/settings/parameters",
            Some(json!({
                "number_of_judges": 0,
                "max_marks_per_judge": 10,
                "min_marks_for_prize": 1,
                "max_events_per_student": 3
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
