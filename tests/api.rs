mod common;

use axum::{body::Body, http::Request, http::StatusCode};
use sea_orm::ConnectionTrait;
use serde_json::json;
use tower::ServiceExt;

use common::*;

#[tokio::test]
async fn test_root_reports_liveness() {
    let (app, _db) = setup_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_bytes(response).await, b"API Running!");
}

#[tokio::test]
async fn test_data_returns_every_document() {
    let (app, db) = setup_app().await;
    insert_document(&db, "c1", json!({ "name": "Ravi", "text": "Smooth pickup" })).await;
    insert_document(&db, "c2", json!({ "text": "Car was clean", "stars": 5 })).await;

    let response = app.oneshot(get("/data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let docs = body.as_array().unwrap();
    assert_eq!(docs.len(), 2);
    assert!(docs.contains(&json!({ "_id": "c1", "name": "Ravi", "text": "Smooth pickup" })));
    assert!(docs.contains(&json!({ "_id": "c2", "text": "Car was clean", "stars": 5 })));
}

#[tokio::test]
async fn test_data_empty_collection() {
    let (app, _db) = setup_app().await;

    let response = app.oneshot(get("/data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_data_database_failure_is_server_error() {
    let (app, db) = setup_app().await;
    db.execute_unprepared("DROP TABLE document").await.unwrap();

    let response = app.oneshot(get("/data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|msg| !msg.is_empty()));
}

#[tokio::test]
async fn test_cities_search() {
    let (app, _db) = setup_app().await;

    let response = app.oneshot(get("/api/cities?q=maharashtra")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["Mumbai", "Pune"]);
    assert_eq!(body[0]["carsCount"], 245);
}

#[tokio::test]
async fn test_cars_filtered_by_city_category_and_sort() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(get("/api/cars?city=Mumbai&category=SUV&sort=price_high"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let cars = body.as_array().unwrap();
    assert!(!cars.is_empty());
    for car in cars {
        assert_eq!(car["city"], "Mumbai");
        assert_eq!(car["category"], "SUV");
        assert_eq!(car["available"], true);
    }
}

#[tokio::test]
async fn test_cars_no_results() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(get("/api/cars?city=Mumbai&q=zeppelin"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!([]));
}

#[tokio::test]
async fn test_cars_rejects_bad_parameters() {
    let (app, _db) = setup_app().await;

    let response = app.clone().oneshot(get("/api/cars")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get("/api/cars?city=Mumbai&sort=cheapest"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(get("/api/cars?city=Mumbai&category=Convertible"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_prices_rental_window() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(post_json(
            "/api/quote",
            &json!({
                "carId": "4",
                "startDate": "2024-01-01T10:00:00",
                "endDate": "2024-01-01T13:00:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(
        body_json(response).await,
        json!({
            "carId": "4",
            "totalHours": 3,
            "baseAmount": 1500,
            "breakdown": {
                "baseAmount": 1500,
                "gst": 270,
                "insurance": 75,
                "convenience": 25,
                "discount": 0,
                "total": 1870
            }
        })
    );
}

#[tokio::test]
async fn test_quote_accepts_booking_form_timestamps() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(post_json(
            "/api/quote",
            &json!({
                "carId": "4",
                "startDate": "2024-01-01T10:00",
                "endDate": "2024-01-01T13:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["totalHours"], 3);
    assert_eq!(body["breakdown"]["total"], 1870);
}

#[tokio::test]
async fn test_quote_rounds_partial_hours_up() {
    let (app, _db) = setup_app().await;

    let response = app
        .oneshot(post_json(
            "/api/quote",
            &json!({
                "carId": "1",
                "startDate": "2024-01-01T10:00:00",
                "endDate": "2024-01-01T11:30:00"
            }),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["totalHours"], 2);
    assert_eq!(body["baseAmount"], 240);
}

#[tokio::test]
async fn test_quote_rejects_invalid_window_and_unknown_car() {
    let (app, _db) = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/quote",
            &json!({
                "carId": "4",
                "startDate": "2024-01-01T13:00:00",
                "endDate": "2024-01-01T10:00:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(
        body_json(response).await["error"],
        "Please select valid dates and times"
    );

    let response = app
        .clone()
        .oneshot(post_json("/api/quote", &json!({ "carId": "4" })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .oneshot(post_json(
            "/api/quote",
            &json!({
                "carId": "999",
                "startDate": "2024-01-01T10:00:00",
                "endDate": "2024-01-01T13:00:00"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_login_then_me() {
    let (app, _db) = setup_app().await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({ "name": "Asha", "email": "asha@example.com", "city": "Mumbai" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let token = body["token"].as_str().unwrap().to_string();
    assert_eq!(body["user"]["name"], "Asha");
    assert!(!body["user"]["id"].as_str().unwrap().is_empty());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let me = body_json(response).await;
    assert_eq!(me["id"], body["user"]["id"]);
    assert_eq!(me["email"], "asha@example.com");
    assert_eq!(me["city"], "Mumbai");
}

#[tokio::test]
async fn test_me_requires_valid_token() {
    let (app, _db) = setup_app().await;

    let response = app.clone().oneshot(get("/api/auth/me")).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["error"], "Missing bearer token");

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/auth/me")
                .header("authorization", "Bearer not-a-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
