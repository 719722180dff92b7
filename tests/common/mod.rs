#![allow(dead_code)]

use axum::{body::Body, http::Request, response::Response, Router};
use sea_orm::{ActiveModelTrait, Database, DatabaseConnection, Set};
use sea_orm_migration::MigratorTrait;
use serde_json::Value;

use drive_easy::{config::Config, entities::document, routes, AppState};

pub const JWT_SECRET: &str = "test-secret";

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: JWT_SECRET.to_string(),
        jwt_expiration_hours: 1,
        server_host: "127.0.0.1".to_string(),
        server_port: 0,
        rate_limit_per_minute: 100,
    }
}

/// In-memory SQLite database with migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn setup_app() -> (Router, DatabaseConnection) {
    let db = setup_test_db().await;
    let router = routes::create_router(AppState::new(db.clone(), test_config()));
    (router, db)
}

pub async fn insert_document(db: &DatabaseConnection, id: &str, body: Value) {
    document::ActiveModel {
        id: Set(id.to_string()),
        body: Set(body),
    }
    .insert(db)
    .await
    .unwrap();
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}
