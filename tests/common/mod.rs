// tests/common/mod.rs

#![allow(dead_code)]

use serde_json::{Value, json};
use sqlx::{SqlitePool, sqlite::SqlitePoolOptions};
use vidly::{
    config::Config,
    routes,
    state::AppState,
    utils::{jwt::sign_jwt, object_id::new_object_id},
};

pub struct TestApp {
    pub address: String,
    pub pool: SqlitePool,
    pub config: Config,
    pub client: reqwest::Client,
}

/// Spawns the app on a random port, backed by a fresh in-memory database.
pub async fn spawn_app() -> TestApp {
    // A single connection that never expires keeps the in-memory database alive.
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
        .expect("Failed to open in-memory SQLite");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    let config = Config {
        database_url: "sqlite::memory:".to_string(),
        jwt_secret: "test_secret_for_integration_tests".to_string(),
        jwt_expiration: 600,
        rust_log: "error".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:3000".to_string()],
        admin_name: "Administrator".to_string(),
        admin_email: None,
        admin_password: None,
    };

    let state = AppState {
        pool: pool.clone(),
        config: config.clone(),
    };
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        pool,
        config,
        client: reqwest::Client::new(),
    }
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Token for a user that does not have to exist in the database.
    pub fn token(&self, is_admin: bool) -> String {
        self.token_for(&new_object_id(), is_admin)
    }

    pub fn token_for(&self, id: &str, is_admin: bool) -> String {
        sign_jwt(id, is_admin, &self.config.jwt_secret, 600).unwrap()
    }

    pub async fn post_json(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .post(self.url(path))
            .header("x-auth-token", token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn put_json(&self, path: &str, token: &str, body: &Value) -> reqwest::Response {
        self.client
            .put(self.url(path))
            .header("x-auth-token", token)
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn delete(&self, path: &str, token: &str) -> reqwest::Response {
        self.client
            .delete(self.url(path))
            .header("x-auth-token", token)
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn create_genre(&self, name: &str) -> Value {
        let res = self
            .post_json("/api/genres", &self.token(false), &json!({ "name": name }))
            .await;
        assert_eq!(res.status().as_u16(), 200);
        res.json().await.unwrap()
    }

    pub async fn create_customer(&self, name: &str) -> Value {
        let res = self
            .post_json(
                "/api/customers",
                &self.token(false),
                &json!({ "name": name, "phone": "555-0100" }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 200);
        res.json().await.unwrap()
    }

    pub async fn create_movie(&self, title: &str, genre_id: &str, stock: i64) -> Value {
        let res = self
            .post_json(
                "/api/movies",
                &self.token(false),
                &json!({
                    "title": title,
                    "genreId": genre_id,
                    "numberInStock": stock,
                    "dailyRentalRate": 2
                }),
            )
            .await;
        assert_eq!(res.status().as_u16(), 200);
        res.json().await.unwrap()
    }

    pub async fn count(&self, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
            .fetch_one(&self.pool)
            .await
            .unwrap()
    }
}
