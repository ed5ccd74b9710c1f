// tests/genres_tests.rs

mod common;

use common::spawn_app;
use serde_json::{Value, json};

#[tokio::test]
async fn list_returns_genres_sorted_by_name() {
    let app = spawn_app().await;
    app.create_genre("Thriller").await;
    app.create_genre("Comedy").await;
    app.create_genre("Action").await;

    let res = app.get("/api/genres").await;
    assert_eq!(res.status().as_u16(), 200);

    let genres: Vec<Value> = res.json().await.unwrap();
    let names: Vec<&str> = genres.iter().map(|g| g["name"].as_str().unwrap()).collect();
    assert_eq!(names, vec!["Action", "Comedy", "Thriller"]);
}

#[tokio::test]
async fn create_then_get_returns_the_same_document() {
    let app = spawn_app().await;
    let created = app.create_genre("Comedy").await;
    let id = created["_id"].as_str().expect("generated id");
    assert_eq!(id.len(), 24);

    let res = app.get(&format!("/api/genres/{}", id)).await;
    assert_eq!(res.status().as_u16(), 200);

    let fetched: Value = res.json().await.unwrap();
    assert_eq!(fetched, json!({ "_id": id, "name": "Comedy" }));
}

#[tokio::test]
async fn get_with_malformed_id_is_404() {
    let app = spawn_app().await;

    let res = app.get("/api/genres/1").await;
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn get_with_unknown_id_is_404() {
    let app = spawn_app().await;

    let res = app.get("/api/genres/5f1d7a3c9b2e4d6f8a0c1e3b").await;
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn malformed_id_never_reaches_the_store() {
    let app = spawn_app().await;
    // With the pool closed any lookup would surface as a 500.
    app.pool.close().await;

    let res = app.get("/api/genres/not-an-id").await;
    assert_eq!(res.status().as_u16(), 404);

    let res = app.get("/api/genres/5f1d7a3c9b2e4d6f8a0c1e3b").await;
    assert_eq!(res.status().as_u16(), 500);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Internal Server Error");
}

#[tokio::test]
async fn create_without_token_is_401_before_validation() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/genres"))
        .json(&json!({ "name": "x" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 401);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Access denied. No token provided.");
}

#[tokio::test]
async fn create_with_invalid_token_is_400() {
    let app = spawn_app().await;

    let res = app
        .post_json("/api/genres", "not.a.jwt", &json!({ "name": "Comedy" }))
        .await;
    assert_eq!(res.status().as_u16(), 400);

    let body: Value = res.json().await.unwrap();
    assert_eq!(body["error"], "Invalid token.");
}

#[tokio::test]
async fn bearer_header_is_accepted() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/genres"))
        .bearer_auth(app.token(false))
        .json(&json!({ "name": "Comedy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
}

#[tokio::test]
async fn blank_custom_header_falls_back_to_bearer() {
    let app = spawn_app().await;

    let res = app
        .client
        .post(app.url("/api/genres"))
        .header("x-auth-token", "")
        .bearer_auth(app.token(false))
        .json(&json!({ "name": "Comedy" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
}

#[tokio::test]
async fn create_rejects_names_out_of_bounds() {
    let app = spawn_app().await;
    let token = app.token(false);

    let res = app.post_json("/api/genres", &token, &json!({ "name": "ab" })).await;
    assert_eq!(res.status().as_u16(), 400);

    let long = "a".repeat(51);
    let res = app.post_json("/api/genres", &token, &json!({ "name": long })).await;
    assert_eq!(res.status().as_u16(), 400);

    let res = app.post_json("/api/genres", &token, &json!({})).await;
    assert_eq!(res.status().as_u16(), 400);

    assert_eq!(app.count("genres").await, 0);
}

#[tokio::test]
async fn update_replaces_the_name() {
    let app = spawn_app().await;
    let genre = app.create_genre("Comedy").await;
    let path = format!("/api/genres/{}", genre["_id"].as_str().unwrap());

    let res = app
        .put_json(&path, &app.token(false), &json!({ "name": "Romance" }))
        .await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["name"], "Romance");

    let fetched: Value = app.get(&path).await.json().await.unwrap();
    assert_eq!(fetched["name"], "Romance");
}

#[tokio::test]
async fn update_unknown_id_is_404_even_with_invalid_body() {
    let app = spawn_app().await;
    let path = "/api/genres/5f1d7a3c9b2e4d6f8a0c1e3b";

    let res = app.put_json(path, &app.token(false), &json!({ "name": "x" })).await;
    assert_eq!(res.status().as_u16(), 404);

    let res = app
        .put_json(path, &app.token(false), &json!({ "name": "Comedy" }))
        .await;
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn update_existing_with_invalid_body_is_400() {
    let app = spawn_app().await;
    let genre = app.create_genre("Comedy").await;
    let path = format!("/api/genres/{}", genre["_id"].as_str().unwrap());

    let res = app.put_json(&path, &app.token(false), &json!({ "name": "x" })).await;
    assert_eq!(res.status().as_u16(), 400);

    let fetched: Value = app.get(&path).await.json().await.unwrap();
    assert_eq!(fetched["name"], "Comedy");
}

#[tokio::test]
async fn delete_requires_admin() {
    let app = spawn_app().await;
    let genre = app.create_genre("Comedy").await;
    let path = format!("/api/genres/{}", genre["_id"].as_str().unwrap());

    let res = app.delete(&path, "").await;
    assert_eq!(res.status().as_u16(), 401);

    let res = app.delete(&path, &app.token(false)).await;
    assert_eq!(res.status().as_u16(), 403);

    assert_eq!(app.count("genres").await, 1);
}

#[tokio::test]
async fn delete_echoes_and_second_delete_is_404() {
    let app = spawn_app().await;
    let genre = app.create_genre("Comedy").await;
    let path = format!("/api/genres/{}", genre["_id"].as_str().unwrap());
    let admin = app.token(true);

    let res = app.delete(&path, &admin).await;
    assert_eq!(res.status().as_u16(), 200);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body, genre);

    let res = app.delete(&path, &admin).await;
    assert_eq!(res.status().as_u16(), 404);

    let res = app.get(&path).await;
    assert_eq!(res.status().as_u16(), 404);
}

#[tokio::test]
async fn delete_with_malformed_id_is_404_for_admin() {
    let app = spawn_app().await;

    let res = app.delete("/api/genres/1", &app.token(true)).await;
    assert_eq!(res.status().as_u16(), 404);
}
