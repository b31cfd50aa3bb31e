//! HTTP tests for `/api/v1/registers` and `/api/v1/drawings`.

mod common;

use axum::http::StatusCode;
use common::{body_json, create, delete, get, post_json, put_json};
use serde_json::json;

#[tokio::test]
async fn create_register_with_inline_categories() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.clone(),
        "/api/v1/registers",
        json!({
            "project_name": "Harbour Bridge",
            "project_number": 4021,
            "discipline": "Structural",
            "engineers": ["A. Smith"],
            "categories": ["General", { "title": "Electrical", "description": "E-series" }]
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let register = body_json(response).await["data"].clone();
    assert_eq!(register["project_number"], 4021);
    assert_eq!(register["category_ids"].as_array().unwrap().len(), 2);

    let id = register["id"].as_i64().unwrap();
    let fetched = body_json(get(app, &format!("/api/v1/registers/{id}")).await).await;
    let titles: Vec<_> = fetched["data"]["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["General", "Electrical"]);
}

#[tokio::test]
async fn create_register_with_unknown_category_id_is_404() {
    let app = common::build_test_app().await;

    let response = post_json(
        app.clone(),
        "/api/v1/registers",
        json!({ "project_number": 1, "categories": ["General", 999] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Nothing was created, not even the titled category.
    let categories = body_json(get(app, "/api/v1/categories").await).await;
    assert_eq!(categories["data"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn create_register_with_inverted_dates_is_400() {
    let app = common::build_test_app().await;

    let response = post_json(
        app,
        "/api/v1/registers",
        json!({ "project_number": 1, "start_date": "2024-05-01", "end_date": "2024-01-01" }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn update_register_prepends_new_categories() {
    let app = common::build_test_app().await;
    let register = create(
        &app,
        "/api/v1/registers",
        json!({ "project_number": 7, "categories": ["Old"] }),
    )
    .await;
    let id = register["id"].as_i64().unwrap();
    let old_id = register["category_ids"][0].as_i64().unwrap();

    let response = put_json(
        app,
        &format!("/api/v1/registers/{id}"),
        json!({ "discipline": "Civil", "categories": ["New"] }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let updated = body_json(response).await["data"].clone();
    assert_eq!(updated["discipline"], "Civil");
    let ids = updated["category_ids"].as_array().unwrap();
    assert_eq!(ids.len(), 2);
    assert_eq!(ids[1], old_id);
}

#[tokio::test]
async fn add_and_remove_categories() {
    let app = common::build_test_app().await;
    let register = create(
        &app,
        "/api/v1/registers",
        json!({ "project_number": 8, "categories": ["First"] }),
    )
    .await;
    let id = register["id"].as_i64().unwrap();

    let response = post_json(
        app.clone(),
        &format!("/api/v1/registers/{id}/categories"),
        json!([{ "title": "Second" }, { "title": "Third" }]),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let updated = body_json(response).await["data"].clone();
    let ids = updated["category_ids"].as_array().unwrap().clone();
    assert_eq!(ids.len(), 3);
    assert_eq!(ids[0], register["category_ids"][0]);

    let removed = ids[1].as_i64().unwrap();
    let response = delete(
        app.clone(),
        &format!("/api/v1/registers/{id}/categories/{removed}"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let after = body_json(response).await["data"].clone();
    assert_eq!(after["category_ids"].as_array().unwrap().len(), 2);

    let response = get(app, &format!("/api/v1/categories/{removed}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_register_then_get_is_404() {
    let app = common::build_test_app().await;
    let register = create(&app, "/api/v1/registers", json!({ "project_number": 9 })).await;
    let id = register["id"].as_i64().unwrap();

    let response = delete(app.clone(), &format!("/api/v1/registers/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get(app.clone(), &format!("/api/v1/registers/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = delete(app, &format!("/api/v1/registers/{id}")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn drawings_for_project_walk_registers_in_order() {
    let app = common::build_test_app().await;
    let register = create(
        &app,
        "/api/v1/registers",
        json!({ "project_number": 4021, "categories": ["Civil", "Electrical"] }),
    )
    .await;
    let civil = register["category_ids"][0].as_i64().unwrap();
    let electrical = register["category_ids"][1].as_i64().unwrap();

    create(
        &app,
        &format!("/api/v1/categories/{electrical}/drawings"),
        json!({ "number": "E-1" }),
    )
    .await;
    create(
        &app,
        &format!("/api/v1/categories/{civil}/drawings"),
        json!({ "number": "C-1" }),
    )
    .await;
    let other = create(
        &app,
        "/api/v1/registers",
        json!({ "project_number": 1, "categories": ["Other"] }),
    )
    .await;
    let other_category = other["category_ids"][0].as_i64().unwrap();
    create(
        &app,
        &format!("/api/v1/categories/{other_category}/drawings"),
        json!({ "number": "X-1" }),
    )
    .await;

    let response = get(app, "/api/v1/drawings?project_number=4021").await;
    assert_eq!(response.status(), StatusCode::OK);
    let numbers: Vec<_> = body_json(response).await["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["number"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(numbers, vec!["C-1", "E-1"]);
}

#[tokio::test]
async fn drawings_without_project_number_is_400() {
    let app = common::build_test_app().await;
    let response = get(app, "/api/v1/drawings").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
