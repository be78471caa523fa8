mod common;

use actix_web::http::StatusCode;
use actix_web::{test, App};
use common::{data_of, read_envelope, test_state};
use pretty_assertions::assert_eq;
use serde_json::json;
use todoforge::models::{Todo, TodoList};

#[actix_rt::test]
async fn test_todo_crud_flow() {
    let state = test_state();
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    // Create
    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "title": "Buy milk", "description": "2 liters" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = read_envelope(resp).await;
    assert_eq!(body["message"], "Todo created successfully");
    let created: Todo = data_of(&body);
    assert!(created.id > 0);
    assert_eq!(created.title, "Buy milk");
    assert_eq!(created.description, "2 liters");
    assert!(!created.completed);

    // Read
    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched: Todo = data_of(&read_envelope(resp).await);
    assert_eq!(fetched, created);

    // Partial update: only `completed` changes
    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .set_json(json!({ "completed": true }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_envelope(resp).await;
    assert_eq!(body["message"], "Todo updated successfully");
    let updated: Todo = data_of(&body);
    assert!(updated.completed);
    assert_eq!(updated.title, "Buy milk");
    assert_eq!(updated.description, "2 liters");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at >= created.updated_at);

    // Delete, then it is gone
    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_envelope(resp).await;
    assert_eq!(body["message"], "Todo deleted successfully");
    assert!(body.get("data").is_none());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_envelope(resp).await["message"], "Todo not found");
}

#[actix_rt::test]
async fn test_list_is_newest_first_with_total() {
    let state = test_state();
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::get().uri("/api/v1/todos").to_request();
    let empty: TodoList = data_of(&read_envelope(test::call_service(&app, req).await).await);
    assert_eq!(empty.total, 0);
    assert!(empty.todos.is_empty());

    for title in ["first", "second", "third"] {
        let req = test::TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(json!({ "title": title }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = test::TestRequest::get().uri("/api/v1/todos").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = read_envelope(resp).await;
    assert_eq!(body["message"], "Todos retrieved successfully");
    let list: TodoList = data_of(&body);
    assert_eq!(list.total, 3);
    let titles: Vec<&str> = list.todos.iter().map(|t| t.title.as_str()).collect();
    assert_eq!(titles, vec!["third", "second", "first"]);
}

#[actix_rt::test]
async fn test_invalid_ids_and_missing_todos() {
    let state = test_state();
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    for path in [
        "/api/v1/todos/abc",
        "/api/v1/todos/-3",
        "/api/v1/todos/+1",
        "/api/v1/todos/99999999999",
    ] {
        let req = test::TestRequest::get().uri(path).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(read_envelope(resp).await["message"], "Invalid todo ID");
    }

    // Zero parses but is never a stored id
    let req = test::TestRequest::get().uri("/api/v1/todos/0").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get().uri("/api/v1/todos/42").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body = read_envelope(resp).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Todo not found");

    let req = test::TestRequest::put()
        .uri("/api/v1/todos/42")
        .set_json(json!({ "title": "nothing here" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_rt::test]
async fn test_todo_validation() {
    let state = test_state();
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let too_long = "x".repeat(256);
    let invalid_creates = vec![
        json!({ "title": "" }),
        json!({ "title": too_long }),
        json!({ "title": "ok", "description": "d".repeat(1001) }),
        json!({ "description": "no title" }),
    ];
    for payload in invalid_creates {
        let req = test::TestRequest::post()
            .uri("/api/v1/todos")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "{}", payload);
    }

    // Multi-byte titles are measured in characters, not bytes
    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "title": "é".repeat(255) }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Todo = data_of(&read_envelope(resp).await);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .set_json(json!({ "title": "" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .to_request();
    let unchanged: Todo = data_of(&read_envelope(test::call_service(&app, req).await).await);
    assert_eq!(unchanged, created);
}

#[test_log::test(actix_rt::test)]
async fn test_empty_update_keeps_fields() {
    let state = test_state();
    let app = test::init_service(App::new().configure(|cfg| state.configure(cfg))).await;

    let req = test::TestRequest::post()
        .uri("/api/v1/todos")
        .set_json(json!({ "title": "Stay the same", "description": "really" }))
        .to_request();
    let created: Todo = data_of(&read_envelope(test::call_service(&app, req).await).await);

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/todos/{}", created.id))
        .set_json(json!({}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Todo = data_of(&read_envelope(resp).await);
    assert_eq!(updated.title, created.title);
    assert_eq!(updated.description, created.description);
    assert_eq!(updated.completed, created.completed);
}
