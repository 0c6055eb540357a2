#[macro_use]
mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{json, Value};
use uuid::Uuid;

use common::{bearer, create_user, login, TestContext, ADMIN_EMAIL, ADMIN_PASSWORD};
use taskguard::models::{Role, Task, TaskPriority, TaskStatus};

#[actix_rt::test]
async fn test_task_ownership_scenario() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let user1_id = create_user(
        &app,
        &admin.access_token,
        "user1@example.com",
        "password-one",
        Role::User,
    )
    .await;
    create_user(&app, &admin.access_token, "user2@example.com", "password-two", Role::User).await;
    let user1 = login(&app, "user1@example.com", "password-one").await;
    let user2 = login(&app, "user2@example.com", "password-two").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tasks")
        .insert_header(bearer(&user1.access_token))
        .set_json(json!({
            "title": "Task created by user1",
            "status": TaskStatus::Todo,
            "priority": TaskPriority::Medium
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let task: Task = test::read_body_json(resp).await;
    assert_eq!(task.owner_id, user1_id);
    assert_eq!(task.priority, Some(TaskPriority::Medium));

    let task_uri = format!("/api/v1/tasks/{}", task.id);

    let req = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(bearer(&user1.access_token))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(bearer(&user2.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Forbidden");

    let req = test::TestRequest::put()
        .uri(&task_uri)
        .insert_header(bearer(&user2.access_token))
        .set_json(json!({ "title": "Hijacked", "status": "done" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    let req = test::TestRequest::delete()
        .uri(&task_uri)
        .insert_header(bearer(&user2.access_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::FORBIDDEN
    );

    // Admins bypass ownership.
    let req = test::TestRequest::get()
        .uri(&task_uri)
        .insert_header(bearer(&admin.access_token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let seen: Task = test::read_body_json(resp).await;
    assert_eq!(seen.title, "Task created by user1");

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tasks/{}", Uuid::new_v4()))
        .insert_header(bearer(&user1.access_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = test::TestRequest::get().uri(&task_uri).to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::UNAUTHORIZED
    );
}

#[actix_rt::test]
async fn test_task_crud_flow() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    create_user(&app, &admin.access_token, "crud@example.com", "password-crud", Role::User).await;
    let user = login(&app, "crud@example.com", "password-crud").await;

    let req = test::TestRequest::post()
        .uri("/api/v1/tasks")
        .insert_header(bearer(&user.access_token))
        .set_json(json!({
            "title": "Write report",
            "description": "Quarterly numbers",
            "status": "todo"
        }))
        .to_request();
    let created: Task = test::call_and_read_body_json(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&format!("/api/v1/tasks/{}", created.id))
        .insert_header(bearer(&user.access_token))
        .set_json(json!({
            "title": "Write final report",
            "status": "in_progress",
            "priority": "high"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Task = test::read_body_json(resp).await;
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.title, "Write final report");
    assert_eq!(updated.status, TaskStatus::InProgress);
    assert_eq!(updated.description, None);

    let req = test::TestRequest::get()
        .uri("/api/v1/tasks?status=in_progress&search=FINAL")
        .insert_header(bearer(&user.access_token))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(listed.len(), 1);

    let req = test::TestRequest::get()
        .uri("/api/v1/tasks?status=done")
        .insert_header(bearer(&user.access_token))
        .to_request();
    let listed: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert!(listed.is_empty());

    let req = test::TestRequest::delete()
        .uri(&format!("/api/v1/tasks/{}", created.id))
        .insert_header(bearer(&user.access_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tasks/{}", created.id))
        .insert_header(bearer(&user.access_token))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_task_listing_scope() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    let alice_id = create_user(
        &app,
        &admin.access_token,
        "alice@example.com",
        "password-alice",
        Role::User,
    )
    .await;
    create_user(&app, &admin.access_token, "bob@example.com", "password-bob", Role::User).await;
    let alice = login(&app, "alice@example.com", "password-alice").await;
    let bob = login(&app, "bob@example.com", "password-bob").await;

    for (token, title) in [(&alice.access_token, "alice task"), (&bob.access_token, "bob task")] {
        let req = test::TestRequest::post()
            .uri("/api/v1/tasks")
            .insert_header(bearer(token))
            .set_json(json!({ "title": title, "status": "todo" }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);
    }

    let req = test::TestRequest::get()
        .uri("/api/v1/tasks")
        .insert_header(bearer(&bob.access_token))
        .to_request();
    let bobs: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(bobs.len(), 1);
    assert_eq!(bobs[0].title, "bob task");

    let req = test::TestRequest::get()
        .uri("/api/v1/tasks")
        .insert_header(bearer(&admin.access_token))
        .to_request();
    let all: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.len(), 2);

    let req = test::TestRequest::get()
        .uri(&format!("/api/v1/tasks?owner_id={}", alice_id))
        .insert_header(bearer(&admin.access_token))
        .to_request();
    let alices: Vec<Task> = test::call_and_read_body_json(&app, req).await;
    assert_eq!(alices.len(), 1);
    assert_eq!(alices[0].owner_id, alice_id);
}

#[actix_rt::test]
async fn test_invalid_task_inputs() {
    let ctx = TestContext::new().await;
    let app = test_app!(ctx);
    let admin = login(&app, ADMIN_EMAIL, ADMIN_PASSWORD).await;

    let test_cases = vec![
        (json!({ "status": "todo" }), StatusCode::BAD_REQUEST, "missing title"),
        (json!({ "title": "No status" }), StatusCode::BAD_REQUEST, "missing status"),
        (
            json!({ "title": "Bad status", "status": "someday" }),
            StatusCode::BAD_REQUEST,
            "unknown status",
        ),
        (json!({ "title": "", "status": "todo" }), StatusCode::UNPROCESSABLE_ENTITY, "empty title"),
        (
            json!({ "title": "a".repeat(201), "status": "todo" }),
            StatusCode::UNPROCESSABLE_ENTITY,
            "title too long",
        ),
    ];

    for (payload, expected_status, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/api/v1/tasks")
            .insert_header(bearer(&admin.access_token))
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.status(),
            expected_status,
            "Test case failed: {}",
            description
        );
    }
}
