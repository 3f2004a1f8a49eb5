//! HTTP-level integration tests for the `/students` resource.

mod common;

use axum::http::StatusCode;
use common::{
    balance, create_user_with_token, delete_auth, expect_json, get, get_auth, patch_json_auth,
    post_json, post_json_auth,
};
use grove_core::roles::Role;
use sqlx::PgPool;

/// Teachers provision a student account and profile in one request; the
/// student can immediately log in with the supplied password.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_teacher_creates_student(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({
        "username": "newkid",
        "password": "kid_password",
        "name": "New Kid",
        "class_name": "3rd grade"
    });
    let response = post_json_auth(&app, "/api/v1/students", &teacher_token, body).await;
    let json = expect_json(response, StatusCode::CREATED).await;

    assert_eq!(json["username"], "newkid");
    assert_eq!(json["display_name"], "New Kid");
    assert_eq!(json["talent_point"], 0);
    assert_eq!(json["class_name"], "3rd grade");

    let login = serde_json::json!({ "username": "newkid", "password": "kid_password" });
    let response = post_json(&app, "/api/v1/auth/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Omitted passwords fall back to the classroom default.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_student_default_password(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "lazy", "name": "Lazy" });
    let response = post_json_auth(&app, "/api/v1/students", &teacher_token, body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let login = serde_json::json!({ "username": "lazy", "password": "password123" });
    let response = post_json(&app, "/api/v1/auth/login", login).await;
    assert_eq!(response.status(), StatusCode::OK);
}

/// Students cannot provision accounts.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_student_cannot_create_student(pool: PgPool) {
    let (_, student_token) = create_user_with_token(&pool, "student", Role::Student).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "x", "name": "X" });
    let response = post_json_auth(&app, "/api/v1/students", &student_token, body).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Unauthenticated list requests get an empty array, not an error.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_unauthenticated_list_is_empty(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "visible", "name": "Visible" });
    post_json_auth(&app, "/api/v1/students", &teacher_token, body).await;

    let response = get(&app, "/api/v1/students").await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json, serde_json::json!([]));
}

/// Any authenticated caller sees the ranking, ordered by balance.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_ranking_visible_to_students(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let (_, student_token) = create_user_with_token(&pool, "watcher", Role::Student).await;
    let app = common::build_test_app(pool.clone());

    for name in ["first", "second"] {
        let body = serde_json::json!({ "username": name, "name": name });
        post_json_auth(&app, "/api/v1/students", &teacher_token, body).await;
    }
    // Give "second" a point so the ranking flips.
    let second = grove_db::repositories::UserRepo::find_by_username(&pool, "second")
        .await
        .unwrap()
        .unwrap();
    let body = serde_json::json!({ "user_id": second.id, "kind": "prayer", "points": 2 });
    post_json_auth(&app, "/api/v1/activities", &teacher_token, body).await;

    let response = get_auth(&app, "/api/v1/students", &student_token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json[0]["username"], "second");
    assert_eq!(json[0]["talent_point"], 2);
    assert_eq!(json[1]["username"], "first");
}

/// GET /students/me is a 404 until a profile exists, then returns the
/// profile with its history.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_my_profile_lazy_creation(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let (student, student_token) = create_user_with_token(&pool, "kid", Role::Student).await;
    let app = common::build_test_app(pool);

    let response = get_auth(&app, "/api/v1/students/me", &student_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // First point event provisions the profile.
    let body = serde_json::json!({ "user_id": student.id, "kind": "quiet_time" });
    post_json_auth(&app, "/api/v1/activities", &teacher_token, body).await;

    let response = get_auth(&app, "/api/v1/students/me", &student_token).await;
    let json = expect_json(response, StatusCode::OK).await;
    assert_eq!(json["user_id"], student.id);
    assert_eq!(json["talent_point"], 1);
    assert_eq!(json["point_history"].as_array().unwrap().len(), 1);
}

/// PATCH applies partial updates across account and profile fields.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_student(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "renameme", "name": "Before" });
    let created =
        expect_json(post_json_auth(&app, "/api/v1/students", &teacher_token, body).await,
        StatusCode::CREATED)
        .await;
    let id = created["id"].as_i64().unwrap();

    let patch = serde_json::json!({ "name": "After", "theme": "winter" });
    let response =
        patch_json_auth(&app, &format!("/api/v1/students/{id}"), &teacher_token, patch).await;
    let json = expect_json(response, StatusCode::OK).await;

    assert_eq!(json["display_name"], "After");
    assert_eq!(json["theme"], "winter");
    assert_eq!(json["username"], "renameme", "untouched fields survive");
}

/// DELETE removes the account; subsequent reads are 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_student(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "doomed", "name": "Doomed" });
    let created =
        expect_json(post_json_auth(&app, "/api/v1/students", &teacher_token, body).await,
        StatusCode::CREATED)
        .await;
    let id = created["id"].as_i64().unwrap();

    let response = delete_auth(&app, &format!("/api/v1/students/{id}"), &teacher_token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_auth(&app, &format!("/api/v1/students/{id}"), &teacher_token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// The history feed merges approved activities and attendance in
/// chronological order; unapproved activities never appear.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_feed_ordering(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let (student, student_token) = create_user_with_token(&pool, "kid", Role::Student).await;
    let app = common::build_test_app(pool.clone());

    // Approved activity dated 2024-01-01, attendance on 2024-01-03, and an
    // unapproved submission that must not show up.
    sqlx::query(
        "INSERT INTO activities (user_id, kind, content, points, is_approved, created_at)
         VALUES ($1, 'prayer', 'new year prayer', 1, TRUE, '2024-01-01T10:00:00Z')",
    )
    .bind(student.id)
    .execute(&pool)
    .await
    .unwrap();
    let body = serde_json::json!({ "user_id": student.id, "date": "2024-01-03" });
    post_json_auth(&app, "/api/v1/attendance-records", &teacher_token, body).await;
    let body = serde_json::json!({ "kind": "other", "content": "pending" });
    post_json_auth(&app, "/api/v1/activities", &student_token, body).await;

    let profile = grove_db::repositories::StudentProfileRepo::find_by_user(&pool, student.id)
        .await
        .unwrap()
        .unwrap();
    let response = get_auth(
        &app,
        &format!("/api/v1/students/{}/history", profile.id),
        &student_token,
    )
    .await;
    let json = expect_json(response, StatusCode::OK).await;

    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 2, "unapproved submissions are invisible");
    assert_eq!(entries[0]["source"], "activity");
    assert_eq!(entries[0]["date"], "2024-01-01");
    assert_eq!(entries[0]["name"], "Prayer");
    assert_eq!(entries[1]["source"], "attendance");
    assert_eq!(entries[1]["date"], "2024-01-03");

    assert_eq!(balance(&pool, student.id).await, 1, "only the attendance counted");
}

/// A student may not read another student's history feed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_history_feed_is_private(pool: PgPool) {
    let (_, teacher_token) = create_user_with_token(&pool, "teacher", Role::Teacher).await;
    let (_, snoop_token) = create_user_with_token(&pool, "snoop", Role::Student).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!({ "username": "target", "name": "Target" });
    let created =
        expect_json(post_json_auth(&app, "/api/v1/students", &teacher_token, body).await,
        StatusCode::CREATED)
        .await;
    let id = created["id"].as_i64().unwrap();

    let response = get_auth(&app, &format!("/api/v1/students/{id}/history"), &snoop_token).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(&app, &format!("/api/v1/students/{id}/history"), &teacher_token).await;
    assert_eq!(response.status(), StatusCode::OK);
}
