//! HTTP-level integration tests for the `/thesis` aggregate.

mod common;

use common::{
    body_json, delete_auth, get_auth, post_json_auth, put_json_auth, seed_person, send_auth,
    staff_token, token_for,
};
use sqlx::PgPool;
use thesis_core::messages::{self, resolve};
use thesis_core::roles::Role;
use thesis_db::models::person::Person;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

struct Fixture {
    student: Person,
    advisor: Person,
    token: String,
}

async fn fixture(pool: &PgPool) -> Fixture {
    let student = seed_person(pool, Role::Student, "S500").await;
    let advisor = seed_person(pool, Role::Advisor, "A500").await;
    let token = token_for(&advisor, Role::Advisor);
    Fixture {
        student,
        advisor,
        token,
    }
}

fn thesis_json(f: &Fixture) -> serde_json::Value {
    serde_json::json!({
        "titleVi": "Hệ thống quản lý luận văn",
        "titleEn": "Thesis management system",
        "semester": "HK241",
        "approvalStatus": 0,
        "thesisType": 1,
        "thesisTask": [
            { "title": "Literature review", "deadline": "2026-11-01", "status": "TODO", "priority": 1 },
            { "title": "Prototype", "deadline": "2026-12-01", "status": "TODO", "priority": 2 },
        ],
        "missions": [{ "value": "Build the backend" }, { "value": "Write the report" }],
        "programs": [{ "value": 7 }],
        "students": [{ "uuid": f.student.uuid }],
        "advisors": [{ "uuid": f.advisor.uuid }],
    })
}

/// Create one thesis through the API and return its detail JSON.
async fn create_thesis(pool: &PgPool, f: &Fixture) -> serde_json::Value {
    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!([thesis_json(f)]);
    let json = body_json(post_json_auth(app, "/thesis", body, &f.token).await).await;
    assert_eq!(json["status"], true, "{json}");
    json["data"][0].clone()
}

// ---------------------------------------------------------------------------
// Create and read
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_returns_full_aggregate(pool: PgPool) {
    let f = fixture(&pool).await;
    let thesis = create_thesis(&pool, &f).await;

    assert_eq!(thesis["titleEn"], "Thesis management system");
    assert_eq!(thesis["thesisTask"].as_array().unwrap().len(), 2);
    assert_eq!(thesis["createdBy"], "A500");
    assert_eq!(thesis["thesisTask"][0]["title"], "Literature review");
    assert_eq!(thesis["missions"].as_array().unwrap().len(), 2);
    assert_eq!(thesis["programs"][0]["value"], 7);
    assert_eq!(thesis["students"][0]["code"], "S500");
    assert_eq!(thesis["advisors"][0]["code"], "A500");
    assert!(thesis.get("id").is_none(), "internal ids stay private");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_missing_header_fields(pool: PgPool) {
    let f = fixture(&pool).await;
    let mut body = thesis_json(&f);
    body.as_object_mut().unwrap().remove("semester");
    let app = common::build_test_app(pool.clone());

    let json =
        body_json(post_json_auth(app, "/thesis", serde_json::json!([body]), &f.token).await).await;

    assert_eq!(json["status"], false);
    assert_eq!(json["message"], resolve(messages::MISSING_FIELDS));
    assert_eq!(json["validateError"], serde_json::json!(["semester"]));

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/thesis", &f.token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

/// An unknown member uuid aborts the whole batch.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_with_unknown_student_rolls_back(pool: PgPool) {
    let f = fixture(&pool).await;
    let mut body = thesis_json(&f);
    body["students"] = serde_json::json!([{ "uuid": uuid::Uuid::new_v4() }]);
    let app = common::build_test_app(pool.clone());

    let json =
        body_json(post_json_auth(app, "/thesis", serde_json::json!([body]), &f.token).await).await;
    assert_eq!(json["message"], resolve(messages::NOT_FOUND));

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/thesis", &f.token).await).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_and_list_by_creator(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let uuid = created["uuid"].as_str().unwrap();

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, &format!("/thesis/{uuid}"), &f.token).await).await;
    assert_eq!(json["data"]["uuid"], uuid);
    assert_eq!(json["data"]["students"][0]["code"], "S500");

    let app = common::build_test_app(pool.clone());
    let json = body_json(get_auth(app, "/thesis/created-by/A500", &f.token).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, "/thesis/created-by/nobody", &f.token).await).await;
    assert_eq!(json["status"], true);
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_replaces_children(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!([{
        "uuid": created["uuid"],
        "titleEn": "Renamed",
        "thesisTask": [
            { "title": "Final report", "deadline": "2027-01-15", "status": "DOING", "priority": 1 },
        ],
        "missions": [{ "value": "Only mission" }],
        "advisors": [{ "uuid": f.advisor.uuid }],
    }]);
    let json = body_json(put_json_auth(app, "/thesis", body, &f.token).await).await;

    assert_eq!(json["status"], true, "{json}");
    let thesis = &json["data"][0];
    assert_eq!(thesis["titleEn"], "Renamed");
    assert_eq!(thesis["titleVi"], created["titleVi"]);
    assert_eq!(thesis["logVersion"], created["logVersion"].as_i64().unwrap() + 1);
    assert_eq!(thesis["missions"].as_array().unwrap().len(), 1);
    let tasks = thesis["thesisTask"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["title"], "Final report");
    assert!(thesis["programs"].as_array().unwrap().is_empty());
    assert!(thesis["students"].as_array().unwrap().is_empty());
    assert_eq!(thesis["advisors"][0]["code"], "A500");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_requires_uuid(pool: PgPool) {
    let f = fixture(&pool).await;
    let app = common::build_test_app(pool);

    let body = serde_json::json!([{ "titleEn": "No id" }]);
    let json = body_json(put_json_auth(app, "/thesis", body, &f.token).await).await;

    assert_eq!(json["message"], resolve(messages::MISSING_FIELDS));
    assert_eq!(json["validateError"], serde_json::json!(["uuid"]));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_is_permanent(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let uri = format!("/thesis/{}", created["uuid"].as_str().unwrap());

    let app = common::build_test_app(pool.clone());
    let json = body_json(delete_auth(app, &uri, &f.token).await).await;
    assert_eq!(json["message"], resolve(messages::DELETE_SUCCESS));

    let remaining: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM tbl_thesis_mission")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0, "children cascade with the thesis");

    let app = common::build_test_app(pool);
    let json = body_json(get_auth(app, &uri, &f.token).await).await;
    assert_eq!(json["message"], resolve(messages::NOT_FOUND));
}

// ---------------------------------------------------------------------------
// Members, approval and status
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_add_and_remove_student(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let thesis_uuid = created["uuid"].as_str().unwrap();
    let other = seed_person(&pool, Role::Student, "S501").await;

    let app = common::build_test_app(pool.clone());
    let uri = format!("/thesis/addstudent/{thesis_uuid}/{}", other.uuid);
    let json = body_json(send_auth(app, "POST", &uri, &f.token).await).await;
    assert_eq!(json["data"]["students"].as_array().unwrap().len(), 2);

    let app = common::build_test_app(pool.clone());
    let uri = format!("/thesis/removestudent/{thesis_uuid}/{}", other.uuid);
    let json = body_json(delete_auth(app, &uri, &f.token).await).await;
    assert_eq!(json["data"]["students"].as_array().unwrap().len(), 1);

    let app = common::build_test_app(pool);
    let json = body_json(delete_auth(app, &uri, &f.token).await).await;
    assert_eq!(json["status"], false);
    assert_eq!(json["message"], resolve(messages::NOT_FOUND));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_remove_advisor(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let app = common::build_test_app(pool);

    let uri = format!(
        "/thesis/removeadvisor/{}/{}",
        created["uuid"].as_str().unwrap(),
        f.advisor.uuid
    );
    let json = body_json(delete_auth(app, &uri, &f.token).await).await;

    assert_eq!(json["status"], true);
    assert!(json["data"]["advisors"].as_array().unwrap().is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_approval_requires_staff(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let body = serde_json::json!({ "thesisUuid": created["uuid"], "approvalStatus": 2 });

    let app = common::build_test_app(pool.clone());
    let json = body_json(put_json_auth(app, "/thesis/approval", body.clone(), &f.token).await).await;
    assert_eq!(json["message"], resolve(messages::PERMISSION_DENIED));

    let staff = staff_token(&pool).await;
    let app = common::build_test_app(pool);
    let json = body_json(put_json_auth(app, "/thesis/approval", body, &staff).await).await;
    assert_eq!(json["status"], true);
    assert_eq!(json["data"]["approvalStatus"], 2);
    assert_eq!(json["data"]["updatedBy"], "FO001");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_student_status(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let outsider = seed_person(&pool, Role::Student, "S502").await;

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "thesisUuid": created["uuid"], "studentUuid": f.student.uuid });
    let json = body_json(post_json_auth(app, "/thesis/status-thesis", body, &f.token).await).await;
    assert_eq!(json["data"]["status"], true);

    let app = common::build_test_app(pool.clone());
    let body = serde_json::json!({ "thesisUuid": created["uuid"], "studentUuid": outsider.uuid });
    let json = body_json(post_json_auth(app, "/thesis/status-thesis", body, &f.token).await).await;
    assert_eq!(json["data"]["status"], false);

    let app = common::build_test_app(pool);
    let body = serde_json::json!({
        "thesisUuid": created["uuid"],
        "studentUuid": uuid::Uuid::new_v4(),
    });
    let json = body_json(post_json_auth(app, "/thesis/status-thesis", body, &f.token).await).await;
    assert_eq!(json["message"], resolve(messages::NOT_FOUND));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_malformed_member_uuid_is_param_error(pool: PgPool) {
    let f = fixture(&pool).await;
    let created = create_thesis(&pool, &f).await;
    let app = common::build_test_app(pool);

    let uri = format!("/thesis/addstudent/{}/S500", created["uuid"].as_str().unwrap());
    let json = body_json(send_auth(app, "POST", &uri, &f.token).await).await;

    assert_eq!(json["status"], false);
    assert_eq!(json["message"], resolve(messages::PARAM_ERROR));
}
