//! Thesis aggregate models and DTOs.
//!
//! A thesis owns tasks, missions and programs (cascade on delete) and is
//! linked to students and advisors through association tables.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use thesis_core::types::{DbId, Timestamp};
use thesis_core::validation;
use uuid::Uuid;

use crate::models::person::PersonResponse;

/// A row from `tbl_thesis`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Thesis {
    #[serde(skip)]
    pub id: DbId,
    pub uuid: Uuid,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_by: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
    pub log_version: i32,
    pub is_deleted: bool,
    pub title_vi: String,
    pub title_en: String,
    pub approval_status: i32,
    pub thesis_type: i32,
    pub semester: String,
    pub user_role_owner: i32,
    pub thesis_info: String,
    pub start_time: String,
    pub end_time: String,
}

/// A row from `tbl_thesis_task`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisTask {
    #[serde(skip)]
    pub id: DbId,
    pub uuid: Uuid,
    #[serde(skip)]
    pub thesis_id: DbId,
    pub created_by: String,
    pub updated_by: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub log_version: i32,
    pub title: String,
    pub deadline: String,
    pub status: String,
    pub priority: i32,
    pub description: String,
    pub note: String,
    pub start_time: String,
    pub end_time: String,
}

/// A row from `tbl_thesis_mission`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Mission {
    pub id: DbId,
    #[serde(skip)]
    pub thesis_id: DbId,
    pub value: String,
    pub created_at: Timestamp,
}

/// A row from `tbl_thesis_program`.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: DbId,
    #[serde(skip)]
    pub thesis_id: DbId,
    pub value: i32,
    pub created_at: Timestamp,
}

/// A thesis with every child collection and member loaded.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisDetail {
    #[serde(flatten)]
    pub thesis: Thesis,
    pub thesis_task: Vec<ThesisTask>,
    pub missions: Vec<Mission>,
    pub programs: Vec<Program>,
    pub students: Vec<PersonResponse>,
    pub advisors: Vec<PersonResponse>,
}

/// Reference to a student or advisor by external id.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct MemberRef {
    pub uuid: Uuid,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MissionInput {
    pub value: String,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ProgramInput {
    pub value: i32,
}

/// DTO for one task of a thesis payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisTaskInput {
    pub title: Option<String>,
    pub deadline: Option<String>,
    pub status: Option<String>,
    pub priority: Option<i32>,
    pub description: Option<String>,
    pub note: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
}

impl ThesisTaskInput {
    /// Names of required task fields that are absent or blank.
    pub fn missing_fields(&self) -> Vec<String> {
        let priority = self.priority.map(|_| "set");
        validation::missing_fields([
            ("title", self.title.as_deref()),
            ("deadline", self.deadline.as_deref()),
            ("status", self.status.as_deref()),
            ("priority", priority),
        ])
    }
}

/// Child collections and member links carried by create and update payloads.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThesisChildren {
    #[serde(default)]
    pub thesis_task: Vec<ThesisTaskInput>,
    #[serde(default)]
    pub missions: Vec<MissionInput>,
    #[serde(default)]
    pub programs: Vec<ProgramInput>,
    #[serde(default)]
    pub students: Vec<MemberRef>,
    #[serde(default)]
    pub advisors: Vec<MemberRef>,
}

impl ThesisChildren {
    /// Missing task fields, prefixed with `thesisTask.`; first offending task only.
    pub fn missing_task_fields(&self) -> Vec<String> {
        self.thesis_task
            .iter()
            .map(ThesisTaskInput::missing_fields)
            .find(|missing| !missing.is_empty())
            .map(|missing| {
                missing
                    .into_iter()
                    .map(|field| format!("thesisTask.{field}"))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// DTO for creating a thesis.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateThesis {
    pub title_vi: Option<String>,
    pub title_en: Option<String>,
    pub semester: Option<String>,
    pub approval_status: Option<i32>,
    pub thesis_type: Option<i32>,
    pub user_role_owner: Option<i32>,
    pub thesis_info: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(flatten)]
    pub children: ThesisChildren,
}

impl CreateThesis {
    /// Missing header fields followed by missing task fields.
    pub fn missing_fields(&self) -> Vec<String> {
        let approval = self.approval_status.map(|_| "set");
        let thesis_type = self.thesis_type.map(|_| "set");
        let mut missing = validation::missing_fields([
            ("titleVi", self.title_vi.as_deref()),
            ("titleEn", self.title_en.as_deref()),
            ("semester", self.semester.as_deref()),
            ("approvalStatus", approval),
            ("thesisType", thesis_type),
        ]);
        missing.extend(self.children.missing_task_fields());
        missing
    }
}

/// DTO for updating a thesis. Scalar fields are applied only when present;
/// child collections and member links are always replaced wholesale.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateThesis {
    pub uuid: Option<Uuid>,
    pub title_vi: Option<String>,
    pub title_en: Option<String>,
    pub semester: Option<String>,
    pub approval_status: Option<i32>,
    pub thesis_type: Option<i32>,
    pub user_role_owner: Option<i32>,
    pub thesis_info: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(flatten)]
    pub children: ThesisChildren,
}

/// Body of `PUT /thesis/approval`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetApproval {
    pub thesis_uuid: Uuid,
    pub approval_status: i32,
}

/// Body of `POST /thesis/status-thesis`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentStatusQuery {
    pub thesis_uuid: Uuid,
    pub student_uuid: Uuid,
}
