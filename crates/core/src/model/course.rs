use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::timestamp::{backend_time, optional_backend_time};
use crate::model::{ExerciseId, ModuleId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub introduction: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    #[serde(default)]
    pub exercises: Vec<String>,
}

/// A catalog entry as served by `/modules`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub duration: String,
    pub lessons: u32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub progress: u8,
    pub content: ModuleContent,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
    pub id: ExerciseId,
    pub module_id: ModuleId,
    pub description: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, deserialize_with = "optional_backend_time")]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Certificate {
    pub id: String,
    pub user_id: UserId,
    pub title: String,
    #[serde(deserialize_with = "backend_time")]
    pub completed_at: DateTime<Utc>,
    pub download_url: String,
}

/// Public platform-wide numbers for the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStats {
    pub total_students: u64,
    pub completion_rate: u32,
    pub average_rating: f32,
    pub module_count: u32,
}
