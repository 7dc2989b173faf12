use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::model::{LessonId, ModuleId};

/// Upper bound for any progress percentage.
pub const MAX_PERCENTAGE: u8 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("progress must be between 0 and 100, got {0}")]
    OutOfRange(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ProgressStatus {
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::InProgress => "In progress",
            Self::Completed => "Completed",
        }
    }
}

/// Per-user progress on one module, as confirmed by the backend.
///
/// Status and percentage are taken as-is; the client does not check that
/// they agree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleProgress {
    pub module_id: ModuleId,
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default, deserialize_with = "clamped_percentage")]
    pub progress_percentage: u8,
    #[serde(default)]
    pub completed_lesson_ids: BTreeSet<LessonId>,
}

impl ModuleProgress {
    #[must_use]
    pub fn not_started(module_id: ModuleId) -> Self {
        Self {
            module_id,
            status: ProgressStatus::NotStarted,
            progress_percentage: 0,
            completed_lesson_ids: BTreeSet::new(),
        }
    }

    #[must_use]
    pub fn is_lesson_completed(&self, lesson_id: LessonId) -> bool {
        self.completed_lesson_ids.contains(&lesson_id)
    }
}

/// Aggregate counters shown at the top of the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub completed_modules: u32,
    #[serde(default)]
    pub in_progress_modules: u32,
    #[serde(default)]
    pub total_study_time_minutes: u32,
    #[serde(default)]
    pub certificates: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Dashboard {
    #[serde(default)]
    pub stats: DashboardStats,
    #[serde(default)]
    pub modules: Vec<ModuleProgress>,
}

impl Dashboard {
    #[must_use]
    pub fn module(&self, module_id: ModuleId) -> Option<&ModuleProgress> {
        self.modules.iter().find(|m| m.module_id == module_id)
    }

    /// Mean completion across all listed modules, rounded down.
    #[must_use]
    pub fn overall_percentage(&self) -> u8 {
        if self.modules.is_empty() {
            return 0;
        }
        let sum: usize = self
            .modules
            .iter()
            .map(|m| usize::from(m.progress_percentage))
            .sum();
        u8::try_from(sum / self.modules.len()).unwrap_or(MAX_PERCENTAGE)
    }
}

/// Body of an explicit progress update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProgressUpdate {
    progress: u8,
    completed: bool,
}

impl ProgressUpdate {
    /// # Errors
    ///
    /// Returns `ProgressError::OutOfRange` when `progress` exceeds 100.
    pub fn new(progress: u32, completed: bool) -> Result<Self, ProgressError> {
        let progress = u8::try_from(progress)
            .ok()
            .filter(|p| *p <= MAX_PERCENTAGE)
            .ok_or(ProgressError::OutOfRange(progress))?;
        Ok(Self {
            progress,
            completed,
        })
    }

    #[must_use]
    pub fn completed() -> Self {
        Self {
            progress: MAX_PERCENTAGE,
            completed: true,
        }
    }

    #[must_use]
    pub fn progress(&self) -> u8 {
        self.progress
    }

    #[must_use]
    pub fn is_completed(&self) -> bool {
        self.completed
    }
}

fn clamped_percentage<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = i64::deserialize(deserializer)?;
    Ok(u8::try_from(raw.clamp(0, i64::from(MAX_PERCENTAGE))).unwrap_or(MAX_PERCENTAGE))
}
