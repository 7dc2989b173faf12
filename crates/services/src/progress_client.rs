use std::sync::RwLock;

use boost_core::model::{Dashboard, LessonId, ModuleId, ProgressUpdate};
use serde::de::IgnoredAny;

use crate::api_client::ApiClient;
use crate::error::ApiError;

/// Module progress façade with a read-after-write dashboard cache.
///
/// Every mutation is followed by a fresh `GET /dashboard`; the cache only
/// ever holds what the backend confirmed.
pub struct ProgressClient {
    api: ApiClient,
    cache: RwLock<Option<Dashboard>>,
}

impl ProgressClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self {
            api,
            cache: RwLock::new(None),
        }
    }

    /// # Errors
    ///
    /// Returns the backend failure; the cache is left as it was.
    pub async fn get_dashboard(&self) -> Result<Dashboard, ApiError> {
        let dashboard: Dashboard = self.api.get("/dashboard").await?;
        if let Ok(mut guard) = self.cache.write() {
            *guard = Some(dashboard.clone());
        }
        Ok(dashboard)
    }

    /// # Errors
    ///
    /// Returns the backend failure of either the mutation or the refetch.
    pub async fn start_module(&self, module_id: ModuleId) -> Result<Dashboard, ApiError> {
        tracing::info!(%module_id, "starting module");
        let _: IgnoredAny = self
            .api
            .post_empty(&format!("/progress/{module_id}/start"))
            .await?;
        self.get_dashboard().await
    }

    /// # Errors
    ///
    /// Returns the backend failure of either the mutation or the refetch.
    pub async fn complete_lesson(
        &self,
        module_id: ModuleId,
        lesson_id: LessonId,
    ) -> Result<Dashboard, ApiError> {
        tracing::info!(%module_id, %lesson_id, "completing lesson");
        let _: IgnoredAny = self
            .api
            .post_empty(&format!(
                "/progress/{module_id}/complete-lesson/{lesson_id}"
            ))
            .await?;
        self.get_dashboard().await
    }

    /// Set an explicit percentage and completion flag.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Progress` without a request when `progress` is
    /// above 100, or the backend failure otherwise.
    pub async fn update_progress(
        &self,
        module_id: ModuleId,
        progress: u32,
        completed: bool,
    ) -> Result<Dashboard, ApiError> {
        let update = ProgressUpdate::new(progress, completed)?;
        tracing::info!(
            %module_id,
            progress = update.progress(),
            completed = update.is_completed(),
            "updating module progress"
        );
        let _: IgnoredAny = self
            .api
            .put(&format!("/modules/{module_id}/progress"), &update)
            .await?;
        self.get_dashboard().await
    }

    /// Last dashboard the backend confirmed, if any.
    #[must_use]
    pub fn cached_dashboard(&self) -> Option<Dashboard> {
        self.cache.read().ok().and_then(|guard| guard.clone())
    }
}
