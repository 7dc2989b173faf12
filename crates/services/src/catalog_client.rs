use boost_core::model::{Certificate, Exercise, ExerciseId, Module, ModuleId, PlatformStats};
use serde::{Deserialize, Serialize};

use crate::api_client::ApiClient;
use crate::error::ApiError;

#[derive(Serialize)]
struct ExerciseCompletion {
    completed: bool,
}

/// Acknowledgement returned by `/exercises/{id}/complete`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ExerciseAck {
    #[serde(default)]
    pub message: Option<String>,
    pub completed: bool,
}

/// Read-mostly access to modules, exercises, certificates and public stats.
#[derive(Clone)]
pub struct CatalogClient {
    api: ApiClient,
}

impl CatalogClient {
    #[must_use]
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn modules(&self) -> Result<Vec<Module>, ApiError> {
        self.api.get("/modules").await
    }

    /// # Errors
    ///
    /// Returns the backend failure; an unknown id surfaces as a 404 status.
    pub async fn module(&self, module_id: ModuleId) -> Result<Module, ApiError> {
        self.api.get(&format!("/modules/{module_id}")).await
    }

    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn exercises(&self, module_id: ModuleId) -> Result<Vec<Exercise>, ApiError> {
        self.api.get(&format!("/modules/{module_id}/exercises")).await
    }

    /// Mark an exercise done or not done.
    ///
    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn complete_exercise(
        &self,
        exercise_id: &ExerciseId,
        completed: bool,
    ) -> Result<ExerciseAck, ApiError> {
        self.api
            .post(
                &format!("/exercises/{exercise_id}/complete"),
                &ExerciseCompletion { completed },
            )
            .await
    }

    /// Public numbers; works without a session.
    ///
    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn stats(&self) -> Result<PlatformStats, ApiError> {
        self.api.get("/stats").await
    }

    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn certificates(&self) -> Result<Vec<Certificate>, ApiError> {
        self.api.get("/certificates").await
    }

    /// The backend refuses (400) until every module is complete.
    ///
    /// # Errors
    ///
    /// Returns the backend failure.
    pub async fn generate_certificate(&self) -> Result<Certificate, ApiError> {
        tracing::info!("requesting certificate");
        self.api.post_empty("/certificates/generate").await
    }
}
