//! Biographer Service
//!
//! Runs turns against snapshots held in a profile store: load, turn, then
//! write back only what changed.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::{debug, error};

use super::orchestrator::TurnOrchestrator;
use crate::models::turn::{ChatMessage, TurnRequest, TurnResponse};
use crate::storage::profile_store::ProfileStore;
use crate::utils::error::{AppError, AppResult};

pub struct BiographerService {
    orchestrator: TurnOrchestrator,
    store: Arc<dyn ProfileStore>,
}

impl BiographerService {
    pub fn new(orchestrator: TurnOrchestrator, store: Arc<dyn ProfileStore>) -> Self {
        Self {
            orchestrator,
            store,
        }
    }

    pub fn orchestrator(&self) -> &TurnOrchestrator {
        &self.orchestrator
    }

    /// Run a turn for `user_id` and persist the resulting changes.
    ///
    /// A failed write surfaces as `AppError::Persistence`; the stored
    /// snapshot is left as it was, so the caller can retry the same turn.
    pub async fn handle_turn(
        &self,
        user_id: &str,
        message_history: Vec<ChatMessage>,
        today: NaiveDate,
    ) -> AppResult<TurnResponse> {
        let current_profile = self.store.get(user_id).await.map_err(as_persistence)?;

        let request = TurnRequest {
            message_history,
            current_profile,
        };
        let response = self.orchestrator.run_turn(&request, today).await?;

        let patch = response.updated_profile.diff(&request.current_profile);
        if patch.is_empty() {
            debug!(user_id = %user_id, "Nothing to persist");
            return Ok(response);
        }

        self.store
            .upsert(user_id, &patch)
            .await
            .map_err(|e| {
                error!(user_id = %user_id, error = %e, "Profile write failed");
                as_persistence(e)
            })?;
        debug!(user_id = %user_id, fields = patch.len(), "Profile patch persisted");

        Ok(response)
    }
}

/// Store failures other than a missing profile are persistence failures
fn as_persistence(err: AppError) -> AppError {
    match err {
        AppError::NotFound(_) | AppError::Persistence(_) => err,
        other => AppError::persistence(other.to_string()),
    }
}
