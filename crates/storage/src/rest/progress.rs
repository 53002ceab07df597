use async_trait::async_trait;
use portal_core::model::{LessonId, ProgressPatch, ProgressRecord, UserId};
use reqwest::Method;
use tracing::debug;

use super::rows::{ProgressRow, ProgressUpsert};
use super::{SupabaseClient, connection, ensure_success, eq};
use crate::repository::{ProgressRepository, StorageError};

const TABLE: &str = "user_lesson_progress";

#[async_trait]
impl ProgressRepository for SupabaseClient {
    async fn list_progress(&self, user_id: UserId) -> Result<Vec<ProgressRecord>, StorageError> {
        let rows: Vec<ProgressRow> = self
            .select(
                TABLE,
                &[
                    (
                        "select",
                        "user_id,lesson_id,completed,flashcards_reviewed,quiz_score,last_reviewed_at"
                            .into(),
                    ),
                    ("user_id", eq(user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }

    async fn upsert_progress(
        &self,
        user_id: UserId,
        lesson_id: LessonId,
        patch: &ProgressPatch,
    ) -> Result<(), StorageError> {
        let body = ProgressUpsert::new(user_id, lesson_id, patch);
        debug!(%user_id, %lesson_id, ?patch, "upsert progress");
        let response = self
            .request(Method::POST, self.rest_url(TABLE))
            .query(&[("on_conflict", "user_id,lesson_id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&body)
            .send()
            .await
            .map_err(connection)?;
        ensure_success(response).await?;
        Ok(())
    }
}
