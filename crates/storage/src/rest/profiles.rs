use async_trait::async_trait;
use portal_core::model::{Badge, UserId, UserProfile};
use reqwest::Method;

use super::rows::{BadgeRow, ProfileRow};
use super::{SupabaseClient, connection, ensure_success, eq};
use crate::repository::{ProfileRepository, StorageError};

#[async_trait]
impl ProfileRepository for SupabaseClient {
    async fn get_profile(&self, user_id: UserId) -> Result<Option<UserProfile>, StorageError> {
        let row: Option<ProfileRow> = self
            .select_one(
                "user_profiles",
                &[
                    ("select", "id,email,name,streak_days".into()),
                    ("id", eq(user_id)),
                ],
            )
            .await?;
        Ok(row.map(UserProfile::from))
    }

    async fn upsert_profile(&self, profile: &UserProfile) -> Result<(), StorageError> {
        let response = self
            .request(Method::POST, self.rest_url("user_profiles"))
            .query(&[("on_conflict", "id")])
            .header("Prefer", "resolution=merge-duplicates,return=minimal")
            .json(&ProfileRow::from(profile))
            .send()
            .await
            .map_err(connection)?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn list_badges(&self, user_id: UserId) -> Result<Vec<Badge>, StorageError> {
        let rows: Vec<BadgeRow> = self
            .select(
                "user_badges",
                &[
                    ("select", "id,user_id,badge_type,badge_name,earned_at".into()),
                    ("user_id", eq(user_id)),
                    ("order", "earned_at.asc".into()),
                ],
            )
            .await?;
        Ok(rows.into_iter().map(Badge::from).collect())
    }

    async fn append_badge(&self, badge: &Badge) -> Result<(), StorageError> {
        let response = self
            .request(Method::POST, self.rest_url("user_badges"))
            .header("Prefer", "return=minimal")
            .json(&BadgeRow::from(badge))
            .send()
            .await
            .map_err(connection)?;
        ensure_success(response).await?;
        Ok(())
    }
}
