use std::sync::Arc;

use portal_core::aggregate::{ProgressOverview, UserSnapshot, aggregate_progress};
use portal_core::model::{UserProfile, Viewer};
use storage::{CatalogRepository, ProfileRepository, ProgressRepository, StorageError};
use tracing::error;

use crate::error::LoadError;

/// Everything the catalog page shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardPage {
    pub overview: ProgressOverview,
    pub profile: Option<UserProfile>,
}

/// Loads the course catalog together with the viewer's progress.
#[derive(Clone)]
pub struct DashboardService {
    catalog: Arc<dyn CatalogRepository>,
    progress: Arc<dyn ProgressRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl DashboardService {
    #[must_use]
    pub fn new(
        catalog: Arc<dyn CatalogRepository>,
        progress: Arc<dyn ProgressRepository>,
        profiles: Arc<dyn ProfileRepository>,
    ) -> Self {
        Self {
            catalog,
            progress,
            profiles,
        }
    }

    /// Fetch courses, lessons and the viewer's rows, then aggregate them.
    ///
    /// # Errors
    ///
    /// Returns `LoadError::Storage` if any fetch fails. Nothing partial is
    /// returned.
    pub async fn load(&self, viewer: Viewer) -> Result<DashboardPage, LoadError> {
        let result = self.load_inner(viewer).await;
        if let Err(err) = &result {
            error!(error = %err, "failed to load dashboard");
        }
        result
    }

    async fn load_inner(&self, viewer: Viewer) -> Result<DashboardPage, LoadError> {
        let courses = self.catalog.list_courses().await?;
        let lessons = self.catalog.list_all_lessons().await?;
        let snapshot =
            load_snapshot(self.progress.as_ref(), self.profiles.as_ref(), viewer).await?;

        let overview = aggregate_progress(&courses, &lessons, viewer, &snapshot);
        Ok(DashboardPage {
            overview,
            profile: snapshot.profile,
        })
    }
}

/// The signed-in viewer's rows. Empty for anonymous viewers.
pub(crate) async fn load_snapshot(
    progress: &dyn ProgressRepository,
    profiles: &dyn ProfileRepository,
    viewer: Viewer,
) -> Result<UserSnapshot, StorageError> {
    let Viewer::SignedIn(user_id) = viewer else {
        return Ok(UserSnapshot::default());
    };
    Ok(UserSnapshot {
        progress: progress.list_progress(user_id).await?,
        profile: profiles.get_profile(user_id).await?,
        badges: profiles.list_badges(user_id).await?,
    })
}
