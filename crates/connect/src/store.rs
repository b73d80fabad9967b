//! Remote store adapter backed by the cloud API client.

use async_trait::async_trait;
use log::{debug, info};

use goodcare_core::checkins::{CheckInRecord, CheckInStoreTrait, UserStats};
use goodcare_core::errors::{DatabaseError, Error, Result};
use goodcare_core::leaderboard::{LeaderboardRow, LeaderboardStoreTrait};
use goodcare_core::sync::ConnectivityProbeTrait;
use goodcare_core::users::{UserProfile, UserStoreTrait};

use crate::client::CareApiClient;
use crate::types::{
    ApiCheckIn, ApiCheckInsResponse, ApiHealthResponse, ApiLeaderboardResponse,
    ApiRecordCheckInRequest, ApiUserProfile, ApiUserStats,
};

/// The GOOD CARE cloud as the primary store.
///
/// One struct implements every remote-facing trait so the composition root
/// can hand the same instance to the check-in pipeline, the leaderboard, the
/// user service, and the connectivity monitor.
pub struct RemoteCareStore {
    client: CareApiClient,
}

impl RemoteCareStore {
    pub fn new(client: CareApiClient) -> Self {
        RemoteCareStore { client }
    }
}

/// A 404 on a point-read means "no row", not a failure.
fn not_found_as_none<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(Error::Database(DatabaseError::NotFound(_))) => Ok(None),
        Err(e) => Err(e),
    }
}

#[async_trait]
impl CheckInStoreTrait for RemoteCareStore {
    async fn get_user_stats(&self, user_id: &str) -> Result<Option<UserStats>> {
        let stats = not_found_as_none(
            self.client
                .get::<ApiUserStats>(&format!("/api/v1/users/{}/stats", user_id))
                .await,
        )?;
        Ok(stats.map(UserStats::from))
    }

    async fn record_check_in(&self, record: &CheckInRecord, stats: &UserStats) -> Result<()> {
        let request = ApiRecordCheckInRequest {
            check_in: ApiCheckIn::from(record),
            stats: ApiUserStats::from(stats),
        };
        let created: ApiCheckIn = self.client.post("/api/v1/check-ins", &request).await?;
        debug!("[CareApi] Check-in {} accepted by cloud store", created.id);
        Ok(())
    }

    async fn list_check_ins(&self, user_id: &str, limit: i64) -> Result<Vec<CheckInRecord>> {
        let response: ApiCheckInsResponse = self
            .client
            .get(&format!(
                "/api/v1/users/{}/check-ins?limit={}",
                user_id, limit
            ))
            .await?;
        Ok(response
            .check_ins
            .into_iter()
            .map(CheckInRecord::from)
            .collect())
    }
}

#[async_trait]
impl LeaderboardStoreTrait for RemoteCareStore {
    async fn top_by_points(&self, limit: i64) -> Result<Vec<LeaderboardRow>> {
        let response: ApiLeaderboardResponse = self
            .client
            .get(&format!("/api/v1/leaderboard?limit={}", limit))
            .await?;
        let count = response.entries.len();
        info!("[CareApi] Fetched {} leaderboard rows", count);
        Ok(response
            .entries
            .into_iter()
            .map(LeaderboardRow::from)
            .collect())
    }
}

#[async_trait]
impl UserStoreTrait for RemoteCareStore {
    async fn create_user(&self, profile: &UserProfile) -> Result<UserProfile> {
        let created: ApiUserProfile = self
            .client
            .post("/api/v1/users", &ApiUserProfile::from(profile))
            .await?;
        Ok(created.into())
    }

    async fn get_user(&self, user_id: &str) -> Result<Option<UserProfile>> {
        let profile = not_found_as_none(
            self.client
                .get::<ApiUserProfile>(&format!("/api/v1/users/{}", user_id))
                .await,
        )?;
        Ok(profile.map(UserProfile::from))
    }
}

#[async_trait]
impl ConnectivityProbeTrait for RemoteCareStore {
    async fn probe(&self) -> bool {
        match self.client.get::<ApiHealthResponse>("/health").await {
            Ok(_) => true,
            Err(e) => {
                debug!("[CareApi] Health probe failed: {}", e);
                false
            }
        }
    }
}
