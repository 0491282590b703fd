//! Locker service.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::ServiceClient;
use crate::Result;

pub const LOCKER_SIZES: [&str; 4] = ["SMALL", "MEDIUM", "LARGE", "EXTRA_LARGE"];
pub const DEFAULT_BRANCH: &str = "Main Branch - New York";

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Locker {
    #[serde(default)]
    pub id: Option<i64>,
    pub locker_number: String,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub locker_size: Option<String>,
    #[serde(default)]
    pub annual_fee: Option<f64>,
    #[serde(default)]
    pub locker_status: Option<String>,
    #[serde(default)]
    pub allocation_date: Option<NaiveDate>,
    #[serde(default)]
    pub expiry_date: Option<NaiveDate>,
    #[serde(default)]
    pub branch_location: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LockerRequest {
    pub user_id: i64,
    pub locker_size: String,
    pub branch_location: String,
}

impl LockerRequest {
    pub fn new(user_id: i64, locker_size: impl Into<String>, branch: Option<String>) -> Self {
        Self {
            user_id,
            locker_size: locker_size.into(),
            branch_location: branch.unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
        }
    }
}

/// Client of the locker service.
#[derive(Clone, Debug)]
pub struct LockersApi {
    client: ServiceClient,
}

impl LockersApi {
    pub fn new(client: ServiceClient) -> Self {
        Self { client }
    }

    pub async fn allocate(&self, request: &LockerRequest) -> Result<Locker> {
        self.client.post(&["api", "lockers"], request).await
    }

    pub async fn renew(&self, locker_number: &str) -> Result<Locker> {
        self.client
            .put_empty(&["api", "lockers", locker_number, "renew"])
            .await
    }

    pub async fn release(&self, locker_number: &str) -> Result<Locker> {
        self.client
            .put_empty(&["api", "lockers", locker_number, "release"])
            .await
    }

    pub async fn available(&self) -> Result<Vec<Locker>> {
        self.client.get(&["api", "lockers", "available"]).await
    }

    pub async fn lockers_for_user(&self, user_id: i64) -> Result<Vec<Locker>> {
        self.client
            .get(&["api", "lockers", "user", &user_id.to_string()])
            .await
    }
}
