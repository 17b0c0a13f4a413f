//! USA Lacrosse membership verification
//!
//! Players must hold a current USA Lacrosse membership that runs through
//! the end of the season. The membership service is external, so the
//! lookup sits behind the [`MembershipVerifier`] port:
//!
//! - **HttpMembershipVerifier**: calls the membership REST API
//! - **InMemoryMembershipVerifier**: fixed records for tests and local runs
//!
//! A service outage must never block a registration. [`verify_member`]
//! turns adapter errors into [`MembershipVerdict::Unavailable`] so the
//! registration can continue and be re-checked later.
//!
//! # Usage
//!
//! ```rust,ignore
//! let verifier: Arc<dyn MembershipVerifier> = Arc::new(HttpMembershipVerifier::new(config)?);
//! let verdict = verify_member(verifier.as_ref(), &request).await;
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::error::MembershipError;

/// A membership as the service reports it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRecord {
    pub member_id: String,
    pub first_name: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    pub expires_on: NaiveDate,
}

/// What the registrant entered
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipRequest {
    pub member_id: String,
    pub last_name: String,
    pub birth_date: NaiveDate,
    /// The membership must not expire before this date
    pub required_through: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MembershipVerdict {
    Valid,
    Expired { expires_on: NaiveDate },
    NameMismatch,
    BirthDateMismatch,
    NotFound,
    /// The service could not be reached; the check should be retried later
    Unavailable,
}

impl MembershipVerdict {
    pub fn is_valid(&self) -> bool {
        matches!(self, MembershipVerdict::Valid)
    }
}

/// Port for looking up memberships
#[async_trait]
pub trait MembershipVerifier: Send + Sync {
    /// Returns the record for `member_id`, or `None` when no such member exists
    async fn lookup(&self, member_id: &str) -> Result<Option<MembershipRecord>, MembershipError>;
}

fn comparable_name(name: &str) -> String {
    name.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compares a record with what the registrant entered
///
/// Identity is checked before expiry, so a record belonging to someone
/// else is reported as a mismatch even when it has also lapsed.
pub fn evaluate(
    record: &MembershipRecord,
    last_name: &str,
    birth_date: NaiveDate,
    required_through: NaiveDate,
) -> MembershipVerdict {
    if comparable_name(&record.last_name) != comparable_name(last_name) {
        return MembershipVerdict::NameMismatch;
    }
    if record.birth_date != birth_date {
        return MembershipVerdict::BirthDateMismatch;
    }
    if record.expires_on < required_through {
        return MembershipVerdict::Expired {
            expires_on: record.expires_on,
        };
    }
    MembershipVerdict::Valid
}

/// Looks up and evaluates a membership, degrading to `Unavailable` on
/// adapter errors
pub async fn verify_member(verifier: &dyn MembershipVerifier, request: &MembershipRequest) -> MembershipVerdict {
    match verifier.lookup(&request.member_id).await {
        Ok(Some(record)) => {
            let verdict = evaluate(&record, &request.last_name, request.birth_date, request.required_through);
            debug!(member_id = %request.member_id, ?verdict, "membership evaluated");
            verdict
        }
        Ok(None) => MembershipVerdict::NotFound,
        Err(e) => {
            warn!(member_id = %request.member_id, error = %e, "membership lookup failed");
            MembershipVerdict::Unavailable
        }
    }
}

/// In-memory verifier backed by a fixed set of records
#[derive(Debug, Default, Clone)]
pub struct InMemoryMembershipVerifier {
    records: Arc<RwLock<HashMap<String, MembershipRecord>>>,
}

impl InMemoryMembershipVerifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_records(records: Vec<MembershipRecord>) -> Self {
        let verifier = Self::new();
        for record in records {
            verifier.insert(record).await;
        }
        verifier
    }

    pub async fn insert(&self, record: MembershipRecord) {
        self.records.write().await.insert(record.member_id.clone(), record);
    }
}

#[async_trait]
impl MembershipVerifier for InMemoryMembershipVerifier {
    async fn lookup(&self, member_id: &str) -> Result<Option<MembershipRecord>, MembershipError> {
        Ok(self.records.read().await.get(member_id.trim()).cloned())
    }
}

/// Connection settings for the membership REST API
#[derive(Debug, Clone)]
pub struct HttpMembershipConfig {
    /// Base URL of the API, e.g. `https://membership.example.com/api/v1`
    pub base_url: String,
    pub api_key: String,
    pub timeout_secs: u64,
}

impl Default for HttpMembershipConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

/// Verifier that calls `GET {base_url}/members/{member_id}`
pub struct HttpMembershipVerifier {
    client: Client,
    config: HttpMembershipConfig,
}

impl HttpMembershipVerifier {
    pub fn new(config: HttpMembershipConfig) -> Result<Self, MembershipError> {
        if config.base_url.trim().is_empty() {
            return Err(MembershipError::Configuration("base_url is empty".to_string()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    fn member_url(&self, member_id: &str) -> String {
        format!("{}/members/{}", self.config.base_url.trim_end_matches('/'), member_id)
    }
}

#[async_trait]
impl MembershipVerifier for HttpMembershipVerifier {
    async fn lookup(&self, member_id: &str) -> Result<Option<MembershipRecord>, MembershipError> {
        let member_id = member_id.trim();
        // member ids are numeric or dashed; anything else cannot exist and must not reach the URL
        if member_id.is_empty() || !member_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            debug!(member_id, "malformed membership id");
            return Ok(None);
        }

        let response = self
            .client
            .get(self.member_url(member_id))
            .bearer_auth(&self.config.api_key)
            .send()
            .await?;

        let status = response.status();
        debug!(member_id, status = status.as_u16(), "membership service responded");

        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            return Err(MembershipError::Http {
                status: status.as_u16(),
            });
        }

        Ok(Some(response.json::<MembershipRecord>().await?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record() -> MembershipRecord {
        MembershipRecord {
            member_id: "1234567".to_string(),
            first_name: "Riley".to_string(),
            last_name: "Van Dyke".to_string(),
            birth_date: date(2012, 4, 9),
            expires_on: date(2025, 8, 31),
        }
    }

    #[test]
    fn test_evaluate_valid_ignores_case_and_spacing() {
        let verdict = evaluate(&record(), " vandyke ", date(2012, 4, 9), date(2025, 6, 30));
        assert_eq!(verdict, MembershipVerdict::Valid);
    }

    #[test]
    fn test_evaluate_order() {
        let through = date(2025, 12, 31);
        assert_eq!(
            evaluate(&record(), "Smith", date(2012, 4, 9), through),
            MembershipVerdict::NameMismatch
        );
        assert_eq!(
            evaluate(&record(), "Van Dyke", date(2012, 4, 10), through),
            MembershipVerdict::BirthDateMismatch
        );
        assert_eq!(
            evaluate(&record(), "Van Dyke", date(2012, 4, 9), through),
            MembershipVerdict::Expired {
                expires_on: date(2025, 8, 31)
            }
        );
    }

    #[test]
    fn test_expiring_on_required_date_is_valid() {
        assert!(evaluate(&record(), "Van Dyke", date(2012, 4, 9), date(2025, 8, 31)).is_valid());
    }

    #[test]
    fn test_http_verifier_requires_base_url() {
        assert!(matches!(
            HttpMembershipVerifier::new(HttpMembershipConfig::default()),
            Err(MembershipError::Configuration(_))
        ));
    }

    #[tokio::test]
    async fn test_in_memory_lookup() {
        let verifier = InMemoryMembershipVerifier::with_records(vec![record()]).await;
        let request = MembershipRequest {
            member_id: "1234567".to_string(),
            last_name: "Van Dyke".to_string(),
            birth_date: date(2012, 4, 9),
            required_through: date(2025, 7, 1),
        };

        assert_eq!(verify_member(&verifier, &request).await, MembershipVerdict::Valid);

        let missing = MembershipRequest {
            member_id: "999".to_string(),
            ..request
        };
        assert_eq!(verify_member(&verifier, &missing).await, MembershipVerdict::NotFound);
    }
}
