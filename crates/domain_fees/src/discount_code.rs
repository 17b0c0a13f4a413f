//! Discount codes
//!
//! Job administrators hand out codes that registrants enter at checkout.
//! A code carries a percentage or fixed discount, an optional validity
//! window and an optional usage limit. Codes are unique per job and are
//! matched case-insensitively.

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use core_kernel::{DiscountCodeId, JobId};

use crate::discount::DiscountCalculator;
use crate::error::FeeError;

/// Maximum length of a discount code
pub const MAX_CODE_LENGTH: usize = 32;

/// Canonical form of a code: trimmed and upper-cased
pub fn normalize_code(raw: &str) -> String {
    raw.trim().to_ascii_uppercase()
}

fn validate_code(code: &str) -> Result<(), FeeError> {
    let valid_chars = code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if code.is_empty() || code.len() > MAX_CODE_LENGTH || !valid_chars {
        return Err(FeeError::InvalidCode(code.to_string()));
    }
    Ok(())
}

fn validate_value(value: Decimal, is_percentage: bool) -> Result<(), FeeError> {
    if value <= Decimal::ZERO {
        return Err(FeeError::InvalidValue(format!("{} must be positive", value)));
    }
    if is_percentage && value > dec!(100) {
        return Err(FeeError::InvalidValue(format!("{}% exceeds 100%", value)));
    }
    Ok(())
}

/// Fields supplied when creating a code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewDiscountCode {
    pub code: String,
    pub value: Decimal,
    pub is_percentage: bool,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub max_uses: Option<u32>,
}

/// Partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCodeUpdate {
    pub value: Option<Decimal>,
    pub is_percentage: Option<bool>,
    pub active: Option<bool>,
    pub valid_from: Option<Option<NaiveDate>>,
    pub valid_until: Option<Option<NaiveDate>>,
    pub max_uses: Option<Option<u32>>,
}

/// A discount code belonging to one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountCode {
    pub id: DiscountCodeId,
    pub job_id: JobId,
    pub code: String,
    pub value: Decimal,
    pub is_percentage: bool,
    pub active: bool,
    pub valid_from: Option<NaiveDate>,
    pub valid_until: Option<NaiveDate>,
    pub max_uses: Option<u32>,
    pub times_used: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DiscountCode {
    /// Creates an active code after validating its text and value
    pub fn new(job_id: JobId, draft: NewDiscountCode) -> Result<Self, FeeError> {
        let code = normalize_code(&draft.code);
        validate_code(&code)?;
        validate_value(draft.value, draft.is_percentage)?;

        let now = Utc::now();
        Ok(Self {
            id: DiscountCodeId::new_v7(),
            job_id,
            code,
            value: draft.value,
            is_percentage: draft.is_percentage,
            active: true,
            valid_from: draft.valid_from,
            valid_until: draft.valid_until,
            max_uses: draft.max_uses,
            times_used: 0,
            created_at: now,
            updated_at: now,
        })
    }

    /// Checks whether the code may be redeemed on `today`
    pub fn check_redeemable(&self, today: NaiveDate) -> Result<(), FeeError> {
        if !self.active {
            return Err(FeeError::Inactive(self.code.clone()));
        }
        if let Some(valid_from) = self.valid_from {
            if today < valid_from {
                return Err(FeeError::NotYetValid {
                    code: self.code.clone(),
                    valid_from,
                });
            }
        }
        if let Some(valid_until) = self.valid_until {
            if today > valid_until {
                return Err(FeeError::Expired {
                    code: self.code.clone(),
                    valid_until,
                });
            }
        }
        if let Some(max_uses) = self.max_uses {
            if self.times_used >= max_uses {
                return Err(FeeError::UsageLimitReached {
                    code: self.code.clone(),
                    max_uses,
                });
            }
        }
        Ok(())
    }

    /// Discount this code gives on `base`, without checking redeemability
    pub fn discount_for(&self, base: Decimal) -> Decimal {
        DiscountCalculator::calculate(base, self.value, self.is_percentage)
    }

    /// Checks, records one use and returns the discount on `base`
    pub fn redeem(&mut self, today: NaiveDate, base: Decimal) -> Result<Decimal, FeeError> {
        self.check_redeemable(today)?;
        self.times_used += 1;
        self.updated_at = Utc::now();
        Ok(self.discount_for(base))
    }

    /// Uses left before the limit, `None` when unlimited
    pub fn remaining_uses(&self) -> Option<u32> {
        self.max_uses.map(|max| max.saturating_sub(self.times_used))
    }

    fn apply_update(&mut self, update: DiscountCodeUpdate) -> Result<(), FeeError> {
        let value = update.value.unwrap_or(self.value);
        let is_percentage = update.is_percentage.unwrap_or(self.is_percentage);
        validate_value(value, is_percentage)?;

        self.value = value;
        self.is_percentage = is_percentage;
        if let Some(active) = update.active {
            self.active = active;
        }
        if let Some(valid_from) = update.valid_from {
            self.valid_from = valid_from;
        }
        if let Some(valid_until) = update.valid_until {
            self.valid_until = valid_until;
        }
        if let Some(max_uses) = update.max_uses {
            self.max_uses = max_uses;
        }
        self.updated_at = Utc::now();
        Ok(())
    }
}

/// All discount codes for a single job, keyed by normalized code
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DiscountCodeBook {
    job_id: JobId,
    codes: BTreeMap<String, DiscountCode>,
}

impl DiscountCodeBook {
    pub fn new(job_id: JobId) -> Self {
        Self {
            job_id,
            codes: BTreeMap::new(),
        }
    }

    pub fn job_id(&self) -> JobId {
        self.job_id
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Creates and stores a code, rejecting duplicates
    pub fn add(&mut self, draft: NewDiscountCode) -> Result<&DiscountCode, FeeError> {
        let code = DiscountCode::new(self.job_id, draft)?;
        if self.codes.contains_key(&code.code) {
            return Err(FeeError::DuplicateCode(code.code));
        }
        info!(job_id = %self.job_id, code = %code.code, "discount code created");
        let key = code.code.clone();
        Ok(self.codes.entry(key).or_insert(code))
    }

    pub fn get(&self, code: &str) -> Option<&DiscountCode> {
        self.codes.get(&normalize_code(code))
    }

    pub fn get_mut(&mut self, code: &str) -> Option<&mut DiscountCode> {
        self.codes.get_mut(&normalize_code(code))
    }

    pub fn update(&mut self, code: &str, update: DiscountCodeUpdate) -> Result<&DiscountCode, FeeError> {
        let job_id = self.job_id;
        let entry = self
            .get_mut(code)
            .ok_or_else(|| FeeError::CodeNotFound(normalize_code(code)))?;
        entry.apply_update(update)?;
        info!(job_id = %job_id, code = %entry.code, "discount code updated");
        Ok(entry)
    }

    pub fn remove(&mut self, code: &str) -> Result<DiscountCode, FeeError> {
        let key = normalize_code(code);
        let removed = self
            .codes
            .remove(&key)
            .ok_or(FeeError::CodeNotFound(key))?;
        info!(job_id = %self.job_id, code = %removed.code, "discount code removed");
        Ok(removed)
    }

    /// All codes, sorted by code text
    pub fn list(&self) -> Vec<&DiscountCode> {
        self.codes.values().collect()
    }

    /// Creates `count` codes named `PREFIX-XXXXXX` with random hex suffixes
    pub fn generate_batch(
        &mut self,
        prefix: &str,
        count: u32,
        value: Decimal,
        is_percentage: bool,
    ) -> Result<Vec<DiscountCode>, FeeError> {
        let prefix = normalize_code(prefix);
        // prefix + '-' + six characters must still fit
        if prefix.len() + 7 > MAX_CODE_LENGTH {
            return Err(FeeError::InvalidCode(prefix));
        }
        validate_code(&prefix)?;
        validate_value(value, is_percentage)?;

        let mut created = Vec::with_capacity(count as usize);
        while created.len() < count as usize {
            let suffix = Uuid::new_v4().simple().to_string()[..6].to_ascii_uppercase();
            let text = format!("{}-{}", prefix, suffix);
            if self.codes.contains_key(&text) {
                debug!(code = %text, "generated code collided, retrying");
                continue;
            }
            let draft = NewDiscountCode {
                code: text,
                value,
                is_percentage,
                valid_from: None,
                valid_until: None,
                max_uses: Some(1),
            };
            created.push(self.add(draft)?.clone());
        }
        Ok(created)
    }

    /// Looks up, validates and redeems a code entered at checkout
    pub fn redeem(&mut self, code: &str, today: NaiveDate, base: Decimal) -> Result<Decimal, FeeError> {
        let entry = self
            .get_mut(code)
            .ok_or_else(|| FeeError::CodeNotFound(normalize_code(code)))?;
        entry.redeem(today, base)
    }

    /// Copies every code into a book for another job, with usage reset
    pub fn clone_for_job(&self, new_job_id: JobId) -> DiscountCodeBook {
        let now = Utc::now();
        let codes = self
            .codes
            .iter()
            .map(|(key, code)| {
                let copy = DiscountCode {
                    id: DiscountCodeId::new_v7(),
                    job_id: new_job_id,
                    times_used: 0,
                    created_at: now,
                    updated_at: now,
                    ..code.clone()
                };
                (key.clone(), copy)
            })
            .collect();

        DiscountCodeBook {
            job_id: new_job_id,
            codes,
        }
    }
}
