//! Discount code administration handlers
//!
//! Every route is scoped to a job; callers need a token for that job or
//! the admin role.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::Utc;
use validator::Validate;

use core_kernel::JobId;
use domain_fees::{normalize_code, DiscountCode, DiscountCodeBook, FeeError};

use crate::auth::{authorize_job, Claims};
use crate::dto::discount_codes::*;
use crate::{error::ApiError, AppState};

/// Lists a job's codes, sorted by code
pub async fn list_codes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<JobId>,
) -> Result<Json<DiscountCodeListResponse>, ApiError> {
    authorize_job(&claims, job_id)?;

    let books = state.discount_codes.read().await;
    let codes = books
        .get(&job_id)
        .map(|book| book.list().into_iter().cloned().collect())
        .unwrap_or_default();

    Ok(Json(DiscountCodeListResponse { job_id, codes }))
}

/// Creates a code
pub async fn create_code(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<JobId>,
    Json(request): Json<CreateDiscountCodeRequest>,
) -> Result<(StatusCode, Json<DiscountCode>), ApiError> {
    authorize_job(&claims, job_id)?;
    request.validate()?;

    let mut books = state.discount_codes.write().await;
    let book = books
        .entry(job_id)
        .or_insert_with(|| DiscountCodeBook::new(job_id));
    let created = book.add(request.into())?.clone();

    Ok((StatusCode::CREATED, Json(created)))
}

/// Creates a batch of single-use codes sharing a prefix
pub async fn generate_codes(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(job_id): Path<JobId>,
    Json(request): Json<GenerateCodesRequest>,
) -> Result<(StatusCode, Json<Vec<DiscountCode>>), ApiError> {
    authorize_job(&claims, job_id)?;
    request.validate()?;

    let mut books = state.discount_codes.write().await;
    let book = books
        .entry(job_id)
        .or_insert_with(|| DiscountCodeBook::new(job_id));
    let created = book.generate_batch(
        &request.prefix,
        request.count,
        request.value,
        request.is_percentage,
    )?;

    Ok((StatusCode::CREATED, Json(created)))
}

/// Gets a code by its text, case-insensitively
pub async fn get_code(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((job_id, code)): Path<(JobId, String)>,
) -> Result<Json<DiscountCode>, ApiError> {
    authorize_job(&claims, job_id)?;

    let books = state.discount_codes.read().await;
    books
        .get(&job_id)
        .and_then(|book| book.get(&code))
        .cloned()
        .map(Json)
        .ok_or_else(|| FeeError::CodeNotFound(normalize_code(&code)).into())
}

/// Applies a partial update
pub async fn update_code(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((job_id, code)): Path<(JobId, String)>,
    Json(request): Json<UpdateDiscountCodeRequest>,
) -> Result<Json<DiscountCode>, ApiError> {
    authorize_job(&claims, job_id)?;
    request.validate()?;

    let mut books = state.discount_codes.write().await;
    let book = books
        .get_mut(&job_id)
        .ok_or_else(|| FeeError::CodeNotFound(normalize_code(&code)))?;
    let updated = book.update(&code, request.into())?.clone();

    Ok(Json(updated))
}

/// Deletes a code
pub async fn delete_code(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((job_id, code)): Path<(JobId, String)>,
) -> Result<StatusCode, ApiError> {
    authorize_job(&claims, job_id)?;

    let mut books = state.discount_codes.write().await;
    let book = books
        .get_mut(&job_id)
        .ok_or_else(|| FeeError::CodeNotFound(normalize_code(&code)))?;
    book.remove(&code)?;

    Ok(StatusCode::NO_CONTENT)
}

/// Redeems a code against an amount, recording one use
pub async fn apply_code(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path((job_id, code)): Path<(JobId, String)>,
    Json(request): Json<ApplyCodeRequest>,
) -> Result<Json<ApplyCodeResponse>, ApiError> {
    authorize_job(&claims, job_id)?;
    request.validate()?;

    let today = request
        .date
        .unwrap_or_else(|| state.config.timezone.date_at(Utc::now()));

    let mut books = state.discount_codes.write().await;
    let book = books
        .get_mut(&job_id)
        .ok_or_else(|| FeeError::CodeNotFound(normalize_code(&code)))?;
    let discount = book.redeem(&code, today, request.base_amount)?;
    let remaining_uses = book.get(&code).and_then(|c| c.remaining_uses());

    Ok(Json(ApplyCodeResponse {
        code: normalize_code(&code),
        discount,
        discounted_amount: request.base_amount - discount,
        remaining_uses,
    }))
}
