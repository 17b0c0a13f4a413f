//! HTTP API Layer
//!
//! This crate provides the REST API for league registration and scheduling
//! using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: Request handlers for fees, discount codes, scheduling,
//!   club matching and membership verification
//! - **Middleware**: Authentication, job authorization, tracing, audit logging
//! - **DTOs**: Request/Response data transfer objects, validated with `validator`
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let app = create_router(AppState::new(config));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod auth;

use std::collections::HashMap;
use std::sync::Arc;

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use core_kernel::JobId;
use domain_fees::DiscountCodeBook;
use domain_registration::MembershipVerifier;

use crate::config::ApiConfig;
use crate::handlers::{clubs, discount_codes, fees, health, membership, scheduling};
use crate::middleware::{audit_middleware, auth_middleware};

/// Discount codes for every job, held in memory
pub type DiscountCodeStore = Arc<RwLock<HashMap<JobId, DiscountCodeBook>>>;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub discount_codes: DiscountCodeStore,
    /// Membership service; verification reports `unavailable` without one
    pub membership: Option<Arc<dyn MembershipVerifier>>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            config,
            discount_codes: Arc::new(RwLock::new(HashMap::new())),
            membership: None,
        }
    }

    pub fn with_membership(mut self, verifier: Arc<dyn MembershipVerifier>) -> Self {
        self.membership = Some(verifier);
        self
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Shared application state
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes (no auth required)
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    let fee_routes = Router::new()
        .route("/discount", post(fees::calculate_discount))
        .route("/team", post(fees::calculate_team_fees))
        .route("/player", post(fees::calculate_player_fees))
        .route("/insurable", post(fees::calculate_insurable));

    let discount_code_routes = Router::new()
        .route("/", get(discount_codes::list_codes).post(discount_codes::create_code))
        .route("/generate", post(discount_codes::generate_codes))
        .route(
            "/:code",
            get(discount_codes::get_code)
                .put(discount_codes::update_code)
                .delete(discount_codes::delete_code),
        )
        .route("/:code/apply", post(discount_codes::apply_code));

    let scheduling_routes = Router::new()
        .route("/pairings/round-robin", post(scheduling::round_robin))
        .route("/pairings/bracket", post(scheduling::bracket))
        .route("/auto-build", post(scheduling::auto_build))
        .route("/conflicts", post(scheduling::conflicts))
        .route("/qa", post(scheduling::qa));

    // Protected API routes
    let api_routes = Router::new()
        .nest("/fees", fee_routes)
        .nest("/jobs/:job_id/discount-codes", discount_code_routes)
        .nest("/scheduling", scheduling_routes)
        .route("/clubs/match", post(clubs::match_club))
        .route("/membership/verify", post(membership::verify_membership))
        .layer(axum_middleware::from_fn_with_state(state.clone(), audit_middleware))
        .layer(axum_middleware::from_fn_with_state(state.clone(), auth_middleware));

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(state)
}
