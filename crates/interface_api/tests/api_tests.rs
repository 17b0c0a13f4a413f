//! API Tests
//!
//! Drives the router end to end through `axum-test`.
//!
//! # Test Organization
//!
//! - `auth_tests` - bearer tokens and job scoping
//! - `fee_tests` - the stateless calculators
//! - `discount_code_tests` - discount code administration and redemption
//! - `scheduling_tests` - pairings, auto-build, conflicts and QA
//! - `registration_tests` - club matching and membership verification

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::{json, Value};

use core_kernel::{DivisionId, FieldId, JobId, TeamId};
use domain_registration::{InMemoryMembershipVerifier, MembershipRecord};
use interface_api::{
    auth::{create_token, roles},
    config::ApiConfig,
    create_router, AppState,
};

const SECRET: &str = "api-test-secret";

fn config() -> ApiConfig {
    ApiConfig {
        jwt_secret: SECRET.to_string(),
        ..ApiConfig::default()
    }
}

/// Decimals serialize as JSON strings
fn amount(value: &Value) -> Decimal {
    value.as_str().unwrap().parse().unwrap()
}

fn server_with(state: AppState) -> TestServer {
    TestServer::new(create_router(state)).unwrap()
}

fn server() -> TestServer {
    server_with(AppState::new(config()))
}

fn admin_token() -> String {
    create_token("admin-1", vec![roles::ADMIN.to_string()], None, SECRET, 300).unwrap()
}

fn director_token(job_id: JobId) -> String {
    create_token("director-1", vec!["director".to_string()], Some(job_id), SECRET, 300).unwrap()
}

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_health_is_public() {
        let server = server();
        let response = server.get("/health").await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["status"], "healthy");

        let ready = server.get("/health/ready").await.json::<Value>();
        assert_eq!(ready["membership_service"], false);
    }

    #[tokio::test]
    async fn test_api_requires_token() {
        let server = server();
        server
            .post("/api/v1/fees/discount")
            .json(&json!({"base_amount": "100", "discount_value": "10", "is_percentage": true}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);

        server
            .post("/api/v1/fees/discount")
            .authorization_bearer("not-a-jwt")
            .json(&json!({"base_amount": "100", "discount_value": "10", "is_percentage": true}))
            .await
            .assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_director_limited_to_own_job() {
        let server = server();
        let own_job = JobId::new();
        let other_job = JobId::new();
        let token = director_token(own_job);

        server
            .get(&format!("/api/v1/jobs/{}/discount-codes", own_job.as_uuid()))
            .authorization_bearer(&token)
            .await
            .assert_status_ok();

        let response = server
            .get(&format!("/api/v1/jobs/{}/discount-codes", other_job.as_uuid()))
            .authorization_bearer(&token)
            .await;
        response.assert_status(StatusCode::FORBIDDEN);
        assert_eq!(response.json::<Value>()["error"], "forbidden");
    }
}

mod fee_tests {
    use super::*;

    #[tokio::test]
    async fn test_percentage_discount() {
        let response = server()
            .post("/api/v1/fees/discount")
            .authorization_bearer(&admin_token())
            .json(&json!({"base_amount": "850", "discount_value": "10", "is_percentage": true}))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(amount(&body["discount"]), dec!(85));
        assert_eq!(amount(&body["discounted_amount"]), dec!(765));
    }

    #[tokio::test]
    async fn test_team_fee_with_card_surcharge() {
        let response = server()
            .post("/api/v1/fees/team")
            .authorization_bearer(&admin_token())
            .json(&json!({
                "deposit": "250",
                "balance_due": "600",
                "charge_full_amount": true,
                "discount": "50",
                "processing": {"add_processing_fees": true, "percentage": "3.5"},
                "payment_method": "credit_card"
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(amount(&body["fee_base"]), dec!(850));
        assert_eq!(amount(&body["fee_processing"]), dec!(28));
        assert_eq!(amount(&body["fee_total"]), dec!(828));
        assert_eq!(amount(&body["owed_total"]), dec!(828));
    }

    #[tokio::test]
    async fn test_negative_amount_is_unprocessable() {
        let response = server()
            .post("/api/v1/fees/player")
            .authorization_bearer(&admin_token())
            .json(&json!({"base": "-5"}))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["error"], "validation_error");
        assert_eq!(body["details"][0], "base: must not be negative");
    }

    #[tokio::test]
    async fn test_amount_past_the_ceiling_is_unprocessable() {
        let response = server()
            .post("/api/v1/fees/discount")
            .authorization_bearer(&admin_token())
            .json(&json!({
                "base_amount": "79228162514264337593543950335",
                "discount_value": "100",
                "is_percentage": true
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let body = response.json::<Value>();
        assert_eq!(body["details"][0], "base_amount: must not exceed 1000000000");
    }

    #[tokio::test]
    async fn test_insured_player_has_nothing_insurable() {
        let body = server()
            .post("/api/v1/fees/insurable")
            .authorization_bearer(&admin_token())
            .json(&json!({"fee_base": "120", "fee_discount": "20", "already_insured": true}))
            .await
            .json::<Value>();
        assert_eq!(amount(&body["insurable_amount"]), Decimal::ZERO);
    }
}

mod discount_code_tests {
    use super::*;

    fn codes_url(job_id: JobId) -> String {
        format!("/api/v1/jobs/{}/discount-codes", job_id.as_uuid())
    }

    #[tokio::test]
    async fn test_code_lifecycle() {
        let server = server();
        let job_id = JobId::new();
        let token = director_token(job_id);
        let base = codes_url(job_id);

        let created = server
            .post(&base)
            .authorization_bearer(&token)
            .json(&json!({"code": "earlybird", "value": "10", "is_percentage": true, "max_uses": 2}))
            .await;
        created.assert_status(StatusCode::CREATED);
        assert_eq!(created.json::<Value>()["code"], "EARLYBIRD");

        server
            .post(&base)
            .authorization_bearer(&token)
            .json(&json!({"code": "EarlyBird", "value": "5", "is_percentage": false}))
            .await
            .assert_status(StatusCode::CONFLICT);

        let applied = server
            .post(&format!("{}/earlybird/apply", base))
            .authorization_bearer(&token)
            .json(&json!({"base_amount": "600", "date": "2025-03-01"}))
            .await;
        applied.assert_status_ok();
        let body = applied.json::<Value>();
        assert_eq!(amount(&body["discount"]), dec!(60));
        assert_eq!(body["remaining_uses"], 1);

        let updated = server
            .put(&format!("{}/EARLYBIRD", base))
            .authorization_bearer(&token)
            .json(&json!({"max_uses": null, "active": false}))
            .await;
        updated.assert_status_ok();
        let body = updated.json::<Value>();
        assert_eq!(body["max_uses"], Value::Null);
        assert_eq!(body["active"], false);

        server
            .post(&format!("{}/earlybird/apply", base))
            .authorization_bearer(&token)
            .json(&json!({"base_amount": "600"}))
            .await
            .assert_status(StatusCode::CONFLICT);

        server
            .delete(&format!("{}/earlybird", base))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NO_CONTENT);

        server
            .get(&format!("{}/earlybird", base))
            .authorization_bearer(&token)
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_generate_batch() {
        let server = server();
        let job_id = JobId::new();
        let token = admin_token();

        let response = server
            .post(&format!("{}/generate", codes_url(job_id)))
            .authorization_bearer(&token)
            .json(&json!({"prefix": "coach", "count": 5, "value": "25", "is_percentage": false}))
            .await;
        response.assert_status(StatusCode::CREATED);

        let codes = response.json::<Vec<Value>>();
        assert_eq!(codes.len(), 5);
        assert!(codes.iter().all(|c| c["code"].as_str().unwrap().starts_with("COACH-")));
        assert!(codes.iter().all(|c| c["max_uses"] == 1));

        let list = server
            .get(&codes_url(job_id))
            .authorization_bearer(&token)
            .await
            .json::<Value>();
        assert_eq!(list["codes"].as_array().unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_expired_code_is_rejected() {
        let server = server();
        let job_id = JobId::new();
        let token = director_token(job_id);

        server
            .post(&codes_url(job_id))
            .authorization_bearer(&token)
            .json(&json!({"code": "WINTER", "value": "20", "is_percentage": false, "valid_until": "2025-01-31"}))
            .await
            .assert_status(StatusCode::CREATED);

        let response = server
            .post(&format!("{}/winter/apply", codes_url(job_id)))
            .authorization_bearer(&token)
            .json(&json!({"base_amount": "100", "date": "2025-02-01"}))
            .await;
        response.assert_status(StatusCode::CONFLICT);
        assert_eq!(response.json::<Value>()["error"], "conflict");
    }
}

mod scheduling_tests {
    use super::*;

    #[tokio::test]
    async fn test_round_robin_with_teams() {
        let teams: Vec<TeamId> = (0..4).map(|_| TeamId::new()).collect();
        let response = server()
            .post("/api/v1/scheduling/pairings/round-robin")
            .authorization_bearer(&admin_token())
            .json(&json!({"team_count": 4, "team_ids": teams}))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["game_count"], 6);
        assert_eq!(body["pairings"][0]["home"]["type"], "team");
    }

    #[tokio::test]
    async fn test_team_count_mismatch() {
        let response = server()
            .post("/api/v1/scheduling/pairings/bracket")
            .authorization_bearer(&admin_token())
            .json(&json!({"team_count": 4, "team_ids": [TeamId::new()]}))
            .await;
        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_build_then_review() {
        let server = server();
        let token = admin_token();
        let division_id = DivisionId::new();
        let field_id = FieldId::new();

        let pairings = server
            .post("/api/v1/scheduling/pairings/round-robin")
            .authorization_bearer(&token)
            .json(&json!({"team_count": 4}))
            .await
            .json::<Value>()["pairings"]
            .clone();

        let built = server
            .post("/api/v1/scheduling/auto-build")
            .authorization_bearer(&token)
            .json(&json!({
                "division_id": division_id,
                "pairings": pairings,
                "timeslots": [{
                    "field_id": field_id,
                    "date": "2025-06-14",
                    "first_game": "08:00:00",
                    "game_interval_minutes": 60,
                    "max_games": 8
                }],
                "config": {"game_duration_minutes": 50, "min_rest_minutes": 0, "max_games_per_team_per_day": null}
            }))
            .await;
        built.assert_status_ok();
        let built = built.json::<Value>();
        assert_eq!(built["complete"], true);
        assert_eq!(built["games"].as_array().unwrap().len(), 6);

        let conflicts = server
            .post("/api/v1/scheduling/conflicts")
            .authorization_bearer(&token)
            .json(&json!({"fields": [field_id], "games": built["games"]}))
            .await
            .json::<Value>();
        assert_eq!(conflicts["has_blocking_conflicts"], false);
        assert_eq!(conflicts["grid"]["rows"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_qa_flags_unknown_field() {
        let division_id = DivisionId::new();
        let home = TeamId::new();
        let away = TeamId::new();

        let response = server()
            .post("/api/v1/scheduling/qa")
            .authorization_bearer(&admin_token())
            .json(&json!({
                "teams": [
                    {"id": home, "name": "Hawks", "division_id": division_id, "club_name": null},
                    {"id": away, "name": "Owls", "division_id": division_id, "club_name": null}
                ],
                "fields": [],
                "games": [{
                    "id": core_kernel::GameId::new(),
                    "game_number": 1,
                    "division_id": division_id,
                    "field_id": FieldId::new(),
                    "start": "2025-06-14T08:00:00",
                    "duration_minutes": 50,
                    "home": {"type": "team", "value": home},
                    "away": {"type": "team", "value": away},
                    "round": 1,
                    "kind": "pool"
                }]
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["clean"], false);
        assert_eq!(body["has_errors"], true);
        assert!(body["issues"]
            .as_array()
            .unwrap()
            .iter()
            .any(|i| i["kind"] == "unknown_field"));
    }
}

mod registration_tests {
    use super::*;

    #[tokio::test]
    async fn test_club_match_ranks_candidates() {
        let response = server()
            .post("/api/v1/clubs/match")
            .authorization_bearer(&admin_token())
            .json(&json!({
                "name": "Wildcats Lacrosse Club",
                "candidates": ["Wildcat Lacrosse", "Owls LC", "Wildcats"],
                "threshold": 50
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["matches"][0]["name"], "Wildcats");
        assert_eq!(body["matches"][0]["score"], 100);
        assert_eq!(body["likely_duplicate"], true);
    }

    #[tokio::test]
    async fn test_membership_without_service_is_unavailable() {
        let response = server()
            .post("/api/v1/membership/verify")
            .authorization_bearer(&admin_token())
            .json(&json!({
                "member_id": "2200417",
                "last_name": "Okafor",
                "birth_date": "2011-10-02",
                "required_through": "2025-07-31"
            }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["valid"], false);
    }

    #[tokio::test]
    async fn test_membership_expired() {
        let verifier = InMemoryMembershipVerifier::with_records(vec![MembershipRecord {
            member_id: "2200417".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Okafor".to_string(),
            birth_date: NaiveDate::from_ymd_opt(2011, 10, 2).unwrap(),
            expires_on: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
        }])
        .await;
        let server = server_with(AppState::new(config()).with_membership(Arc::new(verifier)));

        let body = server
            .post("/api/v1/membership/verify")
            .authorization_bearer(&admin_token())
            .json(&json!({
                "member_id": "2200417",
                "last_name": "okafor ",
                "birth_date": "2011-10-02",
                "required_through": "2025-07-31"
            }))
            .await
            .json::<Value>();

        assert_eq!(body["status"], "expired");
        assert_eq!(body["expires_on"], "2025-06-30");
    }
}
