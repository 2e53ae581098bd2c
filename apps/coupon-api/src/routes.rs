//! HTTP routes.
//!
//! ```text
//! ┌──────────────────────────┬──────────────────────────────────────────────┐
//! │ POST /api/apply          │ 200 basket │ 404 (empty) │ 422 (empty) │ 400 │
//! │ POST /api/create         │ 200 CouponDto │ 400                          │
//! │ GET  /api/coupons        │ 200 list │ 204 none found                   │
//! │ GET  /api/coupon/{code}  │ 200 CouponDto │ 404 error body               │
//! │ GET  /health             │ 200 │ 503                                    │
//! └──────────────────────────┴──────────────────────────────────────────────┘
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::trace::TraceLayer;
use tracing::debug;

use coupon_core::discount::ApplyOutcome;
use coupon_core::validation::validate_code;
use coupon_core::{Basket, CoreError, CouponDto, NewCoupon, ValidationError};

use crate::error::ApiError;
use crate::services::CouponService;

/// Query parameter carrying the requested codes.
pub const COUPON_CODES_PARAM: &str = "couponCodes";

// =============================================================================
// State & Router
// =============================================================================

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub coupons: CouponService,
}

impl AppState {
    pub fn new(coupons: CouponService) -> Self {
        AppState { coupons }
    }
}

/// Builds the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/apply", post(apply))
        .route("/api/create", post(create))
        .route("/api/coupons", get(get_coupons))
        .route("/api/coupon/{code}", get(get_coupon))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

// =============================================================================
// Request Types
// =============================================================================

/// Body of `POST /api/apply`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ApplicationRequest {
    pub code: Option<String>,
    pub basket: Option<Basket>,
}

impl ApplicationRequest {
    /// Checks the code is non-blank and the basket present.
    pub fn validate(self) -> Result<(String, Basket), ValidationError> {
        let code = validate_code(self.code.as_deref())?.to_string();
        let basket = self.basket.ok_or_else(|| ValidationError::required("basket"))?;
        Ok((code, basket))
    }
}

/// Splits `couponCodes` values on commas; repeated parameters accumulate.
///
/// Returns `None` when the parameter is absent.
pub fn requested_codes(params: &[(String, String)]) -> Option<Vec<String>> {
    let mut seen = false;
    let mut codes = Vec::new();

    for (key, value) in params {
        if key != COUPON_CODES_PARAM {
            continue;
        }
        seen = true;
        codes.extend(
            value
                .split(',')
                .map(str::trim)
                .filter(|c| !c.is_empty())
                .map(str::to_string),
        );
    }

    seen.then_some(codes)
}

// =============================================================================
// Handlers
// =============================================================================

#[tracing::instrument(skip(state, payload))]
async fn apply(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<ApplicationRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from(e).with_path(&uri))?;
    let (code, mut basket) = request
        .validate()
        .map_err(|e| ApiError::from(CoreError::from(e)).with_path(&uri))?;

    let outcome = state
        .coupons
        .apply(&mut basket, &code)
        .await
        .map_err(|e| ApiError::from(e).with_path(&uri))?;

    Ok(match outcome {
        None => StatusCode::NOT_FOUND.into_response(),
        Some(ApplyOutcome::NotApplied) => StatusCode::UNPROCESSABLE_ENTITY.into_response(),
        Some(ApplyOutcome::Applied) => Json(basket).into_response(),
    })
}

#[tracing::instrument(skip(state, payload))]
async fn create(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    payload: Result<Json<NewCoupon>, JsonRejection>,
) -> Result<Json<CouponDto>, ApiError> {
    let Json(request) = payload.map_err(|e| ApiError::from(e).with_path(&uri))?;

    let coupon = state
        .coupons
        .create_coupon(&request)
        .await
        .map_err(|e| ApiError::from(e).with_path(&uri))?;

    Ok(Json(CouponDto::from(coupon)))
}

#[tracing::instrument(skip(state))]
async fn get_coupons(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Query(params): Query<Vec<(String, String)>>,
) -> Result<Response, ApiError> {
    let coupons = match requested_codes(&params) {
        Some(codes) => state.coupons.get_coupons(&codes).await,
        None => state.coupons.get_all_coupons().await,
    }
    .map_err(|e| ApiError::from(e).with_path(&uri))?;

    debug!(count = coupons.len(), "Returning coupons");

    if coupons.is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    Ok(Json(coupons).into_response())
}

#[tracing::instrument(skip(state))]
async fn get_coupon(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(code): Path<String>,
) -> Result<Json<CouponDto>, ApiError> {
    let coupon = state
        .coupons
        .find_coupon_by_code(&code)
        .await
        .map_err(|e| ApiError::from(e).with_path(&uri))?;

    Ok(Json(coupon))
}

#[tracing::instrument(skip(state))]
async fn health(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
) -> Result<Json<serde_json::Value>, ApiError> {
    if state.coupons.is_healthy().await {
        Ok(Json(serde_json::json!({ "status": "ok" })))
    } else {
        Err(ApiError::unavailable("Coupon store unavailable").with_path(&uri))
    }
}
