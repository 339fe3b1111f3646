use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::application::review_service::ReviewInput;
use crate::auth::AuthenticatedUser;
use crate::domain::review::ReviewDetail;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateReviewRequest {
    pub user_id: String,
    pub product_id: String,
    /// Between 0 and 5, stored with two decimals.
    pub stars: f64,
    pub text: Option<String>,
    /// ISO-8601 timestamp or date; only the date is kept.
    pub time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewResponse {
    pub username: String,
    pub stars: f64,
    pub text: Option<String>,
    pub time: NaiveDate,
}

impl From<ReviewDetail> for ReviewResponse {
    fn from(d: ReviewDetail) -> Self {
        ReviewResponse {
            username: d.username,
            stars: d.stars,
            text: d.text,
            time: d.time,
        }
    }
}

#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ReviewCheckQuery {
    pub user_id: String,
    pub product_id: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ReviewCheckResponse {
    pub reviewed: bool,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /reviews
///
/// One review per user and product.
#[utoipa::path(
    post,
    path = "/reviews",
    request_body = CreateReviewRequest,
    responses(
        (status = 200, description = "Review created", body = ReviewResponse),
        (status = 400, description = "Stars out of range or bad time"),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "Product not found"),
        (status = 409, description = "User has already reviewed this product"),
    ),
    security(("bearer" = [])),
    tag = "reviews"
)]
pub async fn create_review(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateReviewRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    user.ensure_is(&body.user_id)?;
    let input = ReviewInput {
        user_id: body.user_id,
        product_id: body.product_id,
        stars: body.stars,
        text: body.text,
        time: body.time,
    };

    let detail = blocking(move || state.reviews.create_review(input)).await?;
    Ok(HttpResponse::Ok().json(ReviewResponse::from(detail)))
}

/// GET /reviews/check
#[utoipa::path(
    get,
    path = "/reviews/check",
    params(ReviewCheckQuery),
    responses(
        (status = 200, description = "Whether the user reviewed the product", body = ReviewCheckResponse),
        (status = 403, description = "Token belongs to another user"),
    ),
    security(("bearer" = [])),
    tag = "reviews"
)]
pub async fn check_review(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    query: web::Query<ReviewCheckQuery>,
) -> Result<HttpResponse, AppError> {
    let ReviewCheckQuery {
        user_id,
        product_id,
    } = query.into_inner();
    user.ensure_is(&user_id)?;

    let reviewed = blocking(move || state.reviews.has_reviewed(&user_id, &product_id)).await?;
    Ok(HttpResponse::Ok().json(ReviewCheckResponse { reviewed }))
}
