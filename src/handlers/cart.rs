use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;
use crate::domain::cart::{CartItemView, CartView};
use crate::domain::errors::DomainError;
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub user_id: String,
    pub product_id: String,
    /// One of XS, S, M, L, XL, XXL.
    pub size: String,
    /// Defaults to 1.
    pub quantity: Option<i32>,
    pub color: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartRequest {
    pub user_id: String,
    pub product_id: String,
    pub size: String,
    /// Zero or less removes the line.
    pub quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RemoveFromCartRequest {
    pub user_id: String,
    pub product_id: String,
    pub size: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartItemResponse {
    pub product_id: String,
    pub product_name: String,
    pub collection: String,
    pub image: String,
    pub user_id: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
    /// Unit price for the line's size.
    pub price: i32,
}

impl From<CartItemView> for CartItemResponse {
    fn from(i: CartItemView) -> Self {
        CartItemResponse {
            product_id: i.product_id,
            product_name: i.product_name,
            collection: i.collection,
            image: i.image,
            user_id: i.user_id,
            size: i.size,
            quantity: i.quantity,
            color: i.color,
            price: i.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartResponse {
    pub total_products: usize,
    pub items: Vec<CartItemResponse>,
}

impl From<CartView> for CartResponse {
    fn from(view: CartView) -> Self {
        CartResponse {
            total_products: view.total_products,
            items: view.items.into_iter().map(CartItemResponse::from).collect(),
        }
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /cart/{user_id}
#[utoipa::path(
    get,
    path = "/cart/{user_id}",
    params(("user_id" = String, Path, description = "Owner of the cart")),
    responses(
        (status = 200, description = "Cart lines with unit prices", body = CartResponse),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "Cart is empty"),
    ),
    security(("bearer" = [])),
    tag = "cart"
)]
pub async fn get_cart(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    user.ensure_is(&user_id)?;

    let view = blocking(move || {
        let view = state.cart.view(&user_id)?;
        if view.is_empty() {
            return Err(DomainError::not_found("Cart items"));
        }
        Ok(view)
    })
    .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(view)))
}

/// POST /cart
///
/// Adding a product and size already in the cart increases its quantity.
#[utoipa::path(
    post,
    path = "/cart",
    request_body = AddToCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 400, description = "Bad size or quantity"),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "Product not found"),
    ),
    security(("bearer" = [])),
    tag = "cart"
)]
pub async fn add_to_cart(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<AddToCartRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    user.ensure_is(&body.user_id)?;

    let view = blocking(move || {
        state.cart.add(
            &body.user_id,
            &body.product_id,
            &body.size,
            body.quantity,
            body.color,
        )
    })
    .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(view)))
}

/// PUT /cart
#[utoipa::path(
    put,
    path = "/cart",
    request_body = UpdateCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer" = [])),
    tag = "cart"
)]
pub async fn update_cart_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<UpdateCartRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    user.ensure_is(&body.user_id)?;

    let view = blocking(move || {
        state
            .cart
            .update_quantity(&body.user_id, &body.product_id, &body.size, body.quantity)
    })
    .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(view)))
}

/// DELETE /cart
#[utoipa::path(
    delete,
    path = "/cart",
    request_body = RemoveFromCartRequest,
    responses(
        (status = 200, description = "Updated cart", body = CartResponse),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "Cart item not found"),
    ),
    security(("bearer" = [])),
    tag = "cart"
)]
pub async fn remove_cart_item(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<RemoveFromCartRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    user.ensure_is(&body.user_id)?;

    let view = blocking(move || {
        state
            .cart
            .remove(&body.user_id, &body.product_id, &body.size)
    })
    .await?;
    Ok(HttpResponse::Ok().json(CartResponse::from(view)))
}
