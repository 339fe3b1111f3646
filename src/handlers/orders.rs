use actix_web::{web, HttpResponse};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::auth::AuthenticatedUser;
use crate::domain::order::{OrderLineView, OrderView};
use crate::errors::AppError;
use crate::state::AppState;

use super::blocking;

// ── Request / response DTOs ──────────────────────────────────────────────────

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub user_id: String,
    /// ISO-8601 timestamp or date; only the date is kept.
    pub order_time: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStatusRequest {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderProductResponse {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub size: String,
    pub color: Option<String>,
    /// Quantity times unit price.
    pub price: i64,
}

impl From<OrderLineView> for OrderProductResponse {
    fn from(l: OrderLineView) -> Self {
        OrderProductResponse {
            product_id: l.product_id,
            product_name: l.product_name,
            quantity: l.quantity,
            size: l.size,
            color: l.color,
            price: l.price,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderResponse {
    pub order_id: i32,
    pub user_id: String,
    pub username: String,
    pub status: String,
    pub order_time: NaiveDate,
    pub total_products: i64,
    pub total_price: i64,
    pub products: Vec<OrderProductResponse>,
}

impl From<OrderView> for OrderResponse {
    fn from(o: OrderView) -> Self {
        OrderResponse {
            order_id: o.order_id,
            user_id: o.user_id,
            username: o.username,
            status: o.status,
            order_time: o.order_time,
            total_products: o.total_products,
            total_price: o.total_price,
            products: o.products.into_iter().map(OrderProductResponse::from).collect(),
        }
    }
}

fn order_list(orders: Vec<OrderView>) -> Vec<OrderResponse> {
    orders.into_iter().map(OrderResponse::from).collect()
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// POST /orders/from-cart
///
/// Turns the user's cart into one pending order and empties the cart, all in
/// a single database transaction. Returns every order of the user.
#[utoipa::path(
    post,
    path = "/orders/from-cart",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Orders of the user", body = [OrderResponse]),
        (status = 400, description = "Cart is empty or order_time is invalid"),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "User not found"),
    ),
    security(("bearer" = [])),
    tag = "orders"
)]
pub async fn create_from_cart(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    body: web::Json<CreateOrderRequest>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    user.ensure_is(&body.user_id)?;

    let orders =
        blocking(move || state.orders.create_from_cart(&body.user_id, &body.order_time)).await?;
    Ok(HttpResponse::Ok().json(order_list(orders)))
}

/// GET /orders
#[utoipa::path(
    get,
    path = "/orders",
    responses(
        (status = 200, description = "Every order", body = [OrderResponse]),
        (status = 404, description = "No orders found"),
    ),
    tag = "orders"
)]
pub async fn list_orders(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let orders = blocking(move || state.orders.all_orders()).await?;
    Ok(HttpResponse::Ok().json(order_list(orders)))
}

/// GET /orders/{order_id}
#[utoipa::path(
    get,
    path = "/orders/{order_id}",
    params(("order_id" = i32, Path, description = "Order id")),
    responses(
        (status = 200, description = "Order found", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn get_order(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let order = blocking(move || state.orders.get_order(order_id)).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}

/// GET /users/{user_id}/orders
#[utoipa::path(
    get,
    path = "/users/{user_id}/orders",
    params(("user_id" = String, Path, description = "User id")),
    responses(
        (status = 200, description = "Orders of the user", body = [OrderResponse]),
        (status = 403, description = "Token belongs to another user"),
        (status = 404, description = "No orders found for this user"),
    ),
    security(("bearer" = [])),
    tag = "orders"
)]
pub async fn user_orders(
    state: web::Data<AppState>,
    user: AuthenticatedUser,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let user_id = path.into_inner();
    user.ensure_is(&user_id)?;

    let orders = blocking(move || state.orders.user_orders(&user_id)).await?;
    Ok(HttpResponse::Ok().json(order_list(orders)))
}

/// PUT /orders/{order_id}/status
///
/// Overwrites the status with the value as sent.
#[utoipa::path(
    put,
    path = "/orders/{order_id}/status",
    params(("order_id" = i32, Path, description = "Order id")),
    request_body = UpdateStatusRequest,
    responses(
        (status = 200, description = "Order with its new status", body = OrderResponse),
        (status = 404, description = "Order not found"),
    ),
    tag = "orders"
)]
pub async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Json<UpdateStatusRequest>,
) -> Result<HttpResponse, AppError> {
    let order_id = path.into_inner();
    let status = body.into_inner().status;
    let order = blocking(move || state.orders.update_status(order_id, &status)).await?;
    Ok(HttpResponse::Ok().json(OrderResponse::from(order)))
}
