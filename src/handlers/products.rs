use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::catalog::{NewProduct, ProductChanges, ProductView};
use crate::domain::size::SizeTable;
use crate::errors::AppError;
use crate::state::AppState;

use super::reviews::ReviewResponse;
use super::{blocking, MessageResponse};

// ── Request / response DTOs ──────────────────────────────────────────────────
//
// Per-size fields keep the names the storefront frontend uses (`XS_price`,
// `M_stock`, ...).

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub id: String,
    pub name: String,
    pub image: String,
    pub images: Option<Vec<String>>,
    pub collection: String,
    pub category: String,
    #[serde(default)]
    pub discount: i32,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    #[serde(rename = "XS_price")]
    pub xs_price: i32,
    #[serde(rename = "S_price")]
    pub s_price: i32,
    #[serde(rename = "M_price")]
    pub m_price: i32,
    #[serde(rename = "L_price")]
    pub l_price: i32,
    #[serde(rename = "XL_price")]
    pub xl_price: i32,
    #[serde(rename = "XXL_price")]
    pub xxl_price: i32,
    #[serde(rename = "XS_stock")]
    pub xs_stock: f64,
    #[serde(rename = "S_stock")]
    pub s_stock: f64,
    #[serde(rename = "M_stock")]
    pub m_stock: f64,
    #[serde(rename = "L_stock")]
    pub l_stock: f64,
    #[serde(rename = "XL_stock")]
    pub xl_stock: f64,
    #[serde(rename = "XXL_stock")]
    pub xxl_stock: f64,
    pub kids: Option<bool>,
}

impl From<CreateProductRequest> for NewProduct {
    fn from(r: CreateProductRequest) -> Self {
        NewProduct {
            prices: SizeTable {
                xs: r.xs_price,
                s: r.s_price,
                m: r.m_price,
                l: r.l_price,
                xl: r.xl_price,
                xxl: r.xxl_price,
            },
            stock: SizeTable {
                xs: r.xs_stock,
                s: r.s_stock,
                m: r.m_stock,
                l: r.l_stock,
                xl: r.xl_stock,
                xxl: r.xxl_stock,
            },
            id: r.id,
            name: r.name,
            image: r.image,
            images: r.images,
            collection: r.collection,
            category: r.category,
            discount: r.discount,
            colors: r.colors,
            description: r.description,
            kids: r.kids,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateProductRequest {
    pub name: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub collection: Option<String>,
    pub category: Option<String>,
    pub discount: Option<i32>,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    #[serde(rename = "XS_price")]
    pub xs_price: Option<i32>,
    #[serde(rename = "S_price")]
    pub s_price: Option<i32>,
    #[serde(rename = "M_price")]
    pub m_price: Option<i32>,
    #[serde(rename = "L_price")]
    pub l_price: Option<i32>,
    #[serde(rename = "XL_price")]
    pub xl_price: Option<i32>,
    #[serde(rename = "XXL_price")]
    pub xxl_price: Option<i32>,
    #[serde(rename = "XS_stock")]
    pub xs_stock: Option<f64>,
    #[serde(rename = "S_stock")]
    pub s_stock: Option<f64>,
    #[serde(rename = "M_stock")]
    pub m_stock: Option<f64>,
    #[serde(rename = "L_stock")]
    pub l_stock: Option<f64>,
    #[serde(rename = "XL_stock")]
    pub xl_stock: Option<f64>,
    #[serde(rename = "XXL_stock")]
    pub xxl_stock: Option<f64>,
    pub kids: Option<bool>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(r: UpdateProductRequest) -> Self {
        ProductChanges {
            prices: SizeTable {
                xs: r.xs_price,
                s: r.s_price,
                m: r.m_price,
                l: r.l_price,
                xl: r.xl_price,
                xxl: r.xxl_price,
            },
            stock: SizeTable {
                xs: r.xs_stock,
                s: r.s_stock,
                m: r.m_stock,
                l: r.l_stock,
                xl: r.xl_stock,
                xxl: r.xxl_stock,
            },
            name: r.name,
            image: r.image,
            images: r.images,
            collection: r.collection,
            category: r.category,
            discount: r.discount,
            colors: r.colors,
            description: r.description,
            kids: r.kids,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductResponse {
    pub id: String,
    pub name: String,
    pub image: String,
    pub images: Option<Vec<String>>,
    pub collection: String,
    pub category: String,
    pub discount: i32,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    pub total_reviews: i64,
    pub average_rating: f64,
    #[serde(rename = "XS_price")]
    pub xs_price: i32,
    #[serde(rename = "S_price")]
    pub s_price: i32,
    #[serde(rename = "M_price")]
    pub m_price: i32,
    #[serde(rename = "L_price")]
    pub l_price: i32,
    #[serde(rename = "XL_price")]
    pub xl_price: i32,
    #[serde(rename = "XXL_price")]
    pub xxl_price: i32,
    #[serde(rename = "XS_stock")]
    pub xs_stock: f64,
    #[serde(rename = "S_stock")]
    pub s_stock: f64,
    #[serde(rename = "M_stock")]
    pub m_stock: f64,
    #[serde(rename = "L_stock")]
    pub l_stock: f64,
    #[serde(rename = "XL_stock")]
    pub xl_stock: f64,
    #[serde(rename = "XXL_stock")]
    pub xxl_stock: f64,
    pub kids: Option<bool>,
}

impl From<ProductView> for ProductResponse {
    fn from(view: ProductView) -> Self {
        let p = view.product;
        ProductResponse {
            xs_price: p.prices.xs,
            s_price: p.prices.s,
            m_price: p.prices.m,
            l_price: p.prices.l,
            xl_price: p.prices.xl,
            xxl_price: p.prices.xxl,
            xs_stock: p.stock.xs,
            s_stock: p.stock.s,
            m_stock: p.stock.m,
            l_stock: p.stock.l,
            xl_stock: p.stock.xl,
            xxl_stock: p.stock.xxl,
            id: p.id,
            name: p.name,
            image: p.image,
            images: p.images,
            collection: p.collection,
            category: p.category,
            discount: p.discount,
            colors: p.colors,
            description: p.description,
            kids: p.kids,
            total_reviews: view.total_reviews,
            average_rating: view.average_rating,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DescriptionResponse {
    pub description: String,
}

// ── Handlers ─────────────────────────────────────────────────────────────────

/// GET /products
///
/// Every product with its review count and average rating.
#[utoipa::path(
    get,
    path = "/products",
    responses((status = 200, description = "All products", body = [ProductResponse])),
    tag = "products"
)]
pub async fn list_products(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let products = blocking(move || state.catalog.list_products()).await?;
    let body: Vec<ProductResponse> = products.into_iter().map(ProductResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /products
#[utoipa::path(
    post,
    path = "/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Product created", body = ProductResponse),
        (status = 400, description = "Invalid discount or price"),
        (status = 409, description = "Product ID already exists"),
    ),
    tag = "products"
)]
pub async fn create_product(
    state: web::Data<AppState>,
    body: web::Json<CreateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product = NewProduct::from(body.into_inner());
    let view = blocking(move || state.catalog.create_product(product)).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(view)))
}

/// GET /products/{product_id}
#[utoipa::path(
    get,
    path = "/products/{product_id}",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = ProductResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn get_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let view = blocking(move || state.catalog.get_product(&product_id)).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(view)))
}

/// PUT /products/{product_id}
///
/// Partial update; absent fields keep their stored value.
#[utoipa::path(
    put,
    path = "/products/{product_id}",
    params(("product_id" = String, Path, description = "Product id")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Product updated", body = ProductResponse),
        (status = 400, description = "Invalid discount or price"),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn update_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdateProductRequest>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let changes = ProductChanges::from(body.into_inner());
    let view = blocking(move || state.catalog.update_product(&product_id, changes)).await?;
    Ok(HttpResponse::Ok().json(ProductResponse::from(view)))
}

/// DELETE /products/{product_id}
///
/// Also removes the product's reviews, cart lines and order lines.
#[utoipa::path(
    delete,
    path = "/products/{product_id}",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product deleted", body = MessageResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn delete_product(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    blocking(move || state.catalog.delete_product(&product_id)).await?;
    Ok(HttpResponse::Ok().json(MessageResponse {
        message: "Product deleted successfully".to_string(),
    }))
}

/// GET /products/{product_id}/description
#[utoipa::path(
    get,
    path = "/products/{product_id}/description",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Description, empty when unset", body = DescriptionResponse),
        (status = 404, description = "Product not found"),
    ),
    tag = "products"
)]
pub async fn product_description(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let description = blocking(move || state.catalog.product_description(&product_id)).await?;
    Ok(HttpResponse::Ok().json(DescriptionResponse { description }))
}

/// GET /products/{product_id}/reviews
#[utoipa::path(
    get,
    path = "/products/{product_id}/reviews",
    params(("product_id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Reviews of the product", body = [ReviewResponse]),
        (status = 404, description = "No reviews found for this product"),
    ),
    tag = "products"
)]
pub async fn product_reviews(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let product_id = path.into_inner();
    let reviews = blocking(move || state.reviews.reviews_for_product(&product_id)).await?;
    let body: Vec<ReviewResponse> = reviews.into_iter().map(ReviewResponse::from).collect();
    Ok(HttpResponse::Ok().json(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_json_uses_frontend_field_names() {
        let request: CreateProductRequest = serde_json::from_value(serde_json::json!({
            "id": "kurta-1",
            "name": "Kurta",
            "image": "k.png",
            "collection": "Eid",
            "category": "Kurta",
            "XS_price": 1, "S_price": 2, "M_price": 3,
            "L_price": 4, "XL_price": 5, "XXL_price": 6,
            "XS_stock": 0.0, "S_stock": 0.0, "M_stock": 1.5,
            "L_stock": 0.0, "XL_stock": 0.0, "XXL_stock": 0.0
        }))
        .expect("request should deserialize");
        let product = NewProduct::from(request);
        assert_eq!(product.discount, 0);
        assert_eq!(product.prices.xxl, 6);

        let json = serde_json::to_value(ProductResponse::from(ProductView {
            product: crate::domain::catalog::Product {
                id: product.id,
                name: product.name,
                image: product.image,
                images: None,
                collection: product.collection,
                category: product.category,
                discount: product.discount,
                colors: None,
                description: None,
                prices: product.prices,
                stock: product.stock,
                kids: None,
            },
            total_reviews: 0,
            average_rating: 0.0,
        }))
        .unwrap();
        assert_eq!(json["M_price"], 3);
        assert_eq!(json["M_stock"], 1.5);
        assert_eq!(json["images"], serde_json::Value::Null);
        assert_eq!(json["average_rating"], 0.0);
    }

    #[test]
    fn absent_update_fields_stay_unset() {
        let request: UpdateProductRequest =
            serde_json::from_value(serde_json::json!({ "L_price": 2500 })).unwrap();
        let changes = ProductChanges::from(request);
        assert_eq!(changes.prices.l, Some(2500));
        assert_eq!(changes.prices.m, None);
        assert!(changes.name.is_none());
    }
}
