pub mod cart;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod reviews;

use actix_web::{web, HttpResponse};
use serde::Serialize;
use utoipa::{OpenApi, ToSchema};

use crate::domain::errors::DomainError;
use crate::errors::AppError;

/// Run blocking service code (Diesel is synchronous) on the blocking pool.
pub(crate) async fn blocking<F, T>(f: F) -> Result<T, AppError>
where
    F: FnOnce() -> Result<T, DomainError> + Send + 'static,
    T: Send + 'static,
{
    Ok(web::block(f)
        .await
        .map_err(|e| AppError::Internal(e.to_string()))??)
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

/// GET /
#[utoipa::path(
    get,
    path = "/",
    responses((status = 200, description = "Service is up", body = MessageResponse)),
    tag = "health"
)]
pub async fn root() -> HttpResponse {
    HttpResponse::Ok().json(MessageResponse {
        message: "Server is running!".to_string(),
    })
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Storefront API"),
    paths(
        root,
        profiles::create_profile,
        profiles::list_users,
        profiles::get_user,
        profiles::update_user,
        orders::user_orders,
        products::list_products,
        products::create_product,
        products::get_product,
        products::update_product,
        products::delete_product,
        products::product_description,
        products::product_reviews,
        reviews::create_review,
        reviews::check_review,
        cart::get_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_cart_item,
        orders::create_from_cart,
        orders::list_orders,
        orders::get_order,
        orders::update_order_status,
    ),
    components(schemas(MessageResponse)),
    modifiers(&BearerAuth),
    tags(
        (name = "health"),
        (name = "profiles", description = "User profiles"),
        (name = "products", description = "Catalog with review aggregates"),
        (name = "reviews"),
        (name = "cart"),
        (name = "orders"),
    )
)]
pub struct ApiDoc;

struct BearerAuth;

impl utoipa::Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};

        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// Register every API route.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(root))
        .route("/profiles", web::post().to(profiles::create_profile))
        .service(
            web::scope("/users")
                .route("", web::get().to(profiles::list_users))
                .route("/{user_id}", web::get().to(profiles::get_user))
                .route("/{user_id}", web::put().to(profiles::update_user))
                .route("/{user_id}/orders", web::get().to(orders::user_orders)),
        )
        .service(
            web::scope("/products")
                .route("", web::get().to(products::list_products))
                .route("", web::post().to(products::create_product))
                .route("/{product_id}", web::get().to(products::get_product))
                .route("/{product_id}", web::put().to(products::update_product))
                .route("/{product_id}", web::delete().to(products::delete_product))
                .route(
                    "/{product_id}/description",
                    web::get().to(products::product_description),
                )
                .route("/{product_id}/reviews", web::get().to(products::product_reviews)),
        )
        .service(
            web::scope("/reviews")
                .route("", web::post().to(reviews::create_review))
                .route("/check", web::get().to(reviews::check_review)),
        )
        .service(
            web::scope("/cart")
                .route("", web::post().to(cart::add_to_cart))
                .route("", web::put().to(cart::update_cart_item))
                .route("", web::delete().to(cart::remove_cart_item))
                .route("/{user_id}", web::get().to(cart::get_cart)),
        )
        .service(
            web::scope("/orders")
                .route("", web::get().to(orders::list_orders))
                .route("/from-cart", web::post().to(orders::create_from_cart))
                .route("/{order_id}", web::get().to(orders::get_order))
                .route("/{order_id}/status", web::put().to(orders::update_order_status)),
        );
}

#[cfg(test)]
mod tests {
    use actix_web::{http::StatusCode, test, App};
    use diesel::r2d2::{ConnectionManager, Pool};

    use super::*;
    use crate::auth::tests::{token, AUDIENCE, SECRET};
    use crate::auth::TokenVerifier;
    use crate::domain::pricing::PricingPolicy;
    use crate::infrastructure::notifier::Notifier;
    use crate::state::AppState;

    // Never connects; requests rejected before any query never touch it.
    fn state() -> AppState {
        let manager = ConnectionManager::new("postgres://nobody@127.0.0.1:1/none");
        let pool = Pool::builder().max_size(1).build_unchecked(manager);
        AppState::new(pool, PricingPolicy::Live, Notifier::Disabled)
    }

    macro_rules! app {
        () => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new(state()))
                    .app_data(web::Data::new(TokenVerifier::new(SECRET, AUDIENCE)))
                    .configure(configure),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn root_reports_running() {
        let app = app!();
        let body: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/").to_request())
                .await;
        assert_eq!(body["message"], "Server is running!");
    }

    #[actix_web::test]
    async fn cart_requires_a_bearer_token() {
        let app = app!();
        let req = test::TestRequest::get().uri("/cart/u1").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("WWW-Authenticate").unwrap(), "Bearer");
    }

    #[actix_web::test]
    async fn token_for_another_user_is_forbidden() {
        let app = app!();
        let req = test::TestRequest::get()
            .uri("/cart/u1")
            .insert_header(("Authorization", format!("Bearer {}", token("u2"))))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/orders/from-cart")
            .insert_header(("Authorization", format!("Bearer {}", token("u2"))))
            .set_json(serde_json::json!({ "user_id": "u1", "order_time": "2025-03-14" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }

    #[::core::prelude::v1::test]
    fn openapi_lists_every_route_group() {
        let doc = ApiDoc::openapi();
        for path in [
            "/",
            "/profiles",
            "/users/{user_id}/orders",
            "/products/{product_id}/reviews",
            "/reviews/check",
            "/cart/{user_id}",
            "/orders/from-cart",
            "/orders/{order_id}/status",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {path}");
        }
        let schemes = doc.components.expect("components").security_schemes;
        assert!(schemes.contains_key("bearer"));
    }
}
