use crate::application::cart_service::CartService;
use crate::application::catalog_service::CatalogService;
use crate::application::order_service::OrderService;
use crate::application::profile_service::ProfileService;
use crate::application::review_service::ReviewService;
use crate::db::DbPool;
use crate::domain::pricing::PricingPolicy;
use crate::infrastructure::cart_repo::DieselCartRepository;
use crate::infrastructure::notifier::Notifier;
use crate::infrastructure::order_repo::DieselOrderRepository;
use crate::infrastructure::product_repo::DieselProductRepository;
use crate::infrastructure::review_repo::DieselReviewRepository;
use crate::infrastructure::user_repo::DieselUserRepository;

pub type Catalog = CatalogService<DieselProductRepository>;
pub type Cart = CartService<DieselCartRepository, DieselProductRepository>;
pub type Orders = OrderService<DieselOrderRepository, DieselCartRepository, DieselUserRepository>;
pub type Reviews = ReviewService<DieselReviewRepository, DieselProductRepository>;
pub type Profiles = ProfileService<DieselUserRepository>;

/// Services shared by every worker, wired to one connection pool.
pub struct AppState {
    pub catalog: Catalog,
    pub cart: Cart,
    pub orders: Orders,
    pub reviews: Reviews,
    pub profiles: Profiles,
    pub notifier: Notifier,
}

impl AppState {
    pub fn new(pool: DbPool, pricing: PricingPolicy, notifier: Notifier) -> Self {
        let users = DieselUserRepository::new(pool.clone());
        let products = DieselProductRepository::new(pool.clone());
        let cart = DieselCartRepository::new(pool.clone());

        Self {
            catalog: CatalogService::new(products.clone()),
            cart: CartService::new(cart.clone(), products.clone()),
            orders: OrderService::new(
                DieselOrderRepository::new(pool.clone()),
                cart,
                users.clone(),
                pricing,
            ),
            reviews: ReviewService::new(DieselReviewRepository::new(pool), products),
            profiles: ProfileService::new(users),
            notifier,
        }
    }
}
