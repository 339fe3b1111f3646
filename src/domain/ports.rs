use chrono::NaiveDate;

use super::cart::{CartKey, CartLineRecord, NewCartLine};
use super::catalog::{NewProduct, ProductChanges, ProductView};
use super::errors::DomainError;
use super::order::{OrderRecord, OrderScope};
use super::pricing::PricingPolicy;
use super::review::{NewReview, ReviewDetail};
use super::user::{NewUser, User, UserChanges};

pub trait UserRepository: Send + Sync + 'static {
    fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError>;
    fn username_taken(&self, username: &str) -> Result<bool, DomainError>;
    fn email_taken(&self, email: &str) -> Result<bool, DomainError>;
    fn list(&self) -> Result<Vec<User>, DomainError>;
    fn create(&self, user: NewUser) -> Result<User, DomainError>;
    /// Returns `None` when no user has the given id.
    fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, DomainError>;
}

pub trait ProductRepository: Send + Sync + 'static {
    fn exists(&self, id: &str) -> Result<bool, DomainError>;
    fn list_with_aggregates(&self) -> Result<Vec<ProductView>, DomainError>;
    fn find_with_aggregates(&self, id: &str) -> Result<Option<ProductView>, DomainError>;
    fn create(&self, product: NewProduct) -> Result<(), DomainError>;
    /// Returns `false` when no product has the given id.
    fn update(&self, id: &str, changes: ProductChanges) -> Result<bool, DomainError>;
    /// Returns `false` when no product has the given id.
    fn delete(&self, id: &str) -> Result<bool, DomainError>;
    /// Outer `None` when the product is missing.
    fn description(&self, id: &str) -> Result<Option<Option<String>>, DomainError>;
}

pub trait ReviewRepository: Send + Sync + 'static {
    fn create(&self, review: NewReview) -> Result<i32, DomainError>;
    fn find_detail(&self, review_id: i32) -> Result<Option<ReviewDetail>, DomainError>;
    fn list_for_product(&self, product_id: &str) -> Result<Vec<ReviewDetail>, DomainError>;
    fn exists_for(&self, user_id: &str, product_id: &str) -> Result<bool, DomainError>;
}

pub trait CartRepository: Send + Sync + 'static {
    /// Insert the line, or add its quantity to the existing line with the
    /// same key, as one atomic statement.
    fn merge(&self, line: NewCartLine) -> Result<(), DomainError>;
    /// Returns `false` when the line does not exist.
    fn set_quantity(&self, key: &CartKey, quantity: i32) -> Result<bool, DomainError>;
    /// Returns `false` when the line does not exist.
    fn remove(&self, key: &CartKey) -> Result<bool, DomainError>;
    fn lines(&self, user_id: &str) -> Result<Vec<CartLineRecord>, DomainError>;
    fn count(&self, user_id: &str) -> Result<i64, DomainError>;
}

pub trait OrderRepository: Send + Sync + 'static {
    /// Move the user's cart into a new order in one transaction and return
    /// the new order's id. Fails with `InvalidInput` when the cart is empty.
    fn create_from_cart(&self, user_id: &str, order_time: NaiveDate) -> Result<i32, DomainError>;
    /// Orders in `scope` with their lines, ordered by order id.
    fn fetch(
        &self,
        scope: OrderScope<'_>,
        policy: PricingPolicy,
    ) -> Result<Vec<OrderRecord>, DomainError>;
    /// Returns `false` when no order has the given id.
    fn update_status(&self, order_id: i32, status: &str) -> Result<bool, DomainError>;
}
