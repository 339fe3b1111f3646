use crate::domain::dates::parse_iso_date;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderScope, OrderView};
use crate::domain::ports::{CartRepository, OrderRepository, UserRepository};
use crate::domain::pricing::PricingPolicy;

/// Composes orders from carts and serves the order read views.
pub struct OrderService<O, C, U> {
    orders: O,
    cart: C,
    users: U,
    policy: PricingPolicy,
}

impl<O: OrderRepository, C: CartRepository, U: UserRepository> OrderService<O, C, U> {
    pub fn new(orders: O, cart: C, users: U, policy: PricingPolicy) -> Self {
        Self {
            orders,
            cart,
            users,
            policy,
        }
    }

    /// Turn the user's cart into a pending order and return all of the
    /// user's orders.
    ///
    /// The order, its lines and the cart clear are committed together by the
    /// repository; nothing is written when any step fails.
    pub fn create_from_cart(
        &self,
        user_id: &str,
        order_time: &str,
    ) -> Result<Vec<OrderView>, DomainError> {
        if self.users.find_by_id(user_id)?.is_none() {
            return Err(DomainError::not_found("User"));
        }
        if self.cart.count(user_id)? == 0 {
            return Err(DomainError::invalid("Cart is empty"));
        }
        let order_date = parse_iso_date(order_time)
            .ok_or_else(|| DomainError::invalid("Invalid order_time format"))?;

        let order_id = self.orders.create_from_cart(user_id, order_date)?;
        log::info!("order {order_id} created from cart of user {user_id}");

        self.views(OrderScope::User(user_id))
    }

    pub fn get_order(&self, order_id: i32) -> Result<OrderView, DomainError> {
        self.views(OrderScope::Order(order_id))?
            .into_iter()
            .next()
            .ok_or_else(|| DomainError::not_found("Order"))
    }

    pub fn user_orders(&self, user_id: &str) -> Result<Vec<OrderView>, DomainError> {
        non_empty(
            self.views(OrderScope::User(user_id))?,
            "Orders for this user",
        )
    }

    pub fn all_orders(&self) -> Result<Vec<OrderView>, DomainError> {
        non_empty(self.views(OrderScope::All)?, "Orders")
    }

    /// Overwrite the status of an order with the value as given.
    pub fn update_status(&self, order_id: i32, status: &str) -> Result<OrderView, DomainError> {
        if !self.orders.update_status(order_id, status)? {
            return Err(DomainError::not_found("Order"));
        }
        log::info!("order {order_id} status set to '{status}'");
        self.get_order(order_id)
    }

    fn views(&self, scope: OrderScope<'_>) -> Result<Vec<OrderView>, DomainError> {
        Ok(self
            .orders
            .fetch(scope, self.policy)?
            .into_iter()
            .map(|record| OrderView::from_record(record, self.policy))
            .collect())
    }
}

fn non_empty(orders: Vec<OrderView>, what: &str) -> Result<Vec<OrderView>, DomainError> {
    if orders.is_empty() {
        Err(DomainError::not_found(what))
    } else {
        Ok(orders)
    }
}
