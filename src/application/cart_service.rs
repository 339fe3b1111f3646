use crate::domain::cart::{CartKey, CartView, NewCartLine};
use crate::domain::errors::DomainError;
use crate::domain::ports::{CartRepository, ProductRepository};
use crate::domain::size::Size;

pub const DEFAULT_QUANTITY: i32 = 1;

pub struct CartService<C, P> {
    cart: C,
    products: P,
}

impl<C: CartRepository, P: ProductRepository> CartService<C, P> {
    pub fn new(cart: C, products: P) -> Self {
        Self { cart, products }
    }

    pub fn view(&self, user_id: &str) -> Result<CartView, DomainError> {
        Ok(CartView::from_records(self.cart.lines(user_id)?))
    }

    /// Add `quantity` (default 1) of a product in a size. Repeated adds of the
    /// same (user, product, size) accumulate on one line.
    pub fn add(
        &self,
        user_id: &str,
        product_id: &str,
        size: &str,
        quantity: Option<i32>,
        color: Option<String>,
    ) -> Result<CartView, DomainError> {
        let quantity = quantity.unwrap_or(DEFAULT_QUANTITY);
        if quantity <= 0 {
            return Err(DomainError::invalid("quantity must be at least 1"));
        }
        let key = key(user_id, product_id, size)?;
        if !self.products.exists(product_id)? {
            return Err(DomainError::not_found("Product"));
        }

        self.cart.merge(NewCartLine {
            key,
            quantity,
            color,
        })?;
        log::info!("user {user_id} added {quantity} x {product_id} ({size}) to cart");
        self.view(user_id)
    }

    /// Set a line's quantity exactly; zero or less removes the line.
    pub fn update_quantity(
        &self,
        user_id: &str,
        product_id: &str,
        size: &str,
        quantity: i32,
    ) -> Result<CartView, DomainError> {
        let key = key(user_id, product_id, size)?;
        let found = if quantity <= 0 {
            self.cart.remove(&key)?
        } else {
            self.cart.set_quantity(&key, quantity)?
        };
        if !found {
            return Err(DomainError::not_found("Cart item"));
        }
        self.view(user_id)
    }

    pub fn remove(
        &self,
        user_id: &str,
        product_id: &str,
        size: &str,
    ) -> Result<CartView, DomainError> {
        let key = key(user_id, product_id, size)?;
        if !self.cart.remove(&key)? {
            return Err(DomainError::not_found("Cart item"));
        }
        self.view(user_id)
    }
}

fn key(user_id: &str, product_id: &str, size: &str) -> Result<CartKey, DomainError> {
    Ok(CartKey {
        user_id: user_id.to_string(),
        product_id: product_id.to_string(),
        size: size.parse::<Size>()?,
    })
}
