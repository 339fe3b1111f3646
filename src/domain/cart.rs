use super::errors::DomainError;
use super::size::{price_for_token, Size, SizeTable};

/// Merging would push a line's quantity past what the column holds.
pub fn quantity_overflow() -> DomainError {
    DomainError::invalid("quantity exceeds the maximum for one cart line")
}

/// Natural key of a cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartKey {
    pub user_id: String,
    pub product_id: String,
    pub size: Size,
}

#[derive(Debug, Clone)]
pub struct NewCartLine {
    pub key: CartKey,
    pub quantity: i32,
    pub color: Option<String>,
}

/// A stored cart line joined with the product fields the cart view needs.
#[derive(Debug, Clone)]
pub struct CartLineRecord {
    pub user_id: String,
    pub product_id: String,
    pub product_name: String,
    pub image: String,
    pub collection: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
    pub prices: SizeTable<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CartItemView {
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

#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub total_products: usize,
    pub items: Vec<CartItemView>,
}

impl CartView {
    pub fn from_records(records: Vec<CartLineRecord>) -> Self {
        let items: Vec<CartItemView> = records
            .into_iter()
            .map(|r| CartItemView {
                price: price_for_token(&r.prices, &r.size),
                product_id: r.product_id,
                product_name: r.product_name,
                collection: r.collection,
                image: r.image,
                user_id: r.user_id,
                size: r.size,
                quantity: r.quantity,
                color: r.color,
            })
            .collect();
        CartView {
            total_products: items.len(),
            items,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
