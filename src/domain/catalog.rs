use bigdecimal::{BigDecimal, ToPrimitive};

use super::errors::DomainError;
use super::size::SizeTable;

#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub images: Option<Vec<String>>,
    pub collection: String,
    pub category: String,
    pub discount: i32,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    pub prices: SizeTable<i32>,
    pub stock: SizeTable<f64>,
    pub kids: Option<bool>,
}

/// A product together with the aggregates computed from its reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductView {
    pub product: Product,
    pub total_reviews: i64,
    pub average_rating: f64,
}

#[derive(Debug, Clone)]
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub image: String,
    pub images: Option<Vec<String>>,
    pub collection: String,
    pub category: String,
    pub discount: i32,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    pub prices: SizeTable<i32>,
    pub stock: SizeTable<f64>,
    pub kids: Option<bool>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.trim().is_empty() {
            return Err(DomainError::invalid("product id must not be empty"));
        }
        check_discount(self.discount)?;
        for (size, price) in self.prices.iter() {
            check_price(size.as_str(), price)?;
        }
        Ok(())
    }
}

/// Partial update of a product; `None` leaves the stored value untouched.
#[derive(Debug, Clone, Default)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub image: Option<String>,
    pub images: Option<Vec<String>>,
    pub collection: Option<String>,
    pub category: Option<String>,
    pub discount: Option<i32>,
    pub colors: Option<Vec<String>>,
    pub description: Option<String>,
    pub prices: SizeTable<Option<i32>>,
    pub stock: SizeTable<Option<f64>>,
    pub kids: Option<bool>,
}

impl ProductChanges {
    pub fn validate(&self) -> Result<(), DomainError> {
        if let Some(discount) = self.discount {
            check_discount(discount)?;
        }
        for (size, price) in self.prices.iter() {
            if let Some(price) = price {
                check_price(size.as_str(), price)?;
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.image.is_none()
            && self.images.is_none()
            && self.collection.is_none()
            && self.category.is_none()
            && self.discount.is_none()
            && self.colors.is_none()
            && self.description.is_none()
            && self.prices.iter().all(|(_, p)| p.is_none())
            && self.stock.iter().all(|(_, s)| s.is_none())
            && self.kids.is_none()
    }
}

fn check_discount(discount: i32) -> Result<(), DomainError> {
    if (0..=100).contains(&discount) {
        Ok(())
    } else {
        Err(DomainError::invalid(format!(
            "discount must be between 0 and 100, got {discount}"
        )))
    }
}

fn check_price(size: &str, price: i32) -> Result<(), DomainError> {
    if price < 0 {
        return Err(DomainError::invalid(format!(
            "{size} price must not be negative, got {price}"
        )));
    }
    Ok(())
}

/// Decode a list column stored as JSON text. Missing, blank or malformed
/// values decode to `None`.
pub fn decode_list(raw: Option<&str>) -> Option<Vec<String>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    serde_json::from_str(raw).ok()
}

/// Encode a list for storage. Empty lists are stored as NULL.
pub fn encode_list(list: Option<&[String]>) -> Option<String> {
    match list {
        Some(items) if !items.is_empty() => serde_json::to_string(items).ok(),
        _ => None,
    }
}

/// Average rating rounded to two decimals for display.
pub fn round_rating(average: &BigDecimal) -> f64 {
    average.round(2).to_f64().unwrap_or(0.0)
}
