use chrono::NaiveDate;

use super::pricing::PricingPolicy;
use super::size::SizeTable;

/// Status given to every order composed from a cart.
pub const INITIAL_STATUS: &str = "pending";

/// Which orders a read covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderScope<'a> {
    All,
    User(&'a str),
    Order(i32),
}

/// Per-order aggregates computed by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSummary {
    pub order_id: i32,
    pub user_id: String,
    pub username: String,
    pub status: String,
    pub order_time: NaiveDate,
    pub total_products: i64,
    pub total_price: i64,
}

/// An order line joined with its product's current prices.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineRecord {
    pub order_id: i32,
    pub product_id: String,
    pub product_name: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
    pub captured_unit_price: Option<i32>,
    pub prices: SizeTable<i32>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderRecord {
    pub summary: OrderSummary,
    pub lines: Vec<OrderLineRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderLineView {
    pub product_id: String,
    pub product_name: String,
    pub quantity: i32,
    pub size: String,
    pub color: Option<String>,
    /// Quantity times unit price.
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct OrderView {
    pub order_id: i32,
    pub user_id: String,
    pub username: String,
    pub status: String,
    pub order_time: NaiveDate,
    pub total_products: i64,
    pub total_price: i64,
    pub products: Vec<OrderLineView>,
}

impl OrderView {
    pub fn from_record(record: OrderRecord, policy: PricingPolicy) -> Self {
        let OrderRecord { summary, lines } = record;
        let products = lines
            .into_iter()
            .map(|line| OrderLineView {
                price: policy.line_price(
                    line.quantity,
                    &line.size,
                    &line.prices,
                    line.captured_unit_price,
                ),
                product_id: line.product_id,
                product_name: line.product_name,
                quantity: line.quantity,
                size: line.size,
                color: line.color,
            })
            .collect();

        OrderView {
            order_id: summary.order_id,
            user_id: summary.user_id,
            username: summary.username,
            status: summary.status,
            order_time: summary.order_time,
            total_products: summary.total_products,
            total_price: summary.total_price,
            products,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(size: &str, quantity: i32, captured: Option<i32>) -> OrderLineRecord {
        OrderLineRecord {
            order_id: 7,
            product_id: "tee-01".to_string(),
            product_name: "Painted tee".to_string(),
            size: size.to_string(),
            quantity,
            color: Some("red".to_string()),
            captured_unit_price: captured,
            prices: SizeTable {
                xs: 1000,
                s: 1200,
                m: 1500,
                l: 1600,
                xl: 1700,
                xxl: 1800,
            },
        }
    }

    fn summary(total_products: i64, total_price: i64) -> OrderSummary {
        OrderSummary {
            order_id: 7,
            user_id: "user-123456789".to_string(),
            username: "ayesha".to_string(),
            status: INITIAL_STATUS.to_string(),
            order_time: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            total_products,
            total_price,
        }
    }

    #[test]
    fn line_price_multiplies_quantity_by_live_unit_price() {
        let record = OrderRecord {
            summary: summary(1, 3000),
            lines: vec![line("M", 2, Some(1400))],
        };
        let view = OrderView::from_record(record, PricingPolicy::Live);

        assert_eq!(view.products.len(), 1);
        assert_eq!(view.products[0].price, 3000);
        assert_eq!(view.total_price, 3000);
        assert_eq!(view.products[0].color.as_deref(), Some("red"));
    }

    #[test]
    fn snapshot_policy_values_lines_at_captured_price() {
        let record = OrderRecord {
            summary: summary(2, 2800 + 1000),
            lines: vec![line("M", 2, Some(1400)), line("XS", 1, None)],
        };
        let view = OrderView::from_record(record, PricingPolicy::Snapshot);

        assert_eq!(view.products[0].price, 2800);
        assert_eq!(view.products[1].price, 1000);
        let sum: i64 = view.products.iter().map(|p| p.price).sum();
        assert_eq!(sum, view.total_price);
    }
}
