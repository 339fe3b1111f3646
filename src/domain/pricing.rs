use std::str::FromStr;

use super::errors::DomainError;
use super::size::{price_case_sql, price_for_token, SizeTable};

/// Which unit price an order line is valued at when an order is read.
///
/// `Live` values every line at the product's current price for the line's
/// size, so historical totals follow catalog price changes. `Snapshot` uses
/// the unit price captured when the order was composed, falling back to the
/// live price for lines written before capture existed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PricingPolicy {
    #[default]
    Live,
    Snapshot,
}

impl PricingPolicy {
    pub fn unit_price(
        self,
        size: &str,
        current: &SizeTable<i32>,
        captured: Option<i32>,
    ) -> i32 {
        match (self, captured) {
            (PricingPolicy::Snapshot, Some(price)) => price,
            _ => price_for_token(current, size),
        }
    }

    pub fn line_price(
        self,
        quantity: i32,
        size: &str,
        current: &SizeTable<i32>,
        captured: Option<i32>,
    ) -> i64 {
        i64::from(quantity) * i64::from(self.unit_price(size, current, captured))
    }

    /// SQL expression for the unit price of an `order_items` row joined to
    /// its product, matching [`PricingPolicy::unit_price`].
    pub fn unit_price_sql(self, line_alias: &str, product_alias: &str) -> String {
        let live = price_case_sql(&format!("{line_alias}.size"), product_alias);
        match self {
            PricingPolicy::Live => live,
            PricingPolicy::Snapshot => format!("COALESCE({line_alias}.unit_price, {live})"),
        }
    }
}

impl FromStr for PricingPolicy {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "live" => Ok(PricingPolicy::Live),
            "snapshot" => Ok(PricingPolicy::Snapshot),
            other => Err(DomainError::invalid(format!(
                "unknown pricing policy '{other}', expected 'live' or 'snapshot'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn current() -> SizeTable<i32> {
        SizeTable {
            xs: 900,
            s: 1000,
            m: 1500,
            l: 1600,
            xl: 1700,
            xxl: 1800,
        }
    }

    #[test]
    fn live_policy_ignores_captured_price() {
        let price = PricingPolicy::Live.unit_price("M", &current(), Some(1200));
        assert_eq!(price, 1500);
    }

    #[test]
    fn snapshot_policy_prefers_captured_price() {
        let price = PricingPolicy::Snapshot.unit_price("M", &current(), Some(1200));
        assert_eq!(price, 1200);
    }

    #[test]
    fn snapshot_policy_falls_back_to_live_price() {
        let price = PricingPolicy::Snapshot.unit_price("L", &current(), None);
        assert_eq!(price, 1600);
    }

    #[test]
    fn line_price_is_quantity_times_unit() {
        assert_eq!(PricingPolicy::Live.line_price(2, "M", &current(), None), 3000);
        assert_eq!(PricingPolicy::Live.line_price(3, "bogus", &current(), None), 0);
    }

    #[test]
    fn line_price_does_not_overflow_i32() {
        let mut prices = current();
        prices.m = i32::MAX;
        let total = PricingPolicy::Live.line_price(4, "M", &prices, None);
        assert_eq!(total, 4 * i64::from(i32::MAX));
    }

    #[test]
    fn sql_expression_follows_policy() {
        let live = PricingPolicy::Live.unit_price_sql("oi", "p");
        assert!(live.starts_with("CASE oi.size"));

        let snapshot = PricingPolicy::Snapshot.unit_price_sql("oi", "p");
        assert!(snapshot.starts_with("COALESCE(oi.unit_price, CASE oi.size"));
    }

    #[test]
    fn parses_policy_names() {
        assert_eq!("live".parse::<PricingPolicy>().unwrap(), PricingPolicy::Live);
        assert_eq!(" Snapshot ".parse::<PricingPolicy>().unwrap(), PricingPolicy::Snapshot);
        assert!("frozen".parse::<PricingPolicy>().is_err());
    }
}
