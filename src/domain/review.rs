use bigdecimal::BigDecimal;
use chrono::NaiveDate;

pub const MIN_STARS: f64 = 0.0;
pub const MAX_STARS: f64 = 5.0;

#[derive(Debug, Clone)]
pub struct NewReview {
    pub user_id: String,
    pub product_id: String,
    pub stars: BigDecimal,
    pub text: Option<String>,
    pub time: NaiveDate,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReviewDetail {
    pub username: String,
    pub stars: f64,
    pub text: Option<String>,
    pub time: NaiveDate,
}
