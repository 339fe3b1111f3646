use bigdecimal::{BigDecimal, FromPrimitive};

use crate::domain::dates::parse_iso_date;
use crate::domain::errors::DomainError;
use crate::domain::ports::{ProductRepository, ReviewRepository};
use crate::domain::review::{NewReview, ReviewDetail, MAX_STARS, MIN_STARS};

#[derive(Debug, Clone)]
pub struct ReviewInput {
    pub user_id: String,
    pub product_id: String,
    pub stars: f64,
    pub text: Option<String>,
    pub time: String,
}

pub struct ReviewService<R, P> {
    reviews: R,
    products: P,
}

impl<R: ReviewRepository, P: ProductRepository> ReviewService<R, P> {
    pub fn new(reviews: R, products: P) -> Self {
        Self { reviews, products }
    }

    /// Record a review. A user may review each product once.
    pub fn create_review(&self, input: ReviewInput) -> Result<ReviewDetail, DomainError> {
        if !(MIN_STARS..=MAX_STARS).contains(&input.stars) {
            return Err(DomainError::invalid(format!(
                "stars must be between {MIN_STARS} and {MAX_STARS}"
            )));
        }
        let stars = BigDecimal::from_f64(input.stars)
            .ok_or_else(|| DomainError::invalid("stars must be a finite number"))?
            .round(2);
        let time =
            parse_iso_date(&input.time).ok_or_else(|| DomainError::invalid("Invalid time format"))?;

        if !self.products.exists(&input.product_id)? {
            return Err(DomainError::not_found("Product"));
        }
        if self.reviews.exists_for(&input.user_id, &input.product_id)? {
            return Err(DomainError::Conflict(
                "User has already reviewed this product".to_string(),
            ));
        }

        let review_id = self.reviews.create(NewReview {
            user_id: input.user_id,
            product_id: input.product_id,
            stars,
            text: input.text,
            time,
        })?;
        self.reviews
            .find_detail(review_id)?
            .ok_or_else(|| DomainError::Internal(format!("review {review_id} missing after insert")))
    }

    pub fn reviews_for_product(&self, product_id: &str) -> Result<Vec<ReviewDetail>, DomainError> {
        let reviews = self.reviews.list_for_product(product_id)?;
        if reviews.is_empty() {
            return Err(DomainError::not_found("Reviews for this product"));
        }
        Ok(reviews)
    }

    pub fn has_reviewed(&self, user_id: &str, product_id: &str) -> Result<bool, DomainError> {
        self.reviews.exists_for(user_id, product_id)
    }
}
