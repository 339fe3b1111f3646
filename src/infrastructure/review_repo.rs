use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;
use diesel::dsl::exists;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::ReviewRepository;
use crate::domain::review::{NewReview, ReviewDetail};
use crate::schema::{reviews, users};

use super::models::NewReviewRow;

type DetailTuple = (String, BigDecimal, Option<String>, NaiveDate);

fn to_detail((username, stars, text, time): DetailTuple) -> ReviewDetail {
    ReviewDetail {
        username,
        stars: stars.to_f64().unwrap_or(0.0),
        text,
        time,
    }
}

#[derive(Clone)]
pub struct DieselReviewRepository {
    pool: DbPool,
}

impl DieselReviewRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl ReviewRepository for DieselReviewRepository {
    fn create(&self, review: NewReview) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::insert_into(reviews::table)
            .values(NewReviewRow {
                stars: review.stars,
                text: review.text,
                time: review.time,
                user_id: review.user_id,
                product_id: review.product_id,
            })
            .returning(reviews::id)
            .get_result(&mut conn)?)
    }

    fn find_detail(&self, review_id: i32) -> Result<Option<ReviewDetail>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = reviews::table
            .inner_join(users::table)
            .filter(reviews::id.eq(review_id))
            .select((users::username, reviews::stars, reviews::text, reviews::time))
            .first::<DetailTuple>(&mut conn)
            .optional()?;
        Ok(row.map(to_detail))
    }

    fn list_for_product(&self, product_id: &str) -> Result<Vec<ReviewDetail>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = reviews::table
            .inner_join(users::table)
            .filter(reviews::product_id.eq(product_id))
            .order(reviews::id)
            .select((users::username, reviews::stars, reviews::text, reviews::time))
            .load::<DetailTuple>(&mut conn)?;
        Ok(rows.into_iter().map(to_detail).collect())
    }

    fn exists_for(&self, user_id: &str, product_id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::select(exists(
            reviews::table
                .filter(reviews::user_id.eq(user_id))
                .filter(reviews::product_id.eq(product_id)),
        ))
        .get_result(&mut conn)?)
    }
}
