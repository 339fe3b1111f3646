use diesel::prelude::*;
use diesel::upsert::excluded;

use crate::db::DbPool;
use crate::domain::cart::{quantity_overflow, CartKey, CartLineRecord, NewCartLine};
use crate::domain::errors::DomainError;
use crate::domain::ports::CartRepository;
use crate::schema::{cart, products};

use super::models::{CartRow, NewCartRow, ProductBriefRow};

#[derive(Clone)]
pub struct DieselCartRepository {
    pool: DbPool,
}

impl DieselCartRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl CartRepository for DieselCartRepository {
    fn merge(&self, line: NewCartLine) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        let ceiling = i32::MAX.saturating_sub(line.quantity);
        // Single statement, so concurrent adds of the same key both count.
        // The guard leaves the row untouched when the sum would overflow.
        let upsert = diesel::insert_into(cart::table)
            .values(NewCartRow {
                user_id: line.key.user_id,
                product_id: line.key.product_id,
                size: line.key.size.as_str().to_string(),
                quantity: line.quantity,
                color: line.color,
            })
            .on_conflict((cart::user_id, cart::product_id, cart::size))
            .do_update()
            .set(cart::quantity.eq(cart::quantity + excluded(cart::quantity)));
        let written = diesel::query_dsl::methods::FilterDsl::filter(upsert, cart::quantity.le(ceiling))
            .execute(&mut conn)?;
        if written == 0 {
            return Err(quantity_overflow());
        }
        Ok(())
    }

    fn set_quantity(&self, key: &CartKey, quantity: i32) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(
            cart::table
                .filter(cart::user_id.eq(&key.user_id))
                .filter(cart::product_id.eq(&key.product_id))
                .filter(cart::size.eq(key.size.as_str())),
        )
        .set(cart::quantity.eq(quantity))
        .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn remove(&self, key: &CartKey) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(
            cart::table
                .filter(cart::user_id.eq(&key.user_id))
                .filter(cart::product_id.eq(&key.product_id))
                .filter(cart::size.eq(key.size.as_str())),
        )
        .execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn lines(&self, user_id: &str) -> Result<Vec<CartLineRecord>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = cart::table
            .inner_join(products::table)
            .filter(cart::user_id.eq(user_id))
            .order(cart::id)
            .select((CartRow::as_select(), ProductBriefRow::as_select()))
            .load::<(CartRow, ProductBriefRow)>(&mut conn)?;

        Ok(rows
            .into_iter()
            .map(|(line, product)| CartLineRecord {
                user_id: line.user_id,
                product_id: line.product_id,
                product_name: product.name,
                image: product.image,
                collection: product.collection,
                size: line.size,
                quantity: line.quantity,
                color: line.color,
                prices: product.prices.into(),
            })
            .collect())
    }

    fn count(&self, user_id: &str) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(cart::table
            .filter(cart::user_id.eq(user_id))
            .count()
            .get_result(&mut conn)?)
    }
}
