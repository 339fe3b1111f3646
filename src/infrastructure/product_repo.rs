use diesel::dsl::exists;
use diesel::prelude::*;
use diesel::sql_types::Text;

use crate::db::DbPool;
use crate::domain::catalog::{round_rating, NewProduct, ProductChanges, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::ports::ProductRepository;
use crate::schema::products;

use super::models::{NewProductRow, ProductAggregateRow, ProductChangeset};

/// Products with review count and average. Products without reviews get
/// zero for both.
const AGGREGATE_SELECT: &str = "\
    SELECT p.*, \
           COUNT(r.id) AS total_reviews, \
           COALESCE(AVG(r.stars), 0) AS average_rating \
    FROM products p \
    LEFT JOIN reviews r ON r.product_id = p.id";

#[derive(Clone)]
pub struct DieselProductRepository {
    pool: DbPool,
}

impl DieselProductRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn to_view(row: ProductAggregateRow) -> ProductView {
    ProductView {
        average_rating: round_rating(&row.average_rating),
        total_reviews: row.total_reviews,
        product: row.product.into(),
    }
}

impl ProductRepository for DieselProductRepository {
    fn exists(&self, id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(diesel::select(exists(products::table.find(id))).get_result(&mut conn)?)
    }

    fn list_with_aggregates(&self) -> Result<Vec<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;
        let rows = diesel::sql_query(format!("{AGGREGATE_SELECT} GROUP BY p.id ORDER BY p.id"))
            .load::<ProductAggregateRow>(&mut conn)?;
        Ok(rows.into_iter().map(to_view).collect())
    }

    fn find_with_aggregates(&self, id: &str) -> Result<Option<ProductView>, DomainError> {
        let mut conn = self.pool.get()?;
        let row = diesel::sql_query(format!("{AGGREGATE_SELECT} WHERE p.id = $1 GROUP BY p.id"))
            .bind::<Text, _>(id)
            .get_result::<ProductAggregateRow>(&mut conn)
            .optional()?;
        Ok(row.map(to_view))
    }

    fn create(&self, product: NewProduct) -> Result<(), DomainError> {
        let mut conn = self.pool.get()?;
        diesel::insert_into(products::table)
            .values(NewProductRow::from(product))
            .execute(&mut conn)?;
        Ok(())
    }

    fn update(&self, id: &str, changes: ProductChanges) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(products::table.find(id))
            .set(ProductChangeset::from(changes))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }

    fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let deleted = diesel::delete(products::table.find(id)).execute(&mut conn)?;
        Ok(deleted > 0)
    }

    fn description(&self, id: &str) -> Result<Option<Option<String>>, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(products::table
            .find(id)
            .select(products::description)
            .first::<Option<String>>(&mut conn)
            .optional()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::size::SizeTable;
    use crate::infrastructure::test_db::{new_product, prices, setup_db};

    #[tokio::test]
    async fn product_without_reviews_has_zero_aggregates() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.create(new_product("shawl-1", prices(4000))).expect("create failed");

        let view = repo
            .find_with_aggregates("shawl-1")
            .unwrap()
            .expect("product should exist");

        assert_eq!(view.total_reviews, 0);
        assert_eq!(view.average_rating, 0.0);
        assert_eq!(view.product.prices.xxl, 4500);
        assert_eq!(view.product.stock.m, 3.0);
        assert_eq!(view.product.images, Some(vec!["shawl-1-back.png".to_string()]));
        assert_eq!(view.product.colors, None);
    }

    #[tokio::test]
    async fn duplicate_id_is_a_conflict() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.create(new_product("shawl-1", prices(4000))).unwrap();

        assert!(matches!(
            repo.create(new_product("shawl-1", prices(100))),
            Err(DomainError::Conflict(_))
        ));
    }

    #[tokio::test]
    async fn partial_update_and_delete() {
        let (_container, pool) = setup_db().await;
        let repo = DieselProductRepository::new(pool);
        repo.create(new_product("shawl-1", prices(4000))).unwrap();

        let changes = ProductChanges {
            description: Some("Pashmina blend".to_string()),
            colors: Some(vec![]),
            prices: SizeTable {
                l: Some(9999),
                ..SizeTable::default()
            },
            ..ProductChanges::default()
        };
        assert!(repo.update("shawl-1", changes.clone()).unwrap());
        assert!(!repo.update("missing", changes).unwrap());

        let view = repo.find_with_aggregates("shawl-1").unwrap().unwrap();
        assert_eq!(view.product.prices.l, 9999);
        assert_eq!(view.product.prices.m, 4200);
        assert_eq!(
            repo.description("shawl-1").unwrap(),
            Some(Some("Pashmina blend".to_string()))
        );

        assert!(repo.delete("shawl-1").unwrap());
        assert!(!repo.delete("shawl-1").unwrap());
        assert_eq!(repo.description("shawl-1").unwrap(), None);
        assert!(repo.list_with_aggregates().unwrap().is_empty());
    }
}
