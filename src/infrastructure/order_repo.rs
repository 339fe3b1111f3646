use std::collections::HashMap;

use chrono::NaiveDate;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::sql_types::{Integer, Text};

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderLineRecord, OrderRecord, OrderScope, OrderSummary, INITIAL_STATUS};
use crate::domain::ports::OrderRepository;
use crate::domain::pricing::PricingPolicy;
use crate::domain::size::{price_for_token, SizeTable};
use crate::schema::{cart, order_items, orders, products};

use super::models::{
    CartRow, NewOrderItemRow, NewOrderRow, OrderItemRow, OrderSummaryRow, PriceRow,
    ProductBriefRow,
};

#[derive(Clone)]
pub struct DieselOrderRepository {
    pool: DbPool,
}

impl DieselOrderRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

/// Per-order count and total, one row per order including orders without
/// lines.
fn summary_sql(policy: PricingPolicy, filter: &str) -> String {
    format!(
        "SELECT o.id AS order_id, o.user_id, u.username, o.status, o.time AS order_time, \
                COUNT(oi.id) AS total_products, \
                COALESCE(SUM(oi.quantity::BIGINT * {unit}), 0)::BIGINT AS total_price \
         FROM orders o \
         JOIN users u ON u.id = o.user_id \
         LEFT JOIN order_items oi ON oi.order_id = o.id \
         LEFT JOIN products p ON p.id = oi.product_id \
         {filter} \
         GROUP BY o.id, u.username \
         ORDER BY o.id",
        unit = policy.unit_price_sql("oi", "p"),
    )
}

fn load_summaries(
    conn: &mut PgConnection,
    scope: OrderScope<'_>,
    policy: PricingPolicy,
) -> QueryResult<Vec<OrderSummaryRow>> {
    match scope {
        OrderScope::All => diesel::sql_query(summary_sql(policy, "")).load(conn),
        OrderScope::User(user_id) => {
            diesel::sql_query(summary_sql(policy, "WHERE o.user_id = $1"))
                .bind::<Text, _>(user_id)
                .load(conn)
        }
        OrderScope::Order(order_id) => diesel::sql_query(summary_sql(policy, "WHERE o.id = $1"))
            .bind::<Integer, _>(order_id)
            .load(conn),
    }
}

impl OrderRepository for DieselOrderRepository {
    fn create_from_cart(&self, user_id: &str, order_time: NaiveDate) -> Result<i32, DomainError> {
        let mut conn = self.pool.get()?;

        conn.transaction::<_, DomainError, _>(|conn| {
            // 1. Lock the cart so concurrent adds wait for the clear
            let lines: Vec<CartRow> = cart::table
                .filter(cart::user_id.eq(user_id))
                .order(cart::id)
                .select(CartRow::as_select())
                .for_update()
                .load(conn)?;
            if lines.is_empty() {
                return Err(DomainError::invalid("Cart is empty"));
            }

            // 2. Insert the order
            let order_id: i32 = diesel::insert_into(orders::table)
                .values(&NewOrderRow {
                    status: INITIAL_STATUS,
                    time: order_time,
                    user_id,
                })
                .returning(orders::id)
                .get_result(conn)?;

            // 3. Copy the lines, capturing the current unit price
            let product_ids: Vec<String> = lines.iter().map(|l| l.product_id.clone()).collect();
            let prices: HashMap<String, PriceRow> = products::table
                .filter(products::id.eq_any(&product_ids))
                .select((products::id, PriceRow::as_select()))
                .load::<(String, PriceRow)>(conn)?
                .into_iter()
                .collect();

            let items: Vec<NewOrderItemRow> = lines
                .into_iter()
                .map(|l| NewOrderItemRow {
                    unit_price: prices
                        .get(&l.product_id)
                        .map(|p| price_for_token(&SizeTable::from(*p), &l.size)),
                    order_id,
                    product_id: l.product_id,
                    size: l.size,
                    quantity: l.quantity,
                    color: l.color,
                })
                .collect();
            diesel::insert_into(order_items::table)
                .values(&items)
                .execute(conn)?;

            // 4. Clear the cart
            diesel::delete(cart::table.filter(cart::user_id.eq(user_id))).execute(conn)?;

            Ok(order_id)
        })
    }

    fn fetch(
        &self,
        scope: OrderScope<'_>,
        policy: PricingPolicy,
    ) -> Result<Vec<OrderRecord>, DomainError> {
        let mut conn = self.pool.get()?;

        // Both reads see the same snapshot.
        conn.build_transaction()
            .read_only()
            .repeatable_read()
            .run::<_, DomainError, _>(|conn| {
                let summaries = load_summaries(conn, scope, policy)?;
                if summaries.is_empty() {
                    return Ok(Vec::new());
                }

                let order_ids: Vec<i32> = summaries.iter().map(|s| s.order_id).collect();
                let rows = order_items::table
                    .inner_join(products::table)
                    .filter(order_items::order_id.eq_any(&order_ids))
                    .order(order_items::id)
                    .select((OrderItemRow::as_select(), ProductBriefRow::as_select()))
                    .load::<(OrderItemRow, ProductBriefRow)>(conn)?;

                let mut lines: HashMap<i32, Vec<OrderLineRecord>> = HashMap::new();
                for (item, product) in rows {
                    lines.entry(item.order_id).or_default().push(OrderLineRecord {
                        order_id: item.order_id,
                        product_id: item.product_id,
                        product_name: product.name,
                        size: item.size,
                        quantity: item.quantity,
                        color: item.color,
                        captured_unit_price: item.unit_price,
                        prices: product.prices.into(),
                    });
                }

                Ok(summaries
                    .into_iter()
                    .map(|s| OrderRecord {
                        lines: lines.remove(&s.order_id).unwrap_or_default(),
                        summary: OrderSummary {
                            order_id: s.order_id,
                            user_id: s.user_id,
                            username: s.username,
                            status: s.status,
                            order_time: s.order_time,
                            total_products: s.total_products,
                            total_price: s.total_price,
                        },
                    })
                    .collect())
            })
    }

    fn update_status(&self, order_id: i32, status: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;
        let updated = diesel::update(orders::table.find(order_id))
            .set(orders::status.eq(status))
            .execute(&mut conn)?;
        Ok(updated > 0)
    }
}
