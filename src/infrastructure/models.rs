use bigdecimal::BigDecimal;
use chrono::NaiveDate;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Date, Integer, Numeric, Text};

use crate::domain::catalog::{decode_list, encode_list, NewProduct, Product, ProductChanges};
use crate::domain::size::SizeTable;
use crate::domain::user::{NewUser, User, UserChanges};
use crate::schema::{cart, order_items, orders, products, reviews, users};

// ── Users ─────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct UserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub disabled: bool,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            username: row.username,
            email: row.email,
            name: row.name,
            disabled: row.disabled,
            contact_number: row.contact_number,
            permanent_address: row.permanent_address,
            country: row.country,
            city: row.city,
            contact_number_2: row.contact_number_2,
        }
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = users)]
pub struct NewUserRow {
    pub id: String,
    pub username: String,
    pub email: String,
    pub name: String,
    pub contact_number: String,
    pub permanent_address: String,
    pub country: String,
    pub city: String,
    pub contact_number_2: Option<String>,
}

impl From<NewUser> for NewUserRow {
    fn from(user: NewUser) -> Self {
        NewUserRow {
            id: user.id,
            username: user.username,
            email: user.email,
            name: user.name.unwrap_or_default(),
            contact_number: user.contact_number,
            permanent_address: user.permanent_address,
            country: user.country,
            city: user.city,
            contact_number_2: user.contact_number_2,
        }
    }
}

#[derive(Debug, AsChangeset)]
#[diesel(table_name = users)]
pub struct UserChangeset {
    pub name: Option<String>,
    pub disabled: Option<bool>,
    pub contact_number: Option<String>,
    pub permanent_address: Option<String>,
    pub country: Option<String>,
    pub city: Option<String>,
    pub contact_number_2: Option<String>,
}

impl From<UserChanges> for UserChangeset {
    fn from(c: UserChanges) -> Self {
        UserChangeset {
            name: c.name,
            disabled: c.disabled,
            contact_number: c.contact_number,
            permanent_address: c.permanent_address,
            country: c.country,
            city: c.city,
            contact_number_2: c.contact_number_2,
        }
    }
}

// ── Products ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable, QueryableByName)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub images: Option<String>,
    pub collection: String,
    pub category: String,
    pub discount: i32,
    pub colors: Option<String>,
    pub description: Option<String>,
    pub xs_price: i32,
    pub s_price: i32,
    pub m_price: i32,
    pub l_price: i32,
    pub xl_price: i32,
    pub xxl_price: i32,
    pub xs_stock: f64,
    pub s_stock: f64,
    pub m_stock: f64,
    pub l_stock: f64,
    pub xl_stock: f64,
    pub xxl_stock: f64,
    pub kids: Option<bool>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            images: decode_list(row.images.as_deref()),
            colors: decode_list(row.colors.as_deref()),
            prices: SizeTable {
                xs: row.xs_price,
                s: row.s_price,
                m: row.m_price,
                l: row.l_price,
                xl: row.xl_price,
                xxl: row.xxl_price,
            },
            stock: SizeTable {
                xs: row.xs_stock,
                s: row.s_stock,
                m: row.m_stock,
                l: row.l_stock,
                xl: row.xl_stock,
                xxl: row.xxl_stock,
            },
            id: row.id,
            name: row.name,
            image: row.image,
            collection: row.collection,
            category: row.category,
            discount: row.discount,
            description: row.description,
            kids: row.kids,
        }
    }
}

/// A product row with its review aggregates, read through raw SQL.
#[derive(Debug, QueryableByName)]
pub struct ProductAggregateRow {
    #[diesel(embed)]
    pub product: ProductRow,
    #[diesel(sql_type = BigInt)]
    pub total_reviews: i64,
    #[diesel(sql_type = Numeric)]
    pub average_rating: BigDecimal,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = products)]
pub struct NewProductRow {
    pub id: String,
    pub name: String,
    pub image: String,
    pub images: Option<String>,
    pub collection: String,
    pub category: String,
    pub discount: i32,
    pub colors: Option<String>,
    pub description: Option<String>,
    pub xs_price: i32,
    pub s_price: i32,
    pub m_price: i32,
    pub l_price: i32,
    pub xl_price: i32,
    pub xxl_price: i32,
    pub xs_stock: f64,
    pub s_stock: f64,
    pub m_stock: f64,
    pub l_stock: f64,
    pub xl_stock: f64,
    pub xxl_stock: f64,
    pub kids: Option<bool>,
}

impl From<NewProduct> for NewProductRow {
    fn from(p: NewProduct) -> Self {
        NewProductRow {
            images: encode_list(p.images.as_deref()),
            colors: encode_list(p.colors.as_deref()),
            xs_price: p.prices.xs,
            s_price: p.prices.s,
            m_price: p.prices.m,
            l_price: p.prices.l,
            xl_price: p.prices.xl,
            xxl_price: p.prices.xxl,
            xs_stock: p.stock.xs,
            s_stock: p.stock.s,
            m_stock: p.stock.m,
            l_stock: p.stock.l,
            xl_stock: p.stock.xl,
            xxl_stock: p.stock.xxl,
            id: p.id,
            name: p.name,
            image: p.image,
            collection: p.collection,
            category: p.category,
            discount: p.discount,
            description: p.description,
            kids: p.kids,
        }
    }
}

/// `None` skips the column; `Some(None)` on a list column stores NULL.
#[derive(Debug, AsChangeset)]
#[diesel(table_name = products)]
pub struct ProductChangeset {
    pub name: Option<String>,
    pub image: Option<String>,
    pub images: Option<Option<String>>,
    pub collection: Option<String>,
    pub category: Option<String>,
    pub discount: Option<i32>,
    pub colors: Option<Option<String>>,
    pub description: Option<String>,
    pub xs_price: Option<i32>,
    pub s_price: Option<i32>,
    pub m_price: Option<i32>,
    pub l_price: Option<i32>,
    pub xl_price: Option<i32>,
    pub xxl_price: Option<i32>,
    pub xs_stock: Option<f64>,
    pub s_stock: Option<f64>,
    pub m_stock: Option<f64>,
    pub l_stock: Option<f64>,
    pub xl_stock: Option<f64>,
    pub xxl_stock: Option<f64>,
    pub kids: Option<bool>,
}

impl From<ProductChanges> for ProductChangeset {
    fn from(c: ProductChanges) -> Self {
        ProductChangeset {
            images: c.images.map(|list| encode_list(Some(list.as_slice()))),
            colors: c.colors.map(|list| encode_list(Some(list.as_slice()))),
            xs_price: c.prices.xs,
            s_price: c.prices.s,
            m_price: c.prices.m,
            l_price: c.prices.l,
            xl_price: c.prices.xl,
            xxl_price: c.prices.xxl,
            xs_stock: c.stock.xs,
            s_stock: c.stock.s,
            m_stock: c.stock.m,
            l_stock: c.stock.l,
            xl_stock: c.stock.xl,
            xxl_stock: c.stock.xxl,
            name: c.name,
            image: c.image,
            collection: c.collection,
            category: c.category,
            discount: c.discount,
            description: c.description,
            kids: c.kids,
        }
    }
}

#[derive(Debug, Clone, Copy, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct PriceRow {
    pub xs_price: i32,
    pub s_price: i32,
    pub m_price: i32,
    pub l_price: i32,
    pub xl_price: i32,
    pub xxl_price: i32,
}

impl From<PriceRow> for SizeTable<i32> {
    fn from(row: PriceRow) -> Self {
        SizeTable {
            xs: row.xs_price,
            s: row.s_price,
            m: row.m_price,
            l: row.l_price,
            xl: row.xl_price,
            xxl: row.xxl_price,
        }
    }
}

/// Product fields shown next to cart and order lines.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct ProductBriefRow {
    pub name: String,
    pub image: String,
    pub collection: String,
    #[diesel(embed)]
    pub prices: PriceRow,
}

// ── Reviews ───────────────────────────────────────────────────────────────────

#[derive(Debug, Insertable)]
#[diesel(table_name = reviews)]
pub struct NewReviewRow {
    pub stars: BigDecimal,
    pub text: Option<String>,
    pub time: NaiveDate,
    pub user_id: String,
    pub product_id: String,
}

// ── Cart ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cart)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartRow {
    pub user_id: String,
    pub product_id: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = cart)]
pub struct NewCartRow {
    pub user_id: String,
    pub product_id: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
}

// ── Orders ────────────────────────────────────────────────────────────────────

#[derive(Debug, Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrderRow<'a> {
    pub status: &'a str,
    pub time: NaiveDate,
    pub user_id: &'a str,
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItemRow {
    pub order_id: i32,
    pub product_id: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
    pub unit_price: Option<i32>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItemRow {
    pub order_id: i32,
    pub product_id: String,
    pub size: String,
    pub quantity: i32,
    pub color: Option<String>,
    pub unit_price: Option<i32>,
}

/// One order with its aggregates, read through raw SQL.
#[derive(Debug, QueryableByName)]
pub struct OrderSummaryRow {
    #[diesel(sql_type = Integer)]
    pub order_id: i32,
    #[diesel(sql_type = Text)]
    pub user_id: String,
    #[diesel(sql_type = Text)]
    pub username: String,
    #[diesel(sql_type = Text)]
    pub status: String,
    #[diesel(sql_type = Date)]
    pub order_time: NaiveDate,
    #[diesel(sql_type = BigInt)]
    pub total_products: i64,
    #[diesel(sql_type = BigInt)]
    pub total_price: i64,
}
