//! In-memory implementation of the repository ports for service tests.
//!
//! Every method works on a copy of the state and publishes it only when the
//! method succeeds, so a failing call leaves nothing behind, like a rolled
//! back transaction.

use std::sync::{Arc, Mutex};

use bigdecimal::{BigDecimal, ToPrimitive};
use chrono::NaiveDate;

use crate::domain::cart::{quantity_overflow, CartKey, CartLineRecord, NewCartLine};
use crate::domain::catalog::{round_rating, NewProduct, Product, ProductChanges, ProductView};
use crate::domain::errors::DomainError;
use crate::domain::order::{OrderLineRecord, OrderRecord, OrderScope, OrderSummary, INITIAL_STATUS};
use crate::domain::ports::{
    CartRepository, OrderRepository, ProductRepository, ReviewRepository, UserRepository,
};
use crate::domain::pricing::PricingPolicy;
use crate::domain::review::{NewReview, ReviewDetail};
use crate::domain::size::{price_for_token, SizeTable};
use crate::domain::user::{NewUser, User, UserChanges};

#[derive(Debug, Clone)]
struct StoredReview {
    id: i32,
    review: NewReview,
}

#[derive(Debug, Clone)]
struct StoredCartLine {
    user_id: String,
    product_id: String,
    size: String,
    quantity: i32,
    color: Option<String>,
}

#[derive(Debug, Clone)]
struct StoredOrder {
    id: i32,
    user_id: String,
    status: String,
    time: NaiveDate,
}

#[derive(Debug, Clone)]
struct StoredOrderItem {
    order_id: i32,
    product_id: String,
    size: String,
    quantity: i32,
    color: Option<String>,
    unit_price: Option<i32>,
}

#[derive(Debug, Clone, Default)]
struct State {
    users: Vec<User>,
    products: Vec<Product>,
    reviews: Vec<StoredReview>,
    cart: Vec<StoredCartLine>,
    orders: Vec<StoredOrder>,
    order_items: Vec<StoredOrderItem>,
    next_id: i32,
    fail_order_lines: bool,
}

impl State {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    fn cart_position(&self, key: &CartKey) -> Option<usize> {
        self.cart.iter().position(|l| {
            l.user_id == key.user_id && l.product_id == key.product_id && l.size == key.size.as_str()
        })
    }
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read<T>(&self, f: impl FnOnce(&State) -> T) -> T {
        let state = self.state.lock().expect("memory store poisoned");
        f(&state)
    }

    fn write<T>(
        &self,
        f: impl FnOnce(&mut State) -> Result<T, DomainError>,
    ) -> Result<T, DomainError> {
        let mut guard = self.state.lock().expect("memory store poisoned");
        let mut draft = guard.clone();
        let out = f(&mut draft)?;
        *guard = draft;
        Ok(out)
    }

    pub fn seed_user(&self, id: &str, username: &str) {
        self.write(|s| {
            s.users.push(User {
                id: id.to_string(),
                username: username.to_string(),
                email: format!("{username}@example.com"),
                name: username.to_string(),
                disabled: false,
                contact_number: "0300-0000000".to_string(),
                permanent_address: "12 Mall Road".to_string(),
                country: "PK".to_string(),
                city: "Lahore".to_string(),
                contact_number_2: None,
            });
            Ok(())
        })
        .expect("seed user");
    }

    pub fn seed_product(&self, id: &str, prices: SizeTable<i32>) {
        self.write(|s| {
            s.products.push(Product {
                id: id.to_string(),
                name: format!("Product {id}"),
                image: format!("{id}.png"),
                images: None,
                collection: "Summer".to_string(),
                category: "Shirts".to_string(),
                discount: 0,
                colors: None,
                description: None,
                prices,
                stock: SizeTable::default(),
                kids: None,
            });
            Ok(())
        })
        .expect("seed product");
    }

    pub fn set_price(&self, product_id: &str, prices: SizeTable<i32>) {
        self.write(|s| {
            if let Some(p) = s.products.iter_mut().find(|p| p.id == product_id) {
                p.prices = prices;
            }
            Ok(())
        })
        .expect("set price");
    }

    /// Make the next order composition fail while writing its lines.
    pub fn fail_order_lines(&self, fail: bool) {
        self.state.lock().expect("memory store poisoned").fail_order_lines = fail;
    }

    pub fn order_count(&self) -> usize {
        self.read(|s| s.orders.len())
    }

    pub fn cart_len(&self, user_id: &str) -> usize {
        self.read(|s| s.cart.iter().filter(|l| l.user_id == user_id).count())
    }
}

impl UserRepository for MemoryStore {
    fn find_by_id(&self, id: &str) -> Result<Option<User>, DomainError> {
        Ok(self.read(|s| s.users.iter().find(|u| u.id == id).cloned()))
    }

    fn username_taken(&self, username: &str) -> Result<bool, DomainError> {
        Ok(self.read(|s| s.users.iter().any(|u| u.username == username)))
    }

    fn email_taken(&self, email: &str) -> Result<bool, DomainError> {
        Ok(self.read(|s| s.users.iter().any(|u| u.email == email)))
    }

    fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.read(|s| s.users.clone()))
    }

    fn create(&self, user: NewUser) -> Result<User, DomainError> {
        self.write(|s| {
            if s.users.iter().any(|u| u.id == user.id) {
                return Err(DomainError::Conflict("Record already exists".to_string()));
            }
            let created = User {
                id: user.id,
                username: user.username,
                email: user.email,
                name: user.name.unwrap_or_default(),
                disabled: false,
                contact_number: user.contact_number,
                permanent_address: user.permanent_address,
                country: user.country,
                city: user.city,
                contact_number_2: user.contact_number_2,
            };
            s.users.push(created.clone());
            Ok(created)
        })
    }

    fn update(&self, id: &str, changes: UserChanges) -> Result<Option<User>, DomainError> {
        self.write(|s| {
            let Some(user) = s.users.iter_mut().find(|u| u.id == id) else {
                return Ok(None);
            };
            if let Some(v) = changes.name {
                user.name = v;
            }
            if let Some(v) = changes.disabled {
                user.disabled = v;
            }
            if let Some(v) = changes.city {
                user.city = v;
            }
            if let Some(v) = changes.country {
                user.country = v;
            }
            if let Some(v) = changes.contact_number {
                user.contact_number = v;
            }
            if let Some(v) = changes.permanent_address {
                user.permanent_address = v;
            }
            if let Some(v) = changes.contact_number_2 {
                user.contact_number_2 = Some(v);
            }
            Ok(Some(user.clone()))
        })
    }
}

fn product_view(state: &State, product: &Product) -> ProductView {
    let stars: Vec<&BigDecimal> = state
        .reviews
        .iter()
        .filter(|r| r.review.product_id == product.id)
        .map(|r| &r.review.stars)
        .collect();
    let average = if stars.is_empty() {
        0.0
    } else {
        let sum: BigDecimal = stars.iter().copied().sum();
        round_rating(&(sum / BigDecimal::from(stars.len() as i64)))
    };
    ProductView {
        product: product.clone(),
        total_reviews: stars.len() as i64,
        average_rating: average,
    }
}

impl ProductRepository for MemoryStore {
    fn exists(&self, id: &str) -> Result<bool, DomainError> {
        Ok(self.read(|s| s.product(id).is_some()))
    }

    fn list_with_aggregates(&self) -> Result<Vec<ProductView>, DomainError> {
        Ok(self.read(|s| s.products.iter().map(|p| product_view(s, p)).collect()))
    }

    fn find_with_aggregates(&self, id: &str) -> Result<Option<ProductView>, DomainError> {
        Ok(self.read(|s| s.product(id).map(|p| product_view(s, p))))
    }

    fn create(&self, product: NewProduct) -> Result<(), DomainError> {
        self.write(|s| {
            s.products.push(Product {
                id: product.id,
                name: product.name,
                image: product.image,
                images: product.images.filter(|v| !v.is_empty()),
                collection: product.collection,
                category: product.category,
                discount: product.discount,
                colors: product.colors.filter(|v| !v.is_empty()),
                description: product.description,
                prices: product.prices,
                stock: product.stock,
                kids: product.kids,
            });
            Ok(())
        })
    }

    fn update(&self, id: &str, changes: ProductChanges) -> Result<bool, DomainError> {
        self.write(|s| {
            let Some(product) = s.products.iter_mut().find(|p| p.id == id) else {
                return Ok(false);
            };
            if let Some(v) = changes.name {
                product.name = v;
            }
            if let Some(v) = changes.discount {
                product.discount = v;
            }
            if let Some(v) = changes.description {
                product.description = Some(v);
            }
            for (size, price) in changes.prices.iter() {
                if let Some(price) = price {
                    product.prices.set(size, price);
                }
            }
            for (size, stock) in changes.stock.iter() {
                if let Some(stock) = stock {
                    product.stock.set(size, stock);
                }
            }
            Ok(true)
        })
    }

    fn delete(&self, id: &str) -> Result<bool, DomainError> {
        self.write(|s| {
            let before = s.products.len();
            s.products.retain(|p| p.id != id);
            s.reviews.retain(|r| r.review.product_id != id);
            s.cart.retain(|l| l.product_id != id);
            s.order_items.retain(|i| i.product_id != id);
            Ok(s.products.len() != before)
        })
    }

    fn description(&self, id: &str) -> Result<Option<Option<String>>, DomainError> {
        Ok(self.read(|s| s.product(id).map(|p| p.description.clone())))
    }
}

impl ReviewRepository for MemoryStore {
    fn create(&self, review: NewReview) -> Result<i32, DomainError> {
        self.write(|s| {
            let id = s.next_id();
            s.reviews.push(StoredReview { id, review });
            Ok(id)
        })
    }

    fn find_detail(&self, review_id: i32) -> Result<Option<ReviewDetail>, DomainError> {
        Ok(self.read(|s| {
            s.reviews
                .iter()
                .find(|r| r.id == review_id)
                .and_then(|r| review_detail(s, &r.review))
        }))
    }

    fn list_for_product(&self, product_id: &str) -> Result<Vec<ReviewDetail>, DomainError> {
        Ok(self.read(|s| {
            s.reviews
                .iter()
                .filter(|r| r.review.product_id == product_id)
                .filter_map(|r| review_detail(s, &r.review))
                .collect()
        }))
    }

    fn exists_for(&self, user_id: &str, product_id: &str) -> Result<bool, DomainError> {
        Ok(self.read(|s| {
            s.reviews
                .iter()
                .any(|r| r.review.user_id == user_id && r.review.product_id == product_id)
        }))
    }
}

fn review_detail(state: &State, review: &NewReview) -> Option<ReviewDetail> {
    let user = state.users.iter().find(|u| u.id == review.user_id)?;
    Some(ReviewDetail {
        username: user.username.clone(),
        stars: review.stars.to_f64().unwrap_or(0.0),
        text: review.text.clone(),
        time: review.time,
    })
}

impl CartRepository for MemoryStore {
    fn merge(&self, line: NewCartLine) -> Result<(), DomainError> {
        self.write(|s| {
            match s.cart_position(&line.key) {
                Some(pos) => {
                    let stored = &mut s.cart[pos].quantity;
                    *stored = stored
                        .checked_add(line.quantity)
                        .ok_or_else(quantity_overflow)?;
                }
                None => s.cart.push(StoredCartLine {
                    user_id: line.key.user_id,
                    product_id: line.key.product_id,
                    size: line.key.size.as_str().to_string(),
                    quantity: line.quantity,
                    color: line.color,
                }),
            }
            Ok(())
        })
    }

    fn set_quantity(&self, key: &CartKey, quantity: i32) -> Result<bool, DomainError> {
        self.write(|s| match s.cart_position(key) {
            Some(pos) => {
                s.cart[pos].quantity = quantity;
                Ok(true)
            }
            None => Ok(false),
        })
    }

    fn remove(&self, key: &CartKey) -> Result<bool, DomainError> {
        self.write(|s| match s.cart_position(key) {
            Some(pos) => {
                s.cart.remove(pos);
                Ok(true)
            }
            None => Ok(false),
        })
    }

    fn lines(&self, user_id: &str) -> Result<Vec<CartLineRecord>, DomainError> {
        Ok(self.read(|s| {
            s.cart
                .iter()
                .filter(|l| l.user_id == user_id)
                .filter_map(|l| {
                    let product = s.product(&l.product_id)?;
                    Some(CartLineRecord {
                        user_id: l.user_id.clone(),
                        product_id: l.product_id.clone(),
                        product_name: product.name.clone(),
                        image: product.image.clone(),
                        collection: product.collection.clone(),
                        size: l.size.clone(),
                        quantity: l.quantity,
                        color: l.color.clone(),
                        prices: product.prices,
                    })
                })
                .collect()
        }))
    }

    fn count(&self, user_id: &str) -> Result<i64, DomainError> {
        Ok(self.read(|s| s.cart.iter().filter(|l| l.user_id == user_id).count() as i64))
    }
}

impl OrderRepository for MemoryStore {
    fn create_from_cart(&self, user_id: &str, order_time: NaiveDate) -> Result<i32, DomainError> {
        self.write(|s| {
            let lines: Vec<StoredCartLine> = s
                .cart
                .iter()
                .filter(|l| l.user_id == user_id)
                .cloned()
                .collect();
            if lines.is_empty() {
                return Err(DomainError::invalid("Cart is empty"));
            }

            let order_id = s.next_id();
            s.orders.push(StoredOrder {
                id: order_id,
                user_id: user_id.to_string(),
                status: INITIAL_STATUS.to_string(),
                time: order_time,
            });

            if s.fail_order_lines {
                return Err(DomainError::Unavailable("connection reset".to_string()));
            }
            for line in lines {
                let unit_price = s
                    .product(&line.product_id)
                    .map(|p| price_for_token(&p.prices, &line.size));
                s.order_items.push(StoredOrderItem {
                    order_id,
                    product_id: line.product_id,
                    size: line.size,
                    quantity: line.quantity,
                    color: line.color,
                    unit_price,
                });
            }
            s.cart.retain(|l| l.user_id != user_id);
            Ok(order_id)
        })
    }

    fn fetch(
        &self,
        scope: OrderScope<'_>,
        policy: PricingPolicy,
    ) -> Result<Vec<OrderRecord>, DomainError> {
        Ok(self.read(|s| {
            let mut orders: Vec<&StoredOrder> = s
                .orders
                .iter()
                .filter(|o| match scope {
                    OrderScope::All => true,
                    OrderScope::User(user_id) => o.user_id == user_id,
                    OrderScope::Order(id) => o.id == id,
                })
                .collect();
            orders.sort_by_key(|o| o.id);

            orders
                .into_iter()
                .filter_map(|order| {
                    let user = s.users.iter().find(|u| u.id == order.user_id)?;
                    let lines: Vec<OrderLineRecord> = s
                        .order_items
                        .iter()
                        .filter(|i| i.order_id == order.id)
                        .filter_map(|i| {
                            let product = s.product(&i.product_id)?;
                            Some(OrderLineRecord {
                                order_id: order.id,
                                product_id: i.product_id.clone(),
                                product_name: product.name.clone(),
                                size: i.size.clone(),
                                quantity: i.quantity,
                                color: i.color.clone(),
                                captured_unit_price: i.unit_price,
                                prices: product.prices,
                            })
                        })
                        .collect();
                    let total_price = lines
                        .iter()
                        .map(|l| {
                            policy.line_price(l.quantity, &l.size, &l.prices, l.captured_unit_price)
                        })
                        .sum();
                    Some(OrderRecord {
                        summary: OrderSummary {
                            order_id: order.id,
                            user_id: order.user_id.clone(),
                            username: user.username.clone(),
                            status: order.status.clone(),
                            order_time: order.time,
                            total_products: lines.len() as i64,
                            total_price,
                        },
                        lines,
                    })
                })
                .collect()
        }))
    }

    fn update_status(&self, order_id: i32, status: &str) -> Result<bool, DomainError> {
        self.write(|s| match s.orders.iter_mut().find(|o| o.id == order_id) {
            Some(order) => {
                order.status = status.to_string();
                Ok(true)
            }
            None => Ok(false),
        })
    }
}
