//! Garment sizes and the single table mapping each size to its per-size
//! product fields.
//!
//! Every price lookup in the service, in Rust or in SQL, goes through this
//! module so the mapping cannot drift between the cart and order views.

use std::fmt;
use std::str::FromStr;

use super::errors::DomainError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Size {
    XS,
    S,
    M,
    L,
    XL,
    XXL,
}

impl Size {
    pub const ALL: [Size; 6] = [Size::XS, Size::S, Size::M, Size::L, Size::XL, Size::XXL];

    pub fn as_str(self) -> &'static str {
        match self {
            Size::XS => "XS",
            Size::S => "S",
            Size::M => "M",
            Size::L => "L",
            Size::XL => "XL",
            Size::XXL => "XXL",
        }
    }

    /// Name of the `products` column holding the price for this size.
    pub fn price_column(self) -> &'static str {
        match self {
            Size::XS => "xs_price",
            Size::S => "s_price",
            Size::M => "m_price",
            Size::L => "l_price",
            Size::XL => "xl_price",
            Size::XXL => "xxl_price",
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Size {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Size::ALL
            .into_iter()
            .find(|size| size.as_str() == s)
            .ok_or_else(|| {
                DomainError::invalid(format!(
                    "unknown size '{s}', expected one of XS, S, M, L, XL, XXL"
                ))
            })
    }
}

/// One value per size, e.g. the six prices or six stock levels of a product.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SizeTable<T> {
    pub xs: T,
    pub s: T,
    pub m: T,
    pub l: T,
    pub xl: T,
    pub xxl: T,
}

impl<T: Copy> SizeTable<T> {
    pub fn get(&self, size: Size) -> T {
        match size {
            Size::XS => self.xs,
            Size::S => self.s,
            Size::M => self.m,
            Size::L => self.l,
            Size::XL => self.xl,
            Size::XXL => self.xxl,
        }
    }

    pub fn set(&mut self, size: Size, value: T) {
        let slot = match size {
            Size::XS => &mut self.xs,
            Size::S => &mut self.s,
            Size::M => &mut self.m,
            Size::L => &mut self.l,
            Size::XL => &mut self.xl,
            Size::XXL => &mut self.xxl,
        };
        *slot = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Size, T)> + '_ {
        Size::ALL.into_iter().map(move |size| (size, self.get(size)))
    }
}

/// Unit price for a stored size token. Tokens outside the table price at 0.
pub fn price_for_token(prices: &SizeTable<i32>, token: &str) -> i32 {
    token
        .parse::<Size>()
        .map(|size| prices.get(size))
        .unwrap_or(0)
}

/// SQL `CASE` expression selecting the price column matching `size_expr`.
pub fn price_case_sql(size_expr: &str, product_alias: &str) -> String {
    let arms: String = Size::ALL
        .iter()
        .map(|size| {
            format!(
                " WHEN '{}' THEN {}.{}",
                size.as_str(),
                product_alias,
                size.price_column()
            )
        })
        .collect();
    format!("CASE {size_expr}{arms} ELSE 0 END")
}
