pub mod cart_service;
pub mod catalog_service;
pub mod order_service;
pub mod profile_service;
pub mod review_service;

#[cfg(test)]
pub(crate) mod memory;
