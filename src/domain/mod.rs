pub mod cart;
pub mod catalog;
pub mod dates;
pub mod errors;
pub mod order;
pub mod ports;
pub mod pricing;
pub mod review;
pub mod size;
pub mod user;
