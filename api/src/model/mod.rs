pub mod booking;
pub mod product;
