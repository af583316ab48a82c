pub mod booking;
pub mod participant;
pub mod product;
