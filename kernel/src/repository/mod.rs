pub mod booking;
pub mod health;
pub mod participant;
pub mod product;
