pub mod activity;
pub mod booking;
pub mod id;
pub mod list;
pub mod participant;
pub mod product;
pub mod user;
