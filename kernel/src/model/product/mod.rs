use crate::model::id::ProductId;

pub mod event;

#[derive(Debug)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: f64,
    pub stock: i32,
    pub category_name: String,
}

#[derive(Debug)]
pub struct ProductListOptions {
    pub limit: i64,
    pub offset: i64,
}
