use derive_new::new;

use crate::model::id::ProductId;

#[derive(new)]
pub struct CreateProduct {
    pub name: String,
    pub image_url: String,
    pub price: f64,
    pub stock: i32,
    pub category_name: String,
}

#[derive(new)]
pub struct UpdateProduct {
    pub product_id: ProductId,
    pub name: String,
    pub image_url: String,
    pub price: f64,
    pub stock: i32,
    pub category_name: String,
}
