use kernel::model::{id::ProductId, product::Product};

#[derive(sqlx::FromRow)]
pub struct ProductRow {
    pub product_id: ProductId,
    pub product_name: String,
    pub image_url: String,
    pub price: f64,
    pub stock: i32,
    pub category_name: String,
}

impl From<ProductRow> for Product {
    fn from(value: ProductRow) -> Self {
        let ProductRow {
            product_id,
            product_name,
            image_url,
            price,
            stock,
            category_name,
        } = value;
        Product {
            id: product_id,
            name: product_name,
            image_url,
            price,
            stock,
            category_name,
        }
    }
}
