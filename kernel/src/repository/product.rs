use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    list::PaginatedList,
    product::{
        event::{CreateProduct, UpdateProduct},
        Product, ProductListOptions,
    },
};

#[async_trait]
pub trait ProductRepository: Send + Sync {
    async fn find_all(&self, options: ProductListOptions) -> AppResult<PaginatedList<Product>>;
    async fn create(&self, event: CreateProduct) -> AppResult<Product>;
    async fn update(&self, event: UpdateProduct) -> AppResult<Product>;
}
