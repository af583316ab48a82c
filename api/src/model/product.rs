use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::ProductId,
    list::PaginatedList,
    product::{
        event::{CreateProduct, UpdateProduct},
        Product, ProductListOptions,
    },
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    #[garde(range(min = 0))]
    #[serde(default = "default_limit")]
    pub limit: i64,
    #[garde(range(min = 0))]
    #[serde(default)]
    pub offset: i64,
}

const DEFAULT_LIMIT: i64 = 10;
fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

impl From<ProductListQuery> for ProductListOptions {
    fn from(value: ProductListQuery) -> Self {
        let ProductListQuery { limit, offset } = value;
        Self { limit, offset }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub image: String,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(range(min = 0))]
    pub stock: i32,
    #[garde(length(min = 1))]
    pub category: String,
}

impl From<CreateProductRequest> for CreateProduct {
    fn from(value: CreateProductRequest) -> Self {
        let CreateProductRequest {
            name,
            image,
            price,
            stock,
            category,
        } = value;
        CreateProduct {
            name,
            image_url: image,
            price,
            stock,
            category_name: category,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[garde(length(min = 1))]
    pub name: String,
    #[garde(skip)]
    pub image: String,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(range(min = 0))]
    pub stock: i32,
    #[garde(length(min = 1))]
    pub category: String,
}

#[derive(new)]
pub struct UpdateProductRequestWithId {
    product_id: ProductId,
    request: UpdateProductRequest,
}

impl From<UpdateProductRequestWithId> for UpdateProduct {
    fn from(value: UpdateProductRequestWithId) -> Self {
        let UpdateProductRequestWithId {
            product_id,
            request:
                UpdateProductRequest {
                    name,
                    image,
                    price,
                    stock,
                    category,
                },
        } = value;
        UpdateProduct {
            product_id,
            name,
            image_url: image,
            price,
            stock,
            category_name: category,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginatedProductResponse {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    pub items: Vec<ProductResponse>,
}

impl From<PaginatedList<Product>> for PaginatedProductResponse {
    fn from(value: PaginatedList<Product>) -> Self {
        let PaginatedList {
            total,
            limit,
            offset,
            items,
        } = value;
        Self {
            total,
            limit,
            offset,
            items: items.into_iter().map(ProductResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub price: f64,
    pub stock: i32,
    pub category: String,
}

impl From<Product> for ProductResponse {
    fn from(value: Product) -> Self {
        let Product {
            id,
            name,
            image_url,
            price,
            stock,
            category_name,
        } = value;
        Self {
            id,
            name,
            image: image_url,
            price,
            stock,
            category: category_name,
        }
    }
}
