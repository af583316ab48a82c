use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::model::id::ProductId;
use registry::AppRegistry;
use shared::error::AppResult;

use crate::model::product::{
    CreateProductRequest, PaginatedProductResponse, ProductListQuery, ProductResponse,
    UpdateProductRequest, UpdateProductRequestWithId,
};

pub async fn show_product_list(
    Query(query): Query<ProductListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<PaginatedProductResponse>> {
    query.validate(&())?;

    registry
        .product_repository()
        .find_all(query.into())
        .await
        .map(PaginatedProductResponse::from)
        .map(Json)
}

pub async fn register_product(
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateProductRequest>,
) -> AppResult<(StatusCode, Json<ProductResponse>)> {
    req.validate(&())?;

    registry
        .product_repository()
        .create(req.into())
        .await
        .map(|product| (StatusCode::CREATED, Json(product.into())))
}

pub async fn update_product(
    Path(product_id): Path<ProductId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateProductRequest>,
) -> AppResult<Json<ProductResponse>> {
    req.validate(&())?;

    let update_product = UpdateProductRequestWithId::new(product_id, req);
    registry
        .product_repository()
        .update(update_product.into())
        .await
        .map(ProductResponse::from)
        .map(Json)
}
