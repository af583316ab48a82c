use axum::{
    routing::{get, post, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::product::{register_product, show_product_list, update_product};

pub fn build_product_routers() -> Router<AppRegistry> {
    let product_routers = Router::new()
        .route("/", get(show_product_list))
        .route("/", post(register_product))
        .route("/:product_id", put(update_product));

    Router::new().nest("/products", product_routers)
}
