use axum::{
    routing::{delete, get, put},
    Router,
};
use registry::AppRegistry;

use crate::handler::booking::{
    delete_booking, show_booking_list, show_occupied_times, update_booking_participants,
};

pub fn build_booking_routers() -> Router<AppRegistry> {
    let booking_routers = Router::new()
        .route("/", get(show_booking_list))
        .route("/occupied", get(show_occupied_times))
        .route("/:booking_id", delete(delete_booking))
        .route("/:booking_id/participants", put(update_booking_participants));

    Router::new().nest("/bookings", booking_routers)
}
