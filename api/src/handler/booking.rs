use std::collections::BTreeSet;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use kernel::model::{
    booking::{day_window, event::ReplaceParticipants},
    id::BookingId,
};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

use crate::model::booking::{
    BookingListQuery, BookingResponse, BookingsResponse, OccupiedTimesQuery,
    OccupiedTimesResponse,
};

pub async fn show_booking_list(
    Query(query): Query<BookingListQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingsResponse>> {
    let bookings = match query.user_id {
        Some(user_id) => {
            registry
                .booking_repository()
                .find_by_user_id(user_id)
                .await?
        }
        None => registry.booking_repository().find_all().await?,
    };
    Ok(Json(bookings.into()))
}

/// Availability display: which hour ranges of one activity's day are taken.
/// An unknown activity id legitimately answers "nothing occupied".
pub async fn show_occupied_times(
    Query(query): Query<OccupiedTimesQuery>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<OccupiedTimesResponse>> {
    let (from, to) = day_window(query.date);
    registry
        .booking_repository()
        .find_by_activity_and_start_between(query.activity_id, from, to)
        .await
        .map(OccupiedTimesResponse::from)
        .map(Json)
}

pub async fn update_booking_participants(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
    Json(names): Json<Vec<String>>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .find_by_id(booking_id)
        .await?
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("Booking ({booking_id}) was not found"))
        })?;

    // Exact-match dedup: "Alice" twice collapses, "Alice"/"alice" stay apart.
    let names: Vec<String> = names
        .into_iter()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let participants = registry.participant_repository().resolve(names).await?;
    let participant_ids = participants.into_iter().map(|p| p.id).collect();

    registry
        .booking_repository()
        .replace_participants(ReplaceParticipants::new(booking_id, participant_ids))
        .await
        .map(BookingResponse::from)
        .map(Json)
}

/// Returns the booking's last known state; the snapshot and the removal are
/// one unit of work in the store.
pub async fn delete_booking(
    Path(booking_id): Path<BookingId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<BookingResponse>> {
    registry
        .booking_repository()
        .delete(booking_id)
        .await
        .map(BookingResponse::from)
        .map(Json)
}
