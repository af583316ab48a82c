use async_trait::async_trait;
use chrono::NaiveDateTime;
use shared::error::AppResult;

use crate::model::{
    booking::{
        event::{CreateBooking, ReplaceParticipants},
        Booking,
    },
    id::{ActivityId, BookingId, UserId},
};

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Persists a booking together with its participants and product lines,
    /// computing the stored total price from the resolved unit prices.
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId>;
    async fn find_all(&self) -> AppResult<Vec<Booking>>;
    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>>;
    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>>;
    /// Bookings on one activity whose start time falls within the inclusive
    /// window, in store retrieval order.
    async fn find_by_activity_and_start_between(
        &self,
        activity_id: ActivityId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> AppResult<Vec<Booking>>;
    /// Replaces the booking's participant set wholesale and returns the
    /// updated booking. Serializes against concurrent replacements of the
    /// same booking. Does not touch the stored total price.
    async fn replace_participants(&self, event: ReplaceParticipants) -> AppResult<Booking>;
    /// Deletes the booking and returns its state as of just before the
    /// delete, atomically.
    async fn delete(&self, booking_id: BookingId) -> AppResult<Booking>;
}
