use chrono::NaiveDateTime;
use derive_new::new;

use crate::model::id::{ActivityId, BookingId, ParticipantId, ProductId, UserId};

#[derive(new)]
pub struct CreateBooking {
    pub user_id: UserId,
    pub activity_id: ActivityId,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub participant_ids: Vec<ParticipantId>,
    pub lines: Vec<CreateBookingLine>,
}

#[derive(new)]
pub struct CreateBookingLine {
    pub product_id: ProductId,
    pub quantity: i32,
}

#[derive(new)]
pub struct ReplaceParticipants {
    pub booking_id: BookingId,
    pub participant_ids: Vec<ParticipantId>,
}
