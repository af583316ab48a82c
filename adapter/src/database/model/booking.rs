use kernel::model::{
    activity::BookingActivity,
    booking::{Booking, BookingLine},
    id::{ActivityId, BookingId, ParticipantId, ProductId, UserId},
    participant::Participant,
    user::BookingUser,
};
use sqlx::types::chrono::NaiveDateTime;

// One row of the bookings/users/activities join. Participants and product
// lines are fetched separately and attached via `into_booking`.
#[derive(sqlx::FromRow)]
pub struct BookingRow {
    pub booking_id: BookingId,
    pub total_price: f64,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub user_id: UserId,
    pub user_name: String,
    pub email: String,
    pub activity_id: ActivityId,
    pub activity_name: String,
    pub type_name: String,
}

impl BookingRow {
    pub fn into_booking(self, participants: Vec<Participant>, lines: Vec<BookingLine>) -> Booking {
        let BookingRow {
            booking_id,
            total_price,
            start_time,
            end_time,
            user_id,
            user_name,
            email,
            activity_id,
            activity_name,
            type_name,
        } = self;
        Booking {
            id: booking_id,
            total_price,
            start_time,
            end_time,
            user: BookingUser {
                id: user_id,
                name: user_name,
                email,
            },
            activity: BookingActivity {
                id: activity_id,
                name: activity_name,
                activity_type: type_name,
            },
            participants,
            lines,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct BookingLineRow {
    pub booking_id: BookingId,
    pub product_id: ProductId,
    pub product_name: String,
    pub price: f64,
    pub quantity: i32,
}

impl From<BookingLineRow> for BookingLine {
    fn from(value: BookingLineRow) -> Self {
        let BookingLineRow {
            booking_id: _,
            product_id,
            product_name,
            price,
            quantity,
        } = value;
        BookingLine {
            product_id,
            product_name,
            unit_price: price,
            quantity,
        }
    }
}

#[derive(sqlx::FromRow)]
pub struct BookingParticipantRow {
    pub booking_id: BookingId,
    pub participant_id: ParticipantId,
    pub participant_name: String,
}

impl From<BookingParticipantRow> for Participant {
    fn from(value: BookingParticipantRow) -> Self {
        let BookingParticipantRow {
            booking_id: _,
            participant_id,
            participant_name,
        } = value;
        Participant {
            id: participant_id,
            name: participant_name,
        }
    }
}
