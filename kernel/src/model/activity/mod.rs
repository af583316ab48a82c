use crate::model::id::ActivityId;

/// The bookable resource (a lane, a court) as embedded in booking views.
#[derive(Debug, PartialEq, Eq)]
pub struct BookingActivity {
    pub id: ActivityId,
    pub name: String,
    pub activity_type: String,
}
