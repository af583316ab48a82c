use crate::model::id::UserId;

/// The booking owner's public view.
#[derive(Debug, PartialEq, Eq)]
pub struct BookingUser {
    pub id: UserId,
    pub name: String,
    pub email: String,
}
