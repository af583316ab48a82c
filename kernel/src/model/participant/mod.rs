use crate::model::id::ParticipantId;

/// A named individual attached to bookings. Name is the natural key: two
/// bookings referencing the same name share one participant row. Participants
/// are created lazily and never deleted by booking operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}
