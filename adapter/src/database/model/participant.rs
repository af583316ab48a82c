use kernel::model::{id::ParticipantId, participant::Participant};

#[derive(sqlx::FromRow)]
pub struct ParticipantRow {
    pub participant_id: ParticipantId,
    pub participant_name: String,
}

impl From<ParticipantRow> for Participant {
    fn from(value: ParticipantRow) -> Self {
        let ParticipantRow {
            participant_id,
            participant_name,
        } = value;
        Participant {
            id: participant_id,
            name: participant_name,
        }
    }
}
