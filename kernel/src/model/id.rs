use serde::{Deserialize, Serialize};

/// Database-assigned numeric identifiers, one newtype per entity so the
/// compiler keeps booking ids from leaking into activity lookups and so on.
macro_rules! define_id {
    ($id_type:ident) => {
        #[derive(
            Debug,
            Clone,
            Copy,
            PartialEq,
            Eq,
            PartialOrd,
            Ord,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_type(i64);

        impl $id_type {
            pub fn new(value: i64) -> Self {
                Self(value)
            }

            pub fn raw(self) -> i64 {
                self.0
            }
        }

        impl From<i64> for $id_type {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }

        impl std::fmt::Display for $id_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(BookingId);
define_id!(UserId);
define_id!(ActivityId);
define_id!(ParticipantId);
define_id!(ProductId);
define_id!(CategoryId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_renders_as_its_raw_value() {
        let id = BookingId::new(7);
        assert_eq!(id.to_string(), "7");
        assert_eq!(id.raw(), 7);
    }

    #[test]
    fn ids_of_the_same_entity_compare_by_value() {
        assert_eq!(ProductId::from(3), ProductId::new(3));
        assert_ne!(ProductId::new(3), ProductId::new(4));
    }
}
