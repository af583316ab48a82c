use chrono::{NaiveDate, NaiveDateTime};
use kernel::model::{
    activity::BookingActivity,
    booking::{Booking, BookingLine, OccupiedTime},
    id::{ActivityId, BookingId, UserId},
    participant::Participant,
    user::BookingUser,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingListQuery {
    pub user_id: Option<UserId>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedTimesQuery {
    pub activity_id: ActivityId,
    pub date: NaiveDate,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingsResponse {
    pub items: Vec<BookingResponse>,
}

impl From<Vec<Booking>> for BookingsResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value.into_iter().map(BookingResponse::from).collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingResponse {
    pub id: BookingId,
    pub total_price: f64,
    pub start_time: String,
    pub end_time: String,
    pub user: BookingUserResponse,
    pub activity: BookingActivityResponse,
    pub participants: Vec<String>,
    pub products: Vec<BookingProductResponse>,
}

impl From<Booking> for BookingResponse {
    fn from(value: Booking) -> Self {
        let Booking {
            id,
            total_price,
            start_time,
            end_time,
            user,
            activity,
            participants,
            lines,
        } = value;
        Self {
            id,
            total_price,
            start_time: format_timestamp(start_time),
            end_time: format_timestamp(end_time),
            user: user.into(),
            activity: activity.into(),
            participants: participants
                .into_iter()
                .map(|Participant { name, .. }| name)
                .collect(),
            products: lines.into_iter().map(BookingProductResponse::from).collect(),
        }
    }
}

// Minute precision, no seconds, no timezone.
fn format_timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M").to_string()
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingUserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
}

impl From<BookingUser> for BookingUserResponse {
    fn from(value: BookingUser) -> Self {
        let BookingUser { id, name, email } = value;
        Self { id, name, email }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingActivityResponse {
    pub id: ActivityId,
    pub name: String,
    pub activity_type: String,
}

impl From<BookingActivity> for BookingActivityResponse {
    fn from(value: BookingActivity) -> Self {
        let BookingActivity {
            id,
            name,
            activity_type,
        } = value;
        Self {
            id,
            name,
            activity_type,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingProductResponse {
    pub product_name: String,
    pub quantity: i32,
    pub unit_price: f64,
    pub line_total: f64,
}

impl From<BookingLine> for BookingProductResponse {
    fn from(value: BookingLine) -> Self {
        let line_total = value.line_total();
        let BookingLine {
            product_id: _,
            product_name,
            unit_price,
            quantity,
        } = value;
        Self {
            product_name,
            quantity,
            unit_price,
            line_total,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedTimesResponse {
    pub items: Vec<OccupiedTimeResponse>,
}

impl From<Vec<Booking>> for OccupiedTimesResponse {
    fn from(value: Vec<Booking>) -> Self {
        Self {
            items: value
                .iter()
                .map(OccupiedTime::from)
                .map(OccupiedTimeResponse::from)
                .collect(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupiedTimeResponse {
    pub duration_hours: i64,
    pub start_hour: String,
}

impl From<OccupiedTime> for OccupiedTimeResponse {
    fn from(value: OccupiedTime) -> Self {
        let OccupiedTime {
            duration_hours,
            start_hour,
        } = value;
        Self {
            duration_hours,
            start_hour,
        }
    }
}

#[cfg(test)]
mod tests {
    use kernel::model::id::{ParticipantId, ProductId};
    use serde_json::json;

    use super::*;

    fn booking() -> Booking {
        Booking {
            id: BookingId::new(7),
            total_price: 85.0,
            start_time: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(10, 30, 0)
                .unwrap(),
            end_time: NaiveDate::from_ymd_opt(2024, 5, 1)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap(),
            user: BookingUser {
                id: UserId::new(1),
                name: "Jens Hansen".into(),
                email: "jens.hansen@example.com".into(),
            },
            activity: BookingActivity {
                id: ActivityId::new(3),
                name: "Bane 1".into(),
                activity_type: "Bowling Standard".into(),
            },
            participants: vec![
                Participant {
                    id: ParticipantId::new(1),
                    name: "Alice".into(),
                },
                Participant {
                    id: ParticipantId::new(2),
                    name: "Bob".into(),
                },
            ],
            lines: vec![BookingLine {
                product_id: ProductId::new(1),
                product_name: "Pepsi 33cl.".into(),
                unit_price: 20.0,
                quantity: 3,
            }],
        }
    }

    #[test]
    fn booking_view_formats_timestamps_to_the_minute() {
        let res = BookingResponse::from(booking());
        assert_eq!(res.start_time, "2024-05-01T10:30");
        assert_eq!(res.end_time, "2024-05-01T12:00");
    }

    #[test]
    fn booking_view_serializes_with_camel_case_wire_names() {
        let value = serde_json::to_value(BookingResponse::from(booking())).unwrap();
        assert_eq!(value["id"], json!(7));
        assert_eq!(value["totalPrice"], json!(85.0));
        assert_eq!(value["user"]["email"], json!("jens.hansen@example.com"));
        assert_eq!(value["activity"]["activityType"], json!("Bowling Standard"));
        assert_eq!(value["participants"], json!(["Alice", "Bob"]));
        assert_eq!(
            value["products"][0],
            json!({
                "productName": "Pepsi 33cl.",
                "quantity": 3,
                "unitPrice": 20.0,
                "lineTotal": 60.0,
            })
        );
    }

    #[test]
    fn occupied_view_keeps_store_order_and_duplicates() {
        let mut first = booking();
        first.start_time = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(10, 0, 0)
            .unwrap();
        let second = booking();
        let res = OccupiedTimesResponse::from(vec![first, second]);
        assert_eq!(res.items.len(), 2);
        assert_eq!(res.items[0].duration_hours, 2);
        assert_eq!(res.items[0].start_hour, "10:00");
        // A 10:30 start still renders as the bare hour.
        assert_eq!(res.items[1].duration_hours, 1);
        assert_eq!(res.items[1].start_hour, "10:00");
    }
}
