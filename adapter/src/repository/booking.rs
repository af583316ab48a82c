use std::collections::{BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::NaiveDateTime;
use derive_new::new;
use kernel::model::{
    booking::{
        event::{CreateBooking, ReplaceParticipants},
        total_of, Booking, BookingLine,
    },
    id::{ActivityId, BookingId, ProductId, UserId},
    participant::Participant,
};
use kernel::repository::booking::BookingRepository;
use shared::error::{AppError, AppResult};
use sqlx::PgConnection;

use crate::database::{
    model::booking::{BookingLineRow, BookingParticipantRow, BookingRow},
    ConnectionPool,
};

const SELECT_BOOKINGS: &str = r#"
    SELECT
        b.booking_id,
        b.total_price,
        b.start_time,
        b.end_time,
        u.user_id,
        u.user_name,
        u.email,
        a.activity_id,
        a.activity_name,
        t.type_name
    FROM bookings AS b
    INNER JOIN users AS u ON b.user_id = u.user_id
    INNER JOIN activities AS a ON b.activity_id = a.activity_id
    INNER JOIN activity_types AS t ON a.type_id = t.type_id
"#;

#[derive(new)]
pub struct BookingRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl BookingRepository for BookingRepositoryImpl {
    async fn create(&self, event: CreateBooking) -> AppResult<BookingId> {
        if event.start_time >= event.end_time {
            return Err(AppError::UnprocessableEntity(
                "the booking must start before it ends".into(),
            ));
        }
        if event.lines.iter().any(|line| line.quantity < 1) {
            return Err(AppError::UnprocessableEntity(
                "every product line needs a quantity of at least 1".into(),
            ));
        }

        let mut tx = self.db.begin().await?;

        let user: Option<(UserId,)> =
            sqlx::query_as("SELECT user_id FROM users WHERE user_id = $1")
                .bind(event.user_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if user.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "User ({}) was not found",
                event.user_id
            )));
        }

        let activity: Option<(ActivityId,)> =
            sqlx::query_as("SELECT activity_id FROM activities WHERE activity_id = $1")
                .bind(event.activity_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if activity.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Activity ({}) was not found",
                event.activity_id
            )));
        }

        // Unit prices are resolved here, at the one place the stored total is
        // computed. Later participant updates leave the total untouched.
        let product_ids: Vec<i64> = event.lines.iter().map(|line| line.product_id.raw()).collect();
        let priced: Vec<(ProductId, String, f64)> = sqlx::query_as(
            "SELECT product_id, product_name, price FROM products WHERE product_id = ANY($1)",
        )
        .bind(&product_ids)
        .fetch_all(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;
        let prices: HashMap<ProductId, (String, f64)> = priced
            .into_iter()
            .map(|(id, name, price)| (id, (name, price)))
            .collect();

        let mut lines = Vec::with_capacity(event.lines.len());
        for line in &event.lines {
            let Some((product_name, unit_price)) = prices.get(&line.product_id) else {
                return Err(AppError::EntityNotFound(format!(
                    "Product ({}) was not found",
                    line.product_id
                )));
            };
            lines.push(BookingLine {
                product_id: line.product_id,
                product_name: product_name.clone(),
                unit_price: *unit_price,
                quantity: line.quantity,
            });
        }
        let total_price = total_of(&lines);

        let (booking_id,): (BookingId,) = sqlx::query_as(
            r#"
                INSERT INTO bookings (user_id, activity_id, start_time, end_time, total_price)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING booking_id
            "#,
        )
        .bind(event.user_id)
        .bind(event.activity_id)
        .bind(event.start_time)
        .bind(event.end_time)
        .bind(total_price)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let participant_ids: Vec<i64> = event
            .participant_ids
            .iter()
            .map(|id| id.raw())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !participant_ids.is_empty() {
            sqlx::query(
                r#"
                    INSERT INTO booking_participants (booking_id, participant_id)
                    SELECT $1, unnest($2::bigint[])
                "#,
            )
            .bind(booking_id)
            .bind(&participant_ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        for line in &event.lines {
            sqlx::query(
                r#"
                    INSERT INTO booking_products (booking_id, product_id, quantity)
                    VALUES ($1, $2, $3)
                    ON CONFLICT (booking_id, product_id)
                    DO UPDATE SET quantity = booking_products.quantity + EXCLUDED.quantity
                "#,
            )
            .bind(booking_id)
            .bind(line.product_id)
            .bind(line.quantity)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking_id)
    }

    async fn find_all(&self) -> AppResult<Vec<Booking>> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        let rows: Vec<BookingRow> =
            sqlx::query_as(&format!("{SELECT_BOOKINGS} ORDER BY b.booking_id"))
                .fetch_all(&mut *conn)
                .await
                .map_err(AppError::SpecificOperationError)?;
        Self::attach_relations(&mut conn, rows).await
    }

    async fn find_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Booking>> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            "{SELECT_BOOKINGS} WHERE b.user_id = $1 ORDER BY b.booking_id"
        ))
        .bind(user_id)
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::SpecificOperationError)?;
        Self::attach_relations(&mut conn, rows).await
    }

    async fn find_by_id(&self, booking_id: BookingId) -> AppResult<Option<Booking>> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        Self::fetch_by_id(&mut conn, booking_id).await
    }

    async fn find_by_activity_and_start_between(
        &self,
        activity_id: ActivityId,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> AppResult<Vec<Booking>> {
        let mut conn = self
            .db
            .inner_ref()
            .acquire()
            .await
            .map_err(AppError::SpecificOperationError)?;
        let rows: Vec<BookingRow> = sqlx::query_as(&format!(
            r#"{SELECT_BOOKINGS}
                WHERE b.activity_id = $1 AND b.start_time BETWEEN $2 AND $3
                ORDER BY b.booking_id"#
        ))
        .bind(activity_id)
        .bind(from)
        .bind(to)
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::SpecificOperationError)?;
        Self::attach_relations(&mut conn, rows).await
    }

    async fn replace_participants(&self, event: ReplaceParticipants) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // Lock the booking row so concurrent replacements of the same booking
        // serialize instead of silently dropping one caller's list.
        let locked: Option<(BookingId,)> =
            sqlx::query_as("SELECT booking_id FROM bookings WHERE booking_id = $1 FOR UPDATE")
                .bind(event.booking_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if locked.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Booking ({}) was not found",
                event.booking_id
            )));
        }

        sqlx::query("DELETE FROM booking_participants WHERE booking_id = $1")
            .bind(event.booking_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;

        let participant_ids: Vec<i64> = event
            .participant_ids
            .iter()
            .map(|id| id.raw())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();
        if !participant_ids.is_empty() {
            sqlx::query(
                r#"
                    INSERT INTO booking_participants (booking_id, participant_id)
                    SELECT $1, unnest($2::bigint[])
                "#,
            )
            .bind(event.booking_id)
            .bind(&participant_ids)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        }

        let booking = Self::fetch_by_id(&mut tx, event.booking_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("Booking ({}) was not found", event.booking_id))
            })?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(booking)
    }

    async fn delete(&self, booking_id: BookingId) -> AppResult<Booking> {
        let mut tx = self.db.begin().await?;

        // Fetch, snapshot and delete run under one row lock so a concurrent
        // delete of the same id serializes against this transaction.
        let locked: Option<(BookingId,)> =
            sqlx::query_as("SELECT booking_id FROM bookings WHERE booking_id = $1 FOR UPDATE")
                .bind(booking_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::SpecificOperationError)?;
        if locked.is_none() {
            return Err(AppError::EntityNotFound(format!(
                "Booking ({booking_id}) was not found"
            )));
        }

        let snapshot = Self::fetch_by_id(&mut tx, booking_id)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("Booking ({booking_id}) was not found"))
            })?;

        let res = sqlx::query("DELETE FROM bookings WHERE booking_id = $1")
            .bind(booking_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::SpecificOperationError)?;
        if res.rows_affected() < 1 {
            return Err(AppError::NoRowsAffectedError(
                "no booking record has been deleted".into(),
            ));
        }

        tx.commit().await.map_err(AppError::TransactionError)?;

        Ok(snapshot)
    }
}

impl BookingRepositoryImpl {
    async fn fetch_by_id(
        conn: &mut PgConnection,
        booking_id: BookingId,
    ) -> AppResult<Option<Booking>> {
        let row: Option<BookingRow> =
            sqlx::query_as(&format!("{SELECT_BOOKINGS} WHERE b.booking_id = $1"))
                .bind(booking_id)
                .fetch_optional(&mut *conn)
                .await
                .map_err(AppError::SpecificOperationError)?;
        let Some(row) = row else {
            return Ok(None);
        };
        Ok(Self::attach_relations(conn, vec![row]).await?.pop())
    }

    // Bookings come out of one join; participants and product lines are
    // fetched in two batched queries and zipped back onto their rows.
    async fn attach_relations(
        conn: &mut PgConnection,
        rows: Vec<BookingRow>,
    ) -> AppResult<Vec<Booking>> {
        if rows.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = rows.iter().map(|row| row.booking_id.raw()).collect();

        let line_rows: Vec<BookingLineRow> = sqlx::query_as(
            r#"
                SELECT bp.booking_id, p.product_id, p.product_name, p.price, bp.quantity
                FROM booking_products AS bp
                INNER JOIN products AS p ON bp.product_id = p.product_id
                WHERE bp.booking_id = ANY($1)
                ORDER BY bp.booking_id, p.product_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let participant_rows: Vec<BookingParticipantRow> = sqlx::query_as(
            r#"
                SELECT bp.booking_id, p.participant_id, p.participant_name
                FROM booking_participants AS bp
                INNER JOIN participants AS p ON bp.participant_id = p.participant_id
                WHERE bp.booking_id = ANY($1)
                ORDER BY bp.booking_id, p.participant_id
            "#,
        )
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await
        .map_err(AppError::SpecificOperationError)?;

        let mut lines_by_booking: HashMap<BookingId, Vec<BookingLine>> = HashMap::new();
        for row in line_rows {
            lines_by_booking
                .entry(row.booking_id)
                .or_default()
                .push(row.into());
        }
        let mut participants_by_booking: HashMap<BookingId, Vec<Participant>> = HashMap::new();
        for row in participant_rows {
            participants_by_booking
                .entry(row.booking_id)
                .or_default()
                .push(row.into());
        }

        Ok(rows
            .into_iter()
            .map(|row| {
                let participants = participants_by_booking
                    .remove(&row.booking_id)
                    .unwrap_or_default();
                let lines = lines_by_booking.remove(&row.booking_id).unwrap_or_default();
                row.into_booking(participants, lines)
            })
            .collect())
    }
}
