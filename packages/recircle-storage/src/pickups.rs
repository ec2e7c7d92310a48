use sqlx::{Executor, Postgres, Transaction};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::{Result, db::Db, models::PickupRequest};

pub async fn insert_pickup(db: &Db, pickup: &PickupRequest) -> Result<()> {
	insert_pickup_exec(&db.pool, pickup).await?;

	Ok(())
}

pub async fn insert_pickup_tx(
	tx: &mut Transaction<'_, Postgres>,
	pickup: &PickupRequest,
) -> Result<()> {
	insert_pickup_exec(&mut **tx, pickup).await?;

	Ok(())
}

/// Bookings for one district on one day. District matching is exact string
/// equality; rows keep counting toward the day regardless of status.
pub async fn count_for_day(db: &Db, district: &str, day: Date) -> Result<i64> {
	count_for_day_exec(&db.pool, district, day).await
}

pub async fn count_for_day_tx(
	tx: &mut Transaction<'_, Postgres>,
	district: &str,
	day: Date,
) -> Result<i64> {
	count_for_day_exec(&mut **tx, district, day).await
}

pub async fn fetch_by_user(db: &Db, user_id: i64) -> Result<Vec<PickupRequest>> {
	let pickups = sqlx::query_as::<_, PickupRequest>(
		"\
SELECT pickup_id, user_id, device_id, address, district, scheduled_date, scheduled_time,
	status, tracking_note, created_at, updated_at
FROM pickup_requests
WHERE user_id = $1
ORDER BY updated_at DESC, created_at DESC",
	)
	.bind(user_id)
	.fetch_all(&db.pool)
	.await?;

	Ok(pickups)
}

pub async fn fetch_one(db: &Db, pickup_id: Uuid) -> Result<Option<PickupRequest>> {
	let pickup = sqlx::query_as::<_, PickupRequest>(
		"\
SELECT pickup_id, user_id, device_id, address, district, scheduled_date, scheduled_time,
	status, tracking_note, created_at, updated_at
FROM pickup_requests
WHERE pickup_id = $1",
	)
	.bind(pickup_id)
	.fetch_optional(&db.pool)
	.await?;

	Ok(pickup)
}

/// Returns false when no row matched the pickup id.
pub async fn update_status(
	db: &Db,
	pickup_id: Uuid,
	status: &str,
	tracking_note: &str,
	updated_at: OffsetDateTime,
) -> Result<bool> {
	let result = sqlx::query(
		"\
UPDATE pickup_requests
SET status = $1, tracking_note = $2, updated_at = $3
WHERE pickup_id = $4",
	)
	.bind(status)
	.bind(tracking_note)
	.bind(updated_at)
	.bind(pickup_id)
	.execute(&db.pool)
	.await?;

	Ok(result.rows_affected() > 0)
}

/// Creates the counter row for (district, day) when absent so the
/// follow-up `FOR UPDATE` read always has a row to lock.
pub async fn ensure_day_counter_tx(
	tx: &mut Transaction<'_, Postgres>,
	district: &str,
	day: Date,
) -> Result<()> {
	sqlx::query(
		"\
INSERT INTO pickup_day_counters (district, day, booked)
VALUES ($1, $2, 0)
ON CONFLICT (district, day) DO NOTHING",
	)
	.bind(district)
	.bind(day)
	.execute(&mut **tx)
	.await?;

	Ok(())
}

/// Locks the counter row for the rest of the transaction and returns the
/// booked count observed under the lock.
pub async fn lock_day_counter_tx(
	tx: &mut Transaction<'_, Postgres>,
	district: &str,
	day: Date,
) -> Result<i32> {
	let booked = sqlx::query_scalar::<_, i32>(
		"SELECT booked FROM pickup_day_counters WHERE district = $1 AND day = $2 FOR UPDATE",
	)
	.bind(district)
	.bind(day)
	.fetch_one(&mut **tx)
	.await?;

	Ok(booked)
}

pub async fn bump_day_counter_tx(
	tx: &mut Transaction<'_, Postgres>,
	district: &str,
	day: Date,
) -> Result<()> {
	sqlx::query(
		"UPDATE pickup_day_counters SET booked = booked + 1 WHERE district = $1 AND day = $2",
	)
	.bind(district)
	.bind(day)
	.execute(&mut **tx)
	.await?;

	Ok(())
}

async fn insert_pickup_exec<'e, E>(executor: E, pickup: &PickupRequest) -> Result<()>
where
	E: Executor<'e, Database = Postgres>,
{
	sqlx::query(
		"\
INSERT INTO pickup_requests (
	pickup_id,
	user_id,
	device_id,
	address,
	district,
	scheduled_date,
	scheduled_time,
	status,
	tracking_note,
	created_at,
	updated_at
)
VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
	)
	.bind(pickup.pickup_id)
	.bind(pickup.user_id)
	.bind(pickup.device_id)
	.bind(pickup.address.as_str())
	.bind(pickup.district.as_str())
	.bind(pickup.scheduled_date)
	.bind(pickup.scheduled_time)
	.bind(pickup.status.as_str())
	.bind(pickup.tracking_note.as_str())
	.bind(pickup.created_at)
	.bind(pickup.updated_at)
	.execute(executor)
	.await?;

	Ok(())
}

async fn count_for_day_exec<'e, E>(executor: E, district: &str, day: Date) -> Result<i64>
where
	E: Executor<'e, Database = Postgres>,
{
	let count = sqlx::query_scalar::<_, i64>(
		"SELECT COUNT(*) FROM pickup_requests WHERE district = $1 AND scheduled_date = $2",
	)
	.bind(district)
	.bind(day)
	.fetch_one(executor)
	.await?;

	Ok(count)
}
