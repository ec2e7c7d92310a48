use time::{Date, OffsetDateTime, Time};
use uuid::Uuid;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct PickupRequest {
	pub pickup_id: Uuid,
	pub user_id: i64,
	pub device_id: i64,
	pub address: String,
	pub district: String,
	pub scheduled_date: Date,
	pub scheduled_time: Time,
	pub status: String,
	pub tracking_note: String,
	pub created_at: OffsetDateTime,
	pub updated_at: OffsetDateTime,
}
