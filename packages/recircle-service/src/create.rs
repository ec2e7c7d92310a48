use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use recircle_domain::{
	slot::{self, Slot},
	status::PickupStatus,
};
use recircle_storage::{models::PickupRequest, pickups};

use crate::{Error, PickupService, Result, schedule};

pub const INITIAL_TRACKING_NOTE: &str = "Pickup request received, awaiting processing";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePickupRequest {
	pub user_id: i64,
	pub device_id: i64,
	pub address: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CreatePickupResponse {
	pub pickup_id: Uuid,
	pub district: String,
	pub pickup_date: String,
	pub pickup_time: String,
	pub position_in_queue: u32,
	pub status: String,
}

impl PickupService {
	/// Resolves the district, finds the next slot and persists the pickup
	/// request. The slot search runs either over plain count reads
	/// (default, count-then-decide) or under a per-district-per-day row
	/// lock when `scheduling.atomic_reservation` is set.
	pub async fn create_pickup(&self, req: CreatePickupRequest) -> Result<CreatePickupResponse> {
		let address = req.address.trim();

		if address.is_empty() {
			return Err(Error::InvalidRequest { message: "address is required.".to_string() });
		}
		if req.user_id <= 0 || req.device_id <= 0 {
			return Err(Error::InvalidRequest {
				message: "user_id and device_id are required.".to_string(),
			});
		}

		let district = self.extract_district(address).await;
		let pickup_id = Uuid::new_v4();
		let now = self.clock.now();
		let found = if self.cfg.scheduling.atomic_reservation {
			self.create_with_reservation(pickup_id, &req, address, &district, now).await?
		} else {
			let found = self.compute_schedule(&district).await?;
			let pickup = build_pickup(pickup_id, &req, address, &district, &found, now);

			pickups::insert_pickup(&self.db, &pickup).await?;

			found
		};

		tracing::info!(
			%pickup_id,
			%district,
			pickup_date = %slot::format_date(found.date),
			"New pickup request created."
		);

		Ok(CreatePickupResponse {
			pickup_id,
			district,
			pickup_date: slot::format_date(found.date),
			pickup_time: slot::format_time(found.time),
			position_in_queue: found.position_in_queue,
			status: PickupStatus::Pending.as_str().to_string(),
		})
	}

	/// Slot search and insert in one transaction. The counter row for each
	/// candidate day is locked before the capacity check, so concurrent
	/// submissions for the same district serialize instead of sharing a
	/// count snapshot.
	async fn create_with_reservation(
		&self,
		pickup_id: Uuid,
		req: &CreatePickupRequest,
		address: &str,
		district: &str,
		now: OffsetDateTime,
	) -> Result<Slot> {
		let policy = self.policy();
		let today = now.date();
		let time_now = now.time();
		let mut tx = self.db.pool.begin().await?;
		let mut candidate = slot::search_start(&policy, today, time_now)
			.ok_or_else(|| schedule::exhausted(district, &policy))?;

		for _ in 0..policy.max_lookahead_days {
			pickups::ensure_day_counter_tx(&mut tx, district, candidate).await?;

			let booked = pickups::lock_day_counter_tx(&mut tx, district, candidate).await?;
			let booked = booked.max(0) as u32;

			if let Some(found) = slot::place_in_day(&policy, candidate, today, time_now, booked) {
				let pickup = build_pickup(pickup_id, req, address, district, &found, now);

				pickups::bump_day_counter_tx(&mut tx, district, candidate).await?;
				pickups::insert_pickup_tx(&mut tx, &pickup).await?;
				tx.commit().await?;

				return Ok(found);
			}

			candidate =
				candidate.next_day().ok_or_else(|| schedule::exhausted(district, &policy))?;
		}

		tracing::error!(
			%district,
			lookahead_days = policy.max_lookahead_days,
			"No pickup slot within the lookahead bound; check the scheduling configuration."
		);

		Err(schedule::exhausted(district, &policy))
	}
}

fn build_pickup(
	pickup_id: Uuid,
	req: &CreatePickupRequest,
	address: &str,
	district: &str,
	found: &Slot,
	now: OffsetDateTime,
) -> PickupRequest {
	PickupRequest {
		pickup_id,
		user_id: req.user_id,
		device_id: req.device_id,
		address: address.to_string(),
		district: district.to_string(),
		scheduled_date: found.date,
		scheduled_time: found.time,
		status: PickupStatus::Pending.as_str().to_string(),
		tracking_note: INITIAL_TRACKING_NOTE.to_string(),
		created_at: now,
		updated_at: now,
	}
}
