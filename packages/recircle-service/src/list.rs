use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recircle_domain::slot;
use recircle_storage::{models::PickupRequest, pickups};

use crate::{Error, PickupService, Result};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PickupView {
	pub pickup_id: Uuid,
	pub user_id: i64,
	pub device_id: i64,
	pub address: String,
	pub district: String,
	pub scheduled_date: String,
	pub scheduled_time: String,
	pub status: String,
	pub tracking_note: String,
	#[serde(with = "crate::time_serde")]
	pub created_at: time::OffsetDateTime,
	#[serde(with = "crate::time_serde")]
	pub updated_at: time::OffsetDateTime,
}
impl From<PickupRequest> for PickupView {
	fn from(pickup: PickupRequest) -> Self {
		Self {
			pickup_id: pickup.pickup_id,
			user_id: pickup.user_id,
			device_id: pickup.device_id,
			address: pickup.address,
			district: pickup.district,
			scheduled_date: slot::format_date(pickup.scheduled_date),
			scheduled_time: slot::format_time(pickup.scheduled_time),
			status: pickup.status,
			tracking_note: pickup.tracking_note,
			created_at: pickup.created_at,
			updated_at: pickup.updated_at,
		}
	}
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ListPickupsResponse {
	pub pickups: Vec<PickupView>,
}

impl PickupService {
	pub async fn list_pickups(&self, user_id: i64) -> Result<ListPickupsResponse> {
		if user_id <= 0 {
			return Err(Error::InvalidRequest { message: "user_id is required.".to_string() });
		}

		let pickups = pickups::fetch_by_user(&self.db, user_id).await?;

		Ok(ListPickupsResponse { pickups: pickups.into_iter().map(PickupView::from).collect() })
	}

	pub async fn fetch_pickup(&self, pickup_id: Uuid) -> Result<PickupView> {
		let pickup = pickups::fetch_one(&self.db, pickup_id).await?.ok_or_else(|| {
			Error::NotFound { message: format!("Pickup request {pickup_id} does not exist.") }
		})?;

		Ok(pickup.into())
	}
}
