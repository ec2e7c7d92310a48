use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recircle_domain::status::PickupStatus;
use recircle_storage::pickups;

use crate::{Error, PickupService, Result};

pub const CANCELLED_TRACKING_NOTE: &str = "Cancelled by user";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CancelPickupResponse {
	pub pickup_id: Uuid,
	pub status: String,
}

impl PickupService {
	/// Cancels a pending pickup on behalf of its owner. Requests that have
	/// progressed past `pending` stay untouched.
	pub async fn cancel_pickup(&self, pickup_id: Uuid, user_id: i64) -> Result<CancelPickupResponse> {
		let pickup = pickups::fetch_one(&self.db, pickup_id).await?.ok_or_else(|| {
			Error::NotFound { message: format!("Pickup request {pickup_id} does not exist.") }
		})?;

		if pickup.user_id != user_id {
			return Err(Error::AccessDenied {
				message: "You can only cancel your own pickup requests.".to_string(),
			});
		}
		if pickup.status != PickupStatus::Pending.as_str() {
			return Err(Error::InvalidRequest {
				message: "Only pending pickup requests can be cancelled.".to_string(),
			});
		}

		pickups::update_status(
			&self.db,
			pickup_id,
			PickupStatus::Cancelled.as_str(),
			CANCELLED_TRACKING_NOTE,
			self.clock.now(),
		)
		.await?;

		tracing::info!(%pickup_id, user_id, "Pickup request cancelled by user.");

		Ok(CancelPickupResponse {
			pickup_id,
			status: PickupStatus::Cancelled.as_str().to_string(),
		})
	}
}
