use serde::{Deserialize, Serialize};
use uuid::Uuid;

use recircle_domain::status::PickupStatus;
use recircle_storage::pickups;

use crate::{Error, PickupService, Result, list::PickupView};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateStatusRequest {
	pub status: String,
	pub tracking_note: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpdateStatusResponse {
	pub pickup: PickupView,
}

impl PickupService {
	/// Admin transition of a pickup's lifecycle status. When the request
	/// carries no tracking note, the status's stock note is applied.
	pub async fn update_pickup_status(
		&self,
		pickup_id: Uuid,
		req: UpdateStatusRequest,
	) -> Result<UpdateStatusResponse> {
		let status = req
			.status
			.parse::<PickupStatus>()
			.map_err(|err| Error::InvalidRequest { message: err.to_string() })?;
		let note = req
			.tracking_note
			.as_deref()
			.map(str::trim)
			.filter(|note| !note.is_empty())
			.map(str::to_string)
			.unwrap_or_else(|| status.default_tracking_note().to_string());
		let updated = pickups::update_status(
			&self.db,
			pickup_id,
			status.as_str(),
			&note,
			self.clock.now(),
		)
		.await?;

		if !updated {
			return Err(Error::NotFound {
				message: format!("Pickup request {pickup_id} does not exist."),
			});
		}

		let pickup = pickups::fetch_one(&self.db, pickup_id).await?.ok_or_else(|| {
			Error::NotFound { message: format!("Pickup request {pickup_id} does not exist.") }
		})?;

		tracing::info!(%pickup_id, status = status.as_str(), "Pickup status updated by admin.");

		Ok(UpdateStatusResponse { pickup: pickup.into() })
	}
}
