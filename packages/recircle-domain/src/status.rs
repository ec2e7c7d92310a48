use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Lifecycle of a pickup request. The scheduler only ever creates
/// `Pending` rows; transitions are owned by the admin status operation and
/// user cancellation.
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PickupStatus {
	Pending,
	Scheduled,
	PickedUp,
	Completed,
	Cancelled,
}
impl PickupStatus {
	pub fn as_str(&self) -> &'static str {
		match self {
			Self::Pending => "pending",
			Self::Scheduled => "scheduled",
			Self::PickedUp => "picked_up",
			Self::Completed => "completed",
			Self::Cancelled => "cancelled",
		}
	}

	/// Operator-facing note applied when a status update carries none.
	pub fn default_tracking_note(&self) -> &'static str {
		match self {
			Self::Pending => "Request is pending review",
			Self::Scheduled => "Pickup has been scheduled with our team",
			Self::PickedUp => "Device has been picked up and is being processed",
			Self::Completed => "Pickup completed successfully - credits have been awarded",
			Self::Cancelled => "Pickup request has been cancelled",
		}
	}
}
impl FromStr for PickupStatus {
	type Err = UnknownStatus;

	fn from_str(raw: &str) -> Result<Self, Self::Err> {
		match raw {
			"pending" => Ok(Self::Pending),
			"scheduled" => Ok(Self::Scheduled),
			"picked_up" => Ok(Self::PickedUp),
			"completed" => Ok(Self::Completed),
			"cancelled" => Ok(Self::Cancelled),
			_ => Err(UnknownStatus { raw: raw.to_string() }),
		}
	}
}

#[derive(Debug, thiserror::Error)]
#[error("Unknown pickup status {raw:?}.")]
pub struct UnknownStatus {
	pub raw: String,
}
