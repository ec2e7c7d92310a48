pub mod admin;
pub mod cancel;
pub mod create;
pub mod district;
pub mod list;
pub mod schedule;
pub mod time_serde;

mod error;

pub use error::{Error, Result};

use std::{future::Future, pin::Pin, sync::Arc};

use serde_json::Value;
use time::{OffsetDateTime, UtcOffset};

pub use admin::{UpdateStatusRequest, UpdateStatusResponse};
pub use cancel::CancelPickupResponse;
pub use create::{CreatePickupRequest, CreatePickupResponse};
use recircle_config::{Config, LlmProviderConfig};
use recircle_domain::slot::SlotPolicy;
use recircle_storage::db::Db;
pub use list::{ListPickupsResponse, PickupView};
pub use schedule::PickupCounter;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Source of "now" for the scheduler, injected so tests can pin the clock.
pub trait Clock
where
	Self: Send + Sync,
{
	fn now(&self) -> OffsetDateTime;
}

/// Wall clock at a fixed offset from UTC, taken from config at startup.
pub struct SystemClock {
	offset: UtcOffset,
}
impl SystemClock {
	pub fn new(utc_offset_hours: i8) -> Self {
		// Bounded by config validation; out-of-range offsets never reach here.
		let offset = UtcOffset::from_hms(utc_offset_hours, 0, 0).unwrap_or(UtcOffset::UTC);

		Self { offset }
	}
}
impl Clock for SystemClock {
	fn now(&self) -> OffsetDateTime {
		OffsetDateTime::now_utc().to_offset(self.offset)
	}
}

/// Chat-completion seam. The service never names a concrete AI SDK; tests
/// swap this for a canned or failing stub.
pub trait CompletionProvider
where
	Self: Send + Sync,
{
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, recircle_providers::Result<Value>>;
}

pub struct HttpCompletionProvider;
impl CompletionProvider for HttpCompletionProvider {
	fn complete<'a>(
		&'a self,
		cfg: &'a LlmProviderConfig,
		messages: &'a [Value],
	) -> BoxFuture<'a, recircle_providers::Result<Value>> {
		Box::pin(recircle_providers::extractor::complete(cfg, messages))
	}
}

#[derive(Clone)]
pub struct Providers {
	pub completion: Arc<dyn CompletionProvider>,
}
impl Default for Providers {
	fn default() -> Self {
		Self { completion: Arc::new(HttpCompletionProvider) }
	}
}

pub struct PickupService {
	pub cfg: Config,
	pub db: Db,
	pub providers: Providers,
	pub clock: Arc<dyn Clock>,
}
impl PickupService {
	pub fn new(cfg: Config, db: Db) -> Self {
		let clock = Arc::new(SystemClock::new(cfg.service.utc_offset_hours));

		Self { cfg, db, providers: Providers::default(), clock }
	}

	pub fn with_seams(cfg: Config, db: Db, providers: Providers, clock: Arc<dyn Clock>) -> Self {
		Self { cfg, db, providers, clock }
	}

	pub(crate) fn policy(&self) -> SlotPolicy {
		SlotPolicy {
			daily_capacity: self.cfg.scheduling.daily_capacity,
			first_slot_hour: self.cfg.scheduling.first_slot_hour,
			cutoff_hour: self.cfg.scheduling.cutoff_hour,
			max_lookahead_days: self.cfg.scheduling.max_lookahead_days,
		}
	}
}
