use serde::Deserialize;
use serde_json::{Map, Value};

#[derive(Debug, Deserialize)]
pub struct Config {
	pub service: Service,
	pub storage: Storage,
	pub providers: Providers,
	#[serde(default)]
	pub scheduling: Scheduling,
}

#[derive(Debug, Deserialize)]
pub struct Service {
	pub http_bind: String,
	pub admin_bind: String,
	pub log_level: String,
	/// Offset applied to UTC to obtain the wall clock the scheduler reasons
	/// in. Deployments outside UTC set this instead of relying on the
	/// process environment.
	#[serde(default)]
	pub utc_offset_hours: i8,
}

#[derive(Debug, Deserialize)]
pub struct Storage {
	pub postgres: Postgres,
}

#[derive(Debug, Deserialize)]
pub struct Postgres {
	pub dsn: String,
	pub pool_max_conns: u32,
}

#[derive(Debug, Deserialize)]
pub struct Providers {
	pub llm_extractor: LlmProviderConfig,
}

#[derive(Debug, Deserialize)]
pub struct LlmProviderConfig {
	pub provider_id: String,
	pub api_base: String,
	pub api_key: String,
	pub path: String,
	pub model: String,
	pub temperature: f32,
	pub timeout_ms: u64,
	pub default_headers: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Scheduling {
	pub daily_capacity: u32,
	pub first_slot_hour: u8,
	pub cutoff_hour: u8,
	pub max_lookahead_days: u32,
	pub atomic_reservation: bool,
}
impl Default for Scheduling {
	fn default() -> Self {
		Self {
			daily_capacity: 5,
			first_slot_hour: 9,
			cutoff_hour: 15,
			max_lookahead_days: 365,
			atomic_reservation: false,
		}
	}
}
