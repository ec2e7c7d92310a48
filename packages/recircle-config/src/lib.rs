mod error;
mod types;

pub use error::{Error, Result};
pub use types::{Config, LlmProviderConfig, Postgres, Providers, Scheduling, Service, Storage};

use std::{fs, path::Path};

pub fn load(path: &Path) -> Result<Config> {
	let raw = fs::read_to_string(path)
		.map_err(|err| Error::ReadConfig { path: path.to_path_buf(), source: err })?;
	let mut cfg: Config = toml::from_str(&raw)
		.map_err(|err| Error::ParseConfig { path: path.to_path_buf(), source: err })?;

	normalize(&mut cfg);

	validate(&cfg)?;

	Ok(cfg)
}

/// The provider URL is `api_base` + `path`, so a trailing slash on the base
/// would produce a double slash.
fn normalize(cfg: &mut Config) {
	let api_base = &mut cfg.providers.llm_extractor.api_base;

	while api_base.ends_with('/') {
		api_base.pop();
	}
}

pub fn validate(cfg: &Config) -> Result<()> {
	if cfg.service.http_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.http_bind must be non-empty.".to_string(),
		});
	}
	if cfg.service.admin_bind.trim().is_empty() {
		return Err(Error::Validation {
			message: "service.admin_bind must be non-empty.".to_string(),
		});
	}
	if !(-12..=14).contains(&cfg.service.utc_offset_hours) {
		return Err(Error::Validation {
			message: "service.utc_offset_hours must be between -12 and 14.".to_string(),
		});
	}
	if cfg.storage.postgres.pool_max_conns == 0 {
		return Err(Error::Validation {
			message: "storage.postgres.pool_max_conns must be greater than zero.".to_string(),
		});
	}
	if cfg.providers.llm_extractor.api_key.trim().is_empty() {
		return Err(Error::Validation {
			message: "providers.llm_extractor.api_key must be non-empty.".to_string(),
		});
	}
	if cfg.providers.llm_extractor.timeout_ms == 0 {
		return Err(Error::Validation {
			message: "providers.llm_extractor.timeout_ms must be greater than zero.".to_string(),
		});
	}

	let scheduling = &cfg.scheduling;

	if scheduling.daily_capacity == 0 {
		return Err(Error::Validation {
			message: "scheduling.daily_capacity must be greater than zero.".to_string(),
		});
	}
	if u32::from(scheduling.first_slot_hour) + scheduling.daily_capacity > 24 {
		return Err(Error::Validation {
			message: "scheduling.first_slot_hour plus scheduling.daily_capacity must not pass midnight."
				.to_string(),
		});
	}
	if scheduling.cutoff_hour > 23 {
		return Err(Error::Validation {
			message: "scheduling.cutoff_hour must be a valid hour of day.".to_string(),
		});
	}
	if scheduling.max_lookahead_days == 0 {
		return Err(Error::Validation {
			message: "scheduling.max_lookahead_days must be greater than zero.".to_string(),
		});
	}

	Ok(())
}
