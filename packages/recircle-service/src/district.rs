use serde_json::Value;

use recircle_domain::district::fallback_district;

use crate::PickupService;

const DISTRICT_PROMPT: &str = "\
You are an address parser for a device pickup service. Extract the district \
or city name from the address the user sends. Respond with strictly this \
JSON object and nothing else: {\"district\": \"<name>\"}";

impl PickupService {
	/// Best-effort district extraction. Never fails: provider errors,
	/// timeouts and blank model output all fall back to parsing the
	/// address text directly, so a degraded model never blocks scheduling.
	pub async fn extract_district(&self, address: &str) -> String {
		match self.model_district(address).await {
			Ok(Some(district)) => district,
			Ok(None) => {
				tracing::debug!("Model returned no district; falling back to address parsing.");

				fallback_district(address)
			},
			Err(err) => {
				tracing::warn!(%err, "District extraction degraded; falling back to address parsing.");

				fallback_district(address)
			},
		}
	}

	async fn model_district(&self, address: &str) -> recircle_providers::Result<Option<String>> {
		let messages = [
			serde_json::json!({ "role": "system", "content": DISTRICT_PROMPT }),
			serde_json::json!({ "role": "user", "content": address }),
		];
		let parsed = self
			.providers
			.completion
			.complete(&self.cfg.providers.llm_extractor, &messages)
			.await?;
		let district = parsed
			.get("district")
			.and_then(Value::as_str)
			.map(str::trim)
			.filter(|district| !district.is_empty())
			.map(str::to_string);

		Ok(district)
	}
}
