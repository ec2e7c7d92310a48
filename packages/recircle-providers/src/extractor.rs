use std::time::Duration;

use reqwest::Client;
use serde_json::Value;

use crate::{Error, Result};

/// Sends a chat-completion request and returns the JSON object embedded in
/// the reply. Models wrap their output in markdown fences or prose often
/// enough that the parser recovers the object rather than trusting the
/// content to be bare JSON.
pub async fn complete(cfg: &recircle_config::LlmProviderConfig, messages: &[Value]) -> Result<Value> {
	let client = Client::builder().timeout(Duration::from_millis(cfg.timeout_ms)).build()?;
	let url = format!("{}{}", cfg.api_base, cfg.path);

	for _ in 0..3 {
		let body = serde_json::json!({
			"model": cfg.model,
			"temperature": cfg.temperature,
			"messages": messages,
		});
		let res = client
			.post(&url)
			.headers(crate::auth_headers(&cfg.api_key, &cfg.default_headers)?)
			.json(&body)
			.send()
			.await?;
		let json: Value = res.error_for_status()?.json().await?;

		if let Ok(parsed) = parse_completion_json(json) {
			return Ok(parsed);
		}
	}

	Err(Error::InvalidResponse { message: "Completion response is not valid JSON.".to_string() })
}

fn parse_completion_json(json: Value) -> Result<Value> {
	if let Some(content) = json
		.get("choices")
		.and_then(|v| v.as_array())
		.and_then(|arr| arr.first())
		.and_then(|choice| choice.get("message"))
		.and_then(|msg| msg.get("content"))
		.and_then(|c| c.as_str())
	{
		return parse_embedded_object(content);
	}

	if json.is_object() {
		return Ok(json);
	}

	Err(Error::InvalidResponse { message: "Completion response is missing JSON content.".to_string() })
}

/// Recovers a JSON object from model output that may carry markdown fences
/// or explanatory text around it: everything outside the outermost braces
/// is discarded before parsing.
fn parse_embedded_object(content: &str) -> Result<Value> {
	let trimmed = content.trim();
	let sliced = match (trimmed.find('{'), trimmed.rfind('}')) {
		(Some(first), Some(last)) if first < last => &trimmed[first..=last],
		_ => trimmed,
	};
	let parsed: Value = serde_json::from_str(sliced).map_err(|_| Error::InvalidResponse {
		message: "Completion content is not valid JSON.".to_string(),
	})?;

	Ok(parsed)
}
