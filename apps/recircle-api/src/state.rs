use std::sync::Arc;

use recircle_service::PickupService;
use recircle_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<PickupService>,
}
impl AppState {
	pub async fn new(config: recircle_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = PickupService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}
}
