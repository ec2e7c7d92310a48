use std::sync::Arc;

use serde_json::{Map, Value};
use time::{OffsetDateTime, macros::datetime};

use recircle_config::{
	Config, LlmProviderConfig, Postgres, Providers as ProvidersConfig, Scheduling, Service, Storage,
};
use recircle_service::{
	BoxFuture, Clock, CompletionProvider, CreatePickupRequest, Error, PickupService, Providers,
};
use recircle_storage::db::Db;
use recircle_testkit::TestDatabase;

struct FixedClock(OffsetDateTime);
impl Clock for FixedClock {
	fn now(&self) -> OffsetDateTime {
		self.0
	}
}

struct CannedProvider {
	district: &'static str,
}
impl CompletionProvider for CannedProvider {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, recircle_providers::Result<Value>> {
		Box::pin(async move { Ok(serde_json::json!({ "district": self.district })) })
	}
}

struct FailingProvider;
impl CompletionProvider for FailingProvider {
	fn complete<'a>(
		&'a self,
		_cfg: &'a LlmProviderConfig,
		_messages: &'a [Value],
	) -> BoxFuture<'a, recircle_providers::Result<Value>> {
		Box::pin(async {
			Err(recircle_providers::Error::InvalidResponse {
				message: "Completion response is not valid JSON.".to_string(),
			})
		})
	}
}

fn test_config(dsn: String, atomic_reservation: bool) -> Config {
	Config {
		service: Service {
			http_bind: "127.0.0.1:0".to_string(),
			admin_bind: "127.0.0.1:0".to_string(),
			log_level: "info".to_string(),
			utc_offset_hours: 0,
		},
		storage: Storage { postgres: Postgres { dsn, pool_max_conns: 2 } },
		providers: ProvidersConfig {
			llm_extractor: LlmProviderConfig {
				provider_id: "test".to_string(),
				api_base: "http://127.0.0.1:1".to_string(),
				api_key: "test-key".to_string(),
				path: "/".to_string(),
				model: "test".to_string(),
				temperature: 0.1,
				timeout_ms: 1_000,
				default_headers: Map::new(),
			},
		},
		scheduling: Scheduling { atomic_reservation, ..Scheduling::default() },
	}
}

async fn test_service(
	test_db: &TestDatabase,
	atomic_reservation: bool,
	provider: Arc<dyn CompletionProvider>,
) -> PickupService {
	let cfg = test_config(test_db.dsn().to_string(), atomic_reservation);
	let db = Db::connect(&cfg.storage.postgres).await.expect("Failed to connect to Postgres.");

	db.ensure_schema().await.expect("Failed to ensure schema.");

	PickupService::with_seams(
		cfg,
		db,
		Providers { completion: provider },
		Arc::new(FixedClock(datetime!(2026-08-06 08:00 UTC))),
	)
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set RECIRCLE_PG_DSN to run."]
async fn create_list_cancel_flow() {
	let Some(base_dsn) = recircle_testkit::env_dsn() else {
		eprintln!("Skipping create_list_cancel_flow; set RECIRCLE_PG_DSN to run this test.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service =
		test_service(&test_db, false, Arc::new(CannedProvider { district: "Bengaluru" })).await;
	let created = service
		.create_pickup(CreatePickupRequest {
			user_id: 42,
			device_id: 7,
			address: "12 MG Road, Indiranagar, Bengaluru, Karnataka".to_string(),
		})
		.await
		.expect("Failed to create pickup.");

	assert_eq!(created.district, "Bengaluru");
	assert_eq!(created.pickup_date, "2026-08-06");
	assert_eq!(created.pickup_time, "9:00");
	assert_eq!(created.position_in_queue, 1);
	assert_eq!(created.status, "pending");

	let listed = service.list_pickups(42).await.expect("Failed to list pickups.");

	assert_eq!(listed.pickups.len(), 1);
	assert_eq!(listed.pickups[0].pickup_id, created.pickup_id);
	assert_eq!(listed.pickups[0].scheduled_time, "9:00");

	let fetched = service.fetch_pickup(created.pickup_id).await.expect("Failed to fetch pickup.");

	assert_eq!(fetched.district, "Bengaluru");

	let denied = service
		.cancel_pickup(created.pickup_id, 99)
		.await
		.expect_err("Strangers must not cancel.");

	assert!(matches!(denied, Error::AccessDenied { .. }));

	let cancelled =
		service.cancel_pickup(created.pickup_id, 42).await.expect("Failed to cancel pickup.");

	assert_eq!(cancelled.status, "cancelled");

	let again = service
		.cancel_pickup(created.pickup_id, 42)
		.await
		.expect_err("Cancelled pickups must stay cancelled.");

	assert!(matches!(again, Error::InvalidRequest { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set RECIRCLE_PG_DSN to run."]
async fn degraded_extractor_still_schedules() {
	let Some(base_dsn) = recircle_testkit::env_dsn() else {
		eprintln!("Skipping degraded_extractor_still_schedules; set RECIRCLE_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = test_service(&test_db, false, Arc::new(FailingProvider)).await;
	let created = service
		.create_pickup(CreatePickupRequest {
			user_id: 1,
			device_id: 1,
			address: "Plot 4, Sector 9, Navi Mumbai".to_string(),
		})
		.await
		.expect("Degraded extraction must not block scheduling.");

	assert_eq!(created.district, "Sector 9");
	assert_eq!(created.position_in_queue, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set RECIRCLE_PG_DSN to run."]
async fn capacity_fills_days_in_order() {
	let Some(base_dsn) = recircle_testkit::env_dsn() else {
		eprintln!("Skipping capacity_fills_days_in_order; set RECIRCLE_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service =
		test_service(&test_db, false, Arc::new(CannedProvider { district: "Chennai" })).await;

	for position in 1..=5_u32 {
		let created = service
			.create_pickup(CreatePickupRequest {
				user_id: 1,
				device_id: 1,
				address: "1 Marina Beach Road, Chennai, Tamil Nadu".to_string(),
			})
			.await
			.expect("Failed to create pickup.");

		assert_eq!(created.pickup_date, "2026-08-06");
		assert_eq!(created.position_in_queue, position);
		assert_eq!(created.pickup_time, format!("{}:00", 8 + position));
	}

	let rolled = service
		.create_pickup(CreatePickupRequest {
			user_id: 1,
			device_id: 1,
			address: "1 Marina Beach Road, Chennai, Tamil Nadu".to_string(),
		})
		.await
		.expect("Failed to create pickup.");

	assert_eq!(rolled.pickup_date, "2026-08-07");
	assert_eq!(rolled.pickup_time, "9:00");
	assert_eq!(rolled.position_in_queue, 1);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set RECIRCLE_PG_DSN to run."]
async fn atomic_reservation_serializes_concurrent_submissions() {
	let Some(base_dsn) = recircle_testkit::env_dsn() else {
		eprintln!(
			"Skipping atomic_reservation_serializes_concurrent_submissions; set RECIRCLE_PG_DSN to run."
		);

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service = Arc::new(
		test_service(&test_db, true, Arc::new(CannedProvider { district: "Kochi" })).await,
	);
	let mut handles = Vec::new();

	for _ in 0..6 {
		let service = Arc::clone(&service);

		handles.push(tokio::spawn(async move {
			service
				.create_pickup(CreatePickupRequest {
					user_id: 1,
					device_id: 1,
					address: "5 Marine Drive, Kochi, Kerala".to_string(),
				})
				.await
		}));
	}

	let mut positions = Vec::new();

	for handle in handles {
		let created = handle
			.await
			.expect("Task must not panic.")
			.expect("Reservation must find a slot.");

		positions.push((created.pickup_date.clone(), created.position_in_queue));
	}

	let first_day =
		positions.iter().filter(|(date, _)| date == "2026-08-06").count();
	let second_day =
		positions.iter().filter(|(date, _)| date == "2026-08-07").count();

	assert_eq!(first_day, 5);
	assert_eq!(second_day, 1);

	let mut first_day_positions = positions
		.iter()
		.filter(|(date, _)| date == "2026-08-06")
		.map(|(_, position)| *position)
		.collect::<Vec<_>>();

	first_day_positions.sort_unstable();

	assert_eq!(first_day_positions, vec![1, 2, 3, 4, 5]);

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}

#[tokio::test]
#[ignore = "Requires external Postgres. Set RECIRCLE_PG_DSN to run."]
async fn admin_status_update_applies_stock_notes() {
	let Some(base_dsn) = recircle_testkit::env_dsn() else {
		eprintln!("Skipping admin_status_update_applies_stock_notes; set RECIRCLE_PG_DSN to run.");

		return;
	};
	let test_db = TestDatabase::new(&base_dsn).await.expect("Failed to create test database.");
	let service =
		test_service(&test_db, false, Arc::new(CannedProvider { district: "Bengaluru" })).await;
	let created = service
		.create_pickup(CreatePickupRequest {
			user_id: 42,
			device_id: 7,
			address: "12 MG Road, Indiranagar, Bengaluru, Karnataka".to_string(),
		})
		.await
		.expect("Failed to create pickup.");
	let updated = service
		.update_pickup_status(
			created.pickup_id,
			recircle_service::UpdateStatusRequest {
				status: "scheduled".to_string(),
				tracking_note: None,
			},
		)
		.await
		.expect("Failed to update status.");

	assert_eq!(updated.pickup.status, "scheduled");
	assert_eq!(updated.pickup.tracking_note, "Pickup has been scheduled with our team");

	let rejected = service
		.update_pickup_status(
			created.pickup_id,
			recircle_service::UpdateStatusRequest {
				status: "in_progress".to_string(),
				tracking_note: None,
			},
		)
		.await
		.expect_err("Unknown status must be rejected.");

	assert!(matches!(rejected, Error::InvalidRequest { .. }));

	test_db.cleanup().await.expect("Failed to cleanup test database.");
}
