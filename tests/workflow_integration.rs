use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use tenki::alerts::notifier::{AlertPublisher, NotifyError};
use tenki::config::TenkiConfig;
use tenki::retention;
use tenki::runner::Runner;
use tenki::store::{MemoryStore, WeatherStore};
use tenki::weather::{WeatherFetcher, WeatherRecord};

/// Captures published alerts for assertions
#[derive(Default)]
struct CapturingPublisher {
    published: Mutex<Vec<(String, String)>>,
}

impl CapturingPublisher {
    fn published(&self) -> Vec<(String, String)> {
        self.published.lock().unwrap().clone()
    }
}

#[async_trait]
impl AlertPublisher for CapturingPublisher {
    async fn publish(&self, subject: &str, message: &str) -> Result<(), NotifyError> {
        self.published
            .lock()
            .unwrap()
            .push((subject.to_string(), message.to_string()));
        Ok(())
    }
}

fn record(location_id: &str, timestamp: i64) -> WeatherRecord {
    WeatherRecord {
        location_id: location_id.to_string(),
        timestamp,
        temperature: 18.0,
        humidity: 55.0,
        rainfall: 0.0,
        wind_speed: 2.0,
    }
}

fn runner_against(
    server: &mockito::ServerGuard,
    store: Arc<MemoryStore>,
    publisher: Arc<CapturingPublisher>,
) -> Runner<Arc<MemoryStore>, Arc<CapturingPublisher>> {
    let config = TenkiConfig::default();
    let fetcher = WeatherFetcher::with_base_url(
        format!("{}/data/2.5/weather", server.url()),
        "integration-test-key",
    );
    Runner::new(config, fetcher, store, publisher)
}

#[tokio::test]
async fn full_run_without_alert() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(mockito::Matcher::UrlEncoded("id".into(), "1850147".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"main": {"temp": 25.0, "humidity": 60}, "wind": {"speed": 3.2}}"#)
        .expect(1)
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let publisher = Arc::new(CapturingPublisher::default());
    store.insert(record("tokyo", 2_000));

    let runner = runner_against(&server, Arc::clone(&store), Arc::clone(&publisher));
    let response = runner.run().await.unwrap();

    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, r#"{"message":"Success"}"#);

    // No alert, but the stale seeded record was still swept and the fresh
    // observation (rainfall defaulted to 0.0) remains
    assert!(publisher.published().is_empty());
    assert!(!store.contains("tokyo", 2_000));
    assert_eq!(store.len(), 1);

    mock.assert_async().await;
}

#[tokio::test]
async fn full_run_with_alert_and_sweep() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/data/2.5/weather")
        .match_query(mockito::Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            r#"{"main": {"temp": 28.0, "humidity": 80}, "wind": {"speed": 6.0}, "rain": {"1h": 42.5}}"#,
        )
        .create_async()
        .await;

    let store = Arc::new(MemoryStore::new());
    let publisher = Arc::new(CapturingPublisher::default());
    store.insert(record("tokyo", 5_000));
    store.insert(record("osaka", 5_001));

    let runner = runner_against(&server, Arc::clone(&store), Arc::clone(&publisher));
    let response = runner.run().await.unwrap();
    assert_eq!(response.status_code, 200);

    // Heavy rainfall triggered the alert even though temperature was fine
    let published = publisher.published();
    assert_eq!(published.len(), 1);
    assert!(published[0].0.contains("tokyo"));
    assert!(published[0].1.contains("42.5"));

    // The sweep deleted both stale records regardless of location
    assert!(!store.contains("tokyo", 5_000));
    assert!(!store.contains("osaka", 5_001));
    assert_eq!(store.len(), 1);
}

#[tokio::test]
async fn sweep_boundary_is_strict() {
    let store = MemoryStore::new();
    store.insert(record("tokyo", 7_999));
    store.insert(record("tokyo", 8_000));

    let deleted = retention::sweep(&store, 2_600_000, 2_592_000).await.unwrap();

    assert_eq!(deleted, 1);
    assert!(!store.contains("tokyo", 7_999));
    assert!(store.contains("tokyo", 8_000));
}

#[tokio::test]
async fn store_contract_upsert_and_delete() {
    let store = MemoryStore::new();

    let mut observation = record("tokyo", 100);
    store.put(&observation).await.unwrap();

    observation.temperature = 31.5;
    store.put(&observation).await.unwrap();

    assert_eq!(store.len(), 1);
    assert_eq!(store.get("tokyo", 100).unwrap().temperature, 31.5);

    let keys = store.scan_older_than(101).await.unwrap();
    assert_eq!(keys.len(), 1);
    store.delete(&keys[0]).await.unwrap();
    assert!(store.is_empty());
}
