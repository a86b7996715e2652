use std::sync::Arc;

use history_models::{HistoryRecord, HistoryStore, HistoryStoreError};
use thiserror::Error;
use tokio::sync::Mutex;
use weather_client::{ForecastProvider, WeatherClientError};

#[derive(Error, Debug)]
pub enum HistoryServiceError {
    #[error("City name is required")]
    MissingCityName,

    #[error(transparent)]
    Fetch(#[from] WeatherClientError),

    #[error(transparent)]
    Store(#[from] HistoryStoreError),
}

pub type HistoryServiceResult<T> = Result<T, HistoryServiceError>;

/// Search history backed by a [`HistoryStore`], enriched with forecasts from
/// a [`ForecastProvider`].
///
/// Every mutation is a read-modify-write of the whole history and runs under
/// `write_lock`, so concurrent adds and removes never lose each other's
/// records. Forecast fetches happen before the lock is taken.
pub struct HistoryService {
    store: Arc<dyn HistoryStore>,
    forecasts: Arc<dyn ForecastProvider>,
    write_lock: Mutex<()>,
}

impl HistoryService {
    pub fn new(
        store: Arc<dyn HistoryStore>,
        forecasts: Arc<dyn ForecastProvider>,
    ) -> Self {
        Self {
            store,
            forecasts,
            write_lock: Mutex::new(()),
        }
    }

    /// Fetches the forecast for `city_name` and appends a new record.
    ///
    /// Nothing is written when the fetch fails.
    pub async fn add_city_with_forecast(
        &self,
        city_name: &str,
    ) -> HistoryServiceResult<HistoryRecord> {
        if city_name.is_empty() {
            return Err(HistoryServiceError::MissingCityName);
        }

        let forecast = self.forecasts.fetch_forecast(city_name).await?;
        let record = HistoryRecord::with_forecast(city_name, forecast);

        self.append(record).await
    }

    /// Appends a record with no forecast. Kept for clients still posting the
    /// bare `city` field.
    pub async fn add_city(
        &self,
        city: &str,
    ) -> HistoryServiceResult<HistoryRecord> {
        if city.is_empty() {
            return Err(HistoryServiceError::MissingCityName);
        }

        self.append(HistoryRecord::without_forecast(city)).await
    }

    pub async fn list_history(&self) -> HistoryServiceResult<Vec<HistoryRecord>> {
        Ok(self.store.read_all().await?)
    }

    /// Removes every record with `id`. Returns `false`, leaving the store
    /// untouched, when no record matched.
    pub async fn remove_by_id(&self, id: &str) -> HistoryServiceResult<bool> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.store.read_all().await?;
        let before = records.len();
        records.retain(|record| record.id != id);

        if records.len() == before {
            return Ok(false);
        }

        self.store.write_all(&records).await?;
        tracing::info!(id = %id, "Removed city from history");
        Ok(true)
    }

    /// Reads the store once and reports how many records it holds.
    pub async fn check_store(&self) -> HistoryServiceResult<usize> {
        Ok(self.store.read_all().await?.len())
    }

    /// Waits for any in-flight mutation to finish.
    pub async fn drain(&self) {
        let _guard = self.write_lock.lock().await;
    }

    async fn append(
        &self,
        record: HistoryRecord,
    ) -> HistoryServiceResult<HistoryRecord> {
        let _guard = self.write_lock.lock().await;

        let mut records = self.store.read_all().await?;
        records.push(record.clone());
        self.store.write_all(&records).await?;

        tracing::info!(
            id = %record.id,
            city = %record.name,
            total = records.len(),
            "Added city to history"
        );
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use history_models::{
        ForecastEntry, HistoryStoreResult, JsonFileHistoryStore,
        MemoryHistoryStore,
    };
    use mockall::mock;
    use pretty_assertions::assert_eq;
    use weather_client::WeatherClientResult;

    mock! {
        pub Forecasts {}

        #[async_trait]
        impl ForecastProvider for Forecasts {
            async fn fetch_forecast(
                &self,
                city_name: &str,
            ) -> WeatherClientResult<Vec<ForecastEntry>>;
        }
    }

    mock! {
        pub Store {}

        #[async_trait]
        impl HistoryStore for Store {
            async fn read_all(&self) -> HistoryStoreResult<Vec<HistoryRecord>>;
            async fn write_all(
                &self,
                records: &[HistoryRecord],
            ) -> HistoryStoreResult<()>;
        }
    }

    fn entry(date: &str) -> ForecastEntry {
        ForecastEntry {
            date: date.to_string(),
            temperature: 285.1,
            humidity: 70.into(),
            wind_speed: 3.2,
            weather_icon: "04d".to_string(),
        }
    }

    fn forecasts_returning(entries: Vec<ForecastEntry>) -> MockForecasts {
        let mut forecasts = MockForecasts::new();
        forecasts
            .expect_fetch_forecast()
            .returning(move |_| Ok(entries.clone()));
        forecasts
    }

    fn service(
        store: impl HistoryStore + 'static,
        forecasts: impl ForecastProvider + 'static,
    ) -> HistoryService {
        HistoryService::new(Arc::new(store), Arc::new(forecasts))
    }

    #[tokio::test]
    async fn test_add_city_with_forecast_appends_record() {
        let store = MemoryHistoryStore::new();
        let svc = service(
            store.clone(),
            forecasts_returning(vec![entry("2024-05-01 12:00:00")]),
        );

        let record = svc.add_city_with_forecast("Paris").await.unwrap();

        assert_eq!(record.name, "Paris");
        assert_eq!(record.forecast, Some(vec![entry("2024-05-01 12:00:00")]));
        assert_eq!(store.snapshot(), vec![record]);
    }

    #[tokio::test]
    async fn test_add_city_with_forecast_keeps_existing_records_first() {
        let existing = HistoryRecord::without_forecast("Oslo");
        let store = MemoryHistoryStore::with_records(vec![existing.clone()]);
        let svc = service(store.clone(), forecasts_returning(vec![]));

        let record = svc.add_city_with_forecast("Lima").await.unwrap();

        assert_eq!(store.snapshot(), vec![existing, record]);
    }

    #[tokio::test]
    async fn test_fetch_failure_writes_nothing() {
        let mut forecasts = MockForecasts::new();
        forecasts.expect_fetch_forecast().times(1).returning(|_| {
            Err(WeatherClientError::UpstreamStatus {
                status: 404,
                body: "city not found".to_string(),
            })
        });
        let mut store = MockStore::new();
        store.expect_read_all().never();
        store.expect_write_all().never();

        let result = service(store, forecasts)
            .add_city_with_forecast("Atlantis")
            .await;

        assert!(matches!(result, Err(HistoryServiceError::Fetch(_))));
    }

    #[tokio::test]
    async fn test_empty_city_name_is_rejected_before_fetch() {
        let mut forecasts = MockForecasts::new();
        forecasts.expect_fetch_forecast().never();
        let mut store = MockStore::new();
        store.expect_write_all().never();

        let svc = service(store, forecasts);

        assert!(matches!(
            svc.add_city_with_forecast("").await,
            Err(HistoryServiceError::MissingCityName)
        ));
        assert!(matches!(
            svc.add_city("").await,
            Err(HistoryServiceError::MissingCityName)
        ));
    }

    #[tokio::test]
    async fn test_add_city_stores_record_without_forecast() {
        let mut forecasts = MockForecasts::new();
        forecasts.expect_fetch_forecast().never();
        let store = MemoryHistoryStore::new();
        let svc = service(store.clone(), forecasts);

        let record = svc.add_city("Berlin").await.unwrap();

        assert_eq!(record.name, "Berlin");
        assert!(record.forecast.is_none());
        assert_eq!(store.snapshot().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_by_id_drops_every_match() {
        let keep = HistoryRecord::without_forecast("Rome");
        let gone = HistoryRecord::without_forecast("Madrid");
        let mut duplicate = HistoryRecord::without_forecast("Madrid again");
        duplicate.id = gone.id.clone();
        let store = MemoryHistoryStore::with_records(vec![
            gone.clone(),
            keep.clone(),
            duplicate,
        ]);
        let svc = service(store.clone(), MockForecasts::new());

        assert!(svc.remove_by_id(&gone.id).await.unwrap());
        assert_eq!(store.snapshot(), vec![keep]);
    }

    #[tokio::test]
    async fn test_remove_unknown_id_does_not_write() {
        let mut store = MockStore::new();
        store
            .expect_read_all()
            .times(1)
            .returning(|| Ok(vec![HistoryRecord::without_forecast("Rome")]));
        store.expect_write_all().never();

        let removed = service(store, MockForecasts::new())
            .remove_by_id("missing")
            .await
            .unwrap();

        assert!(!removed);
    }

    #[tokio::test]
    async fn test_store_write_failure_surfaces() {
        let mut store = MockStore::new();
        store.expect_read_all().returning(|| Ok(vec![]));
        store.expect_write_all().times(1).returning(|_| {
            Err(HistoryStoreError::Write {
                path: "db/searchHistory.json".into(),
                source: std::io::Error::other("disk full"),
            })
        });

        let result = service(store, forecasts_returning(vec![]))
            .add_city_with_forecast("Paris")
            .await;

        assert!(matches!(result, Err(HistoryServiceError::Store(_))));
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_all_persisted() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileHistoryStore::new(dir.path().join("history.json"));
        let svc = Arc::new(service(
            store.clone(),
            forecasts_returning(vec![entry("2024-05-01 12:00:00")]),
        ));

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let svc = svc.clone();
                tokio::spawn(async move {
                    svc.add_city_with_forecast(&format!("City {i}")).await
                })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap().unwrap();
        }

        let records = store.read_all().await.unwrap();
        assert_eq!(records.len(), 16);
        assert_eq!(svc.check_store().await.unwrap(), 16);
    }

    #[tokio::test]
    async fn test_list_history_reports_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("history.json");
        std::fs::write(&path, "{ not json").unwrap();
        let svc = service(JsonFileHistoryStore::new(path), MockForecasts::new());

        assert!(matches!(
            svc.list_history().await,
            Err(HistoryServiceError::Store(HistoryStoreError::Parse { .. }))
        ));
    }
}
