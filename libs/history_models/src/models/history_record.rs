use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::ForecastEntry;

/// A past city search.
///
/// Records created by the add-only flow carry no forecast; older files wrote
/// the city under `city`, which is still accepted on read. When a record has
/// both keys, `name` wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "StoredRecord")]
pub struct HistoryRecord {
    #[schema(example = "0b9f3c4e-2a55-4c1c-9a57-2f9d0f1d7c11")]
    pub id: String,
    #[schema(example = "Paris")]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forecast: Option<Vec<ForecastEntry>>,
}

/// On-disk shape of a record, covering both the current and legacy keys.
#[derive(Deserialize)]
struct StoredRecord {
    id: String,
    name: Option<String>,
    city: Option<String>,
    #[serde(default)]
    forecast: Option<Vec<ForecastEntry>>,
}

impl TryFrom<StoredRecord> for HistoryRecord {
    type Error = String;

    fn try_from(stored: StoredRecord) -> Result<Self, Self::Error> {
        let name = stored
            .name
            .or(stored.city)
            .ok_or_else(|| format!("record {} has no `name`", stored.id))?;

        Ok(HistoryRecord {
            id: stored.id,
            name,
            forecast: stored.forecast,
        })
    }
}

impl HistoryRecord {
    pub fn with_forecast(
        name: impl Into<String>,
        forecast: Vec<ForecastEntry>,
    ) -> Self {
        HistoryRecord {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            forecast: Some(forecast),
        }
    }

    pub fn without_forecast(name: impl Into<String>) -> Self {
        HistoryRecord {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            forecast: None,
        }
    }
}
