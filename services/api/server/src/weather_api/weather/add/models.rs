use history_models::HistoryRecord;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

const CITY_NAME_REQUIRED: &str = "City name is required";

/// Request payload for adding a city to the search history
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddCityRequest {
    /// City to fetch a forecast for
    #[validate(length(min = 1, message = "City name is required"))]
    #[schema(example = "Paris")]
    pub city_name: Option<String>,

    /// Deprecated: stores the city without fetching a forecast. Ignored
    /// whenever `cityName` is present, whatever its value.
    #[schema(value_type = Option<String>, example = "Paris", deprecated)]
    pub city: Option<serde_json::Value>,
}

/// Which add flow a request selects.
#[derive(Debug, PartialEq)]
pub enum AddMode<'a> {
    WithForecast(&'a str),
    AddOnly(&'a str),
    Missing,
}

impl AddCityRequest {
    /// `cityName` takes precedence over the deprecated `city` field.
    pub fn mode(&self) -> AddMode<'_> {
        let city = self.city.as_ref().and_then(serde_json::Value::as_str);
        match (self.city_name.as_deref(), city) {
            (Some(city_name), _) => AddMode::WithForecast(city_name),
            (None, Some(city)) => AddMode::AddOnly(city),
            (None, None) => AddMode::Missing,
        }
    }

    pub fn missing_city_message() -> &'static str {
        CITY_NAME_REQUIRED
    }
}

/// City stored by the deprecated add-only flow
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AddedCity {
    #[schema(example = "0b9f3c4e-2a55-4c1c-9a57-2f9d0f1d7c11")]
    pub id: String,
    #[schema(example = "Paris")]
    pub city: String,
}

impl From<HistoryRecord> for AddedCity {
    fn from(record: HistoryRecord) -> Self {
        AddedCity {
            id: record.id,
            city: record.name,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(untagged)]
pub enum AddCityResponse {
    Record(HistoryRecord),
    AddOnly(AddedCity),
}
