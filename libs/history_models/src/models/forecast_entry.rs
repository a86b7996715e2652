use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One normalized forecast point.
///
/// Values are kept exactly as the provider reported them: `date` is the
/// provider's local text timestamp and no unit conversion is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForecastEntry {
    #[schema(example = "2024-01-01 00:00:00")]
    pub date: String,
    #[schema(example = 280.1)]
    pub temperature: f64,
    /// Relative humidity, percent, in the provider's number form
    #[schema(value_type = f64, example = 60)]
    pub humidity: serde_json::Number,
    #[schema(example = 3.2)]
    pub wind_speed: f64,
    #[schema(example = "01d")]
    pub weather_icon: String,
}
