//! Wire shapes of the provider's `/forecast` response. Only the fields that
//! end up in a [`ForecastEntry`] are modelled.

use history_models::ForecastEntry;
use serde::Deserialize;

use crate::error::{WeatherClientError, WeatherClientResult};

#[derive(Debug, Deserialize)]
pub struct ForecastResponse {
    pub list: Vec<ForecastPoint>,
}

#[derive(Debug, Deserialize)]
pub struct ForecastPoint {
    pub dt_txt: String,
    pub main: MainReadings,
    pub wind: Wind,
    pub weather: Vec<WeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct MainReadings {
    pub temp: f64,
    pub humidity: serde_json::Number,
}

#[derive(Debug, Deserialize)]
pub struct Wind {
    pub speed: f64,
}

#[derive(Debug, Deserialize)]
pub struct WeatherCondition {
    pub icon: String,
}

impl TryFrom<ForecastPoint> for ForecastEntry {
    type Error = WeatherClientError;

    fn try_from(point: ForecastPoint) -> WeatherClientResult<Self> {
        let weather_icon = point
            .weather
            .into_iter()
            .next()
            .map(|w| w.icon)
            .ok_or_else(|| WeatherClientError::MissingWeatherIcon {
                date: point.dt_txt.clone(),
            })?;

        Ok(ForecastEntry {
            date: point.dt_txt,
            temperature: point.main.temp,
            humidity: point.main.humidity,
            wind_speed: point.wind.speed,
            weather_icon,
        })
    }
}

impl ForecastResponse {
    pub fn into_entries(self) -> WeatherClientResult<Vec<ForecastEntry>> {
        self.list.into_iter().map(ForecastEntry::try_from).collect()
    }
}
