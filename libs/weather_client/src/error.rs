use thiserror::Error;

pub type WeatherClientResult<T> = Result<T, WeatherClientError>;

#[derive(Error, Debug)]
pub enum WeatherClientError {
    #[error("Forecast request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Forecast provider responded with status {status}: {body}")]
    UpstreamStatus { status: u16, body: String },

    #[error("Unexpected forecast response shape: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Forecast point at {date} has no weather condition")]
    MissingWeatherIcon { date: String },
}
