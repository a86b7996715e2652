pub mod client;
pub mod error;
pub mod models;


pub use client::{ClientConfig, ForecastProvider, OpenWeatherClient};
pub use error::{WeatherClientError, WeatherClientResult};
