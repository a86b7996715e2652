#!/usr/bin/env cargo
use weather_api::openapi::WeatherApiDoc;

fn main() -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(&WeatherApiDoc::openapi_json())?;

    println!("{}", json);
    Ok(())
}
