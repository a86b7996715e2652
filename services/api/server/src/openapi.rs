// The OpenApi derive macro generates code using Iterator::for_each,
// which is disallowed by our clippy config. Allow it at module level.
#![allow(clippy::disallowed_methods)]

use utoipa::OpenApi;

/// OpenAPI documentation for the weather history API
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::weather_api::weather::add::handler::handler,
        crate::weather_api::weather::history::handler::list_handler,
        crate::weather_api::weather::history::handler::remove_handler,
    ),
    info(
        title = "Weather History API",
        version = "1.0.0",
        description = "Fetches 5 day / 3 hour forecasts for a city and keeps a search history",
        license(name = "Apache-2.0")
    ),
    servers(
        (url = "/api", description = "Weather API")
    ),
    tags(
        (name = "weather", description = "City forecasts and search history")
    )
)]
pub struct WeatherApiDoc;

impl WeatherApiDoc {
    pub fn openapi() -> utoipa::openapi::OpenApi {
        <WeatherApiDoc as utoipa::OpenApi>::openapi()
    }

    /// OpenAPI spec as JSON for OpenAPI 3.0 consumers.
    /// Converts type: ["array", "null"] to type: "array", nullable: true
    pub fn openapi_json() -> serde_json::Value {
        let mut json_value = match serde_json::to_value(Self::openapi()) {
            Ok(value) => value,
            Err(e) => {
                tracing::error!("Failed to serialize OpenAPI spec: {e}");
                return serde_json::Value::Null;
            }
        };

        let fixed_count = Self::fix_nullable_arrays_recursive(&mut json_value);

        if fixed_count > 0 {
            tracing::info!(
                "Fixed {} nullable array type definitions in OpenAPI spec",
                fixed_count
            );
        }

        json_value
    }

    fn fix_nullable_arrays_recursive(value: &mut serde_json::Value) -> usize {
        let mut fixed_count = 0;

        match value {
            serde_json::Value::Object(map) => {
                if let Some(serde_json::Value::Array(type_array)) =
                    map.get("type")
                    && type_array.len() == 2
                    && type_array.iter().any(|v| v == "array")
                    && type_array.iter().any(|v| v == "null")
                {
                    map.insert(
                        "type".to_string(),
                        serde_json::Value::String("array".to_string()),
                    );
                    map.insert(
                        "nullable".to_string(),
                        serde_json::Value::Bool(true),
                    );
                    fixed_count += 1;
                }

                for val in map.values_mut() {
                    fixed_count += Self::fix_nullable_arrays_recursive(val);
                }
            }
            serde_json::Value::Array(arr) => {
                for item in arr.iter_mut() {
                    fixed_count += Self::fix_nullable_arrays_recursive(item);
                }
            }
            _ => {}
        }

        fixed_count
    }
}
