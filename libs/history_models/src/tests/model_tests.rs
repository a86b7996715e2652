#[cfg(test)]
mod tests {
    use crate::models::{ForecastEntry, HistoryRecord};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn paris_point() -> ForecastEntry {
        ForecastEntry {
            date: "2024-01-01 00:00:00".to_string(),
            temperature: 280.1,
            humidity: 60.into(),
            wind_speed: 3.2,
            weather_icon: "01d".to_string(),
        }
    }

    #[test]
    fn test_record_with_forecast_serializes_camel_case() {
        let record = HistoryRecord {
            id: "abc".to_string(),
            name: "Paris".to_string(),
            forecast: Some(vec![paris_point()]),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "abc",
                "name": "Paris",
                "forecast": [{
                    "date": "2024-01-01 00:00:00",
                    "temperature": 280.1,
                    "humidity": 60,
                    "windSpeed": 3.2,
                    "weatherIcon": "01d"
                }]
            })
        );
    }

    #[test]
    fn test_record_without_forecast_omits_key() {
        let record = HistoryRecord::without_forecast("Oslo");
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["name"], "Oslo");
        assert!(value.get("forecast").is_none());
        assert!(value["id"].is_string());
    }

    #[test]
    fn test_add_only_record_with_city_key_is_accepted() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "id": "legacy-1",
            "city": "Lisbon"
        }))
        .unwrap();

        assert_eq!(record.name, "Lisbon");
        assert_eq!(record.forecast, None);
    }

    #[test]
    fn test_name_wins_when_both_keys_are_present() {
        let record: HistoryRecord = serde_json::from_value(json!({
            "id": "mixed-1",
            "name": "Paris",
            "city": "Lyon"
        }))
        .unwrap();

        assert_eq!(record.name, "Paris");
        assert_eq!(
            serde_json::to_value(&record).unwrap(),
            json!({ "id": "mixed-1", "name": "Paris" })
        );
    }

    #[test]
    fn test_record_without_any_name_is_rejected() {
        let result = serde_json::from_value::<HistoryRecord>(json!({
            "id": "nameless"
        }));

        let err = result.unwrap_err().to_string();
        assert!(err.contains("nameless"), "{err}");
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let a = HistoryRecord::with_forecast("Rome", vec![]);
        let b = HistoryRecord::with_forecast("Rome", vec![]);
        assert_ne!(a.id, b.id);
    }
}
