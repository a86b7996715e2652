pub mod forecast_entry;
pub mod history_record;

pub use forecast_entry::ForecastEntry;
pub use history_record::HistoryRecord;
