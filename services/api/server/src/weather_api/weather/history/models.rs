use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RemoveCityResponse {
    #[schema(example = "City removed from history")]
    pub message: String,
}

impl RemoveCityResponse {
    pub fn removed() -> Self {
        Self {
            message: "City removed from history".to_string(),
        }
    }
}
