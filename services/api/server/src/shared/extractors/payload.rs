use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::http::{HeaderMap, header};
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde_json::error::Category;
use thiserror::Error;

/// JSON body extractor that reports which field failed to deserialize.
#[derive(Debug, Clone, Copy, Default)]
#[must_use]
pub struct Payload<T>(pub T);

impl<T, S> FromRequest<S> for Payload<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        if !json_content_type(req.headers()) {
            return Err(Error::MissingJsonContentType);
        }

        let bytes = Bytes::from_request(req, state).await?;
        let deserializer = &mut serde_json::Deserializer::from_slice(&bytes);
        let value: T = serde_path_to_error::deserialize(deserializer)?;

        Ok(Payload(value))
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Bytes(#[from] BytesRejection),

    #[error(transparent)]
    Json(#[from] serde_path_to_error::Error<serde_json::Error>),

    #[error("missing content-type header")]
    MissingJsonContentType,
}

impl Error {
    /// Client-facing description of the rejection.
    pub fn message(&self) -> String {
        match self {
            Error::Json(err) => {
                let path = err.path().to_string();
                let inner = err.inner();
                match inner.classify() {
                    Category::Data if path.is_empty() || path == "." => {
                        format!("Invalid request body: {inner}")
                    }
                    Category::Data => {
                        format!("Invalid value for field '{path}': {inner}")
                    }
                    _ => format!("Invalid JSON: {inner}"),
                }
            }
            Error::MissingJsonContentType => {
                "Content-Type header must be application/json".to_string()
            }
            Error::Bytes(_) => "Unable to read request body".to_string(),
        }
    }
}

impl axum::response::IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        crate::weather_api::api_error::ApiError::bad_request(self.message(), "")
            .into_response()
    }
}

fn json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(header::CONTENT_TYPE) else {
        return false;
    };

    let Ok(content_type) = content_type.to_str() else {
        return false;
    };

    let Ok(mime) = content_type.parse::<mime::Mime>() else {
        return false;
    };

    mime.type_() == "application"
        && (mime.subtype() == "json"
            || mime.suffix().is_some_and(|name| name == "json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(content_type: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers
            .insert(header::CONTENT_TYPE, HeaderValue::from_static(content_type));
        headers
    }

    #[test]
    fn test_json_content_types() {
        assert!(json_content_type(&headers_with("application/json")));
        assert!(json_content_type(&headers_with(
            "application/json; charset=utf-8"
        )));
        assert!(json_content_type(&headers_with("application/problem+json")));
        assert!(!json_content_type(&headers_with("text/plain")));
        assert!(!json_content_type(&HeaderMap::new()));
    }
}
