use axum::extract::{FromRequest, Request};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::shared::extractors::payload::{self, Payload};
use crate::shared::extractors::request_id::RequestId;
use crate::weather_api::api_error::ApiError;

/// ValidatedPayload uses the full request body and therefore should always
/// appear after other extractors that might implement FromRequestParts
/// instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedPayload<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedPayload<T>
where
    T: serde::de::DeserializeOwned + validator::Validate,
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(
        req: Request,
        state: &S,
    ) -> Result<Self, Self::Rejection> {
        // Read the id before the body consumes the request
        let RequestId(request_id) = RequestId::from_headers(req.headers());

        let Payload(value) = Payload::<T>::from_request(req, state)
            .await
            .map_err(|e| Error::Payload(e, request_id.clone()))?;

        match value.validate() {
            Ok(_) => Ok(ValidatedPayload(value)),
            Err(e) => Err(Error::Validation(e, request_id)),
        }
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("Validation failed: {0}")]
    Validation(validator::ValidationErrors, String),

    #[error("Payload error: {0}")]
    Payload(payload::Error, String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        tracing::info!("Rejected request body: {self}");
        ApiError::from(self).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        match value {
            Error::Validation(errors, request_id) => ApiError::bad_request(
                validation_errors_to_strings(&errors).join("; "),
                &request_id,
            ),
            Error::Payload(err, request_id) => {
                ApiError::bad_request(err.message(), &request_id)
            }
        }
    }
}

/// Collects the messages of field-level validation errors, in field order and
/// without repeats.
///
/// Falls back to `"<field> is invalid"` for rules that carry no message.
pub fn validation_errors_to_strings(
    errors: &validator::ValidationErrors,
) -> Vec<String> {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    let mut output: Vec<String> = Vec::new();
    for (field, field_errors) in fields {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{field} is invalid"));
            if !output.contains(&message) {
                output.push(message);
            }
        }
    }
    output
}
