//! Client module - request shapes and transports.
//!
//! [`HttpClient`] turns an [`ApiRequest`] into an HTTP exchange and hands
//! back an [`Envelope`]. Two transports implement it:
//! - [`NetworkHttpClient`] talks to a real server through reqwest
//! - `OneshotHttpClient` drives an in-process axum `Router` (feature `in-process`)

pub mod form;
pub mod http;
#[cfg(feature = "in-process")]
pub mod http_oneshot;
pub mod request;

pub use form::{FormBody, FormPart, PartValue};
pub use http::{HttpClient, NetworkHttpClient};
#[cfg(feature = "in-process")]
pub use http_oneshot::OneshotHttpClient;
pub use request::{ApiRequest, RequestBody};

use ::http::StatusCode;
use serde::de::{DeserializeOwned, IgnoredAny};
use shared::{ApiBody, Envelope};

use crate::{ClientError, ClientResult};

/// Path prefix of every API route
pub const API_PREFIX: &str = "/api/v1";

/// Decode a raw response into an envelope or a typed error.
///
/// Shared by every transport so status mapping stays identical.
pub(crate) fn decode_response<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> ClientResult<Envelope<T>> {
    if !status.is_success() {
        // Prefer the server's own message
        if let Ok(body) = serde_json::from_slice::<ApiBody<IgnoredAny>>(bytes)
            && let Some(message) = body.message
        {
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }
        let text = String::from_utf8_lossy(bytes).to_string();
        return match status {
            StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized(text)),
            StatusCode::FORBIDDEN => Err(ClientError::Forbidden(text)),
            StatusCode::NOT_FOUND => Err(ClientError::NotFound(text)),
            StatusCode::BAD_REQUEST => Err(ClientError::Validation(text)),
            _ => Err(ClientError::Internal(text)),
        };
    }

    let body: ApiBody<serde_json::Value> = if bytes.is_empty() {
        ApiBody {
            message: None,
            data: None,
        }
    } else {
        serde_json::from_slice(bytes)
            .map_err(|e| ClientError::InvalidResponse(format!("JSON parse error: {}", e)))?
    };

    let data = serde_json::from_value(body.data.unwrap_or(serde_json::Value::Null))
        .map_err(|e| ClientError::InvalidResponse(format!("Unexpected payload: {}", e)))?;

    Ok(Envelope {
        status,
        data,
        message: body.message,
    })
}
