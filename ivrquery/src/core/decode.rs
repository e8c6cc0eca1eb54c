//! Parameter decoding and the optional access-token gate.

use tracing::{debug, warn};

use crate::core::types::RequestParams;
use crate::error::DecodeError;

/// Request as handed over by the host transport.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRequest {
    /// Decoded query pairs in request order.
    pub query: Vec<(String, String)>,
    /// Value of the `token` request header, if sent.
    pub token_header: Option<String>,
}

impl RawRequest {
    pub fn from_query<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            query: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            token_header: None,
        }
    }

    pub fn with_token_header(mut self, token: impl Into<String>) -> Self {
        self.token_header = Some(token.into());
        self
    }
}

/// Decode positional parameters from `raw`.
///
/// When `expected_token` is set, the supplied token (query `token`, falling
/// back to the `token` header) must match it exactly. Unknown keys are
/// ignored; a known key sent twice is rejected as malformed.
pub fn decode(
    raw: &RawRequest,
    expected_token: Option<&str>,
) -> Result<RequestParams, DecodeError> {
    let query_token = raw
        .query
        .iter()
        .find(|(key, _)| key == "token")
        .map(|(_, value)| value.as_str());
    let supplied = query_token.or(raw.token_header.as_deref());

    if let Some(expected) = expected_token
        && supplied != Some(expected)
    {
        warn!(token_supplied = supplied.is_some(), "access token rejected");
        return Err(DecodeError::AccessDenied);
    }

    let mut params = RequestParams::default();
    for (key, value) in &raw.query {
        let Some(slot) = params.slot_mut(key) else {
            debug!(key = %key, "ignoring unknown parameter");
            continue;
        };
        if slot.is_some() {
            return Err(DecodeError::Malformed(format!(
                "parameter '{key}' given more than once"
            )));
        }
        *slot = Some(value.clone());
    }
    if params.token.is_none() {
        params.token = raw.token_header.clone();
    }
    Ok(params)
}
