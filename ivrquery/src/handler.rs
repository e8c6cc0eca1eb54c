//! Request pipeline: decode, dispatch, encode.
//!
//! Every request that gets past the token gate yields exactly one response
//! document. Faults at any stage are translated into the fault envelope with
//! the configured code; partial output is discarded.

use std::fmt::Display;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::decode::{RawRequest, decode};
use crate::core::dispatch::{Dispatcher, StringDispatcher};
use crate::core::encode::{encode, encode_unchecked, replace_unencodable};
use crate::core::types::ResponseEnvelope;
use crate::error::{AccessDenied, DecodeError};
use crate::io::config::AdapterConfig;

const FALLBACK_DESCRIPTION: &str = "internal error";

/// The query adapter: configuration plus the dispatcher it runs.
#[derive(Debug, Clone)]
pub struct Adapter<D = StringDispatcher> {
    config: AdapterConfig,
    dispatcher: D,
}

impl Adapter<StringDispatcher> {
    pub fn new(config: AdapterConfig) -> Self {
        let dispatcher = StringDispatcher {
            max_outputs: config.max_outputs,
        };
        Self { config, dispatcher }
    }
}

impl<D: Dispatcher> Adapter<D> {
    pub fn with_dispatcher(config: AdapterConfig, dispatcher: D) -> Self {
        Self { config, dispatcher }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Run the pipeline and return the response envelope.
    ///
    /// The only error is a token-gate rejection, for which no envelope exists.
    pub fn respond(&self, raw: &RawRequest) -> Result<ResponseEnvelope, AccessDenied> {
        let params = match decode(raw, self.config.expected_token()) {
            Ok(params) => params,
            Err(DecodeError::AccessDenied) => return Err(AccessDenied),
            Err(err) => {
                let err = anyhow::Error::new(err);
                return Ok(translate_fault(self.config.fault_code, &err));
            }
        };

        match self.dispatcher.dispatch(&params) {
            Ok(variables) => {
                debug!(variables = variables.len(), "request complete");
                Ok(ResponseEnvelope::success(variables))
            }
            Err(err) => Ok(translate_fault(self.config.fault_code, &err)),
        }
    }

    /// Run the pipeline and serialize the response document.
    pub fn handle(&self, raw: &RawRequest) -> Result<String, AccessDenied> {
        self.respond(raw).map(|envelope| self.render(&envelope))
    }

    /// Fault document for failures raised outside the pipeline by the host.
    pub fn fault_document(&self, message: impl Display) -> String {
        let err = anyhow::anyhow!("{message}");
        self.render(&translate_fault(self.config.fault_code, &err))
    }

    /// Serialize `envelope`; an unencodable value becomes a fault document.
    fn render(&self, envelope: &ResponseEnvelope) -> String {
        match encode(envelope) {
            Ok(xml) => xml,
            // Translated descriptions only hold encodable characters.
            Err(err) => encode_unchecked(&translate_fault(self.config.fault_code, &err)),
        }
    }
}

/// Convert an internal fault into the fault envelope.
///
/// The description carries the full context chain and is never empty.
/// Characters that cannot be written to the document are replaced.
pub fn translate_fault(code: i32, err: &anyhow::Error) -> ResponseEnvelope {
    let mut description = replace_unencodable(&format!("{err:#}"));
    if description.trim().is_empty() {
        description = FALLBACK_DESCRIPTION.to_string();
    }
    warn!(code, error = %description, "request failed");
    ResponseEnvelope::fault(code, description)
}
