//! Test-only helpers for building requests and stand-in dispatchers.

use anyhow::{Result, anyhow};

use crate::core::decode::RawRequest;
use crate::core::dispatch::Dispatcher;
use crate::core::types::{OutputValue, OutputVariable, RequestParams, number_outputs};

/// Build a raw request from query pairs.
pub fn request(pairs: &[(&str, &str)]) -> RawRequest {
    RawRequest::from_query(pairs.iter().copied())
}

/// Build decoded params from positional values (`param1`, `param2`, ...).
pub fn params(values: &[&str]) -> RequestParams {
    let mut params = RequestParams::default();
    for (i, value) in values.iter().enumerate() {
        let key = format!("param{}", i + 1);
        if let Some(slot) = params.slot_mut(&key) {
            *slot = Some((*value).to_string());
        }
    }
    params
}

/// Dispatcher that returns the same values for every request.
#[derive(Debug, Clone)]
pub struct ScriptedDispatcher {
    values: Vec<OutputValue>,
}

impl ScriptedDispatcher {
    pub fn new(values: Vec<OutputValue>) -> Self {
        Self { values }
    }
}

impl Dispatcher for ScriptedDispatcher {
    fn dispatch(&self, _params: &RequestParams) -> Result<Vec<OutputVariable>> {
        Ok(number_outputs(self.values.clone()))
    }
}

/// Dispatcher that fails every request with a fixed message.
#[derive(Debug, Clone)]
pub struct FailingDispatcher {
    message: String,
}

impl FailingDispatcher {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Dispatcher for FailingDispatcher {
    fn dispatch(&self, _params: &RequestParams) -> Result<Vec<OutputVariable>> {
        Err(anyhow!("{}", self.message))
    }
}
