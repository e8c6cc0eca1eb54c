//! Request and response types shared by the adapter core.
//!
//! Everything here is created per request and never mutated after
//! construction.

/// Positional parameters decoded from a single request.
///
/// Absent parameters are `None`, distinct from an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestParams {
    pub param1: Option<String>,
    pub param2: Option<String>,
    pub param3: Option<String>,
    pub param4: Option<String>,
    pub token: Option<String>,
}

impl RequestParams {
    /// Positional parameter by 1-based index.
    pub fn positional(&self, index: usize) -> Option<&str> {
        match index {
            1 => self.param1.as_deref(),
            2 => self.param2.as_deref(),
            3 => self.param3.as_deref(),
            4 => self.param4.as_deref(),
            _ => None,
        }
    }

    pub(crate) fn slot_mut(&mut self, key: &str) -> Option<&mut Option<String>> {
        match key {
            "param1" => Some(&mut self.param1),
            "param2" => Some(&mut self.param2),
            "param3" => Some(&mut self.param3),
            "param4" => Some(&mut self.param4),
            "token" => Some(&mut self.token),
            _ => None,
        }
    }
}

/// A value emitted by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputValue {
    /// Text that must be escaped before it is serialized.
    Text(String),
    /// Counts and positions, written in their plain decimal form.
    Number(i64),
}

impl From<String> for OutputValue {
    fn from(value: String) -> Self {
        OutputValue::Text(value)
    }
}

impl From<&str> for OutputValue {
    fn from(value: &str) -> Self {
        OutputValue::Text(value.to_string())
    }
}

impl From<i64> for OutputValue {
    fn from(value: i64) -> Self {
        OutputValue::Number(value)
    }
}

/// An emitted value with its 1-based position in the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputVariable {
    pub index: usize,
    pub value: OutputValue,
}

impl OutputVariable {
    /// Response variable name (`param1`, `param2`, ...).
    pub fn name(&self) -> String {
        format!("param{}", self.index)
    }
}

/// Number positional outputs strictly by emission order, starting at 1.
pub fn number_outputs(values: Vec<OutputValue>) -> Vec<OutputVariable> {
    values
        .into_iter()
        .enumerate()
        .map(|(i, value)| OutputVariable {
            index: i + 1,
            value,
        })
        .collect()
}

/// Numeric error channel of a response. Code `0` means success.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorStatus {
    pub code: i32,
    pub description: String,
}

impl ErrorStatus {
    pub fn ok() -> Self {
        Self {
            code: 0,
            description: String::new(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == 0
    }
}

/// The single output of the core for one request.
///
/// Values are stored raw; escaping happens once, in the encoder. Only the
/// constructors below build an envelope, which keeps a non-zero code paired
/// with an empty variable list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseEnvelope {
    variables: Vec<OutputVariable>,
    status: ErrorStatus,
}

impl ResponseEnvelope {
    /// Successful response carrying `variables`.
    pub fn success(variables: Vec<OutputVariable>) -> Self {
        Self {
            variables,
            status: ErrorStatus::ok(),
        }
    }

    /// Fault response with no variables.
    ///
    /// A zero `code` would read as success, so it is mapped to `-1`.
    pub fn fault(code: i32, description: impl Into<String>) -> Self {
        let code = if code == 0 { -1 } else { code };
        Self {
            variables: Vec::new(),
            status: ErrorStatus {
                code,
                description: description.into(),
            },
        }
    }

    pub fn variables(&self) -> &[OutputVariable] {
        &self.variables
    }

    pub fn status(&self) -> &ErrorStatus {
        &self.status
    }
}
