//! Operation selection, argument coercion, and dispatch.
//!
//! The selector in `param1` must start with the `string.` namespace and a
//! subject must be present in `param2`; otherwise nothing runs. Inside the
//! namespace the name is matched exactly against [`OperationName`].
//!
//! A recognized operation whose arguments fail their precondition (not
//! numeric, empty delimiter, ...) emits nothing and still reports success.
//! This is a legacy quirk that callers rely on, so it is kept as a [`Skip`]
//! rather than an error.

use anyhow::{Result, bail};
use tracing::debug;

use crate::core::ops;
use crate::core::types::{OutputValue, OutputVariable, RequestParams, number_outputs};

/// Namespace every selector must start with.
pub const NAMESPACE: &str = "string.";

/// Default cap on values per request. A split may emit its count plus up to
/// this many parts minus one.
pub const DEFAULT_MAX_OUTPUTS: usize = 65_536;

/// Closed table of operation names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationName {
    Left,
    Right,
    Mid,
    Find,
    Split,
}

impl OperationName {
    pub const ALL: [OperationName; 5] = [
        OperationName::Left,
        OperationName::Right,
        OperationName::Mid,
        OperationName::Find,
        OperationName::Split,
    ];

    /// Name as it appears after the namespace prefix.
    pub fn as_str(self) -> &'static str {
        match self {
            OperationName::Left => "left",
            OperationName::Right => "right",
            OperationName::Mid => "mid",
            OperationName::Find => "find",
            OperationName::Split => "split",
        }
    }

    /// Exact lookup of an unprefixed name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == name)
    }
}

/// A resolved operation with coerced arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    Left { subject: String, count: i64 },
    Right { subject: String, count: i64 },
    Mid { subject: String, start: i64, len: i64 },
    Find { subject: String, needle: String },
    Split { subject: String, delimiter: String },
    /// Namespaced selector with no entry in the table.
    Unrecognized { selector: String },
}

impl Operation {
    /// Run the primitive. Unrecognized operations emit nothing.
    pub fn execute(&self) -> Vec<OutputValue> {
        match self {
            Operation::Left { subject, count } => vec![ops::left(subject, *count).into()],
            Operation::Right { subject, count } => vec![ops::right(subject, *count).into()],
            Operation::Mid { subject, start, len } => {
                vec![ops::mid(subject, *start, *len).into()]
            }
            Operation::Find { subject, needle } => vec![ops::find(subject, needle).into()],
            Operation::Split { subject, delimiter } => ops::split(subject, delimiter),
            Operation::Unrecognized { .. } => Vec::new(),
        }
    }
}

/// Why a request produced no operation. None of these are errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// `param1` is absent.
    NoSelector,
    /// `param1` does not start with [`NAMESPACE`].
    OutsideNamespace,
    /// `param2` is absent.
    MissingSubject,
    /// A numeric argument is absent or does not parse as a number.
    NotNumeric { param: &'static str },
    /// A string argument that must be non-empty is absent or empty.
    EmptyArgument { param: &'static str },
}

/// Resolve `params` into an [`Operation`], or the reason nothing runs.
pub fn resolve(params: &RequestParams) -> Result<Operation, Skip> {
    let selector = params.param1.as_deref().ok_or(Skip::NoSelector)?;
    let name = selector
        .strip_prefix(NAMESPACE)
        .ok_or(Skip::OutsideNamespace)?;
    let subject = params.param2.clone().ok_or(Skip::MissingSubject)?;

    let Some(op) = OperationName::from_name(name) else {
        return Ok(Operation::Unrecognized {
            selector: selector.to_string(),
        });
    };

    let operation = match op {
        OperationName::Left => Operation::Left {
            subject,
            count: numeric_arg(params, 3)?,
        },
        OperationName::Right => Operation::Right {
            subject,
            count: numeric_arg(params, 3)?,
        },
        OperationName::Mid => Operation::Mid {
            subject,
            start: numeric_arg(params, 3)?,
            len: numeric_arg(params, 4)?,
        },
        OperationName::Find => Operation::Find {
            subject,
            needle: non_empty_arg(params, 3)?,
        },
        OperationName::Split => Operation::Split {
            subject,
            delimiter: non_empty_arg(params, 3)?,
        },
    };
    Ok(operation)
}

/// Coerce a numeric-looking argument.
///
/// Surrounding whitespace is ignored. Integers parse directly; finite decimals
/// are truncated toward zero. Out-of-range values saturate. Empty input is not
/// a number.
pub fn parse_number(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(n) = trimmed.parse::<i64>() {
        return Some(n);
    }
    if !trimmed
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'+' | b'-' | b'.' | b'e' | b'E'))
    {
        return None;
    }
    let value = trimmed.parse::<f64>().ok()?;
    // `as` saturates at the i64 bounds.
    value.is_finite().then(|| value.trunc() as i64)
}

fn numeric_arg(params: &RequestParams, index: usize) -> Result<i64, Skip> {
    params
        .positional(index)
        .and_then(parse_number)
        .ok_or(Skip::NotNumeric {
            param: param_name(index),
        })
}

fn non_empty_arg(params: &RequestParams, index: usize) -> Result<String, Skip> {
    match params.positional(index) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(Skip::EmptyArgument {
            param: param_name(index),
        }),
    }
}

fn param_name(index: usize) -> &'static str {
    match index {
        1 => "param1",
        2 => "param2",
        3 => "param3",
        _ => "param4",
    }
}

/// Abstraction over operation dispatch.
///
/// Errors returned here are internal faults; skips are an empty `Ok`.
pub trait Dispatcher {
    fn dispatch(&self, params: &RequestParams) -> Result<Vec<OutputVariable>>;
}

/// Dispatcher backed by the string operation library.
#[derive(Debug, Clone)]
pub struct StringDispatcher {
    /// Upper bound on values a single request may emit.
    pub max_outputs: usize,
}

impl Default for StringDispatcher {
    fn default() -> Self {
        Self {
            max_outputs: DEFAULT_MAX_OUTPUTS,
        }
    }
}

impl Dispatcher for StringDispatcher {
    fn dispatch(&self, params: &RequestParams) -> Result<Vec<OutputVariable>> {
        let operation = match resolve(params) {
            Ok(operation) => operation,
            Err(skip) => {
                debug!(?skip, "no operation to run");
                return Ok(Vec::new());
            }
        };

        if let Operation::Unrecognized { selector } = &operation {
            debug!(selector = %selector, "unrecognized operation");
        }

        let values = operation.execute();
        if values.len() > self.max_outputs {
            bail!(
                "operation produced {} values, limit is {}",
                values.len(),
                self.max_outputs
            );
        }
        debug!(count = values.len(), "operation complete");
        Ok(number_outputs(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::params;

    fn text(value: &str) -> OutputValue {
        OutputValue::from(value)
    }

    fn run(values: &[&str]) -> Vec<OutputValue> {
        StringDispatcher::default()
            .dispatch(&params(values))
            .expect("dispatch")
            .into_iter()
            .map(|var| var.value)
            .collect()
    }

    #[test]
    fn operation_names_round_trip_through_table() {
        for op in OperationName::ALL {
            assert_eq!(OperationName::from_name(op.as_str()), Some(op));
        }
        assert_eq!(OperationName::from_name("LEFT"), None);
        assert_eq!(OperationName::from_name("string.left"), None);
    }

    #[test]
    fn dispatches_each_operation() {
        assert_eq!(run(&["string.left", "hello", "3"]), vec![text("hel")]);
        assert_eq!(run(&["string.right", "hello", "3"]), vec![text("llo")]);
        assert_eq!(run(&["string.mid", "hello", "2", "3"]), vec![text("ell")]);
        assert_eq!(
            run(&["string.find", "hello", "l"]),
            vec![OutputValue::Number(3)]
        );
        assert_eq!(
            run(&["string.split", "a,b,c", ","]),
            vec![
                OutputValue::Number(3),
                text("a"),
                text("b"),
                text("c")
            ]
        );
    }

    #[test]
    fn non_numeric_argument_skips_silently() {
        assert!(run(&["string.left", "hello", "x"]).is_empty());
        assert!(run(&["string.right", "hello", ""]).is_empty());
        assert!(run(&["string.mid", "hello", "2"]).is_empty());
        assert!(run(&["string.mid", "hello", "two", "3"]).is_empty());
    }

    #[test]
    fn empty_needle_or_delimiter_skips() {
        assert!(run(&["string.find", "hello", ""]).is_empty());
        assert!(run(&["string.split", "a,b"]).is_empty());
    }

    #[test]
    fn selector_outside_namespace_is_a_no_op() {
        assert_eq!(
            resolve(&params(&["left", "hello", "3"])),
            Err(Skip::OutsideNamespace)
        );
        assert_eq!(
            resolve(&params(&["String.left", "hello", "3"])),
            Err(Skip::OutsideNamespace)
        );
        assert!(run(&["left", "hello", "3"]).is_empty());
    }

    #[test]
    fn missing_subject_is_a_no_op() {
        assert_eq!(resolve(&params(&["string.left"])), Err(Skip::MissingSubject));
        assert_eq!(resolve(&RequestParams::default()), Err(Skip::NoSelector));
    }

    #[test]
    fn empty_subject_is_still_a_subject() {
        assert_eq!(run(&["string.left", "", "3"]), vec![text("")]);
    }

    #[test]
    fn unknown_name_resolves_to_unrecognized() {
        assert_eq!(
            resolve(&params(&["string.unknown", "hello"])),
            Ok(Operation::Unrecognized {
                selector: "string.unknown".to_string()
            })
        );
        assert!(run(&["string.unknown", "hello"]).is_empty());
    }

    #[test]
    fn reports_which_argument_failed() {
        assert_eq!(
            resolve(&params(&["string.mid", "hello", "1", "x"])),
            Err(Skip::NotNumeric { param: "param4" })
        );
        assert_eq!(
            resolve(&params(&["string.find", "hello"])),
            Err(Skip::EmptyArgument { param: "param3" })
        );
    }

    #[test]
    fn parse_number_accepts_loose_numeric_forms() {
        assert_eq!(parse_number("3"), Some(3));
        assert_eq!(parse_number(" 3 "), Some(3));
        assert_eq!(parse_number("+4"), Some(4));
        assert_eq!(parse_number("-2"), Some(-2));
        assert_eq!(parse_number("2.9"), Some(2));
        assert_eq!(parse_number("-2.9"), Some(-2));
        assert_eq!(parse_number("1e2"), Some(100));
        assert_eq!(parse_number("99999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn parse_number_rejects_non_numbers() {
        assert_eq!(parse_number(""), None);
        assert_eq!(parse_number("   "), None);
        assert_eq!(parse_number("x"), None);
        assert_eq!(parse_number("3x"), None);
        assert_eq!(parse_number("NaN"), None);
        assert_eq!(parse_number("inf"), None);
        assert_eq!(parse_number("1e999"), None);
    }

    #[test]
    fn output_limit_is_an_internal_fault() {
        let dispatcher = StringDispatcher { max_outputs: 3 };
        let err = dispatcher
            .dispatch(&params(&["string.split", "a,b,c", ","]))
            .expect_err("limit exceeded");
        assert!(err.to_string().contains("limit is 3"));

        let ok = dispatcher
            .dispatch(&params(&["string.split", "a,b", ","]))
            .expect("within limit");
        assert_eq!(ok.len(), 3);
    }

    #[test]
    fn default_limit_admits_large_splits() {
        let subject = vec!["x"; 2000].join(",");
        let vars = StringDispatcher::default()
            .dispatch(&params(&["string.split", subject.as_str(), ","]))
            .expect("dispatch");
        assert_eq!(vars.len(), 2001);
        assert_eq!(vars[0].value, OutputValue::Number(2000));
    }
}
