//! String operation library.
//!
//! Primitives are pure and total. Positions count characters (Unicode scalar
//! values), are 1-based where exposed, and out-of-range arguments clamp
//! instead of failing. Argument validation lives in the dispatcher.

use crate::core::types::OutputValue;

/// First `n` characters of `subject`. `n <= 0` yields the empty string.
pub fn left(subject: &str, n: i64) -> String {
    subject.chars().take(clamp_count(n)).collect()
}

/// Last `n` characters of `subject`. `n <= 0` yields the empty string.
pub fn right(subject: &str, n: i64) -> String {
    let total = subject.chars().count();
    let keep = clamp_count(n).min(total);
    subject.chars().skip(total - keep).collect()
}

/// `len` characters of `subject` starting at 1-based `start`.
///
/// `start < 1` is treated as 1; `len <= 0` yields the empty string.
pub fn mid(subject: &str, start: i64, len: i64) -> String {
    let skip = clamp_count(start.saturating_sub(1));
    subject.chars().skip(skip).take(clamp_count(len)).collect()
}

/// 1-based character position of the first `needle` in `subject`, or 0.
pub fn find(subject: &str, needle: &str) -> i64 {
    match subject.find(needle) {
        Some(byte_offset) => {
            let chars_before = subject[..byte_offset].chars().count();
            i64::try_from(chars_before).map_or(i64::MAX, |n| n.saturating_add(1))
        }
        None => 0,
    }
}

/// Part count followed by each part of `subject` split on `delimiter`.
pub fn split(subject: &str, delimiter: &str) -> Vec<OutputValue> {
    let parts: Vec<&str> = subject.split(delimiter).collect();
    let count = i64::try_from(parts.len()).unwrap_or(i64::MAX);
    let mut out = Vec::with_capacity(parts.len() + 1);
    out.push(OutputValue::Number(count));
    out.extend(parts.into_iter().map(OutputValue::from));
    out
}

fn clamp_count(n: i64) -> usize {
    usize::try_from(n.max(0)).unwrap_or(usize::MAX)
}
