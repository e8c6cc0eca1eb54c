//! Deterministic, pure logic of the query adapter.
//!
//! Core modules must be free of I/O side effects. They operate on request-scoped
//! data and return deterministic outputs suitable for tests.

pub mod decode;
pub mod dispatch;
pub mod encode;
pub mod escape;
pub mod ops;
pub mod types;
