//! IVR query adapter.
//!
//! A request carries positional string parameters (`param1..param4`). The
//! first names a string operation in the `string.` namespace, the rest are its
//! arguments. Results come back as an XML document of positional variables
//! plus a numeric error channel.
//!
//! - **[`core`]**: Pure, deterministic protocol logic (escaping, operations,
//!   dispatch, decoding, encoding). No I/O, fully testable in isolation.
//! - **[`io`]**: Configuration loading.
//!
//! [`handler`] ties the core stages into one pipeline and translates faults
//! into the error envelope. The HTTP host lives in the `ivrquery-server` crate.

pub mod core;
pub mod error;
pub mod handler;
pub mod io;
pub mod logging;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use crate::core::decode::RawRequest;
pub use crate::error::AccessDenied;
pub use crate::handler::Adapter;
pub use crate::io::config::AdapterConfig;
