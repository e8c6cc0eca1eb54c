//! I/O helpers for the adapter.

pub mod config;
