//! Common types used across the KuCoin Futures client library.

pub mod common;

pub use common::*;
