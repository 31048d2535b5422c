//! Remote spreadsheet source.
//!
//! Blocking reqwest client (no Tokio runtime required). Three operations:
//! list files in a folder (most recently modified first), list a file's
//! sheet names, fetch one sheet's cell values. Failures surface once to the
//! caller as a [`RemoteError`]; there is no retry and no in-flight
//! cancellation.

pub mod adapter;
pub mod client;

pub use adapter::{sheet_from_values, RemoteSheetAdapter};
pub use client::{RemoteError, RemoteFile, SheetsClient};
