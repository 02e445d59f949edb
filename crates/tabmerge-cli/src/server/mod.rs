//! Web server for uploading archives and downloading merged tables.

pub mod app;
pub mod error;
pub mod handlers;
pub mod state;
