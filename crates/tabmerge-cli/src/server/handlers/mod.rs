//! API request handlers.

mod download;
mod merge;
mod schema;

pub use download::*;
pub use merge::*;
pub use schema::*;
