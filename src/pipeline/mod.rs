//! Pipeline orchestration
//!
//! This module ties the stages together:
//! 1. Fetch the index page
//! 2. Locate and extract the constituent table
//! 3. Normalize column names
//! 4. Validate the row count
//! 5. Persist CSV and JSON output

mod coordinator;

pub use coordinator::{Pipeline, RunSummary};
