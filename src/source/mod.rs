//! Page source: fetches the raw markup of the index reference page

mod fetcher;

pub use fetcher::{build_http_client, fetch_page};
