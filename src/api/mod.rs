//! HTTP API Bindings
//!
//! Frontend wrappers for the Ecoleta backend and the IBGE locality service.
//! Every call returns `Result<T, String>`; callers log failures.

mod ibge;
mod items;
mod points;

pub use ibge::{list_cities, list_ufs};
pub use items::list_items;
pub use points::create_point;

/// Backend base URL used when none is set at build time
const DEFAULT_API_URL: &str = "http://localhost:3333";

/// Backend base URL, taken from `ECOLETA_API_URL` at build time
pub fn api_base_url() -> &'static str {
    option_env!("ECOLETA_API_URL").unwrap_or(DEFAULT_API_URL)
}

fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}

fn api_url(path: &str) -> String {
    join_url(api_base_url(), path)
}
