pub mod constants;
pub mod url_utils;

pub use constants::*;
pub use url_utils::{is_allowed_host, is_allowed_url, normalize_url, resolve_doc_href};
