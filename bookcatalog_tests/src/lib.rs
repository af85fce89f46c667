//! Tests that drive a deployed book catalog service over HTTP.
//! Enable with `--features system_tests` or `--features load_tests`,
//! the target url is read from `BOOKCATALOG_URL` (default `http://127.0.0.1:5000`).

#[cfg(any(feature = "system_tests", feature = "load_tests"))]
pub fn service_url() -> String {
    std::env::var("BOOKCATALOG_URL").unwrap_or("http://127.0.0.1:5000".to_string())
}

#[cfg(all(test, feature = "system_tests"))]
mod system_tests;
