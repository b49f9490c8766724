//! Where the backend lives.
//!
//! `HOMESEC_API_URL` set at build time wins. Otherwise the app talks to the
//! dev server on port 8081 of whatever host served the page.

#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
const DEV_SERVER_PORT: u16 = 8081;
const DEFAULT_API_URL: &str = "http://127.0.0.1:8081/api";

pub fn api_base_url() -> String {
    if let Some(url) = option_env!("HOMESEC_API_URL") {
        return url.trim_end_matches('/').to_owned();
    }
    host_url()
        .map(|host| format!("{host}/api"))
        .unwrap_or_else(|| DEFAULT_API_URL.to_owned())
}

#[cfg(target_arch = "wasm32")]
fn host_url() -> Option<String> {
    let location = web_sys::window()?.location();
    Some(format!(
        "{}//{}:{}",
        location.protocol().ok()?,
        location.hostname().ok()?,
        DEV_SERVER_PORT
    ))
}

#[cfg(not(target_arch = "wasm32"))]
fn host_url() -> Option<String> {
    None
}
