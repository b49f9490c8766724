pub const DEFAULT_BIND: &str = "127.0.0.1:8081";
pub const DEFAULT_PROXY_TARGET: &str = "https://homesecurity-3.onrender.com";
pub const DEFAULT_FRONTEND_ORIGIN: &str = "http://127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub bind: String,
    pub proxy_target: String,
    pub frontend_origin: String,
}

impl Config {
    /// Reads `HOMESEC_*` variables; call after `dotenvy` so `.env` counts.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_owned())
        };
        Self {
            bind: var("HOMESEC_BIND", DEFAULT_BIND),
            proxy_target: var("HOMESEC_PROXY_TARGET", DEFAULT_PROXY_TARGET),
            frontend_origin: var("HOMESEC_FRONTEND_ORIGIN", DEFAULT_FRONTEND_ORIGIN),
        }
    }
}
