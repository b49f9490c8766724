use anyhow::{Context, Result};
use log::info;

mod config;
mod proxy;
mod web;

#[actix_web::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = config::Config::from_env();
    let upstream = proxy::Upstream::new(&config.proxy_target)
        .context("building upstream http client")?;

    info!(
        "listening on {}, forwarding /api to {} (frontend origin {})",
        config.bind, config.proxy_target, config.frontend_origin
    );
    web::new_http_server(&config, upstream)
        .await
        .with_context(|| format!("serving on {}", config.bind))?;
    Ok(())
}
