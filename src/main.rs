use std::sync::Arc;

use anyhow::Context as _;
use imgrelay::{
    api::Context,
    config::Config,
    dotenv,
    request::build_client,
    search::UnsplashSearch,
    server::run_server,
};
use log::{error, info};

async fn run() -> anyhow::Result<()> {
    let config = Arc::new(Config::from_env().context("Invalid configuration")?);
    match &config.base_path {
        Some(path) => info!("Default download directory is {}", path.display()),
        None => info!("No BASE_PATH set, downloads must name their own basePath"),
    }
    let client = build_client(&config.user_agent).context("Failed to build HTTP client")?;
    let search = Arc::new(UnsplashSearch::new(client.clone(), &config));
    let ctx = Arc::new(Context {
        config: Arc::clone(&config),
        client,
        search,
    });
    run_server(ctx, config.port).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    better_panic::install();
    dotenv().ok();
    env_logger::init();

    if let Err(err) = run().await {
        error!("{:?}", err);
        std::process::exit(1);
    }
}
