//! Relay Server Binary
//!
//! Standalone entry point - loads `.env` and configuration, then delegates to lib.

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let cwd = std::env::current_dir()?;
    let config = relay_core::load_config(&cwd)?;

    relay_server::run_server(config).await
}
