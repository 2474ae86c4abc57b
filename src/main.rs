//! Relay - multi-agent LLM workflow backend
//!
//! Entry point with two modes:
//! - **serve** (default): runs the HTTP server (requires the `web` feature)
//! - **run**: executes one agent pipeline in the terminal and prints the timeline

mod cli;

use cli::Mode;
use relay_core::{load_config, CompletionRequest, RelayConfig, RelayService};

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let mode = match cli::parse(std::env::args().skip(1)) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("{}\n\n{}", e, cli::USAGE);
            std::process::exit(2);
        }
    };

    match mode {
        Mode::Help => {
            print!("{}", cli::USAGE);
            Ok(())
        }
        Mode::SampleConfig => {
            print!("{}", relay_core::config::sample_config());
            Ok(())
        }
        Mode::Run { prompt, workflow } => {
            let config = load_config(&std::env::current_dir()?)?;
            run_pipeline(config, prompt, workflow)
        }
        Mode::Serve { port } => {
            let mut config = load_config(&std::env::current_dir()?)?;
            if let Some(port) = port {
                config.server.port = port;
            }
            serve(config)
        }
    }
}

/// Run one pipeline and print each step
fn run_pipeline(config: RelayConfig, prompt: String, workflow: Option<String>) -> anyhow::Result<()> {
    init_cli_tracing(&config.server.log_level);

    let service = RelayService::new(config);
    service.ensure_credential()?;

    let request = CompletionRequest { prompt, workflow };
    let run = service.run_workflow(&request)?;
    tracing::info!(workflow = %run.workflow, steps = run.timeline.len(), "Pipeline finished");

    println!("workflow: {}", run.workflow);
    for step in &run.timeline {
        println!("\n== {} ({}) ==\n{}", step.agent, step.timestamp, step.text);
    }

    Ok(())
}

/// Terminal logging goes to stderr so stdout stays the timeline
fn init_cli_tracing(level: &str) {
    let filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| format!("relay={0},relay_core={0}", level));

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(filter))
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(feature = "web")]
fn serve(config: RelayConfig) -> anyhow::Result<()> {
    tokio::runtime::Runtime::new()?.block_on(relay_server::run_server(config))
}

#[cfg(not(feature = "web"))]
fn serve(_config: RelayConfig) -> anyhow::Result<()> {
    anyhow::bail!("relay was built without the `web` feature; use `relay run <prompt>`")
}
