mod demo;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use log::{error, info};

use kiln_core::config::{ConfigData, ConfigFormat};
use kiln_core::kernel::bootstrap::Application;

/// Kiln: a modular host runtime
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    /// Simple ping command for a basic liveness check
    #[arg(long)]
    ping: bool,

    /// Configuration file declaring component dependencies
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Register the demo services, run the lifecycle, shut down
    Run,
    /// List registered objects and the phase each one reached
    Objects,
    /// Show the isolation domains the demo artifacts share
    Domains,
}

fn load_config(path: &PathBuf) -> Option<ConfigData> {
    let format = match ConfigFormat::from_path(path) {
        Some(format) => format,
        None => {
            error!("Unsupported config format: {}", path.display());
            return None;
        }
    };
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };
    match ConfigData::from_str(&content, format) {
        Ok(config) => Some(config),
        Err(e) => {
            error!("Failed to parse {}: {}", path.display(), e);
            None
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = CliArgs::parse();

    if args.ping {
        println!("pong");
        return;
    }

    let app = match &args.config {
        Some(path) => match load_config(path) {
            Some(config) => Application::with_config(&config),
            None => return,
        },
        None => Application::new(),
    };
    let mut app = match app {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            return;
        }
    };

    if let Err(e) = demo::register_demo_services(&app).await {
        error!("Failed to register demo services: {}", e);
        return;
    }

    match args.command.unwrap_or(Commands::Run) {
        Commands::Run => {
            if let Err(e) = app.start().await {
                error!("Startup failed: {}", e);
                return;
            }
            info!("Host running with {} objects", app.registry().object_count());
            if let Err(e) = app.shutdown().await {
                error!("Shutdown reported errors: {}", e);
            }
        }
        Commands::Objects => {
            if let Err(e) = app.start().await {
                error!("Startup failed: {}", e);
                return;
            }
            println!("Registered objects:");
            for key in app.registry().keys() {
                let phase = app
                    .registry()
                    .store()
                    .phase_reached(&key)
                    .map(|p| p.name())
                    .unwrap_or("unknown");
                println!("  - {key} ({phase})");
            }
            if let Err(e) = app.shutdown().await {
                error!("Shutdown reported errors: {}", e);
            }
        }
        Commands::Domains => match demo::describe_demo_domain(&app) {
            Ok(lines) => {
                println!("Isolation domains:");
                for line in lines {
                    println!("  {line}");
                }
            }
            Err(e) => error!("Domain construction failed: {}", e),
        },
    }
}
