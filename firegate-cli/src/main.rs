use anyhow::Result;
use clap::Parser;
use firegate_cli::cli::{Cli, Commands};
use firegate_cli::{AppConfig, run_serve};

#[tokio::main]
async fn main() -> Result<()> {
    if let Ok(path) = dotenvy::dotenv() {
        eprintln!("loaded environment from {}", path.display());
    }

    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { config, host, port, users_file, log_json, firebase } => {
            if log_json {
                firegate_telemetry::init_json_telemetry("firegate");
            } else {
                firegate_telemetry::init_telemetry("firegate");
            }

            let mut app_config = AppConfig::load(config.as_deref())?;
            firebase.apply(&mut app_config.firebase);
            if let Some(host) = host {
                app_config.server.host = host;
            }
            if let Some(port) = port {
                app_config.server.port = port;
            }

            run_serve(app_config, users_file.as_deref()).await
        }
        Commands::HashPassword { password } => {
            println!("{}", firegate_core::password::hash_password(&password)?);
            Ok(())
        }
    }
}
