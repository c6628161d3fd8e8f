use anyhow::Context;
use clap::error::ErrorKind;
use screen_image_generator::{resolve_options, setup_logging, Cli, Config, ErrorScope, Generator};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    // Parse CLI arguments; --help exits here before anything touches disk
    let args = match resolve_options(std::env::args_os()) {
        Ok(args) => args,
        Err(e) if e.kind() == ErrorKind::DisplayHelp => {
            let _ = e.print();
            std::process::exit(0);
        }
        Err(e) => {
            let _ = e.print();
            std::process::exit(1);
        }
    };

    if let Err(e) = setup_logging(args.verbose) {
        eprintln!("Failed to initialise logging: {e}");
    }

    info!("Starting screen-image-generator v{}", env!("CARGO_PKG_VERSION"));

    let config = match load_config(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!("Configuration error: {:#}", e);
            eprintln!("Error: {e:#}");
            std::process::exit(1);
        }
    };

    let generator = Generator::new(config, args.options());

    match generator.run().await {
        Ok(result) => {
            info!(
                "Finished: {} succeeded, {} failed",
                result.success_count, result.error_count
            );
        }
        Err(e) if e.scope() == ErrorScope::Config => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
        Err(e) => {
            error!("Application error: {}", e);
            eprintln!("Unexpected error: {e}");
            std::process::exit(1);
        }
    }
}

async fn load_config(args: &Cli) -> anyhow::Result<Config> {
    let mut config = if let Some(config_path) = &args.config {
        let config_content = tokio::fs::read_to_string(config_path)
            .await
            .with_context(|| format!("reading {}", config_path.display()))?;
        serde_json::from_str(&config_content)
            .with_context(|| format!("parsing {}", config_path.display()))?
    } else {
        Config::default()
    };

    // Override with CLI arguments
    if let Some(root) = &args.root {
        config.project_root = root.clone();
    }

    if let Some(chrome_path) = &args.chrome_path {
        config.chrome_path = Some(chrome_path.clone());
    }

    config.validate()?;

    info!("Mockups: {}", config.mockups_root().display());
    info!("Output: {}", config.output_root().display());
    info!("Navigation timeout: {:?}", config.navigation_timeout);

    Ok(config)
}
