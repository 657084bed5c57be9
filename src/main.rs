use clap::Parser;
use codrspace_post::utils::{logger, validation::Validate};
use codrspace_post::{CliConfig, CodrspaceClient, PublishError, Publisher};

fn exit_with(error: &PublishError) -> ! {
    tracing::error!(
        "❌ Publishing failed: {} (Category: {:?})",
        error,
        error.category()
    );
    eprintln!("❌ {}", error.user_friendly_message());
    eprintln!("💡 {}", error.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() {
    let config = CliConfig::parse();

    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        exit_with(&e);
    }

    let credentials = match config.resolve_credentials() {
        Ok(credentials) => credentials,
        Err(e) => exit_with(&e),
    };

    let filename = match config.filename() {
        Ok(filename) => filename,
        Err(e) => exit_with(&e),
    };

    let client = match CodrspaceClient::new(&config.base_url) {
        Ok(client) => client,
        Err(e) => exit_with(&e),
    };
    let publisher = Publisher::new(client);

    match publisher.publish_file(filename, &credentials).await {
        Ok(outcome) => {
            tracing::info!("✅ {}", outcome);
            println!("{}", outcome);
        }
        Err(e) => exit_with(&e),
    }
}
