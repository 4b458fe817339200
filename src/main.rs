use clap::Parser;
use wordfreq::app::{handle_fatal_error, init_logging};
use wordfreq::cli::{execute, Cli};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let app_config = cli.app_config();

    init_logging(&app_config);

    match execute(cli, &app_config).await {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => handle_fatal_error(e, app_config.verbose),
    }
}
