use clap::Parser;

use speech2text::cli::Cli;
use speech2text::config::Config;
use speech2text::recognize;

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("speech2text=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    recognize::runner::run(&cli, &config)
}
