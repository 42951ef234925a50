use std::process::ExitCode;

use anyhow::{ensure, Context, Result};
use clap::Parser;

use interop_tag::{BatchTagger, Config, TagError};

fn main() -> ExitCode {
    let config = Config::parse();
    init_logging(&config);

    match run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            let code = e
                .downcast_ref::<TagError>()
                .map(TagError::exit_code)
                .unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn init_logging(config: &Config) {
    let mut builder = env_logger::Builder::from_default_env();
    if config.verbose > 0 || std::env::var_os("RUST_LOG").is_none() {
        builder.filter_level(config.log_level());
    }
    builder.format_timestamp(None).init();
}

fn run(config: Config) -> Result<()> {
    ensure!(
        config.dir.is_dir(),
        "Working directory {} does not exist",
        config.dir.display()
    );
    ensure!(config.threads > 0, "--threads must be at least 1");

    let dir = config.dir.display().to_string();
    let tagger = BatchTagger::with_oiiotool(config);
    let summary = tagger
        .process_directory()
        .map_err(anyhow::Error::from)
        .with_context(|| format!("Batch stopped in {}", dir))?;

    log::info!(
        "Done: {} written, {} skipped",
        summary.processed(),
        summary.skipped.len()
    );
    Ok(())
}
