use std::process::ExitCode;

use budget::{
    config::{CliArgs, Config},
    error::AppError,
    logging,
    summary::Summary,
};
use clap::Parser;

fn main() -> ExitCode {
    let cli = CliArgs::parse();
    let config = Config::load(&cli);

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(config: &Config) -> Result<(), AppError> {
    logging::init(&config.logging)?;

    let path = &config.database.path;
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        budget::create_data_path(dir)?;
    }

    let conn = budget::open(path)?;
    let summary = Summary::collect(&conn);
    budget::close(conn)?;

    print!("{}", summary?);
    tracing::info!(path = %path.display(), "Database ready");
    Ok(())
}
