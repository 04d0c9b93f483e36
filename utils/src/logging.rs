use std::env;

use chrono::Local;
use log::LevelFilter;

pub fn log_level_from_env() -> LevelFilter {
    match env::var("LOG_LEVEL").as_deref() {
        Ok("info") => LevelFilter::Info,
        Ok("debug") => LevelFilter::Debug,
        Ok("trace") => LevelFilter::Trace,
        Ok("warn") => LevelFilter::Warn,
        Ok("error") => LevelFilter::Error,
        _ => LevelFilter::Warn, // Default to Warn if variable is unset or has an unrecognized value
    }
}

/// Logs go to stderr so that rendered manifests on stdout stay pipeable.
pub fn setup_logging() -> Result<(), fern::InitError> {
    let stderr_config = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}] {}: {}",
                Local::now().format("[%Y-%m-%d][%H:%M:%S]"),
                record.target(),
                record.level(),
                message
            ))
        })
        .level(log_level_from_env())
        .chain(std::io::stderr());

    fern::Dispatch::new().chain(stderr_config).apply()?;

    Ok(())
}
