//! Logger setup.
//!
//! Installs a [`fern`] dispatch behind the `log` facade. Call [`init`] once, first thing in
//! `main`.

use std::io;

/// Installs the global logger writing timestamped lines to stdout.
pub fn init(level: log::LevelFilter) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        // decoders are chatty at debug
        .level_for("image", log::LevelFilter::Warn)
        .chain(io::stdout())
        .apply()?;

    log::debug!("logging initialized at {level}");
    Ok(())
}
