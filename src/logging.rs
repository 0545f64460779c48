use chrono::Local;
use env_logger::{Builder, Env, Target};
use log::LevelFilter;
use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

// Conditional logging macros - only active in debug builds

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

#[must_use]
pub fn level_for_verbosity(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger. `RUST_LOG` overrides the `-v` level when set.
/// Records go to `log_file` if given (the TUI owns the terminal), else stderr.
pub fn init_logging(verbosity: u8, log_file: Option<&Path>) -> io::Result<()> {
    let mut builder = Builder::new();
    builder
        .filter_level(level_for_verbosity(verbosity))
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                record.args()
            )
        });

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(Target::Pipe(Box::new(file)));
        }
        None => {
            builder.target(Target::Stderr);
        }
    }

    // Only one global logger can exist; a later call leaves the first one in place.
    if let Err(e) = builder.try_init() {
        log::debug!("Logger already installed, keeping it: {e}");
    }
    Ok(())
}
