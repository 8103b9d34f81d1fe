//! Pieces shared by the `cgc` and `cgc-normalize` binaries.

pub mod help;

use std::str::FromStr;

use cgc_core::CgcError;
use clap::ArgMatches;
use log::Level;

/// Log level for the `-q` / `-v` flags.
///
/// Quiet shows errors only; otherwise warnings are shown and each `-v`
/// raises the level by one step, up to trace.
#[must_use]
pub fn log_level(quiet: bool, verbose: u8) -> Level {
    if quiet {
        return Level::Error;
    }
    match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

/// Send library log output to stderr at `level`.
pub fn init_logging(level: Level) {
    if let Err(e) = simple_logger::init_with_level(level) {
        eprintln!("Warning: could not initialise logging: {e}");
    }
}

/// Parse a string option into one of the config enums, falling back to its
/// default when the option is absent.
pub fn parse_option<T>(matches: &ArgMatches, id: &str) -> Result<T, CgcError>
where
    T: FromStr<Err = CgcError> + Default,
{
    matches
        .get_one::<String>(id)
        .map_or_else(|| Ok(T::default()), |value| value.parse())
}
