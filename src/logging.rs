//! Logger setup.
//!
//! Levels follow the command-line flags: `-q` keeps errors only, the default
//! shows warnings, and each `-v` adds one level up to trace. `RUST_LOG`
//! overrides the computed level when set.

use log::LevelFilter;

/// Map verbosity flags to a level filter.
#[must_use]
pub const fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Install the global logger. Later calls are ignored.
pub fn init_logger(verbose: u8, quiet: bool) {
    let result = env_logger::Builder::new()
        .filter_level(level_for(verbose, quiet))
        .format_timestamp_secs()
        .format_target(false)
        .parse_default_env()
        .try_init();
    if result.is_err() {
        log::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_wins() {
        assert_eq!(level_for(0, true), LevelFilter::Error);
        assert_eq!(level_for(3, true), LevelFilter::Error);
    }

    #[test]
    fn verbosity_ladder() {
        assert_eq!(level_for(0, false), LevelFilter::Warn);
        assert_eq!(level_for(1, false), LevelFilter::Info);
        assert_eq!(level_for(2, false), LevelFilter::Debug);
        assert_eq!(level_for(3, false), LevelFilter::Trace);
        assert_eq!(level_for(9, false), LevelFilter::Trace);
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logger(0, false);
        init_logger(2, false);
    }
}
