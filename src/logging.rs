//! Logger set-up for hosts and tests.

use env_logger::{Builder, Env};
use log::{debug, LevelFilter};

/// Level used when `RUST_LOG` is unset.
#[must_use]
pub const fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` overrides the level chosen by `verbose`. Debug level shows
/// overlap transitions and motion start/stop; info shows resets and mode
/// switches.
pub fn init(verbose: bool) {
    let env = Env::default().default_filter_or(default_level(verbose).to_string());
    if let Err(e) = Builder::from_env(env).try_init() {
        // Repeated test set-up lands here; the existing logger stays.
        debug!("logger already installed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::quiet(false, LevelFilter::Info)]
    #[case::verbose(true, LevelFilter::Debug)]
    fn verbosity_selects_level(#[case] verbose: bool, #[case] expected: LevelFilter) {
        assert_eq!(default_level(verbose), expected);
    }

    #[rstest]
    fn repeated_init_is_harmless() {
        init(true);
        init(false);
    }
}
