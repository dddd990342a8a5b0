//! Logger setup for the CLI.

use std::fmt;

/// Log level picked from the `-v`/`-q` flags.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verbosity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// Warn by default; each `-v` raises one level, `-q` drops to errors only.
    pub fn from_flags(verbose: u8, quiet: bool) -> Self {
        if quiet {
            return Verbosity::Error;
        }
        match verbose {
            0 => Verbosity::Warn,
            1 => Verbosity::Info,
            2 => Verbosity::Debug,
            _ => Verbosity::Trace,
        }
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        // Lowercase for RUST_LOG compatibility
        let lowercase = format!("{:?}", self).to_lowercase();
        write!(f, "{lowercase}")
    }
}

/// Install `env_logger`. `RUST_LOG` wins over the flags when set.
pub fn init(verbosity: Verbosity) {
    let env = env_logger::Env::default().default_filter_or(verbosity.to_string());
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_target(false)
        .try_init();
}
