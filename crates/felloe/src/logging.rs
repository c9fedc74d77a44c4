use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

const CRATES: &[&str] = &[
    "felloe",
    "felloe_archive",
    "felloe_fetch",
    "felloe_fs",
    "felloe_platform",
    "felloe_verify",
    "felloe_version",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn as_str(self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
            Self::Trace => "trace",
        }
    }

    /// Dependencies stay at `warn`; our crates log at `self`.
    pub fn directives(self) -> String {
        std::iter::once("warn".to_string())
            .chain(CRATES.iter().map(|krate| format!("{krate}={}", self.as_str())))
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Installs the stderr subscriber. `RUST_LOG` overrides `level`.
pub fn init(level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level.directives()));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init();
}
