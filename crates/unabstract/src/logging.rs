//! Logging setup.
//!
//! The library only emits `tracing` events. Binaries install a subscriber
//! with [`init_logging`]; `RUST_LOG` takes precedence over the verbosity
//! given on the command line.
//!
//! ```ignore
//! use unabstract::logging::{init_logging, targets};
//!
//! init_logging(1);
//! tracing::info!(target: targets::CLI, "starting");
//! ```

use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Target names for log filtering.
///
/// Use these with `RUST_LOG` directives to filter logs by subsystem.
pub mod targets {
    /// Library target.
    pub const UNABSTRACT: &str = "unabstract";
    /// File discovery target.
    pub const DISCOVERY: &str = "unabstract::discovery";
    /// Markup matching and rewriting target.
    pub const MARKUP: &str = "unabstract::markup";
    /// Command-line driver target.
    pub const CLI: &str = "unabstract::cli";
    /// Stylesheet parsing and resolution target.
    pub const STYLE: &str = "unabstract_style";
}

/// Default filter directive for a `-v` count.
pub fn default_directive(verbosity: u8) -> String {
    let level = match verbosity {
        0 => return "warn".to_string(),
        1 => "info",
        2 => "debug",
        _ => return "trace".to_string(),
    };
    let fallback = if verbosity > 1 { "info" } else { "warn" };
    format!(
        "{}={level},{}={level},{fallback}",
        targets::UNABSTRACT,
        targets::STYLE
    )
}

/// Install a `fmt` subscriber on stderr. Does nothing if one is already set.
pub fn init_logging(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_raises_level() {
        assert_eq!(default_directive(0), "warn");
        assert_eq!(
            default_directive(1),
            "unabstract=info,unabstract_style=info,warn"
        );
        assert_eq!(
            default_directive(2),
            "unabstract=debug,unabstract_style=debug,info"
        );
        assert_eq!(default_directive(9), "trace");
    }

    #[test]
    fn init_twice_is_harmless() {
        init_logging(0);
        init_logging(2);
    }
}
