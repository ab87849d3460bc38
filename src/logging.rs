//! Diagnostics to stderr via tracing

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Parse a filter directive string (e.g. `"info"`, `"letterfreq=debug"`,
/// `"warn,letterfreq::sink=trace"`).
pub fn parse_filter(filter: &str) -> Result<EnvFilter, ParseError> {
    EnvFilter::try_new(filter)
}

/// Install the global subscriber with the given filter.
///
/// The filter comes from configuration only; the environment is not
/// consulted. Returns `Ok(false)` if a subscriber was already installed.
pub fn init(filter: &str) -> Result<bool, ParseError> {
    let filter = parse_filter(filter)?;

    Ok(tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .try_init()
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_filter_accepts_levels_and_directives() {
        for ok in ["info", "off", "letterfreq=debug", "warn,letterfreq::sink=trace"] {
            assert!(parse_filter(ok).is_ok(), "'{}' should parse", ok);
        }
    }

    #[test]
    fn test_parse_filter_rejects_garbage() {
        assert!(parse_filter("letterfreq=chatty").is_err());
        assert!(init("letterfreq=chatty").is_err());
    }
}
