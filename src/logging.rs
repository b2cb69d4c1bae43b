use std::io::Write;

use chrono::Local;
use log::LevelFilter;

/// Resolve the log level: explicit argument, then `RUST_LOG`, then `info`.
pub fn resolve_level(level: Option<&str>) -> LevelFilter {
    level
        .and_then(|l| l.parse::<LevelFilter>().ok())
        .or_else(|| std::env::var("RUST_LOG").ok().and_then(|v| v.parse().ok()))
        .unwrap_or(LevelFilter::Info)
}

/// Install the global logger. Only the binary calls this; the library just emits.
pub fn init_logging(level: Option<&str>) {
    let log_level = resolve_level(level);
    let result = env_logger::Builder::new()
        .filter_level(log_level)
        .format(|buf, record| {
            writeln!(buf, "[{} {:5}] {}", Local::now().format("%H:%M:%S"), record.level(), record.args())
        })
        .try_init();
    if result.is_ok() {
        log::debug!("Logger initialized (level: {})", log_level);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_level_wins() {
        assert_eq!(resolve_level(Some("trace")), LevelFilter::Trace);
        assert_eq!(resolve_level(Some("WARN")), LevelFilter::Warn);
    }
}
