//! Coloured stderr logging with level filtering.
//!
//! The minimum level and the timestamp prefix are process-wide settings held
//! in atomics. [`init_from_env`] reads them from `NEO_SCRIPT_LOG` and
//! `NEO_SCRIPT_LOG_TIMESTAMP`.

use std::env;
use std::fmt::{self, Display};
use std::io::Write;
use std::str::FromStr;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Environment variable selecting the minimum log level.
pub const LEVEL_ENV: &str = "NEO_SCRIPT_LOG";
/// Environment variable disabling timestamps when set to `0` or `false`.
pub const TIMESTAMP_ENV: &str = "NEO_SCRIPT_LOG_TIMESTAMP";

/// Log level for filtering messages.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Debug = 0,
    Info = 1,
    Warn = 2,
    Error = 3,
}

impl Level {
    const fn from_u8(value: u8) -> Level {
        match value {
            0 => Level::Debug,
            1 => Level::Info,
            2 => Level::Warn,
            _ => Level::Error,
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Level::Debug => f.pad("DEBUG"),
            Level::Info => f.pad("INFO"),
            Level::Warn => f.pad("WARN"),
            Level::Error => f.pad("ERROR"),
        }
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "debug" => Ok(Level::Debug),
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            other => Err(format!("unknown log level '{other}'")),
        }
    }
}

static MIN_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);
pub static SHOW_TIMESTAMP: AtomicBool = AtomicBool::new(true);

/// Sets the minimum level that is written.
pub fn set_level(level: Level) {
    MIN_LEVEL.store(level as u8, Ordering::Relaxed);
}

/// Returns the current minimum level.
pub fn level() -> Level {
    Level::from_u8(MIN_LEVEL.load(Ordering::Relaxed))
}

/// Returns true if messages at `level` are written.
pub fn enabled(level: Level) -> bool {
    level >= self::level()
}

/// Applies [`LEVEL_ENV`] and [`TIMESTAMP_ENV`].
///
/// Returns an error naming the variable when its value is not understood;
/// settings read before the error stay applied.
pub fn init_from_env() -> Result<(), String> {
    if let Ok(value) = env::var(LEVEL_ENV) {
        set_level(value.parse().map_err(|e| format!("{LEVEL_ENV}: {e}"))?);
    }
    if let Ok(value) = env::var(TIMESTAMP_ENV) {
        let show = match value.as_str() {
            "0" | "false" => false,
            "1" | "true" => true,
            other => return Err(format!("{TIMESTAMP_ENV}: expected 0 or 1, got '{other}'")),
        };
        SHOW_TIMESTAMP.store(show, Ordering::Relaxed);
    }
    Ok(())
}

/// UTC wall-clock time split into calendar fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Timestamp {
    year: u32,
    month: u32,
    day: u32,
    hour: u64,
    minute: u64,
    second: u64,
    millis: u32,
}

impl Timestamp {
    fn now() -> Self {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default();
        Self::from_unix(now.as_secs(), now.subsec_millis())
    }

    /// Converts seconds since the Unix epoch, using Howard Hinnant's
    /// civil-from-days algorithm for the date part.
    fn from_unix(secs: u64, millis: u32) -> Self {
        let z = (secs / 86400) as i64 + 719468;
        let era = z.div_euclid(146097);
        let doe = z.rem_euclid(146097) as u32;
        let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe as i64 + era * 400 + i64::from(month <= 2);

        Self {
            year: year as u32,
            month,
            day,
            hour: (secs / 3600) % 24,
            minute: (secs / 60) % 60,
            second: secs % 60,
            millis,
        }
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:03}",
            self.year, self.month, self.day, self.hour, self.minute, self.second, self.millis
        )
    }
}

/// Internal logging function. Use the `debug!`, `info!`, `warn!` or `error!` macros instead.
#[doc(hidden)]
pub fn log(level: Level, message: &str) {
    if !enabled(level) {
        return;
    }

    let mut stderr = StandardStream::stderr(ColorChoice::Auto);
    let mut spec = ColorSpec::new();
    match level {
        Level::Debug => {
            spec.set_fg(Some(Color::Cyan));
        }
        Level::Warn => {
            spec.set_fg(Some(Color::Yellow)).set_bold(true);
        }
        Level::Error => {
            spec.set_fg(Some(Color::Red)).set_bold(true);
        }
        Level::Info => {}
    }
    let _ = stderr.set_color(&spec);

    if SHOW_TIMESTAMP.load(Ordering::Relaxed) {
        let _ = write!(stderr, "{} ", Timestamp::now());
    }
    let _ = writeln!(stderr, "[{:5}] {}", level, message);
    let _ = stderr.reset();
}

/// Logs a debug-level message.
#[macro_export]
macro_rules! debug {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) && $crate::utils::log::enabled($crate::utils::log::Level::Debug) {
            $crate::utils::log::log($crate::utils::log::Level::Debug, &format!($($arg)*))
        }
    }};
}

/// Logs an info-level message.
#[macro_export]
macro_rules! info {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) {
            $crate::utils::log::log($crate::utils::log::Level::Info, &format!($($arg)*))
        }
    }};
}

/// Logs a warning-level message.
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) {
            $crate::utils::log::log($crate::utils::log::Level::Warn, &format!($($arg)*))
        }
    }};
}

/// Logs an error-level message.
#[macro_export]
macro_rules! error {
    ($($arg:tt)*) => {{
        if cfg!(not(test)) {
            $crate::utils::log::log($crate::utils::log::Level::Error, &format!($($arg)*))
        }
    }};
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_ordering() {
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn level_parse_and_display() {
        assert_eq!("DEBUG".parse::<Level>(), Ok(Level::Debug));
        assert_eq!("warning".parse::<Level>(), Ok(Level::Warn));
        assert!("loud".parse::<Level>().is_err());
        assert_eq!(Level::Error.to_string(), "ERROR");
        for level in [Level::Debug, Level::Info, Level::Warn, Level::Error] {
            assert_eq!(Level::from_u8(level as u8), level);
        }
    }

    #[test]
    fn timestamp_epoch() {
        let ts = Timestamp::from_unix(0, 0);
        assert_eq!((ts.year, ts.month, ts.day), (1970, 1, 1));
        assert_eq!(ts.to_string(), "1970-01-01 00:00:00.000");
    }

    #[test]
    fn timestamp_leap_day() {
        // 2024-02-29 12:34:56 UTC
        let ts = Timestamp::from_unix(19782 * 86400 + 12 * 3600 + 34 * 60 + 56, 7);
        assert_eq!(ts.to_string(), "2024-02-29 12:34:56.007");
    }

    #[test]
    fn timestamp_year_boundary() {
        // 2023-12-31 23:59:59 UTC
        let ts = Timestamp::from_unix(19722 * 86400 + 86399, 999);
        assert_eq!(ts.to_string(), "2023-12-31 23:59:59.999");
    }
}
