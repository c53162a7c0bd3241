//! Structured JSON logging to stderr.
//!
//! The client logs request outcomes when debug logging is turned on. Each line
//! is a single JSON object:
//!
//! ```json
//! {"level":"info","msg":"restli response","method":"get","url":"https://api.linkedin.com/v2/me","status":"200","ts":"2025-01-16T10:30:00.000Z"}
//! {"level":"error","msg":"restli request failed","method":"finder","error":"HTTP 403 Forbidden","ts":"2025-01-16T10:30:02.000Z"}
//! ```
//!
//! # Structured Logging
//!
//! ```no_run
//! # use restli_sdk::log;
//! let url = "https://api.linkedin.com/v2/adAccounts";
//! log!(info, "restli response", url: url, status: 200);
//! log!(warn, "query tunneled");
//! ```
//!
//! # Format String Style
//!
//! ```no_run
//! # use restli_sdk::log;
//! log::info!("sent {} requests", 3);
//! log::error!("transport failed: {}", "connection reset");
//! log::debug!("encoded query: {}", "ids=List(1,2)"); // debug builds only
//! ```
//!
//! The macros are defined as `log_info!` etc. and re-exported here as
//! `info`, `warn`, `error`, and `debug`.

use std::io::Write;
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::{Map, Value};

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.sssZ`.
#[doc(hidden)]
#[must_use]
pub fn __format_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    __format_timestamp_from_duration(now.as_secs(), now.subsec_millis())
}

/// Format seconds since the Unix epoch plus milliseconds.
///
/// Calendar conversion is Howard Hinnant's `civil_from_days`:
/// <https://howardhinnant.github.io/date_algorithms.html#civil_from_days>
#[doc(hidden)]
#[must_use]
#[allow(clippy::similar_names)] // doe/doy/yoe follow the published algorithm
pub fn __format_timestamp_from_duration(secs: u64, millis: u32) -> String {
    use crate::constants::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};

    let days = secs / SECONDS_PER_DAY;
    let time_of_day = secs % SECONDS_PER_DAY;
    let hours = time_of_day / SECONDS_PER_HOUR;
    let minutes = (time_of_day % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = time_of_day % SECONDS_PER_MINUTE;

    // Epoch shifted to 0000-03-01; eras are 400-year cycles of 146097 days.
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + u64::from(month <= 2);

    format!("{year:04}-{month:02}-{day:02}T{hours:02}:{minutes:02}:{seconds:02}.{millis:03}Z")
}

/// Build one log line. Field values are always rendered as JSON strings.
#[doc(hidden)]
#[must_use]
pub fn __build_structured_log(level: &str, msg: &str, fields: &[(&str, String)]) -> String {
    let mut line = Map::with_capacity(fields.len() + 3);
    line.insert("level".to_string(), Value::from(level));
    line.insert("msg".to_string(), Value::from(msg));
    for (key, value) in fields {
        line.insert((*key).to_string(), Value::from(value.as_str()));
    }
    line.insert("ts".to_string(), Value::from(__format_timestamp()));
    Value::Object(line).to_string()
}

/// Write one log line to stderr. Write failures are ignored.
#[doc(hidden)]
pub fn __emit(level: &str, msg: &str, fields: &[(&str, String)]) {
    let line = __build_structured_log(level, msg, fields);
    let _ = writeln!(std::io::stderr(), "{line}");
}

/// Log an informational message to stderr.
///
/// ```no_run
/// # use restli_sdk::log;
/// log::info!("batch of {} entities created", 4);
/// ```
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::log::__emit("info", &format!($($arg)*), &[])
    };
}

/// Log a warning to stderr.
///
/// ```no_run
/// # use restli_sdk::log;
/// log::warn!("query string is {} bytes, tunneling", 5120);
/// ```
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::log::__emit("warn", &format!($($arg)*), &[])
    };
}

/// Log an error to stderr.
///
/// ```no_run
/// # use restli_sdk::log;
/// log::error!("request failed: {}", "HTTP 500");
/// ```
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::log::__emit("error", &format!($($arg)*), &[])
    };
}

/// Log a debug message to stderr. Compiled out of release builds.
///
/// ```no_run
/// # use restli_sdk::log;
/// log::debug!("boundary picked after {} attempts", 1);
/// ```
#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        #[cfg(debug_assertions)]
        $crate::log::__emit("debug", &format!($($arg)*), &[]);
    }};
}

pub use log_debug as debug;
pub use log_error as error;
pub use log_info as info;
pub use log_warn as warn;

// ============================================================================
// STRUCTURED LOGGING MACRO
// ============================================================================

/// Structured log line with `key: value` fields.
///
/// Values only need `Display`.
///
/// ```no_run
/// # use restli_sdk::log;
/// log!(info, "restli response", method: "batch_get", status: 200);
/// log!(error, "restli request failed");
/// ```
///
/// Unlike `log::debug!`, `log!(debug, ...)` is kept in release builds.
#[macro_export]
macro_rules! log {
    ($level:ident, $msg:expr $(, $key:ident : $value:expr)* $(,)?) => {
        $crate::log::__emit(
            stringify!($level),
            $msg,
            &[$( (stringify!($key), format!("{}", $value)) ),*],
        )
    };
}
