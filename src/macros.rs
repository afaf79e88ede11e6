//! Logging macros mirroring the variadic call style.
//!
//! Every macro takes the logger, any number of message parts (anything that
//! converts into a `serde_json::Value`: strings, numbers, booleans, vectors)
//! and, after a `;`, optional `tags = [...]` and `sep = "..."` overrides.
//! Each expands to the matching [`Logger`](crate::Logger) method and
//! evaluates to its `Result`.
//!
//! # Examples
//!
//! ```no_run
//! use chibilog::prelude::*;
//! use chibilog::{info, warn};
//!
//! let logger = Logger::new()?;
//!
//! info!(logger, "Server started")?;
//! info!(logger, "Listening on port", 8080)?;
//! warn!(logger, "disk", 91, "%"; sep = "")?;
//! warn!(logger, "login failed"; tags = ["AUDIT", "auth"])?;
//! # Ok::<(), chibilog::LoggerError>(())
//! ```

/// Build [`LogArgs`](crate::LogArgs) from message parts and optional overrides.
///
/// ```
/// use chibilog::{log_args, Tag};
///
/// let call = log_args!("a", "b"; tags = ["X"], sep = "-").normalize(&[Tag::Warn]);
/// assert_eq!(call.message, "a-b");
/// assert_eq!(call.tags, vec![Tag::new("X")]);
/// ```
#[macro_export]
macro_rules! log_args {
    ($($part:expr),* $(,)?) => {
        $crate::LogArgs::new()$(.part($part))*
    };
    ($($part:expr),* ; $($key:ident = $value:expr),+ $(,)?) => {{
        let options = $crate::LogOptions::new();
        $( let options = $crate::__log_option!(options, $key, $value); )+
        $crate::LogArgs::new()$(.part($part))*.with_options(options)
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_option {
    ($options:expr, tags, $value:expr) => {
        $options.tags($value)
    };
    ($options:expr, sep, $value:expr) => {
        $options.sep($value)
    };
}

/// Log at an explicit level.
///
/// ```no_run
/// # use chibilog::prelude::*;
/// # let logger = Logger::new()?;
/// use chibilog::log;
/// log!(logger, LogLevel::Info, "Simple message")?;
/// log!(logger, LogLevel::Error, "Error code:", 500)?;
/// # Ok::<(), chibilog::LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr $(, $($arg:tt)*)?) => {
        $logger.logger($level, $crate::log_args!($($($arg)*)?))
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.trace($crate::log_args!($($($arg)*)?))
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.debug($crate::log_args!($($($arg)*)?))
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.info($crate::log_args!($($($arg)*)?))
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.warn($crate::log_args!($($($arg)*)?))
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.error($crate::log_args!($($($arg)*)?))
    };
}

/// Log a fatal-level message.
#[macro_export]
macro_rules! fatal {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.fatal($crate::log_args!($($($arg)*)?))
    };
}

/// Print the bare message to the console; the file gets the decorated line.
#[macro_export]
macro_rules! print_raw {
    ($logger:expr $(, $($arg:tt)*)?) => {
        $logger.print($crate::log_args!($($($arg)*)?))
    };
}
