//! Appender implementations

pub mod console;
pub mod file;

pub use console::{ConsoleChannel, ConsoleSink, MemoryConsole, StdConsole};
pub use file::{FileAppender, RecordLayout};
