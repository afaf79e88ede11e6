//! Log file naming strategies

use super::error::Result;
use chrono::{DateTime, Local, Utc};

/// Maps the instant of a log call to the name of the file it lands in,
/// relative to the logger's directory.
pub trait FileNamer: Send + Sync {
    fn file_name(&self, at: &DateTime<Utc>) -> Result<String>;
}

impl<F> FileNamer for F
where
    F: Fn(&DateTime<Utc>) -> Result<String> + Send + Sync,
{
    fn file_name(&self, at: &DateTime<Utc>) -> Result<String> {
        self(at)
    }
}

/// One file per process and local calendar day:
/// `log_<pid>_<DD>-<MM>-<YYYY>.log`
#[derive(Debug, Clone, Copy, Default)]
pub struct DailyFileNamer;

impl DailyFileNamer {
    pub fn name_for(pid: u32, at: &DateTime<Utc>) -> String {
        let local = at.with_timezone(&Local);
        format!("log_{}_{}.log", pid, local.format("%d-%m-%Y"))
    }
}

impl FileNamer for DailyFileNamer {
    fn file_name(&self, at: &DateTime<Utc>) -> Result<String> {
        Ok(Self::name_for(std::process::id(), at))
    }
}
