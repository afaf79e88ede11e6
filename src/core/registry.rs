//! Registry of active loggers
//!
//! A [`LoggerRegistry`] is an ordinary value: create one per process (or per
//! test) and pass it around. Every operation runs under a single mutex, so id
//! generation and insertion cannot race with each other.

use super::error::{LoggerError, Result};
use super::logger::{Logger, LoggerBuilder};
use parking_lot::Mutex;
use rand::Rng;
use std::collections::HashSet;
use std::sync::Arc;

pub const DEFAULT_ID_LENGTH: usize = 5;

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";

/// Random draws before giving up on a nearly full id space
const MAX_ID_ATTEMPTS: usize = 10_000;

/// Random lowercase alphanumeric identifier of `length` characters
pub fn generate_id(length: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..length)
        .map(|_| ID_CHARSET[rng.gen_range(0..ID_CHARSET.len())] as char)
        .collect()
}

/// Number of distinct ids of `length` characters; `None` if it overflows
fn id_space(length: usize) -> Option<usize> {
    u32::try_from(length)
        .ok()
        .and_then(|length| ID_CHARSET.len().checked_pow(length))
}

/// Trim and lower-case a user supplied id; `None` when nothing is left
pub fn normalize_id(id: &str) -> Option<String> {
    let id = id.trim();
    if id.is_empty() {
        None
    } else {
        Some(id.to_lowercase())
    }
}

/// Ordered table of loggers with unique ids
#[derive(Debug)]
pub struct LoggerRegistry {
    instances: Mutex<Vec<Arc<Logger>>>,
    id_length: usize,
}

impl LoggerRegistry {
    pub fn new() -> Self {
        Self::with_id_length(DEFAULT_ID_LENGTH)
    }

    /// Registry generating ids of `id_length` characters (at least one)
    pub fn with_id_length(id_length: usize) -> Self {
        Self {
            instances: Mutex::new(Vec::new()),
            id_length: id_length.max(1),
        }
    }

    /// Append `instance`, refusing ids already registered
    pub fn add(&self, instance: Arc<Logger>) -> Result<()> {
        let mut instances = self.instances.lock();
        if Self::position(&instances, instance.id()).is_some() {
            return Err(LoggerError::duplicate_id(instance.id()));
        }
        instances.push(instance);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<Arc<Logger>> {
        let instances = self.instances.lock();
        Self::position(&instances, id).map(|index| Arc::clone(&instances[index]))
    }

    /// Snapshot of every registered logger, in insertion order
    pub fn get_all(&self) -> Vec<Arc<Logger>> {
        self.instances.lock().clone()
    }

    pub fn contains(&self, id: &str) -> bool {
        Self::position(&self.instances.lock(), id).is_some()
    }

    pub fn len(&self) -> usize {
        self.instances.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.lock().is_empty()
    }

    /// Deregister `id`. Loggers already handed out keep working.
    pub fn remove(&self, id: &str) -> bool {
        let mut instances = self.instances.lock();
        let before = instances.len();
        instances.retain(|instance| instance.id() != id);
        before != instances.len()
    }

    /// Replace the whole contents with `transform(current)`.
    ///
    /// `transform` runs without the registry locked, so it may read the
    /// registry itself. The swap that follows replaces everything, including
    /// loggers other threads registered while `transform` was running.
    ///
    /// If the result holds the same id twice the registry keeps its previous
    /// contents and the duplicate is reported.
    pub fn redefine<F>(&self, transform: F) -> Result<()>
    where
        F: FnOnce(Vec<Arc<Logger>>) -> Vec<Arc<Logger>>,
    {
        let redefined = transform(self.get_all());

        let mut seen = HashSet::with_capacity(redefined.len());
        if let Some(duplicate) = redefined.iter().find(|instance| !seen.insert(instance.id())) {
            return Err(LoggerError::duplicate_id(duplicate.id()));
        }

        *self.instances.lock() = redefined;
        Ok(())
    }

    /// Generate an id not used by any currently registered logger.
    ///
    /// Fails with [`LoggerError::IdentifierSpaceExhausted`] once every id of
    /// the configured length is taken.
    pub fn create_id(&self) -> Result<String> {
        let instances = self.instances.lock();
        self.unused_id(&instances)
    }

    /// Build a logger from `builder` and register it in one step.
    ///
    /// A custom id already in use fails with
    /// [`LoggerError::DuplicateIdentifier`]; without one, a fresh id is
    /// generated while the registry is locked.
    pub fn register(&self, builder: LoggerBuilder) -> Result<Arc<Logger>> {
        let mut instances = self.instances.lock();
        let id = match builder.requested_id() {
            Some(id) => {
                if Self::position(&instances, &id).is_some() {
                    return Err(LoggerError::duplicate_id(id));
                }
                id
            }
            None => self.unused_id(&instances)?,
        };

        let logger = Arc::new(builder.build_with_id(id)?);
        instances.push(Arc::clone(&logger));
        Ok(logger)
    }

    fn unused_id(&self, instances: &[Arc<Logger>]) -> Result<String> {
        let taken = instances
            .iter()
            .filter(|instance| self.is_generated_shape(instance.id()))
            .count();
        if id_space(self.id_length).is_some_and(|space| taken >= space) {
            return Err(LoggerError::ids_exhausted(self.id_length));
        }

        for _ in 0..MAX_ID_ATTEMPTS {
            let id = generate_id(self.id_length);
            if Self::position(instances, &id).is_none() {
                return Ok(id);
            }
        }
        Err(LoggerError::ids_exhausted(self.id_length))
    }

    fn is_generated_shape(&self, id: &str) -> bool {
        id.len() == self.id_length && id.bytes().all(|b| ID_CHARSET.contains(&b))
    }

    fn position(instances: &[Arc<Logger>], id: &str) -> Option<usize> {
        instances.iter().position(|instance| instance.id() == id)
    }
}

impl Default for LoggerRegistry {
    fn default() -> Self {
        Self::new()
    }
}
