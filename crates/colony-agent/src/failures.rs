use colony_core::{SimDuration, SimTime};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTask {
    pub name: String,
    pub failed_at: SimTime,
}

/// Recent failures of one creature, keyed by task name.
///
/// A task listed here is skipped by idle selection until its entry expires.
#[derive(Debug, Clone, Default)]
pub struct FailedTasks {
    entries: Vec<FailedTask>,
}

impl FailedTasks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FailedTask> {
        self.entries.iter()
    }

    pub fn was_failed(&self, name: &str) -> bool {
        self.entries.iter().any(|f| f.name == name)
    }

    /// Returns false if the task already has an entry; the original timestamp is kept.
    pub fn record(&mut self, name: &str, now: SimTime) -> bool {
        if self.was_failed(name) {
            return false;
        }
        self.entries.push(FailedTask {
            name: name.to_string(),
            failed_at: now,
        });
        true
    }

    /// Drop entries at least `retention` old. Returns how many were dropped.
    pub fn expire(&mut self, now: SimTime, retention: SimDuration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|f| now.since(f.failed_at) < retention);
        before - self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
