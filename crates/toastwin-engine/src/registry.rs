//! Live instance bookkeeping with upsert-replace semantics per identity.

use std::collections::HashMap;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use toastwin_bridge::render::InstanceKey;
use uuid::Uuid;

/// Handle returned by [`InstanceRegistry::upsert`] for a freshly created
/// instance.
#[derive(Debug, Clone)]
pub struct Lease {
    pub key: InstanceKey,
    pub generation: u64,
    /// Cancelled when the instance is superseded or shut down.
    pub cancel: CancellationToken,
    /// Generation of the instance this one replaced, if any.
    pub superseded: Option<u64>,
}

#[derive(Debug)]
struct Entry {
    generation: u64,
    cancel: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl Entry {
    /// Stops every timer the instance owns. Returns once the task can no
    /// longer run.
    fn dispose(self) {
        self.cancel.cancel();
        if let Some(task) = self.task {
            task.abort();
        }
    }
}

/// Maps instance identity to its running lifecycle.
///
/// At most one entry exists per named identity. Replacing an entry cancels
/// the old lifecycle before the new lease is handed out, within the same
/// call.
#[derive(Debug, Default)]
pub struct InstanceRegistry {
    entries: HashMap<InstanceKey, Entry>,
}

impl InstanceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an entry for `identity`, replacing and disposing any live
    /// entry with the same identity. Absent or empty identities always get a
    /// fresh anonymous key at generation 0.
    pub fn upsert(&mut self, identity: Option<&str>) -> Lease {
        let key = match identity.filter(|identity| !identity.is_empty()) {
            Some(identity) => InstanceKey::Named(identity.to_string()),
            None => InstanceKey::Anonymous(Uuid::new_v4()),
        };

        let superseded = self.entries.remove(&key).map(|previous| {
            let generation = previous.generation;
            previous.dispose();
            generation
        });
        let generation = superseded.map_or(0, |previous| previous + 1);

        let cancel = CancellationToken::new();
        self.entries.insert(
            key.clone(),
            Entry {
                generation,
                cancel: cancel.clone(),
                task: None,
            },
        );

        Lease {
            key,
            generation,
            cancel,
            superseded,
        }
    }

    /// Stores the task driving `lease`'s lifecycle so that disposal can abort
    /// it. A task for a lease that is no longer current is aborted instead.
    pub fn attach(&mut self, lease: &Lease, task: JoinHandle<()>) {
        match self.entries.get_mut(&lease.key) {
            Some(entry) if entry.generation == lease.generation => entry.task = Some(task),
            _ => task.abort(),
        }
    }

    /// Removes the entry for `key` if it still belongs to `generation`.
    /// Returns `false` when the entry was already replaced or removed.
    pub fn release(&mut self, key: &InstanceKey, generation: u64) -> bool {
        match self.entries.get(key) {
            Some(entry) if entry.generation == generation => {
                self.entries.remove(key);
                true
            }
            _ => false,
        }
    }

    /// Disposes every live instance, returning their keys and generations.
    pub fn dispose_all(&mut self) -> Vec<(InstanceKey, u64)> {
        self.entries
            .drain()
            .map(|(key, entry)| {
                let generation = entry.generation;
                entry.dispose();
                (key, generation)
            })
            .collect()
    }

    pub fn generation_of(&self, identity: &str) -> Option<u64> {
        self.entries
            .get(&InstanceKey::Named(identity.to_string()))
            .map(|entry| entry.generation)
    }

    pub fn active_count(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
