//! Concurrent reminder store with snapshot persistence
//!
//! - **Version**: 1.2.0
//! - **Since**: 0.2.0
//!
//! ## Changelog
//! - 1.2.0: Collect-and-remove under one write lock for exactly-once delivery
//! - 1.1.0: Archive snapshot on exit
//! - 1.0.0: Initial map with bincode save/load

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use anyhow::{Context, Result};
use chrono::Utc;
use log::{error, info};

use crate::core::Config;

use super::message::{Message, RecipientKey};

/// Render format for expiry stamps in the operator dump.
const PPRINT_FORMAT: &str = "%d %b %Y %H:%M";

type MessageMap = HashMap<RecipientKey, Vec<Message>>;

/// The per-recipient queues of timed reminders.
///
/// One reader/writer lock guards the whole map: coarse, but the working set
/// is small and every operation is O(entries per key). Expiration is
/// poll-driven — a message is only noticed once some chat activity asks
/// [`get_expired`](Reminds::get_expired) about its exact key — so there is
/// no background scheduler to coordinate with.
///
/// Map invariant: a present key always has a non-empty queue; queues are
/// deleted the moment they drain.
pub struct Reminds {
    map: RwLock<MessageMap>,
    canonical: PathBuf,
    archive_dir: PathBuf,
}

impl Reminds {
    /// Create an empty store persisting to `canonical`, with exit archives
    /// under `archive_dir`.
    pub fn new(canonical: impl Into<PathBuf>, archive_dir: impl Into<PathBuf>) -> Self {
        Reminds {
            map: RwLock::new(HashMap::new()),
            canonical: canonical.into(),
            archive_dir: archive_dir.into(),
        }
    }

    /// Create an empty store using the configured snapshot paths.
    pub fn from_config(config: &Config) -> Self {
        Reminds::new(&config.reminds_file, &config.data_dir)
    }

    /// The canonical snapshot path this store loads from and saves to.
    pub fn canonical_path(&self) -> &Path {
        &self.canonical
    }

    // A poisoned lock means another thread panicked mid-operation; none of
    // the critical sections leave the map structurally torn, so recover the
    // guard instead of propagating the panic.
    fn read_map(&self) -> RwLockReadGuard<'_, MessageMap> {
        self.map.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_map(&self) -> RwLockWriteGuard<'_, MessageMap> {
        self.map.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Queue a reminder for `key`, arming its alarm if needed.
    pub fn add(&self, key: RecipientKey, mut msg: Message) {
        msg.arm();

        let mut map = self.write_map();
        map.entry(key).or_default().push(msg);
    }

    /// Collect and remove every matured reminder for `key`.
    ///
    /// The due check is non-blocking: a message counts only if its alarm has
    /// already gone off at the instant of the call. Collection and removal
    /// happen under one write lock, so concurrent pollers of the same key
    /// each see a given message at most once. Returns due messages in
    /// expiry-ascending order; an absent key or nothing due yields an empty
    /// vector.
    pub fn get_expired(&self, key: &RecipientKey) -> Vec<Message> {
        let mut map = self.write_map();

        let Some(queue) = map.get_mut(key) else {
            return Vec::new();
        };

        let mut due_indices = Vec::new();
        for (i, msg) in queue.iter_mut().enumerate() {
            msg.arm();
            if msg.is_due() {
                due_indices.push(i);
            }
        }
        if due_indices.is_empty() {
            return Vec::new();
        }

        // Descending index order keeps the collected indices valid while
        // swap_remove shuffles the tail of the queue.
        let mut due = Vec::with_capacity(due_indices.len());
        for &i in due_indices.iter().rev() {
            due.push(queue.swap_remove(i));
        }

        if queue.is_empty() {
            map.remove(key);
        }

        due.sort_by_key(|msg| msg.expire_at);
        due
    }

    /// Serialize the whole map to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let file = File::create(path)
            .with_context(|| format!("failed to create snapshot file {}", path.display()))?;

        let map = self.read_map();
        bincode::serialize_into(BufWriter::new(file), &*map)
            .with_context(|| format!("failed to encode snapshot to {}", path.display()))?;

        Ok(())
    }

    /// Replace the map with the snapshot at `path`, re-arming every alarm.
    ///
    /// A missing file is success and leaves the store as constructed; a
    /// decode failure leaves the in-memory map untouched. Alarms re-armed
    /// from an `expire_at` already in the past are due on the next poll.
    pub fn load(&self, path: &Path) -> Result<()> {
        let file = match File::open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to open snapshot file {}", path.display()))
            }
        };

        let mut loaded: MessageMap = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("failed to decode snapshot from {}", path.display()))?;

        for queue in loaded.values_mut() {
            for msg in queue.iter_mut() {
                msg.arm();
            }
        }

        *self.write_map() = loaded;
        Ok(())
    }

    /// Load the canonical snapshot; called once at process start.
    pub fn start(&self) -> Result<()> {
        self.load(&self.canonical)
    }

    /// Save the canonical snapshot plus a timestamped archive copy.
    ///
    /// The two writes are independent best-effort: both always run, and the
    /// first failure (if any) is returned after both have been attempted.
    pub fn exit(&self) -> Result<()> {
        let stamp = Utc::now();

        let canonical_result = self.save(&self.canonical);
        if let Err(e) = &canonical_result {
            error!("Failed to save canonical reminder snapshot: {e:#}");
        }

        let archive_result = self.save_archive_at(&stamp);
        if let Err(e) = &archive_result {
            error!("Failed to save archive reminder snapshot: {e:#}");
        }

        canonical_result.and(archive_result)
    }

    fn save_archive_at(&self, stamp: &chrono::DateTime<Utc>) -> Result<()> {
        let dir = self.archive_dir.join(stamp.format("%Y-%m").to_string());
        std::fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create archive directory {}", dir.display()))?;

        let file = dir.join(stamp.format("%d_(%H.%M).bin").to_string());
        self.save(&file)?;
        info!("Archived reminder snapshot to {}", file.display());
        Ok(())
    }

    /// Diagnostic dump grouped by channel then nick, each entry marked due
    /// or pending. Operator-facing only; no chat path uses this.
    pub fn render(&self) -> String {
        let map = self.read_map();
        let now = Utc::now();

        let mut channels: BTreeMap<&str, BTreeMap<&str, Vec<String>>> = BTreeMap::new();
        for (key, queue) in map.iter() {
            let entries = channels
                .entry(key.channel.as_str())
                .or_default()
                .entry(key.nick.as_str())
                .or_default();

            for msg in queue {
                let status = if now < msg.expire_at { "pending" } else { "due" };
                entries.push(format!(
                    "[{status}] {} - {}: {}",
                    msg.expire_at.format(PPRINT_FORMAT),
                    msg.from,
                    msg.text
                ));
            }
        }

        let mut out = String::new();
        for (channel, nicks) in channels {
            out.push_str(channel);
            out.push('\n');
            for (nick, entries) in nicks {
                out.push_str(&format!("  {nick}\n    {}\n", entries.join("\n    ")));
            }
            out.push('\n');
        }
        out
    }

    /// Deep copy of the map with alarms stripped, safe to iterate without
    /// holding the store's lock.
    pub fn snapshot(&self) -> HashMap<RecipientKey, Vec<Message>> {
        let map = self.read_map();
        map.iter()
            .map(|(key, queue)| {
                (
                    key.clone(),
                    queue.iter().map(Message::without_alarm).collect(),
                )
            })
            .collect()
    }

    /// Total queued messages across all keys.
    pub fn len(&self) -> usize {
        self.read_map().values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.read_map().is_empty()
    }
}
