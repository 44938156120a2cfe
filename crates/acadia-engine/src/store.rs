//! Store abstractions and in-memory implementations.
//!
//! The engine owns no persistence: it is handed user and record state
//! through these seams and returns updated records for the store to
//! keep. The in-memory implementations back tests and embedded use.

use acadia_audit::UserLookup;
use acadia_common_core::{RecordId, UserId};
use acadia_types::{StudentRecord, User};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};

/// Record persistence seam.
pub trait RecordStore: Send + Sync {
    /// Look up a record by id.
    fn get(&self, id: RecordId) -> Option<StudentRecord>;

    /// Insert a freshly created record.
    fn insert(&self, record: StudentRecord);

    /// Persist an updated record (including version-history growth).
    fn put(&self, record: StudentRecord);

    /// Allocate a fresh unique record id.
    ///
    /// Backed by a dedicated counter; ids are never reused, even
    /// after deletions.
    fn next_id(&self) -> RecordId;

    /// Point-in-time snapshot of every record.
    fn all(&self) -> Vec<StudentRecord>;
}

/// In-memory record store.
pub struct MemoryRecordStore {
    records: RwLock<BTreeMap<RecordId, StudentRecord>>,
    next_id: AtomicU64,
}

impl Default for MemoryRecordStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryRecordStore {
    /// Create an empty store; the first allocated id is `rec_1`.
    pub fn new() -> Self {
        Self {
            records: RwLock::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.read().len()
    }

    /// Whether the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.read().is_empty()
    }

    /// Remove a record. Freed ids are never handed out again.
    pub fn remove(&self, id: RecordId) -> Option<StudentRecord> {
        self.records.write().remove(&id)
    }
}

impl RecordStore for MemoryRecordStore {
    fn get(&self, id: RecordId) -> Option<StudentRecord> {
        self.records.read().get(&id).cloned()
    }

    fn insert(&self, record: StudentRecord) {
        self.records.write().insert(record.id, record);
    }

    fn put(&self, record: StudentRecord) {
        self.records.write().insert(record.id, record);
    }

    fn next_id(&self) -> RecordId {
        RecordId::new(self.next_id.fetch_add(1, Ordering::Relaxed))
    }

    fn all(&self) -> Vec<StudentRecord> {
        self.records.read().values().cloned().collect()
    }
}

/// In-memory user store.
#[derive(Default)]
pub struct MemoryUserStore {
    users: RwLock<HashMap<UserId, User>>,
}

impl MemoryUserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub fn insert(&self, user: User) {
        self.users.write().insert(user.id, user);
    }
}

impl UserLookup for MemoryUserStore {
    fn lookup_user(&self, id: UserId) -> Option<User> {
        self.users.read().get(&id).cloned()
    }
}
