//! SHA-256 hash chain over audit entries.
//!
//! Each appended entry becomes a link whose hash covers the entry
//! payload, the previous link's hash, and the sequence number, so any
//! later alteration of a recorded entry breaks verification from that
//! point on.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// A link in the audit hash chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainLink {
    /// Audit sequence number this link covers.
    pub seq: u64,
    /// SHA-256 of the serialized entry.
    pub entry_hash: String,
    /// The previous link's hash (all zeroes for the first link).
    pub prev_hash: String,
    /// This link's hash.
    pub link_hash: String,
}

impl ChainLink {
    fn first(entry_data: &[u8]) -> Self {
        let entry_hash = hash_bytes(entry_data);
        let prev_hash = "0".repeat(64);
        let link_hash = compute_link_hash(&entry_hash, &prev_hash, 0);
        Self {
            seq: 0,
            entry_hash,
            prev_hash,
            link_hash,
        }
    }

    fn after(entry_data: &[u8], previous: &ChainLink) -> Self {
        let seq = previous.seq + 1;
        let entry_hash = hash_bytes(entry_data);
        let prev_hash = previous.link_hash.clone();
        let link_hash = compute_link_hash(&entry_hash, &prev_hash, seq);
        Self {
            seq,
            entry_hash,
            prev_hash,
            link_hash,
        }
    }

    /// Verify this link's own hash.
    pub fn verify(&self) -> bool {
        compute_link_hash(&self.entry_hash, &self.prev_hash, self.seq) == self.link_hash
    }

    /// Verify continuity with the preceding link.
    pub fn verify_chain(&self, previous: &ChainLink) -> bool {
        self.prev_hash == previous.link_hash && self.seq == previous.seq + 1
    }

    /// Whether this link covers the given entry payload.
    pub fn covers(&self, entry_data: &[u8]) -> bool {
        self.entry_hash == hash_bytes(entry_data)
    }
}

fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

fn compute_link_hash(entry_hash: &str, prev_hash: &str, seq: u64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(seq.to_le_bytes());
    hasher.update(entry_hash.as_bytes());
    hasher.update(prev_hash.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Hash chain over the audit sequence. Starts empty and grows one
/// link per appended entry.
#[derive(Debug, Default)]
pub struct EntryChain {
    links: Vec<ChainLink>,
}

impl EntryChain {
    /// Create an empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a link covering `entry_data`.
    pub fn append(&mut self, entry_data: &[u8]) -> &ChainLink {
        let link = match self.links.last() {
            Some(previous) => ChainLink::after(entry_data, previous),
            None => ChainLink::first(entry_data),
        };
        self.links.push(link);
        // just pushed
        self.links.last().expect("chain is non-empty")
    }

    /// The newest link, if any entry has been appended.
    pub fn head(&self) -> Option<&ChainLink> {
        self.links.last()
    }

    /// Link at a given sequence number.
    pub fn get(&self, seq: u64) -> Option<&ChainLink> {
        self.links.get(seq as usize)
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain has no links.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Verify every link and the continuity between them.
    pub fn verify(&self) -> Result<(), ChainError> {
        for (i, link) in self.links.iter().enumerate() {
            if !link.verify() {
                return Err(ChainError::InvalidLink { seq: i as u64 });
            }
            if i > 0 && !link.verify_chain(&self.links[i - 1]) {
                return Err(ChainError::BrokenChain { at_seq: i as u64 });
            }
        }
        Ok(())
    }
}

/// Chain verification error.
#[derive(Debug, thiserror::Error)]
pub enum ChainError {
    /// A link's own hash does not match its contents.
    #[error("invalid link at seq {seq}")]
    InvalidLink { seq: u64 },
    /// Two adjacent links do not connect.
    #[error("chain is broken at seq {at_seq}")]
    BrokenChain { at_seq: u64 },
    /// A recorded entry no longer matches its link.
    #[error("entry at seq {seq} does not match its chain link")]
    EntryMismatch { seq: u64 },
}
