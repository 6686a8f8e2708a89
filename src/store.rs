// 🗄️ Receipt Store - In-memory, process lifetime only
// Maps a generated identifier to its receipt and points under a single lock

use crate::error::{ReceiptError, Result};
use crate::receipt::{Receipt, ScoredReceipt};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

/// Accepted receipts keyed by identifier.
///
/// Receipt and points live in one entry, so an identifier can never have
/// points without a receipt or the reverse. Entries are write-once.
#[derive(Debug, Default)]
pub struct ReceiptStore {
    entries: Mutex<HashMap<String, ScoredReceipt>>,
}

impl ReceiptStore {
    pub fn new() -> Self {
        Self::default()
    }

    // Entries are inserted whole, so a poisoned map is still consistent.
    fn entries(&self) -> MutexGuard<'_, HashMap<String, ScoredReceipt>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Record a scored receipt under a fresh UUID v4 and return the identifier
    pub fn insert(&self, receipt: Receipt, points: u64) -> String {
        let id = Uuid::new_v4().to_string();
        let scored = ScoredReceipt {
            id: id.clone(),
            receipt,
            points,
            accepted_at: Utc::now(),
        };

        self.entries().insert(id.clone(), scored);
        id
    }

    /// Points stored for `id`
    pub fn lookup_points(&self, id: &str) -> Result<u64> {
        self.entries()
            .get(id)
            .map(|scored| scored.points)
            .ok_or(ReceiptError::NotFound)
    }

    /// Full stored record for `id`
    pub fn get(&self, id: &str) -> Result<ScoredReceipt> {
        self.entries().get(id).cloned().ok_or(ReceiptError::NotFound)
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

// ============================================================================
// TESTS
// ============================================================================
