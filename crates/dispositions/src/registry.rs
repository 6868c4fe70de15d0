//! Global disposition settings shared by every campaign.
//!
//! The registry is handed to the engine as an `Arc` at construction; no
//! module reaches for it as ambient state. Reads return snapshots, so a
//! caller never observes a half-applied update.

use outdial_core::types::{Disposition, FollowUpAction};
use outdial_core::{DialerError, DialerResult};
use parking_lot::RwLock;

/// Prompt handed to the transcript classifier. Kept alongside the
/// dispositions because the two are edited together.
pub const DEFAULT_CLASSIFICATION_PROMPT: &str = "Classify call outcomes based on transcript. \
     Use dispositions: Qualified, Not Interested, Hang Up, Callback.";

/// Ordered collection of dispositions, unique by case-sensitive name.
/// Insertion order is preserved; it is the order operators see.
pub struct DispositionRegistry {
    dispositions: RwLock<Vec<Disposition>>,
    classification_prompt: RwLock<String>,
}

impl DispositionRegistry {
    pub fn new() -> Self {
        Self {
            dispositions: RwLock::new(Vec::new()),
            classification_prompt: RwLock::new(DEFAULT_CLASSIFICATION_PROMPT.to_string()),
        }
    }

    /// Registry pre-loaded with the stock disposition set.
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.seed_defaults();
        registry
    }

    /// Install the stock dispositions, skipping any name already present.
    pub fn seed_defaults(&self) {
        let stock: [(&str, &[&str], FollowUpAction); 4] = [
            ("Qualified", &["interested", "warm lead"], FollowUpAction::SendToCrm),
            ("Not Interested", &["do not call"], FollowUpAction::MarkDnc),
            ("Hang Up", &["dropped"], FollowUpAction::LogOnly),
            ("Callback", &["retry", "call later"], FollowUpAction::AddToRetryQueue),
        ];

        let mut seeded = 0;
        for (name, tags, action) in stock {
            let disposition = Disposition {
                name: name.to_string(),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                action,
            };
            let mut list = self.dispositions.write();
            if !list.iter().any(|d| d.name == disposition.name) {
                list.push(disposition);
                seeded += 1;
            }
        }
        tracing::info!(seeded, "stock dispositions seeded");
    }

    /// Add a disposition. Fails with `DuplicateDisposition` when the name
    /// is taken; the registry is unchanged on failure.
    pub fn add(
        &self,
        name: impl Into<String>,
        tags: Vec<String>,
        action: FollowUpAction,
    ) -> DialerResult<Disposition> {
        let disposition = Disposition {
            name: name.into(),
            tags,
            action,
        };
        let mut list = self.dispositions.write();
        if list.iter().any(|d| d.name == disposition.name) {
            return Err(DialerError::DuplicateDisposition(disposition.name));
        }
        list.push(disposition.clone());
        tracing::info!(name = %disposition.name, action = ?disposition.action, "disposition added");
        Ok(disposition)
    }

    /// Partially update a disposition in place; unspecified fields keep
    /// their values. Position in the list does not change.
    pub fn update(
        &self,
        name: &str,
        tags: Option<Vec<String>>,
        action: Option<FollowUpAction>,
    ) -> DialerResult<Disposition> {
        let mut list = self.dispositions.write();
        let disposition = list
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| DialerError::DispositionNotFound(name.to_string()))?;
        if let Some(tags) = tags {
            disposition.tags = tags;
        }
        if let Some(action) = action {
            disposition.action = action;
        }
        Ok(disposition.clone())
    }

    /// Remove a disposition by name, returning it.
    pub fn remove(&self, name: &str) -> DialerResult<Disposition> {
        let mut list = self.dispositions.write();
        let idx = list
            .iter()
            .position(|d| d.name == name)
            .ok_or_else(|| DialerError::DispositionNotFound(name.to_string()))?;
        let removed = list.remove(idx);
        tracing::info!(name = %removed.name, "disposition removed");
        Ok(removed)
    }

    /// Exact-name lookup. Names are case-sensitive.
    pub fn get(&self, name: &str) -> Option<Disposition> {
        self.dispositions
            .read()
            .iter()
            .find(|d| d.name == name)
            .cloned()
    }

    /// All dispositions in insertion order.
    pub fn list(&self) -> Vec<Disposition> {
        self.dispositions.read().clone()
    }

    pub fn len(&self) -> usize {
        self.dispositions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.dispositions.read().is_empty()
    }

    pub fn classification_prompt(&self) -> String {
        self.classification_prompt.read().clone()
    }

    pub fn set_classification_prompt(&self, prompt: impl Into<String>) {
        *self.classification_prompt.write() = prompt.into();
    }
}

impl Default for DispositionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
