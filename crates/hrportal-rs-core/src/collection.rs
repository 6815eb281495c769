//! Request-sequenced remote collections.
//!
//! Each fetch takes a [`FetchTicket`]; a response is applied only when its
//! ticket is newer than the last applied one, so a slow early refresh can never
//! overwrite a faster later one.

use hrportal_rs_protocol::{
    Announcement, EmployeeDocument, OnboardingNotification, RecordId, SkillAssessment,
};
use log::debug;

/// Records addressable by a stable key for single-item patches.
pub trait Identified {
    type Key: PartialEq;

    fn key(&self) -> &Self::Key;
}

impl Identified for Announcement {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for EmployeeDocument {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for OnboardingNotification {
    type Key = RecordId;

    fn key(&self) -> &RecordId {
        &self.id
    }
}

impl Identified for SkillAssessment {
    type Key = String;

    fn key(&self) -> &String {
        &self.name
    }
}

/// Sequence number handed out by [`RemoteCollection::begin_fetch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FetchTicket(u64);

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct RemoteCollection<T> {
    items: Vec<T>,
    issued: u64,
    applied: u64,
    state: LoadState,
}

impl<T> Default for RemoteCollection<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            issued: 0,
            applied: 0,
            state: LoadState::Idle,
        }
    }
}

impl<T> RemoteCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn begin_fetch(&mut self) -> FetchTicket {
        self.issued += 1;
        self.state = LoadState::Loading;
        FetchTicket(self.issued)
    }

    /// Replace the contents wholesale. Returns false when the ticket is stale.
    pub fn apply(&mut self, ticket: FetchTicket, items: Vec<T>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.applied = ticket.0;
        self.items = items;
        self.settle(ticket, LoadState::Loaded);
        true
    }

    /// Record a failed fetch. Current items are kept; stale failures are ignored.
    pub fn fail(&mut self, ticket: FetchTicket, message: impl Into<String>) -> bool {
        if !self.accepts(ticket) {
            return false;
        }
        self.applied = ticket.0;
        self.settle(ticket, LoadState::Failed(message.into()));
        true
    }

    pub fn insert_front(&mut self, item: T) {
        self.items.insert(0, item);
    }

    fn accepts(&self, ticket: FetchTicket) -> bool {
        if ticket.0 <= self.applied {
            debug!(
                "discarding stale response (ticket={}, applied={})",
                ticket.0, self.applied
            );
            return false;
        }
        true
    }

    /// Only the newest outstanding fetch may clear the loading flag.
    fn settle(&mut self, ticket: FetchTicket, state: LoadState) {
        if ticket.0 == self.issued {
            self.state = state;
        }
    }
}

impl<T: Identified> RemoteCollection<T> {
    pub fn get(&self, key: &T::Key) -> Option<&T> {
        self.items.iter().find(|item| item.key() == key)
    }

    /// Update one record in place. Returns false when no record has `key`.
    pub fn patch(&mut self, key: &T::Key, update: impl FnOnce(&mut T)) -> bool {
        match self.items.iter_mut().find(|item| item.key() == key) {
            Some(item) => {
                update(item);
                true
            }
            None => false,
        }
    }

    /// Replace one record, keeping its position.
    pub fn replace(&mut self, item: T) -> bool {
        match self.items.iter().position(|existing| existing.key() == item.key()) {
            Some(index) => {
                self.items[index] = item;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, key: &T::Key) -> Option<T> {
        let index = self.items.iter().position(|item| item.key() == key)?;
        Some(self.items.remove(index))
    }
}
