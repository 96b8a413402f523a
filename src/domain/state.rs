use std::collections::HashSet;

use tokio::sync::watch;

use super::contact::{Contact, ContactId, Draft, EditBuffer};

/// A remote operation currently awaiting its response.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pending {
    Load,
    Create,
    Update,
    Delete(ContactId),
}

impl Pending {
    pub fn describe(&self) -> String {
        match self {
            Pending::Load => "Loading contacts".to_string(),
            Pending::Create => "Adding contact".to_string(),
            Pending::Update => "Saving contact".to_string(),
            Pending::Delete(id) => format!("Deleting contact {id}"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactState {
    pub contacts: Vec<Contact>,
    pub draft: Draft,
    pub edit_buffer: EditBuffer,
    pub editor_open: bool,
    pub pending: HashSet<Pending>,
    /// Last failure, shown until dismissed or until an operation succeeds.
    pub notice: Option<String>,
}

impl ContactState {
    pub fn contact(&self, id: &ContactId) -> Option<&Contact> {
        self.contacts.iter().find(|c| &c.id == id)
    }

    pub fn is_pending(&self, op: &Pending) -> bool {
        self.pending.contains(op)
    }

    pub(crate) fn close_editor(&mut self) {
        self.editor_open = false;
        self.edit_buffer = EditBuffer::default();
    }
}

/// Observable holder of the controller state.
///
/// Every mutation goes through [`StateStore::update`] or
/// [`StateStore::update_if`], which wake all receivers handed out by
/// [`StateStore::subscribe`]. Receivers always see the latest state; a burst
/// of changes may be observed as one notification.
#[derive(Debug)]
pub struct StateStore {
    tx: watch::Sender<ContactState>,
}

impl StateStore {
    pub fn new(initial: ContactState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ContactState> {
        self.tx.subscribe()
    }

    pub fn snapshot(&self) -> ContactState {
        self.tx.borrow().clone()
    }

    pub fn inspect<T>(&self, f: impl FnOnce(&ContactState) -> T) -> T {
        f(&self.tx.borrow())
    }

    pub(crate) fn update(&self, f: impl FnOnce(&mut ContactState)) {
        self.tx.send_modify(f);
    }

    /// Applies `f` and notifies only when it reports a change.
    pub(crate) fn update_if(&self, f: impl FnOnce(&mut ContactState) -> bool) -> bool {
        self.tx.send_if_modified(f)
    }
}

impl Default for StateStore {
    fn default() -> Self {
        Self::new(ContactState::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribers_are_notified_on_update() {
        let store = StateStore::default();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.update(|s| s.draft.name = "Ann".to_string());

        assert!(rx.has_changed().unwrap());
        assert_eq!(rx.borrow_and_update().draft.name, "Ann");
        assert!(!rx.has_changed().unwrap());
    }

    #[test]
    fn unchanged_updates_stay_silent() {
        let store = StateStore::default();
        let mut rx = store.subscribe();

        let changed = store.update_if(|s| s.pending.remove(&Pending::Load));

        assert!(!changed);
        assert!(!rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().pending.is_empty());
    }

    #[test]
    fn close_editor_restores_sentinel() {
        let mut state = ContactState {
            contacts: vec![Contact::new(1, "Ann", "a@x.com")],
            editor_open: true,
            ..Default::default()
        };
        state.edit_buffer = EditBuffer::from(&state.contacts[0]);

        state.close_editor();

        assert!(!state.editor_open);
        assert!(state.edit_buffer.is_sentinel());
        assert!(state.contact(&ContactId::Number(1)).is_some());
    }
}
