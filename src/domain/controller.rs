use tokio::sync::watch;

use super::contact::{Contact, ContactId, Draft, EditBuffer, Field};
use super::lifetime::{InFlight, LifetimeToken};
use super::state::{ContactState, Pending, StateStore};
use crate::errors::AppError;
use crate::storage::ContactRemote;

/// Owns the local contact list and both edit buffers, and keeps them in step
/// with the remote collection.
///
/// Local state only changes after the remote confirms an operation. Failures
/// leave state as it was, get logged and are stored as the visible notice.
pub struct ContactController<R: ContactRemote> {
    remote: R,
    store: StateStore,
    lifetime: LifetimeToken,
}

impl<R: ContactRemote> ContactController<R> {
    pub fn new(remote: R) -> Self {
        Self {
            remote,
            store: StateStore::default(),
            lifetime: LifetimeToken::new(),
        }
    }

    pub fn remote(&self) -> &R {
        &self.remote
    }

    pub fn subscribe(&self) -> watch::Receiver<ContactState> {
        self.store.subscribe()
    }

    pub fn snapshot(&self) -> ContactState {
        self.store.snapshot()
    }

    pub fn inspect<T>(&self, f: impl FnOnce(&ContactState) -> T) -> T {
        self.store.inspect(f)
    }

    pub fn is_active(&self) -> bool {
        self.lifetime.is_active()
    }

    /// After this no response is applied and every operation is refused.
    pub fn teardown(&self) {
        self.lifetime.revoke();
        log::info!("contact controller torn down");
    }

    /// Replaces the whole list with the server's, in server order.
    pub async fn load(&self) -> Result<(), AppError> {
        self.ensure_active()?;
        let guard = self.acquire(Pending::Load)?;

        match self.remote.list().await {
            Ok(contacts) => {
                let count = contacts.len();
                guard.finish(|s| {
                    s.contacts = contacts;
                    s.notice = None;
                })?;
                log::info!("loaded {count} contacts from {}", self.remote.get_medium());
                Ok(())
            }
            Err(err) => Err(self.fail(guard, "Loading contacts", err)),
        }
    }

    pub fn stage_draft_field(&self, field: Field, value: &str) {
        if !self.is_active() {
            return;
        }
        self.store.update(|s| s.draft.set(field, value));
    }

    /// Creates the draft remotely and appends the server's copy to the tail.
    /// The draft survives a failure untouched.
    pub async fn submit_draft(&self) -> Result<Contact, AppError> {
        self.ensure_active()?;
        let draft = self.store.inspect(|s| s.draft.clone());
        draft.validate().map_err(|err| self.refuse(err))?;
        let guard = self.acquire(Pending::Create)?;

        match self.remote.create(&draft).await {
            Ok(created) => {
                guard.finish(|s| {
                    s.contacts.push(created.clone());
                    s.draft = Draft::default();
                    s.notice = None;
                })?;
                log::info!("created contact {}", created.id);
                Ok(created)
            }
            Err(err) => Err(self.fail(guard, "Adding contact", err)),
        }
    }

    pub fn begin_edit(&self, contact: &Contact) {
        if !self.is_active() {
            return;
        }
        self.store.update(|s| {
            s.edit_buffer = EditBuffer::from(contact);
            s.editor_open = true;
        });
    }

    pub fn stage_edit_field(&self, field: Field, value: &str) -> Result<(), AppError> {
        self.ensure_active()?;
        let open = self.store.inspect(|s| s.editor_open);
        if !open {
            return Err(self.refuse(AppError::Validation(
                "No contact is being edited".to_string(),
            )));
        }
        self.store.update(|s| s.edit_buffer.set(field, value));
        Ok(())
    }

    /// Sends the edit buffer as a full update and swaps the matching entry
    /// for the server's copy. The editor closes on success and stays open
    /// with the edits on failure.
    pub async fn submit_edit(&self) -> Result<Contact, AppError> {
        self.ensure_active()?;
        let (open, buffer) = self
            .store
            .inspect(|s| (s.editor_open, s.edit_buffer.clone()));

        let contact = match buffer.to_contact() {
            Some(contact) if open => contact,
            _ => {
                return Err(self.refuse(AppError::Validation(
                    "No contact is being edited".to_string(),
                )));
            }
        };
        buffer.validate().map_err(|err| self.refuse(err))?;
        let guard = self.acquire(Pending::Update)?;

        match self.remote.update(&contact).await {
            Ok(updated) => {
                let id = contact.id;
                guard.finish(|s| {
                    for entry in s.contacts.iter_mut().filter(|c| c.id == id) {
                        *entry = updated.clone();
                    }
                    // A different contact may have been opened meanwhile
                    if s.edit_buffer.id.as_ref() == Some(&id) {
                        s.close_editor();
                    }
                    s.notice = None;
                })?;
                log::info!("updated contact {id}");
                Ok(updated)
            }
            Err(err) => Err(self.fail(guard, "Saving contact", err)),
        }
    }

    pub fn cancel_edit(&self) {
        if !self.is_active() {
            return;
        }
        self.store.update(|s| s.close_editor());
    }

    pub async fn delete_contact(&self, id: &ContactId) -> Result<(), AppError> {
        self.ensure_active()?;
        let guard = self.acquire(Pending::Delete(id.clone()))?;

        match self.remote.delete(id).await {
            Ok(()) => {
                guard.finish(|s| {
                    s.contacts.retain(|c| &c.id != id);
                    s.notice = None;
                })?;
                log::info!("deleted contact {id}");
                Ok(())
            }
            Err(err) => Err(self.fail(guard, &format!("Deleting contact {id}"), err)),
        }
    }

    pub fn dismiss_notice(&self) {
        if !self.is_active() {
            return;
        }
        self.store.update_if(|s| s.notice.take().is_some());
    }

    fn ensure_active(&self) -> Result<(), AppError> {
        if self.is_active() {
            Ok(())
        } else {
            Err(AppError::Inactive)
        }
    }

    fn acquire(&self, op: Pending) -> Result<InFlight<'_>, AppError> {
        InFlight::acquire(&self.store, &self.lifetime, op).map_err(|err| self.refuse(err))
    }

    /// An operation turned down before any request went out.
    fn refuse(&self, err: AppError) -> AppError {
        if matches!(err, AppError::Inactive) {
            return err;
        }
        log::warn!("{err}");
        let notice = err.to_string();
        self.store.update(|s| s.notice = Some(notice));
        err
    }

    fn fail(&self, guard: InFlight<'_>, action: &str, err: AppError) -> AppError {
        log::error!("{action} failed: {err}");
        let notice = format!("{action} failed: {err}");
        // Torn down meanwhile: nothing may change, the error still goes back
        let _ = guard.finish(|s| s.notice = Some(notice));
        err
    }
}
