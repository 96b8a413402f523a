pub mod remote;

use async_trait::async_trait;

use crate::prelude::{AppError, Contact, ContactId, Draft};

/// The remote collection of contacts. The service assigns ids and is the
/// source of truth; callers only mirror what it returns.
#[async_trait]
pub trait ContactRemote: Send + Sync {
    async fn list(&self) -> Result<Vec<Contact>, AppError>;

    async fn create(&self, draft: &Draft) -> Result<Contact, AppError>;

    async fn update(&self, contact: &Contact) -> Result<Contact, AppError>;

    async fn delete(&self, id: &ContactId) -> Result<(), AppError>;

    fn get_medium(&self) -> &str;
}
