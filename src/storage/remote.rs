use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use super::{AppError, Contact, ContactId, ContactRemote, Draft};

pub const DEFAULT_BASE_URL: &str = "https://jsonplaceholder.typicode.com";
const COLLECTION_PATH: &str = "users";

/// REST client for a `/users` style collection resource.
pub struct HttpRemote {
    medium: String,
    base_url: Url,
    client: Client,
}

impl HttpRemote {
    /// `base_url` may carry a path prefix (`http://host/api`); the collection
    /// path is appended after it. `timeout` of `None` keeps reqwest's default.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, AppError> {
        let mut base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(AppError::Validation(format!(
                "'{base_url}' cannot be used as a base url"
            )));
        }

        // Url::join drops the last segment unless the path ends with '/'
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            medium: format!("remote {base_url}"),
            base_url,
            client: builder.build()?,
        })
    }

    pub fn collection_url(&self) -> Result<Url, AppError> {
        Ok(self.base_url.join(COLLECTION_PATH)?)
    }

    pub fn record_url(&self, id: &ContactId) -> Result<Url, AppError> {
        let mut url = self.collection_url()?;
        url.path_segments_mut()
            .map_err(|_| AppError::Validation("Collection url cannot hold a record path".to_string()))?
            .push(&id.to_string());
        Ok(url)
    }
}

#[async_trait]
impl ContactRemote for HttpRemote {
    fn get_medium(&self) -> &str {
        &self.medium
    }

    async fn list(&self) -> Result<Vec<Contact>, AppError> {
        let url = self.collection_url()?;
        log::debug!("GET {url}");

        let response = self.client.get(url).send().await?;
        let contacts = response.error_for_status()?.json::<Vec<Contact>>().await?;
        Ok(contacts)
    }

    async fn create(&self, draft: &Draft) -> Result<Contact, AppError> {
        let url = self.collection_url()?;
        log::debug!("POST {url}");

        let response = self.client.post(url).json(draft).send().await?;
        let contact = response.error_for_status()?.json::<Contact>().await?;
        Ok(contact)
    }

    async fn update(&self, contact: &Contact) -> Result<Contact, AppError> {
        let url = self.record_url(&contact.id)?;
        log::debug!("PUT {url}");

        let response = self.client.put(url).json(contact).send().await?;
        let updated = response.error_for_status()?.json::<Contact>().await?;
        Ok(updated)
    }

    async fn delete(&self, id: &ContactId) -> Result<(), AppError> {
        let url = self.record_url(id)?;
        log::debug!("DELETE {url}");

        // Body is ignored, status alone decides
        self.client.delete(url).send().await?.error_for_status()?;
        Ok(())
    }
}

pub fn is_valid_url(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
