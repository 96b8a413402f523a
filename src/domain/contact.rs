use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AppError;

/// Identifier assigned by the remote collection. Only compared for equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ContactId {
    Number(i64),
    Text(String),
}

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContactId::Number(n) => write!(f, "{n}"),
            ContactId::Text(s) => write!(f, "{s}"),
        }
    }
}

impl From<i64> for ContactId {
    fn from(id: i64) -> Self {
        ContactId::Number(id)
    }
}

impl From<&str> for ContactId {
    fn from(id: &str) -> Self {
        ContactId::Text(id.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    // Fields we don't edit (username, phone, address...) are kept so a full
    // update sends them back untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Contact {
    pub fn new(id: impl Into<ContactId>, name: &str, email: &str) -> Self {
        Contact {
            id: id.into(),
            name: name.to_string(),
            email: email.to_string(),
            extra: Map::new(),
        }
    }
}

/// The two fields a user can type into, in both the form and the dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
}

impl Field {
    pub fn label(&self) -> &'static str {
        match self {
            Field::Name => "Name",
            Field::Email => "Email",
        }
    }
}

/// New-contact buffer. Has no id until the remote assigns one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    pub name: String,
    pub email: String,
}

impl Draft {
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Email => self.email = value.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        require_fields(&self.name, &self.email)
    }
}

/// Staging copy of a contact under edit. `EditBuffer::default()` is the
/// empty sentinel held while the dialog is closed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditBuffer {
    pub id: Option<ContactId>,
    pub name: String,
    pub email: String,
    pub extra: Map<String, Value>,
}

impl EditBuffer {
    pub fn set(&mut self, field: Field, value: &str) {
        match field {
            Field::Name => self.name = value.to_string(),
            Field::Email => self.email = value.to_string(),
        }
    }

    pub fn is_sentinel(&self) -> bool {
        *self == EditBuffer::default()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        require_fields(&self.name, &self.email)
    }

    /// Full contact to send as an update body. `None` for the sentinel.
    pub fn to_contact(&self) -> Option<Contact> {
        let id = self.id.clone()?;
        Some(Contact {
            id,
            name: self.name.clone(),
            email: self.email.clone(),
            extra: self.extra.clone(),
        })
    }
}

impl From<&Contact> for EditBuffer {
    fn from(contact: &Contact) -> Self {
        EditBuffer {
            id: Some(contact.id.clone()),
            name: contact.name.clone(),
            email: contact.email.clone(),
            extra: contact.extra.clone(),
        }
    }
}

fn require_fields(name: &str, email: &str) -> Result<(), AppError> {
    for (field, value) in [(Field::Name, name), (Field::Email, email)] {
        if value.trim().is_empty() {
            return Err(AppError::Validation(format!("{} is required", field.label())));
        }
    }
    Ok(())
}
