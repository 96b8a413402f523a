pub use crate::cli::{
    command::{self, Action, Cli, parse_action},
    dialog::DialogLayer,
    run::{App, run},
    run_app,
};
pub use crate::domain::{
    contact::{self, Contact, ContactId, Draft, EditBuffer, Field},
    controller::ContactController,
    lifetime::LifetimeToken,
    state::{ContactState, Pending, StateStore},
};
pub use crate::errors::AppError;
pub use crate::storage::{ContactRemote, remote::HttpRemote};
