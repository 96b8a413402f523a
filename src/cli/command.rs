use clap::Parser;

use crate::prelude::{AppError, Field};
use crate::storage::remote::{DEFAULT_BASE_URL, is_valid_url};

#[derive(Parser, Debug)]
#[command(
    name = "rolodex-client",
    version,
    about = "Contact book backed by a remote contact collection"
)]
pub struct Cli {
    /// Base url of the contact collection service
    #[arg(
        long,
        env = "ROLODEX_BASE_URL",
        default_value_t = String::from(DEFAULT_BASE_URL),
        value_parser = parse_base_url
    )]
    pub base_url: String,

    /// Request timeout in seconds, transport default when not set
    #[arg(long, env = "ROLODEX_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

fn parse_base_url(url: &str) -> Result<String, String> {
    if is_valid_url(url) {
        Ok(url.to_string())
    } else {
        Err(format!("'{url}' is not a valid http url"))
    }
}

/// One line typed at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Stage(Field, String),
    Add,
    Edit(usize),
    Save,
    Cancel,
    Delete(usize),
    Reload,
    Dismiss,
    Help,
    Quit,
}

pub fn parse_action(line: &str) -> Result<Action, AppError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word.to_lowercase().as_str() {
        "name" => Ok(Action::Stage(Field::Name, rest.to_string())),
        "email" => Ok(Action::Stage(Field::Email, rest.to_string())),
        "add" => Ok(Action::Add),
        "edit" => Ok(Action::Edit(parse_position(rest)?)),
        "save" => Ok(Action::Save),
        "cancel" => Ok(Action::Cancel),
        "delete" => Ok(Action::Delete(parse_position(rest)?)),
        "reload" => Ok(Action::Reload),
        "dismiss" => Ok(Action::Dismiss),
        "help" | "?" => Ok(Action::Help),
        "quit" | "exit" => Ok(Action::Quit),
        _ => Err(AppError::ParseCommand(line.to_string())),
    }
}

// Positions are 1-based, as listed on screen
fn parse_position(arg: &str) -> Result<usize, AppError> {
    let position: usize = arg.parse()?;
    if position == 0 {
        return Err(AppError::Validation(
            "Contact positions start at 1".to_string(),
        ));
    }
    Ok(position)
}
