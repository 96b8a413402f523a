use crate::prelude::{ContactState, Pending};

/// The modal layer drawn over the root view.
///
/// It is owned by the root view rather than registered anywhere globally.
/// While the controller's editor is open the dialog is drawn in place of the
/// new-contact form and field input is routed to the edit buffer.
#[derive(Debug)]
pub struct DialogLayer {
    title: String,
}

impl DialogLayer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
        }
    }

    pub fn captures_input(&self, state: &ContactState) -> bool {
        state.editor_open
    }

    pub fn render(&self, state: &ContactState) -> Option<String> {
        if !self.captures_input(state) {
            return None;
        }

        let buffer = &state.edit_buffer;
        let saving = if state.is_pending(&Pending::Update) {
            "  Saving...\n"
        } else {
            ""
        };

        Some(format!(
            "\n+-- {} --+\n  Name:  {}\n  Email: {}\n{saving}  [save] [cancel]\n",
            self.title, buffer.name, buffer.email
        ))
    }
}
