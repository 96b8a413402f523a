use super::dialog::DialogLayer;
use crate::prelude::{Contact, ContactState, Draft, Pending};

pub const HELP: &str = "\
Commands:
  name <text>     set the name field
  email <text>    set the email field
  add             add the new contact
  edit <n>        open contact n in the update dialog
  save            save the update dialog
  cancel          close the update dialog
  delete <n>      delete contact n
  reload          fetch the contact list again
  dismiss         hide the last error
  quit";

pub fn render_screen(state: &ContactState, dialog: &DialogLayer) -> String {
    let mut out = String::from("\n--- Contact BOOK ---\n");

    if let Some(notice) = &state.notice {
        out.push_str(&format!("\n! {notice}\n"));
    }

    let mut pending: Vec<String> = state.pending.iter().map(Pending::describe).collect();
    pending.sort();
    for op in pending {
        out.push_str(&format!("... {op}\n"));
    }

    out.push_str(&render_list(&state.contacts));

    match dialog.render(state) {
        Some(frame) => out.push_str(&frame),
        None => out.push_str(&render_form(
            &state.draft,
            state.is_pending(&Pending::Create),
        )),
    }
    out
}

pub fn render_list(contacts: &[Contact]) -> String {
    if contacts.is_empty() {
        return "\nNo contact yet\n".to_string();
    }

    let mut out = String::from("\n");
    for (mut i, c) in contacts.iter().enumerate() {
        i += 1;
        out.push_str(&format!("{i:>3}. {:<20} {:<30}\n", c.name, c.email));
    }
    out
}

fn render_form(draft: &Draft, adding: bool) -> String {
    let status = if adding { " adding..." } else { "" };
    format!(
        "\nNew contact\n  Name:  {}\n  Email: {}\n  [add]{status}\n",
        draft.name, draft.email
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prelude::EditBuffer;

    #[test]
    fn list_rows_are_numbered_from_one() {
        let contacts = vec![
            Contact::new(1, "Leanne Graham", "Sincere@april.biz"),
            Contact::new(2, "Ervin Howell", "Shanna@melissa.tv"),
        ];

        let out = render_list(&contacts);
        assert!(out.contains(&format!("  1. {:<20} {:<30}", "Leanne Graham", "Sincere@april.biz")));
        assert!(out.contains("  2. Ervin Howell"));
        assert_eq!(render_list(&[]), "\nNo contact yet\n");
    }

    #[test]
    fn dialog_replaces_the_form_while_open() {
        let dialog = DialogLayer::new("Update Contact");
        let mut state = ContactState {
            contacts: vec![Contact::new(1, "Ann", "a@x.com")],
            notice: Some("Adding contact failed".to_string()),
            ..Default::default()
        };
        state.draft.name = "Bob".to_string();

        let closed = render_screen(&state, &dialog);
        assert!(closed.contains("! Adding contact failed"));
        assert!(closed.contains("Name:  Bob"));
        assert!(!closed.contains("[save]"));

        state.edit_buffer = EditBuffer::from(&state.contacts[0]);
        state.editor_open = true;

        let open = render_screen(&state, &dialog);
        assert!(open.contains("[save] [cancel]"));
        assert!(!open.contains("New contact"));
    }

    #[test]
    fn pending_operations_are_listed() {
        let mut state = ContactState::default();
        state.pending.insert(Pending::Load);
        state.pending.insert(Pending::Create);

        let out = render_screen(&state, &DialogLayer::new("Update Contact"));
        assert!(out.contains("... Loading contacts"));
        assert!(out.contains("[add] adding..."));
    }
}
