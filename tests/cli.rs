use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use tokio::task::LocalSet;

use rolodex_client::prelude::*;

const USERS: &str = r#"[
    {"id":1,"name":"Leanne Graham","email":"Sincere@april.biz"},
    {"id":2,"name":"Ervin Howell","email":"Shanna@melissa.tv"}
]"#;

#[tokio::test]
async fn app_routes_input_to_form_or_dialog() -> Result<(), AppError> {
    let mut server = Server::new_async().await;
    let _list = server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USERS)
        .create_async()
        .await;
    let _update = server
        .mock("PUT", "/users/2")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":2,"name":"Ervin H.","email":"Shanna@melissa.tv"}"#)
        .create_async()
        .await;

    let remote = HttpRemote::new(&server.url(), None)?;

    LocalSet::new()
        .run_until(async move {
            let mut app = App::new(ContactController::new(remote));
            app.dispatch(Action::Reload)?;
            app.settle().await;
            assert!(app.render().contains("  2. Ervin Howell"));

            // Dialog closed: fields go to the new-contact form
            app.dispatch(parse_action("name Ann")?)?;
            assert_eq!(app.controller().snapshot().draft.name, "Ann");

            app.dispatch(parse_action("edit 2")?)?;
            app.dispatch(parse_action("name Ervin H.")?)?;
            let state = app.controller().snapshot();
            assert_eq!(state.edit_buffer.name, "Ervin H.");
            assert_eq!(state.draft.name, "Ann");
            assert!(app.render().contains("+-- Update Contact --+"));

            app.dispatch(Action::Save)?;
            app.settle().await;

            let state = app.controller().snapshot();
            assert!(!state.editor_open);
            assert_eq!(state.contacts[1].name, "Ervin H.");

            // Unknown position is reported and changes nothing
            let err = app.dispatch(Action::Delete(5)).unwrap_err();
            assert_eq!(err.to_string(), "Contact #5 Not found");

            assert!(!app.dispatch(Action::Quit)?);
            assert!(!app.controller().is_active());
            Ok::<(), AppError>(())
        })
        .await
}

#[test]
fn lists_contacts_at_end_of_input() {
    let mut server = Server::new();
    let list = server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(USERS)
        .create();

    Command::cargo_bin("rolodex-client")
        .unwrap()
        .args(["--base-url", &server.url()])
        .write_stdin("")
        .assert()
        .success()
        .stdout(predicate::str::contains("--- Contact BOOK ---"))
        .stdout(predicate::str::contains("Leanne Graham"))
        .stdout(predicate::str::contains("Ervin Howell"));

    list.assert();
}

#[test]
fn add_command_posts_the_typed_draft() {
    let mut server = Server::new();
    let _list = server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();
    let create = server
        .mock("POST", "/users")
        .match_body(Matcher::Json(json!({ "name": "Ann Lee", "email": "a@x.com" })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"id":11,"name":"Ann Lee","email":"a@x.com"}"#)
        .create();

    Command::cargo_bin("rolodex-client")
        .unwrap()
        .args(["--base-url", &server.url()])
        .write_stdin("name Ann Lee\nemail a@x.com\nadd\n")
        .assert()
        .success();

    create.assert();
}

#[test]
fn invalid_inputs() {
    let mut server = Server::new();
    let _list = server
        .mock("GET", "/users")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body("[]")
        .create();

    Command::cargo_bin("rolodex-client")
        .unwrap()
        .args(["--base-url", &server.url()])
        .write_stdin("and\ndelete 3\nquit\n")
        .assert()
        .success()
        .stderr(predicate::str::contains("Unrecognized command: 'and'"))
        .stdout(predicate::str::contains("Bye!"));

    Command::cargo_bin("rolodex-client")
        .unwrap()
        .args(["--base-url", "not a url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("is not a valid http url"));
}
