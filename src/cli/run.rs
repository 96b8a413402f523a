use std::{future::Future, rc::Rc, time::Duration};

use clap::Parser;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    runtime::Builder,
    task::{JoinSet, LocalSet},
};

use super::{
    command::{Action, Cli, parse_action},
    dialog::DialogLayer,
    view,
};
use crate::{
    helper,
    prelude::{AppError, Contact, ContactController, ContactRemote, HttpRemote},
};

/// Root view: owns the controller, the dialog layer and the requests it has
/// started. Must be driven from inside a [`LocalSet`].
pub struct App<R: ContactRemote + 'static> {
    controller: Rc<ContactController<R>>,
    dialog: DialogLayer,
    tasks: JoinSet<()>,
}

impl<R: ContactRemote + 'static> App<R> {
    pub fn new(controller: ContactController<R>) -> Self {
        Self {
            controller: Rc::new(controller),
            dialog: DialogLayer::new("Update Contact"),
            tasks: JoinSet::new(),
        }
    }

    pub fn controller(&self) -> &ContactController<R> {
        &self.controller
    }

    pub fn render(&self) -> String {
        self.controller
            .inspect(|state| view::render_screen(state, &self.dialog))
    }

    /// Applies one command. Remote calls are started in the background and
    /// report through the controller state. Returns `false` on quit.
    pub fn dispatch(&mut self, action: Action) -> Result<bool, AppError> {
        match action {
            Action::Stage(field, value) => {
                let to_dialog = self
                    .controller
                    .inspect(|state| self.dialog.captures_input(state));
                if to_dialog {
                    self.controller.stage_edit_field(field, &value)?;
                } else {
                    self.controller.stage_draft_field(field, &value);
                }
            }
            Action::Add => self.spawn(|c| async move { c.submit_draft().await.map(|_| ()) }),
            Action::Edit(position) => {
                let contact = self.contact_at(position)?;
                self.controller.begin_edit(&contact);
            }
            Action::Save => self.spawn(|c| async move { c.submit_edit().await.map(|_| ()) }),
            Action::Cancel => self.controller.cancel_edit(),
            Action::Delete(position) => {
                let id = self.contact_at(position)?.id;
                self.spawn(|c| async move { c.delete_contact(&id).await });
            }
            Action::Reload => self.spawn(|c| async move { c.load().await }),
            Action::Dismiss => self.controller.dismiss_notice(),
            Action::Help => println!("{}", view::HELP),
            Action::Quit => {
                self.controller.teardown();
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Waits until every request started so far has finished.
    pub async fn settle(&mut self) {
        while self.tasks.join_next().await.is_some() {}
    }

    fn contact_at(&self, position: usize) -> Result<Contact, AppError> {
        self.controller
            .inspect(|state| {
                position
                    .checked_sub(1)
                    .and_then(|i| state.contacts.get(i))
                    .cloned()
            })
            .ok_or(AppError::NotFound(format!("Contact #{position}")))
    }

    fn spawn<F, Fut>(&mut self, op: F)
    where
        F: FnOnce(Rc<ContactController<R>>) -> Fut,
        Fut: Future<Output = Result<(), AppError>> + 'static,
    {
        let request = op(Rc::clone(&self.controller));
        self.tasks.spawn_local(async move {
            // Already logged and shown as the notice
            let _ = request.await;
        });
    }
}

/// Reads commands from stdin and redraws on every state change until quit
/// or end of input. At end of input the requests still out are awaited first.
pub async fn run<R: ContactRemote + 'static>(mut app: App<R>) -> Result<(), AppError> {
    let mut updates = app.controller().subscribe();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    app.dispatch(Action::Reload)?;
    println!("{}", app.render());

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }

                match parse_action(&line).and_then(|action| app.dispatch(action)) {
                    Ok(true) => {}
                    Ok(false) => {
                        println!("\nBye!");
                        return Ok(());
                    }
                    Err(e) => eprintln!("{e}"),
                }
            }
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                println!("{}", app.render());
            }
        }
    }

    app.settle().await;
    println!("{}", app.render());
    Ok(())
}

pub fn run_app() -> Result<(), AppError> {
    helper::load_env();
    let cli = Cli::parse();
    helper::init_logger();

    let remote = HttpRemote::new(&cli.base_url, cli.timeout_secs.map(Duration::from_secs))?;
    log::info!("using {}", remote.get_medium());
    let app = App::new(ContactController::new(remote));

    let runtime = Builder::new_current_thread().enable_all().build()?;
    LocalSet::new().block_on(&runtime, run(app))
}
