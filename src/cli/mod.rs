pub mod command;
pub mod dialog;
pub mod run;
pub mod view;

pub use run::run_app;
