pub mod contact;
pub mod controller;
pub mod lifetime;
pub mod state;
