//! Web front-end for generating Satellite host registration commands.
//!
//! Serves a login form, lists activation keys and capsules for the submitted
//! credentials, and renders the registration command for the chosen pair.

pub mod handler;
pub mod render;
pub mod server;

pub use server::{build_router, start_server, AppState};
