//! Chat commands exposed to bot users.
//!
//! A [`ChatCommand`] turns the arguments of one command line into a
//! [`CommandReply`]; the [`CommandRegistry`] routes raw lines to commands.

pub mod command;
pub mod registry;
pub mod repolist;

pub use {
    command::{ChatCommand, CommandReply},
    registry::CommandRegistry,
    repolist::RepoListCommand,
};
