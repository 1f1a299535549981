//! Command line front end for the weekly meal planner.
//!
//! The binary parses a command, opens the [`menu_store::MenuStore`] over the
//! configured data directory, calls the matching typed store operation and
//! prints the affected part of the menu again from a fresh read.

pub mod cli;
pub mod commands;
pub mod logging;
pub mod settings;
pub mod week_view;
