//! Binary-local application orchestration helpers.
//!
//! The main binary keeps wiring logic small, while this module hosts the
//! entry flow, the REPL, and command/render helpers.

pub(crate) mod commands;
pub(crate) mod entry;
pub(crate) mod exec_mode;
pub(crate) mod init_flow;
pub(crate) mod repl_loop;
pub(crate) mod startup;
