//! Command-line grammar of `prlctl` and `prlsrvctl`.
//!
//! [`router::route_vm`] and [`router::route_srv`] turn an argument vector
//! into a [`record::ParamRecord`]: they pick the option table and builder
//! for the verb, the builder folds every option into the record, and a
//! validation pass checks the combination. Any failure yields
//! [`record::ParamRecord::invalid`] after a diagnostic on stderr.

pub mod app;
pub mod catalog;
pub mod commands;
pub mod context;
pub mod error;
pub mod options;
pub mod record;
pub mod redact;
pub mod router;
pub mod secret;
pub mod terminal;
pub mod usage;
pub mod validate;
pub mod values;

pub use context::ParserContext;
pub use error::{CmdError, Result};
pub use record::{Action, ParamRecord};
pub use router::{route_srv, route_vm};
