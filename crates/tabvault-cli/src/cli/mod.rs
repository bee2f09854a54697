//! # CLI Behavior
//!
//! One possible client for tabvault. This is the only place that knows about
//! terminal I/O, prompts and exit codes.
//!
//! ## Naked Execution
//!
//! `tabvault` with no subcommand lists documents.
//!
//! ## Create From a Pipe
//!
//! `echo "body" | tabvault create notes.md` takes the content from stdin when no
//! content argument is given.
//!
//! ## Import Confirmation
//!
//! `import --replace` deletes every existing document first. Unless `--yes` is
//! given, the CLI asks before doing it and stops on anything but `y`.
//!
//! ## Logging
//!
//! Diagnostics from the library go through `tracing` to stderr. The default
//! level is `warn`; `-v` raises it to `debug`, and `RUST_LOG` overrides both.
//!
//! ## Module Structure
//!
//! - `setup`: Argument parsing via clap
//! - `commands`: Context setup and per-command handlers
//! - `print`: Output formatting

mod commands;
mod print;
pub mod setup;

pub use commands::run;
