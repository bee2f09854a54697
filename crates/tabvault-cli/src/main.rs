//! # Tabvault CLI
//!
//! The binary is thin: the CLI lives in `src/cli/`, and this file only calls
//! `cli::run()` and turns an error into exit code 1.
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/tabvault-cli/src/cli/)                   │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - Context wiring + dispatch (commands.rs)                  │
//! │  - Terminal output (print.rs)                               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (crates/tabvault/src/api.rs)                     │
//! │  - Parses id selectors, dispatches to commands              │
//! │  - Serializes export/import                                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Commands + Backup pipeline (crates/tabvault/src/)          │
//! │  - No knowledge of stdout/stderr or process exits           │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Testing Approach
//!
//! Behaviour is tested in the library. The CLI is covered end to end in
//! `tests/`, running the real binary against a temporary data directory.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
