use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "tabvault",
    bin_name = "tabvault",
    version,
    disable_help_subcommand = true,
    after_help = "Enable shell completions:\n  eval \"$(tabvault completions bash)\"  # add to ~/.bashrc\n  eval \"$(tabvault completions zsh)\"   # add to ~/.zshrc"
)]
#[command(about = "Multi-tab document store with JSON backup and restore", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (overrides TABVAULT_DATA and the config file)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Print machine-readable JSON instead of formatted text
    #[arg(long, global = true, help_heading = "Options")]
    pub json: bool,

    /// Verbose output
    #[arg(short, long, global = true, help_heading = "Options")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create a new document
    #[command(alias = "new")]
    Create {
        /// Document name, e.g. notes.md
        name: String,

        /// Content words. When omitted, content is read from a pipe
        content: Vec<String>,

        /// Tab color, e.g. "#8b5cf6"
        #[arg(long)]
        color: Option<String>,

        /// Pin the new document
        #[arg(long)]
        pin: bool,
    },

    /// List documents, pinned first
    #[command(alias = "ls")]
    List,

    /// Print documents in full (ids or ranges, e.g. 1 3-5)
    View {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Change a document
    #[command(alias = "update")]
    Edit(EditArgs),

    /// Delete documents (ids or ranges)
    #[command(alias = "rm")]
    Delete {
        #[arg(required = true, num_args = 1..)]
        ids: Vec<String>,
    },

    /// Search all documents line by line
    Search {
        query: String,

        /// Treat the query as a regular expression
        #[arg(short, long)]
        regex: bool,

        /// Match case exactly
        #[arg(short = 'c', long)]
        case_sensitive: bool,
    },

    /// Write a backup of every document
    Export {
        /// Directory to write into (defaults to the configured backup_dir)
        #[arg(long, value_name = "DIR")]
        dir: Option<PathBuf>,
    },

    /// Restore documents from a backup file
    Import {
        file: PathBuf,

        /// Delete every existing document before importing
        #[arg(long)]
        replace: bool,

        /// Import records even when a document with the same name exists
        #[arg(long)]
        keep_duplicates: bool,

        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Check a backup file and summarise it without importing
    Inspect { file: PathBuf },

    /// Print a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug)]
pub struct EditArgs {
    pub id: String,

    /// New name
    #[arg(long)]
    pub name: Option<String>,

    /// New content. Use "-" to read it from stdin
    #[arg(long)]
    pub content: Option<String>,

    /// Pin the document
    #[arg(long, conflicts_with = "unpin")]
    pub pin: bool,

    /// Unpin the document
    #[arg(long)]
    pub unpin: bool,

    /// New color; an empty string removes it
    #[arg(long)]
    pub color: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_import_flags() {
        let cli = Cli::try_parse_from([
            "tabvault",
            "import",
            "backup.json",
            "--replace",
            "--yes",
            "--data",
            "/tmp/x",
        ])
        .unwrap();

        assert_eq!(cli.data, Some(PathBuf::from("/tmp/x")));
        match cli.command {
            Some(Commands::Import {
                file,
                replace,
                keep_duplicates,
                yes,
            }) => {
                assert_eq!(file, PathBuf::from("backup.json"));
                assert!(replace);
                assert!(!keep_duplicates);
                assert!(yes);
            }
            other => panic!("Expected import, got {other:?}"),
        }
    }

    #[test]
    fn test_aliases() {
        let cli = Cli::try_parse_from(["tabvault", "rm", "1-3"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Delete { .. })));

        let cli = Cli::try_parse_from(["tabvault", "ls"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::List)));
    }

    #[test]
    fn test_pin_conflicts_with_unpin() {
        assert!(Cli::try_parse_from(["tabvault", "edit", "1", "--pin", "--unpin"]).is_err());
    }
}
