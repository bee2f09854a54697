//! # CLI Layer
//!
//! The only place in the workspace that:
//! - Knows about terminal I/O (stdout, stderr, prompts)
//! - Parses arguments
//! - Formats output for humans
//!
//! ## Responsibilities
//!
//! 1. **Argument Parsing**: clap turns shell arguments into [`Commands`]
//! 2. **Context Setup**: [`tabvault::init::initialize`] resolves config and the store
//! 3. **API Dispatch**: each `handle_*` calls one `EditorApi` method
//! 4. **Output Formatting**: `CmdResult` goes to `print.rs`, or to JSON with `--json`
//! 5. **Error Handling**: errors bubble up to `main`, which prints them and exits 1

use super::print::{
    print_backup_info, print_documents, print_full_documents, print_messages,
    print_search_results,
};
use super::setup::{Cli, Commands, EditArgs};
use anyhow::{bail, Context, Result};
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use serde::Serialize;
use std::io::{self, IsTerminal, Read, Write};
use std::path::{Path, PathBuf};
use tabvault::api::EditorApi;
use tabvault::backup::{DirectoryTarget, ImportOptions, ImportStrategy};
use tabvault::cancel::CancelToken;
use tabvault::commands::create::CreateOptions;
use tabvault::commands::update::DocumentEdit;
use tabvault::commands::{CmdMessage, CmdResult};
use tabvault::init::initialize;
use tabvault::search::SearchOptions;
use tabvault::store::fs::FileStore;
use tabvault::store::DocumentStore;
use tracing::debug;
use tracing_subscriber::EnvFilter;

struct AppContext {
    api: EditorApi<FileStore>,
    backup_dir: PathBuf,
    skip_duplicates: bool,
    json: bool,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    debug!(command = ?cli.command, "Parsed arguments");

    // Completions need no store.
    if let Some(Commands::Completions { shell }) = &cli.command {
        return handle_completions(*shell);
    }

    let ctx = init_context(&cli)?;

    match cli.command {
        Some(Commands::Create {
            name,
            content,
            color,
            pin,
        }) => handle_create(&ctx, name, content, CreateOptions { color, pinned: pin }),
        Some(Commands::List) | None => handle_list(&ctx),
        Some(Commands::View { ids }) => handle_view(&ctx, &ids),
        Some(Commands::Edit(args)) => handle_edit(&ctx, args),
        Some(Commands::Delete { ids }) => handle_delete(&ctx, &ids),
        Some(Commands::Search {
            query,
            regex,
            case_sensitive,
        }) => handle_search(
            &ctx,
            &query,
            SearchOptions {
                regex,
                case_sensitive,
            },
        ),
        Some(Commands::Export { dir }) => handle_export(&ctx, dir),
        Some(Commands::Import {
            file,
            replace,
            keep_duplicates,
            yes,
        }) => handle_import(&ctx, &file, replace, keep_duplicates, yes),
        Some(Commands::Inspect { file }) => handle_inspect(&ctx, &file),
        Some(Commands::Completions { shell }) => handle_completions(shell),
    }
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    // Keep an already-installed subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn init_context(cli: &Cli) -> Result<AppContext> {
    let ctx = initialize(cli.data.clone())?;
    Ok(AppContext {
        api: ctx.api,
        backup_dir: ctx.backup_dir,
        skip_duplicates: ctx.config.skip_duplicates,
        json: cli.json,
    })
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn read_stdin() -> Result<Option<String>> {
    if io::stdin().is_terminal() {
        return Ok(None);
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read from stdin")?;
    Ok(Some(buffer))
}

fn handle_create(
    ctx: &AppContext,
    name: String,
    content: Vec<String>,
    options: CreateOptions,
) -> Result<()> {
    let content = if content.is_empty() {
        read_stdin()?.unwrap_or_default()
    } else {
        content.join(" ")
    };

    let result = ctx.api.create_document(name, content, options)?;
    if ctx.json {
        return print_json(&result.affected_documents);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(ctx: &AppContext) -> Result<()> {
    let result = ctx.api.list_documents()?;
    if ctx.json {
        return print_json(&result.listed_documents);
    }
    print_documents(&result.listed_documents);
    Ok(())
}

fn handle_view(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let result = ctx.api.view_documents(ids)?;
    if ctx.json {
        return print_json(&result.listed_documents);
    }
    print_full_documents(&result.listed_documents);
    Ok(())
}

fn handle_edit(ctx: &AppContext, args: EditArgs) -> Result<()> {
    let content = match args.content.as_deref() {
        Some("-") => Some(read_stdin()?.unwrap_or_default()),
        _ => args.content,
    };
    let pinned = match (args.pin, args.unpin) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    };
    let edit = DocumentEdit {
        name: args.name,
        content,
        pinned,
        color: args.color,
    };

    let result = ctx.api.update_document(&args.id, edit)?;
    if ctx.json {
        return print_json(&result.affected_documents);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &AppContext, ids: &[String]) -> Result<()> {
    let result = ctx.api.delete_documents(ids)?;
    if ctx.json {
        return print_json(&result.affected_documents);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_search(ctx: &AppContext, query: &str, options: SearchOptions) -> Result<()> {
    let result = ctx.api.search(query, options)?;
    if ctx.json {
        return print_json(&result.search_results);
    }
    print_search_results(&result.search_results);
    if !result.search_results.is_empty() {
        println!();
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_export(ctx: &AppContext, dir: Option<PathBuf>) -> Result<()> {
    let dir = dir.unwrap_or_else(|| ctx.backup_dir.clone());
    let result = ctx.api.export_backup(&DirectoryTarget::new(dir))?;
    if ctx.json {
        return print_json(&result.export_path);
    }
    print_messages(&result.messages);
    Ok(())
}

fn handle_import(
    ctx: &AppContext,
    file: &Path,
    replace: bool,
    keep_duplicates: bool,
    yes: bool,
) -> Result<()> {
    let options = ImportOptions {
        strategy: if replace {
            ImportStrategy::Replace
        } else {
            ImportStrategy::Merge
        },
        skip_duplicates: ctx.skip_duplicates && !keep_duplicates,
    };

    if options.strategy == ImportStrategy::Replace && !yes {
        let existing = ctx.api.store().list()?.len();
        if existing > 0 {
            // Reject a bad file before asking to delete anything.
            ctx.api.inspect_backup(file, &CancelToken::new())?;
        }
        if existing > 0 && !confirm_replace(existing)? {
            print_messages(&[CmdMessage::info("Import cancelled.")]);
            return Ok(());
        }
    }

    let result = ctx.api.import_backup(file, options, &CancelToken::new())?;
    if ctx.json {
        return print_json(&result.import_summary);
    }
    print_messages(&result.messages);
    Ok(())
}

fn confirm_replace(existing: usize) -> Result<bool> {
    print!(
        "This will delete all {} existing documents before importing. Continue? [y/N] ",
        existing
    );
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read confirmation")?;
    Ok(input.trim().eq_ignore_ascii_case("y"))
}

fn handle_inspect(ctx: &AppContext, file: &Path) -> Result<()> {
    let result: CmdResult = ctx.api.inspect_backup(file, &CancelToken::new())?;
    let Some(info) = result.backup_info.as_ref() else {
        bail!("Backup summary missing for {}", file.display());
    };
    if ctx.json {
        return print_json(info);
    }
    print_backup_info(info);
    println!();
    print_messages(&result.messages);
    Ok(())
}

fn handle_completions(shell: Shell) -> Result<()> {
    let mut cmd = Cli::command();
    generate(shell, &mut cmd, "tabvault", &mut io::stdout());
    Ok(())
}
