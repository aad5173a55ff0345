use blocktree::prelude::*;
use clap::{Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Convert, merge and inspect block configurations
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Flatten a nested block tree into records with positional component ids
    Flatten {
        /// Path to the tree JSON file
        tree_path: String,
    },
    /// Rebuild a nested tree from flat records
    Unflatten {
        /// Path to the flat JSON file
        flat_path: String,
    },
    /// Merge a backend response into a tree
    Merge {
        /// Path to the original tree JSON file
        tree_path: String,
        /// Path to the backend response JSON file
        response_path: String,
    },
    /// Manage the persisted session reference id
    RefId {
        /// File used to persist the reference id
        #[arg(long, default_value = ".blocktree/storage.json")]
        store: PathBuf,

        #[command(subcommand)]
        action: RefIdAction,
    },
}

#[derive(Subcommand, Debug)]
enum RefIdAction {
    /// Print the current id, creating one if needed
    Get,
    /// Discard the current id and create a new one
    Reset,
    /// Parse an id and print its parts
    Parse { id: String },
    /// Print the `project.user` prefix
    Partial,
}

fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "blocktree=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Flatten { tree_path } => {
            let tree: Vec<TreeBlock> = read_json(&tree_path);
            print_json(&tree_to_flat(&tree));
        }
        Command::Unflatten { flat_path } => {
            let flat: Vec<FlatBlock> = read_json(&flat_path);
            let tree = flat_to_tree(&flat)
                .unwrap_or_else(|e| exit_with_error(&format!("Invalid flat list: {}", e)));
            print_json(&tree);
        }
        Command::Merge {
            tree_path,
            response_path,
        } => {
            let tree: Vec<TreeBlock> = read_json(&tree_path);
            let response: Value = read_json(&response_path);
            let merged = apply_backend_json(&tree, &response)
                .unwrap_or_else(|e| exit_with_error(&format!("Merge failed: {}", e)));
            print_json(&merged);
        }
        Command::RefId { store, action } => run_ref_id(store, action),
    }
}

fn run_ref_id(store: PathBuf, action: RefIdAction) {
    if let RefIdAction::Parse { id } = &action {
        let parsed = ReferenceId::parse(id).unwrap_or_else(|e| exit_with_error(&e.to_string()));
        print_json(&parsed);
        return;
    }

    let settings = Settings::from_env()
        .unwrap_or_else(|e| exit_with_error(&format!("Invalid configuration: {}", e)));
    let manager = ReferenceIdManager::new(&settings, FileStore::new(store));

    let id = match action {
        RefIdAction::Get => manager.get_or_create(),
        RefIdAction::Reset => manager.reset(),
        RefIdAction::Partial => {
            println!("{}", manager.partial());
            return;
        }
        RefIdAction::Parse { .. } => return,
    }
    .unwrap_or_else(|e| exit_with_error(&e.to_string()));
    println!("{}", id);
}

fn read_json<T: serde::de::DeserializeOwned>(path: &str) -> T {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to read '{}': {}", path, e)));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse '{}': {}", path, e)))
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => exit_with_error(&format!("Failed to serialize output: {}", e)),
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
