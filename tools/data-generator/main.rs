use blocktree::block::{ActionParam, Item, TreeBlock};
use clap::Parser;
use rand::Rng;
use rand::rngs::ThreadRng;
use rand::seq::IndexedRandom;
use std::fs;

const COMPONENTS: &[&str] = &[
    "text_block",
    "picture_block",
    "action_button",
    "info_panel",
    "card_6_fields",
];
const MODES: &[&str] = &["layout", "dialog", "processing"];

/// A CLI tool to generate random block trees for the blocktree converter
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_tree.json")]
    output: String,

    /// Number of root-level blocks
    #[arg(long, default_value_t = 3)]
    roots: usize,

    /// Maximum nesting depth below the roots
    #[arg(long, default_value_t = 3)]
    depth: usize,

    /// Maximum number of children per block
    #[arg(long, default_value_t = 4)]
    breadth: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    println!(
        "Generating block tree ({} roots, depth <= {}, breadth <= {})...",
        cli.roots, cli.depth, cli.breadth
    );

    let tree: Vec<TreeBlock> = (0..cli.roots)
        .map(|i| generate_block(&mut rng, i, cli.depth, cli.breadth))
        .collect();

    let json_output = serde_json::to_string_pretty(&tree)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved {} blocks to '{}'",
        count_blocks(&tree),
        cli.output
    );

    Ok(())
}

fn generate_block(rng: &mut ThreadRng, index: usize, depth: usize, breadth: usize) -> TreeBlock {
    let name = COMPONENTS.choose(rng).copied().unwrap_or("text_block");
    let mode = MODES.choose(rng).copied().unwrap_or("layout");

    let mut block = TreeBlock::new(name)
        .with_parent_block(format!("block-{}", index))
        .with_mode(mode);

    for p in 0..rng.random_range(0..=3) {
        block = block.with_param(ActionParam::new(
            format!("param_{}", p),
            rng.random_range(0..1000),
        ));
    }

    if rng.random_bool(0.5) {
        let items = (0..rng.random_range(1..=3))
            .map(|n| Item::new(format!("Item {}", n), format!("value {}", rng.random_range(0..100))))
            .collect();
        block = block.with_items(items);
    }

    if depth > 0 && breadth > 0 {
        let count = rng.random_range(0..=breadth);
        if count > 0 {
            let children = (0..count)
                .map(|i| generate_block(rng, i, depth - 1, breadth))
                .collect();
            block = block.with_children(children);
        }
    }

    block
}

fn count_blocks(blocks: &[TreeBlock]) -> usize {
    blocks
        .iter()
        .map(|b| 1 + b.children.as_deref().map_or(0, count_blocks))
        .sum()
}
