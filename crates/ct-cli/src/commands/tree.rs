//! Tree command
//!
//! Print a post's comment forest as JSON.

use anyhow::{Context, Result};
use clap::Args;
use std::io::Write;

use super::{parse_post, AppContext};

/// Arguments for the tree command
#[derive(Debug, Args)]
pub struct TreeArgs {
    /// Post ID
    pub post: String,

    /// Print compact JSON
    #[arg(long)]
    pub compact: bool,

    /// List comments left out of the tree on stderr
    #[arg(long)]
    pub show_dropped: bool,
}

/// Execute the tree command
pub fn execute(args: TreeArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let post = parse_post(&args.post)?;
    let (response, dropped) = ctx.service.load_forest_with_unattached(&post)?;

    if args.show_dropped {
        if dropped.is_empty() {
            eprintln!("{} No comments left out", "✓".green());
        }
        for item in dropped {
            eprintln!(
                "{} {} (parent {}): {:?}",
                "⚠".yellow(),
                item.id.to_string().cyan(),
                item.parent_id,
                item.reason
            );
        }
    }

    let json = response.to_json(!args.compact)?;
    let mut stdout = std::io::stdout();
    writeln!(stdout, "{}", json).context("Failed to write to stdout")?;

    Ok(())
}
