//! Posts command
//!
//! List posts that have comment threads.

use anyhow::Result;
use clap::Args;

use super::AppContext;

/// Arguments for the posts command
#[derive(Debug, Args)]
pub struct PostsArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Execute the posts command
pub fn execute(args: PostsArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let overview = ctx.service.overview()?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&overview)?);
        return Ok(());
    }

    if overview.is_empty() {
        println!("No posts found.");
        return Ok(());
    }

    println!("{}", "Posts:".bold().underline());
    println!();

    for entry in &overview {
        let dropped = if entry.summary.dropped > 0 {
            format!(" ({} hidden)", entry.summary.dropped).yellow().to_string()
        } else {
            String::new()
        };

        println!(
            "  {}  {} comments, {} threads{}",
            entry.post_id.to_string().green(),
            entry.summary.total,
            entry.summary.roots,
            dropped
        );
    }

    Ok(())
}
