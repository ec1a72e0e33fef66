//! Count command
//!
//! Print the number of comments shown in a post's thread.

use anyhow::Result;
use clap::Args;

use ct_core::count_all_comments;

use super::{parse_post, AppContext};

/// Arguments for the count command
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Post ID
    pub post: String,
}

/// Execute the count command
pub fn execute(args: CountArgs, ctx: &AppContext) -> Result<()> {
    let post = parse_post(&args.post)?;
    let response = ctx.service.load_forest(&post)?;

    println!("{}", count_all_comments(&response.comments));
    Ok(())
}
