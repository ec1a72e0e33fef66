//! Add command
//!
//! Append a comment to a post's thread.

use anyhow::{Context, Result};
use clap::Args;

use ct_core::comment::CommentRecordBuilder;
use ct_core::types::CommentId;

use super::{parse_post, AppContext};

/// Arguments for the add command
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Post ID
    pub post: String,

    /// Comment text
    #[arg(long, short)]
    pub text: String,

    /// Author name
    #[arg(long, short)]
    pub author: Option<String>,

    /// Root comment to reply to
    #[arg(long, short)]
    pub parent: Option<String>,

    /// Explicit comment ID (generated when omitted)
    #[arg(long)]
    pub id: Option<String>,
}

/// Execute the add command
pub fn execute(args: AddArgs, ctx: &AppContext) -> Result<()> {
    use colored::Colorize;

    let post = parse_post(&args.post)?;

    let mut builder = CommentRecordBuilder::new()
        .text(args.text)
        .parent(args.parent.as_deref().map(CommentId::parse));
    if let Some(author) = args.author {
        builder = builder.author(author);
    }
    if let Some(id) = args.id.as_deref() {
        builder = builder.id(CommentId::parse(id));
    }

    let record = builder.build()?;
    let record = ctx
        .service
        .add_comment(&post, record)
        .with_context(|| format!("Failed to add comment to post {}", post))?;

    eprintln!(
        "{} Added comment {} to {}",
        "✓".green(),
        record.id.to_string().cyan(),
        post
    );
    println!("{}", record.id);

    Ok(())
}
