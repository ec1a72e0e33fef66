//! comment-thread - threaded comments CLI
//!
//! Stores comments per post and serves them as a root/reply tree.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write a default config
//! comment-thread config init
//!
//! # Add a comment and a reply
//! comment-thread add my-post --text "First!" --author ann --id 1
//! comment-thread add my-post --text "Welcome" --parent 1
//!
//! # Inspect the thread
//! comment-thread tree my-post
//!
//! # Serve it over HTTP
//! comment-thread serve --port 3000
//! ```

mod commands;

fn main() {
    if let Err(err) = commands::run() {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
