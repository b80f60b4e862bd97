use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueHint, builder::BoolishValueParser};

/// Command-line arguments for the `penpost` binary.
#[derive(Debug, Parser)]
#[command(
    name = "penpost",
    version,
    about = "Edit, delete and publish blog posts against a blog API"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(long = "config-file", env = "PENPOST_CONFIG_FILE", value_name = "PATH")]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: GlobalOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Load a post, apply the given fields, and save it.
    Edit(EditArgs),
    /// Delete a post after confirmation.
    Delete(DeleteArgs),
    /// Create a new post.
    Publish(PublishArgs),
    /// Manage the stored authorization token.
    Token(TokenArgs),
}

#[derive(Debug, Args, Default, Clone)]
pub struct GlobalOverrides {
    /// Override the backend base URL.
    #[arg(long = "backend-url", value_name = "URL", global = true)]
    pub backend_url: Option<String>,

    /// Override the request timeout.
    #[arg(long = "backend-timeout-seconds", value_name = "SECONDS", global = true)]
    pub backend_timeout_seconds: Option<u64>,

    /// Override the token store file.
    #[arg(long = "token-store", value_name = "PATH", value_hint = ValueHint::FilePath, global = true)]
    pub token_store: Option<PathBuf>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Args, Clone)]
pub struct EditArgs {
    /// Identifier of the post to edit.
    pub id: String,

    /// New title; fetched from the backend when omitted.
    #[arg(long)]
    pub title: Option<String>,

    /// New content; fetched from the backend when omitted.
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the new content from a file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub content_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct DeleteArgs {
    /// Identifier of the post to delete.
    pub id: String,

    /// Confirm without prompting.
    #[arg(long, short = 'y', action = clap::ArgAction::SetTrue)]
    pub yes: bool,
}

#[derive(Debug, Args, Clone)]
pub struct PublishArgs {
    #[arg(long)]
    pub title: Option<String>,

    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read the content from a file.
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub content_file: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct TokenArgs {
    #[command(subcommand)]
    pub action: TokenAction,
}

#[derive(Debug, Subcommand, Clone)]
pub enum TokenAction {
    /// Store the token sent with every request.
    Set { value: String },
    /// Print the stored token.
    Show,
    /// Remove the stored token.
    Clear,
}
