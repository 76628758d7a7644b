use clap::{Args, Parser, Subcommand};

/// postboard: browse and publish posts on the JSONPlaceholder mock API.
#[derive(Parser, Debug)]
#[command(name = "postboard", version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info", global = true)]
    pub log_level: String,

    /// Posts backend base URL (overrides POSTBOARD_API_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Search backend base URL (overrides POSTBOARD_SEARCH_URL)
    #[arg(long, global = true)]
    pub search_url: Option<String>,

    /// Posts per feed page (overrides POSTBOARD_PAGE_SIZE)
    #[arg(long, global = true)]
    pub page_size: Option<u32>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in and print the session
    Login(Credentials),

    /// Print the post feed, one page at a time
    Feed(FeedArgs),

    /// Browse the post feed in an interactive terminal view
    Browse,

    /// Show a user's profile and posts
    Profile(Credentials),

    /// Create a post as the signed-in user
    Create(CreateArgs),

    /// Edit an existing post
    Edit(EditArgs),

    /// Search posts by text
    Search(SearchArgs),

    /// List comments, optionally for one post
    Comments(CommentsArgs),

    /// List users
    Users(UsersArgs),

    /// Rate a password's strength
    Strength(StrengthArgs),
}

/// Sign-in credentials. The password falls back to POSTBOARD_PASSWORD.
#[derive(Args, Debug)]
pub struct Credentials {
    /// Account email
    #[arg(long)]
    pub email: String,

    /// Account password
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for the `feed` subcommand.
#[derive(Args, Debug)]
pub struct FeedArgs {
    /// Number of pages to load (stops early when the feed runs out)
    #[arg(long, default_value = "1")]
    pub pages: u32,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `create` subcommand.
#[derive(Args, Debug)]
pub struct CreateArgs {
    #[command(flatten)]
    pub credentials: Credentials,

    /// Post title
    #[arg(long)]
    pub title: String,

    /// Post body
    #[arg(long)]
    pub body: String,
}

/// Arguments for the `edit` subcommand.
#[derive(Args, Debug)]
pub struct EditArgs {
    /// ID of the post to edit
    pub id: u32,

    /// New title (keeps the current one if omitted)
    #[arg(long)]
    pub title: Option<String>,

    /// New body (keeps the current one if omitted)
    #[arg(long)]
    pub body: Option<String>,
}

/// Arguments for the `search` subcommand.
#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Text to search for
    pub query: String,

    /// Output as JSON lines instead of TSV
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `comments` subcommand.
#[derive(Args, Debug)]
pub struct CommentsArgs {
    /// Only comments on this post
    #[arg(long)]
    pub post_id: Option<u32>,
}

/// Arguments for the `users` subcommand.
#[derive(Args, Debug)]
pub struct UsersArgs {
    /// Read from the search backend, which carries avatars
    #[arg(long)]
    pub rich: bool,
}

/// Arguments for the `strength` subcommand.
#[derive(Args, Debug)]
pub struct StrengthArgs {
    /// Password to rate
    pub password: String,
}
