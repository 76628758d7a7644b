//! Handlers for the non-interactive subcommands.

use std::io::{self, BufWriter, Write};

use postkit::{ComposeOutcome, LoadOutcome, LoginOutcome, Postkit, Session};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::cli::{
    CommentsArgs, CreateArgs, Credentials, EditArgs, FeedArgs, SearchArgs, UsersArgs,
};
use crate::config::resolve_password;
use crate::error::AppError;
use crate::output;

/// Sign in, printing validation messages on rejection.
async fn sign_in(client: &Postkit, credentials: &Credentials) -> Result<Session, AppError> {
    let password = resolve_password(credentials.password.as_deref())?;
    match client.login(&credentials.email, &password).await? {
        LoginOutcome::Authenticated(session) => Ok(session),
        LoginOutcome::Rejected(result) => {
            output::write_rejection(&result, &mut io::stderr())?;
            Err(AppError::Rejected("login"))
        }
    }
}

pub async fn login(client: &Postkit, credentials: &Credentials) -> Result<(), AppError> {
    let session = sign_in(client, credentials).await?;
    println!("{}", serde_json::to_string_pretty(&session)?);
    Ok(())
}

/// Stream up to `args.pages` pages of the feed to stdout.
pub async fn feed(client: &Postkit, args: &FeedArgs, cancel: CancellationToken) -> Result<(), AppError> {
    let loader = client.feed_loader();
    let stdout = io::stdout();
    let mut writer = BufWriter::new(stdout.lock());
    let mut buf = String::with_capacity(512);
    let mut printed = 0;

    for _ in 0..args.pages {
        let outcome = tokio::select! {
            outcome = loader.load_next() => outcome?,
            _ = cancel.cancelled() => {
                loader.close();
                break;
            }
        };

        match outcome {
            LoadOutcome::Appended(_) => {
                let state = loader.snapshot();
                for post in &state.items()[printed..] {
                    output::write_post(post, args.json, &mut buf, &mut writer)?;
                }
                printed = state.len();
                writer.flush()?;
            }
            LoadOutcome::Exhausted => {
                info!(posts = printed, "feed exhausted");
                break;
            }
            LoadOutcome::Skipped | LoadOutcome::Discarded => break,
        }
    }

    writer.flush()?;
    Ok(())
}

pub async fn profile(client: &Postkit, credentials: &Credentials) -> Result<(), AppError> {
    let session = sign_in(client, credentials).await?;
    let profile = client.load_profile(session.user_id).await?;
    output::write_profile(&profile, &mut io::stdout().lock())
}

pub async fn create(client: &Postkit, args: &CreateArgs) -> Result<(), AppError> {
    let session = sign_in(client, &args.credentials).await?;
    match client.create_post(&session, &args.title, &args.body).await? {
        ComposeOutcome::Saved(post) => {
            info!(post_id = post.id, "created");
            println!("{}", serde_json::to_string_pretty(&post)?);
            Ok(())
        }
        ComposeOutcome::Rejected(result) => {
            output::write_rejection(&result, &mut io::stderr())?;
            Err(AppError::Rejected("post"))
        }
    }
}

pub async fn edit(client: &Postkit, args: &EditArgs) -> Result<(), AppError> {
    let post = client.get_post(args.id).await?;
    if args.title.is_none() && args.body.is_none() {
        warn!(post_id = post.id, "nothing to change");
    }
    let title = args.title.as_deref().unwrap_or(&post.title);
    let body = args.body.as_deref().unwrap_or(&post.body);

    match client.edit_post(&post, title, body).await? {
        ComposeOutcome::Saved(updated) => {
            println!("{}", serde_json::to_string_pretty(&updated)?);
            Ok(())
        }
        ComposeOutcome::Rejected(result) => {
            output::write_rejection(&result, &mut io::stderr())?;
            Err(AppError::Rejected("post"))
        }
    }
}

pub async fn search(client: &Postkit, args: &SearchArgs) -> Result<(), AppError> {
    let posts = client.search_posts(&args.query).await?;
    info!(query = %args.query, hits = posts.len(), "search done");
    let mut writer = BufWriter::new(io::stdout().lock());
    let mut buf = String::new();
    for post in &posts {
        output::write_post(post, args.json, &mut buf, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn comments(client: &Postkit, args: &CommentsArgs) -> Result<(), AppError> {
    let comments = client.get_comments(args.post_id).await?;
    let mut writer = BufWriter::new(io::stdout().lock());
    for comment in &comments {
        output::write_comment(comment, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}

pub async fn users(client: &Postkit, args: &UsersArgs) -> Result<(), AppError> {
    let users = if args.rich {
        client.get_rich_users().await?
    } else {
        client.http_client.get_users().await?
    };
    let mut writer = BufWriter::new(io::stdout().lock());
    for user in &users {
        output::write_user(user, &mut writer)?;
    }
    writer.flush()?;
    Ok(())
}
