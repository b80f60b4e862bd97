use std::io::BufRead;
use std::sync::Arc;

use tracing::info;

use crate::application::editor::{EditorEvent, EditorView};
use crate::application::error::AppError;
use crate::application::publisher::{PublisherEvent, PublisherView};
use crate::application::session::Session;
use crate::config::{DeleteArgs, EditArgs, PublishArgs, TokenAction, TokenArgs};
use crate::domain::navigation::Route;
use crate::domain::posts::{Post, PostId};

use super::io::{confirm, read_opt_value};
use super::{Console, Ctx, finish};

const DELETE_PROMPT: &str = "Are you sure you want to delete this blog?";

pub async fn edit(ctx: &Ctx, args: EditArgs) -> Result<Route, AppError> {
    let EditArgs {
        id,
        title,
        content,
        content_file,
    } = args;
    let id = PostId::new(id)?;
    let content = read_opt_value(content, content_file)?;

    let post = Post {
        id,
        title: title.clone(),
        content: content.clone(),
    };
    let (view, effects) = EditorView::mount(post, ctx.settings.notice);
    let console = Arc::new(Console::default());
    let mut session = Session::new(view, ctx.deps(&console));
    session.start(effects).await;

    // Saving after a failed load would overwrite the post with blanks.
    if session.view().error_message().is_some() {
        return finish(session, &console).await;
    }

    if let Some(title) = title {
        session.dispatch(EditorEvent::TitleChanged(title)).await;
    }
    if let Some(content) = content {
        session.dispatch(EditorEvent::ContentChanged(content)).await;
    }
    session.dispatch(EditorEvent::UpdateRequested).await;

    finish(session, &console).await
}

pub async fn delete(
    ctx: &Ctx,
    args: DeleteArgs,
    input: &mut dyn BufRead,
) -> Result<Route, AppError> {
    let id = PostId::new(args.id)?;
    let view = EditorView::unloaded(id, ctx.settings.notice);
    let console = Arc::new(Console::default());
    let mut session = Session::new(view, ctx.deps(&console));

    session.dispatch(EditorEvent::DeleteRequested).await;
    let confirmed = args.yes || confirm(DELETE_PROMPT, input, &mut std::io::stderr())?;
    if !confirmed {
        session.dispatch(EditorEvent::DeleteCancelled).await;
        session.close().await;
        return Err(AppError::Cancelled);
    }

    session.dispatch(EditorEvent::DeleteConfirmed).await;
    finish(session, &console).await
}

pub async fn publish(ctx: &Ctx, args: PublishArgs) -> Result<Route, AppError> {
    let PublishArgs {
        title,
        content,
        content_file,
    } = args;
    let content = read_opt_value(content, content_file)?;

    let console = Arc::new(Console::default());
    let mut session = Session::new(PublisherView::new(ctx.settings.notice), ctx.deps(&console));
    session
        .dispatch(PublisherEvent::TitleChanged(title.unwrap_or_default()))
        .await;
    session
        .dispatch(PublisherEvent::ContentChanged(content.unwrap_or_default()))
        .await;
    session.dispatch(PublisherEvent::PublishRequested).await;

    finish(session, &console).await
}

pub fn token(ctx: &Ctx, args: TokenArgs) -> Result<(), AppError> {
    match args.action {
        TokenAction::Set { value } => {
            ctx.tokens.set(value.trim())?;
            info!(path = %ctx.tokens.path().display(), "token stored");
        }
        TokenAction::Show => match ctx.tokens.get()? {
            Some(token) => println!("{token}"),
            None => return Err(AppError::rejected("no token stored")),
        },
        TokenAction::Clear => {
            let removed = ctx.tokens.remove()?;
            info!(removed, "token cleared");
        }
    }
    Ok(())
}
