//! Command-line front end: drives the editor and publisher views once per
//! invocation and reports where they navigated.

mod console;
mod handlers;
mod io;

pub use console::Console;
pub use handlers::{delete, edit, publish, token};

use std::io::BufRead;
use std::sync::Arc;

use crate::application::error::AppError;
use crate::application::ports::BlogApi;
use crate::application::session::{Session, SessionDeps, View};
use crate::config::{Command, Settings};
use crate::domain::navigation::Route;
use crate::infra::http::HttpBlogApi;
use crate::infra::token_store::TokenStore;

#[derive(Clone)]
pub struct Ctx {
    pub settings: Settings,
    pub api: Arc<dyn BlogApi>,
    pub tokens: TokenStore,
}

impl Ctx {
    pub fn from_settings(settings: Settings) -> Result<Self, AppError> {
        let tokens = TokenStore::new(&settings.auth.token_store, settings.auth.token_key.clone());
        let api = HttpBlogApi::new(
            settings.backend.base_url.as_str(),
            settings.backend.timeout,
            Arc::new(tokens.clone()),
        )?;
        Ok(Self {
            settings,
            api: Arc::new(api),
            tokens,
        })
    }

    fn deps(&self, console: &Arc<Console>) -> SessionDeps {
        SessionDeps {
            api: Arc::clone(&self.api),
            navigator: console.clone(),
            alerts: console.clone(),
        }
    }
}

/// Run one command, printing the navigation target on success.
pub async fn handle(ctx: &Ctx, command: Command, input: &mut dyn BufRead) -> Result<(), AppError> {
    let route = match command {
        Command::Edit(args) => edit(ctx, args).await?,
        Command::Delete(args) => delete(ctx, args, input).await?,
        Command::Publish(args) => publish(ctx, args).await?,
        Command::Token(args) => return token(ctx, args),
    };
    println!("{route}");
    Ok(())
}

/// Tear the session down and turn what the view showed into a result.
async fn finish<V: View>(session: Session<V>, console: &Console) -> Result<Route, AppError> {
    let shown = session.view().error_message().map(str::to_owned);
    session.close().await;

    if let Some(route) = console.route() {
        return Ok(route);
    }
    if let Some(message) = shown {
        return Err(AppError::rejected(message));
    }
    if let Some(alert) = console.alerts().pop() {
        return Err(AppError::rejected(alert));
    }
    Err(AppError::unexpected("view finished without navigating"))
}

#[cfg(test)]
mod tests;
