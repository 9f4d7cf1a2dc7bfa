//! Session commands.

use anyhow::Result;
use serde_json::json;
use turbo_admin::Session;

use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SessionCommand::Login { token, client_id } => login(token, client_id, ctx),
        SessionCommand::Logout => logout(ctx),
        SessionCommand::Status => status(ctx),
    }
}

fn login(token: String, client_id: Option<String>, ctx: &Context) -> Result<()> {
    let store = ctx.session_store();
    store.save(&Session::new(token, client_id))?;
    ctx.output
        .success(&format!("Session saved to {}", store.path().display()));
    Ok(())
}

fn logout(ctx: &Context) -> Result<()> {
    if ctx.session_store().clear()? {
        ctx.output.success("Logged out");
    } else {
        ctx.output.info("No session stored");
    }
    Ok(())
}

fn status(ctx: &Context) -> Result<()> {
    let store = ctx.session_store();
    let session = store.load()?;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "loggedIn": session.is_some(),
            "apiUrl": ctx.config.api.base_url,
            "clientId": session.as_ref().and_then(|s| s.client_id.clone()),
            "since": session.as_ref().map(|s| s.created_at.to_rfc3339()),
        }));
        return Ok(());
    }

    ctx.output.header("Session");
    ctx.output.kv("api", &ctx.config.api.base_url);
    ctx.output.kv("file", &store.path().display().to_string());
    match session {
        Some(session) => {
            ctx.output.kv("status", "logged in");
            ctx.output.kv(
                "since",
                &session.created_at.format("%Y-%m-%d %H:%M UTC").to_string(),
            );
            if let Some(id) = session.client_id.or_else(|| ctx.config.api.client_id.clone()) {
                ctx.output.kv("client id", &id);
            }
        }
        None => ctx.output.kv("status", "logged out"),
    }
    Ok(())
}
