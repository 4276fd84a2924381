//! Session commands.

use anyhow::Result;
use storefront_cache::{Cache, FileBackend, SessionStore};
use storefront_cart::cart::CartState;

use super::cart::confirm;
use super::{SessionArgs, SessionCommand};
use crate::context::Context;

/// Run the session command.
pub fn run(args: SessionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        SessionCommand::Show => show_session(ctx),
        SessionCommand::End { yes } => end_session(yes, ctx),
    }
}

fn show_session(ctx: &Context) -> Result<()> {
    let dir = ctx.resolve_path(ctx.config.storage_dir());
    let sessions: SessionStore<CartState> = SessionStore::new(Cache::new(FileBackend::open(&dir)?));
    let id = ctx.session_id();
    let saved = sessions.get_versioned(&id)?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "session_id": id,
            "storage_dir": dir,
            "saved": saved,
            "known_sessions": sessions.ids()?,
        }));
        return Ok(());
    }

    ctx.output.header("Session");
    ctx.output.kv("id", id.as_str());
    ctx.output.kv("storage", &dir.display().to_string());
    match saved {
        Some(saved) => {
            ctx.output.kv("version", &saved.version.to_string());
            ctx.output.kv("created", &saved.created_at.to_string());
            ctx.output.kv("last accessed", &saved.last_accessed.to_string());
            ctx.output.kv("items", &saved.data.item_count().to_string());
        }
        None => ctx.output.info("No saved cart"),
    }
    Ok(())
}

fn end_session(yes: bool, ctx: &Context) -> Result<()> {
    if !yes && !confirm("End the session and discard the saved cart?")? {
        ctx.output.warn("Session kept");
        return Ok(());
    }

    let shell = ctx.end_shell()?;
    let id = shell.session_id().clone();
    let final_state = shell.unmount()?;

    ctx.output.success(&format!(
        "Ended session {} ({} items discarded)",
        id,
        final_state.item_count()
    ));
    Ok(())
}
