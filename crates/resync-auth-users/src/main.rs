//! Operator tool: recompute every `auth_user` projection row from current
//! employee, person, and catalog state. Run after catalog renames or person
//! edits, which leave already-synced projection rows stale on purpose.

use anyhow::Context;

mod config;

#[tokio::main]
pub async fn main() -> anyhow::Result<()> {
    let config = config::load().context("loading configuration")?;
    let filter = match &config.tracing.filter {
        Some(filter) => tracing_subscriber::EnvFilter::try_new(filter)
            .context("parsing configured tracing filter")?,
        None => tracing_subscriber::EnvFilter::from_default_env(),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let store = rollcall_db::create(&config.database)
        .await
        .context("creating database store")?;
    let rebuilt = store
        .rebuild_auth_users()
        .await
        .context("rebuilding auth projection rows")?;
    tracing::info!(rebuilt, "auth projection rebuild complete");
    Ok(())
}
