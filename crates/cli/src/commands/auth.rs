//! Session commands

use serde_json::{json, Value};
use tracing::info;

use super::CommandError;
use crate::context::AppContext;

pub async fn login(ctx: &AppContext, email: &str, password: &str) -> Result<Value, CommandError> {
    let session = ctx.auth().login(email, password).await?;
    Ok(json!({ "authenticated": true, "user_name": session.user_name }))
}

/// Local only; the backend has no logout endpoint.
pub fn logout(ctx: &AppContext) -> Result<Value, CommandError> {
    let was_signed_in = ctx.session().is_authenticated();
    ctx.auth().logout()?;
    info!(was_signed_in, "session cleared");
    Ok(json!({ "authenticated": false }))
}

pub fn whoami(ctx: &AppContext) -> Result<Value, CommandError> {
    Ok(match ctx.session().user_name() {
        Some(name) => json!({ "authenticated": true, "user_name": name }),
        None => json!({ "authenticated": false }),
    })
}
