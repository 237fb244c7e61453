//! Sign-in state commands.

use anyhow::Result;
use mart_auth::Identity;

use super::LoginArgs;
use crate::context::Context;

/// Store the given identity as the signed-in user.
pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let mut identity = Identity::new(args.id.trim())
        .with_name(
            args.first_name.unwrap_or_default(),
            args.last_name.unwrap_or_default(),
        );
    if let Some(email) = args.email {
        identity = identity.with_email(email);
    }

    ctx.identity()?.sign_in(&identity)?;

    if ctx.output.is_json() {
        ctx.output.json(&identity);
    } else {
        ctx.output
            .success(&format!("Signed in as {}", identity.display_name()));
    }
    Ok(())
}

/// Forget the signed-in user. The cart is kept.
pub fn logout(ctx: &Context) -> Result<()> {
    ctx.identity()?.sign_out()?;
    ctx.output.success("Signed out");
    Ok(())
}

/// Show the signed-in user.
pub fn whoami(ctx: &Context) -> Result<()> {
    let current = ctx.identity()?.current();

    if ctx.output.is_json() {
        ctx.output.json(&current);
        return Ok(());
    }

    match current {
        Some(identity) => {
            ctx.output.header("Signed in");
            ctx.output.kv("id", identity.id.as_str());
            ctx.output.kv("name", &identity.display_name());
            if !identity.email.is_empty() {
                ctx.output.kv("email", &identity.email);
            }
        }
        None => ctx.output.info("Not signed in"),
    }
    Ok(())
}
