//! Whoami Command
//!
//! Verify the configured token against `GET /v1/me`.

use crate::cli::CommandContext;
use crate::figma::FigmaClient;
use crate::types::Result;

pub async fn run(ctx: &CommandContext) -> Result<()> {
    let client = FigmaClient::new(&ctx.config.figma)?;
    let user = client.me().await?;

    if ctx.print_structured(&user)? {
        return Ok(());
    }

    ctx.output.success("Token is valid");
    ctx.output
        .field("Handle", user.handle.as_deref().unwrap_or("-"));
    ctx.output.field("Email", user.email.as_deref().unwrap_or("-"));
    ctx.output.field("User ID", &user.id);
    ctx.output
        .field("Token", ctx.config.figma.token_kind);
    Ok(())
}
