//! Talk to the NFT assistant.

use anyhow::{Context as _, Result};
use artverse_data::chat::{ChatSession, ChatTransport};
use dialoguer::Input;

use super::ChatArgs;
use crate::context::Context;
use crate::output::chat_message;

/// Typed to end an interactive session.
const EXIT_COMMAND: &str = "exit";

/// Run the chat command.
pub async fn run(args: ChatArgs, ctx: &Context) -> Result<()> {
    let mut session = ctx.chat_session()?;
    let message = args.message.join(" ");

    if !message.trim().is_empty() {
        send(&mut session, &message, ctx).await;
        return Ok(());
    }

    if let Some(welcome) = session.transcript().first() {
        ctx.output.block(&chat_message(welcome));
    }
    loop {
        let line: String = Input::new()
            .with_prompt("you")
            .allow_empty(true)
            .interact_text()
            .context("Failed to read input")?;
        let line = line.trim();
        if line.is_empty() || line.eq_ignore_ascii_case(EXIT_COMMAND) {
            break;
        }
        send(&mut session, line, ctx).await;
    }
    Ok(())
}

async fn send<T: ChatTransport>(session: &mut ChatSession<T>, message: &str, ctx: &Context) {
    let spinner = ctx.output.spinner("Thinking...");
    let reply = session.send(message).await.cloned();
    spinner.finish_and_clear();

    let Some(reply) = reply else { return };
    if ctx.output.is_json() {
        ctx.output.json(&reply);
    } else {
        ctx.output.block(&chat_message(&reply));
    }
}
