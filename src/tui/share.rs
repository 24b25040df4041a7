//! Share an excerpt
//!
//! A configured share command plays the role of a platform share sheet: it
//! receives the excerpt text on stdin and the title in
//! `BOOKTOK_SHARE_TITLE`. Without one, or when it cannot be launched, the
//! text goes to the system clipboard through `arboard`. A command that
//! starts and then fails (user cancelled, non-zero exit) is an error and
//! nothing is copied.
//!
//! Sharing runs on its own task so a slow command never stalls the event
//! loop.

use crate::feed::Excerpt;
use anyhow::{bail, Context, Result};
use arboard::Clipboard;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};

/// Environment variable carrying the share title for the share command
pub const SHARE_TITLE_ENV: &str = "BOOKTOK_SHARE_TITLE";

/// How the excerpt left the app
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareOutcome {
    /// Handed to the share command
    Shared,
    /// Copied to the clipboard
    Copied,
}

/// One pending share, owned so it can move onto a spawned task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub excerpt: Excerpt,
    pub command: Option<Vec<String>>,
}

impl ShareRequest {
    pub async fn run(self) -> Result<ShareOutcome> {
        share_excerpt(&self.excerpt, self.command.as_deref()).await
    }
}

/// Share via `command` if given, falling back to the clipboard only when
/// the command is missing or cannot be launched
pub async fn share_excerpt(excerpt: &Excerpt, command: Option<&[String]>) -> Result<ShareOutcome> {
    if let Some(command) = command.filter(|c| !c.is_empty()) {
        match spawn_share_command(command, excerpt) {
            Ok(child) => {
                finish_share_command(child, excerpt).await?;
                return Ok(ShareOutcome::Shared);
            }
            Err(e) => {
                tracing::warn!("Share command unavailable, copying instead: {:#}", e);
            }
        }
    }

    let text = excerpt.text.clone();
    tokio::task::spawn_blocking(move || copy_to_clipboard(&text))
        .await
        .context("Clipboard task failed")??;
    Ok(ShareOutcome::Copied)
}

/// Fails without a display server (headless Linux) or on permission errors.
/// The clipboard handle is created per call rather than held open.
fn copy_to_clipboard(text: &str) -> Result<()> {
    let mut clipboard = Clipboard::new().context("Failed to access clipboard")?;
    clipboard
        .set_text(text)
        .context("Failed to set clipboard text")?;
    Ok(())
}

fn spawn_share_command(command: &[String], excerpt: &Excerpt) -> Result<Child> {
    let Some((program, args)) = command.split_first() else {
        bail!("Empty share command");
    };

    Command::new(program)
        .args(args)
        .env(SHARE_TITLE_ENV, excerpt.title())
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .with_context(|| format!("Failed to launch share command '{}'", program))
}

/// Pipe the text in, close stdin and wait for the command to exit
async fn finish_share_command(mut child: Child, excerpt: &Excerpt) -> Result<()> {
    if let Some(mut stdin) = child.stdin.take() {
        stdin
            .write_all(excerpt.text.as_bytes())
            .await
            .context("Failed to write excerpt to share command")?;
    }

    let status = child.wait().await.context("Share command did not finish")?;
    if !status.success() {
        bail!("Share command exited with {}", status);
    }
    Ok(())
}
