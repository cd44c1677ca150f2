// Interactive prompting for player names.

use anyhow::{bail, Context};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

pub const FIRST_PROMPT: &str = "Enter first NBA player: ";
pub const SECOND_PROMPT: &str = "Enter second NBA player: ";

/// Write `label`, then read one line. The trailing newline is stripped;
/// end of input is an error.
pub async fn prompt<R, W>(reader: &mut R, writer: &mut W, label: &str) -> anyhow::Result<String>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    writer.write_all(label.as_bytes()).await?;
    writer.flush().await?;

    let mut line = String::new();
    let n = reader
        .read_line(&mut line)
        .await
        .context("failed to read player name")?;
    if n == 0 {
        bail!("input closed before a player name was entered");
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Prompt for both player names in order.
pub async fn read_names<R, W>(reader: &mut R, writer: &mut W) -> anyhow::Result<(String, String)>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let first = prompt(reader, writer, FIRST_PROMPT).await?;
    let second = prompt(reader, writer, SECOND_PROMPT).await?;
    Ok((first, second))
}
