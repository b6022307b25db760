//! Line-oriented frontend for pipes and dumb terminals

use crate::controller::SessionController;
use crate::qa::AnswerService;
use crate::session::Message;
use crate::view::{attribution, sender_label, time_label, SUBTITLE, TITLE, WELCOME};
use std::io::{self, Write};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Submit each input line and print the transcript entries it produced
pub async fn run<S, R, W>(controller: &SessionController<S>, input: R, out: &mut W) -> io::Result<()>
where
    S: AnswerService,
    R: AsyncBufRead + Unpin,
    W: Write,
{
    writeln!(out, "{TITLE}")?;
    writeln!(out, "{SUBTITLE}")?;
    writeln!(out)?;
    if controller.snapshot().is_empty_state() {
        writeln!(out, "{WELCOME}")?;
    }
    prompt(out)?;

    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        let seen = controller.snapshot().transcript.len();
        controller.submit(&line).await;

        for message in controller.snapshot().transcript.iter().skip(seen) {
            write_message(out, message)?;
        }
        prompt(out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn prompt<W: Write>(out: &mut W) -> io::Result<()> {
    write!(out, "> ")?;
    out.flush()
}

fn write_message<W: Write>(out: &mut W, message: &Message) -> io::Result<()> {
    let label = sender_label(message.sender());
    let time = time_label(message.timestamp());
    let mut lines = message.text().lines();
    writeln!(out, "[{time}] {label}: {}", lines.next().unwrap_or_default())?;
    for line in lines {
        writeln!(out, "    {line}")?;
    }
    if let Some(source) = attribution(message) {
        writeln!(out, "    {source}")?;
    }
    Ok(())
}
