//! Interactive practice loop.

use std::io::{self, BufRead, Write};
use std::time::Duration;

use flashcard_core::{
    AnswerOutcome, CardSide, CollectionService, CollectionStore, CoreError, PracticeSession,
    SessionSummary,
};
use rand::Rng;
use uuid::Uuid;

fn read_key<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_ascii_lowercase()))
}

fn render_card<W: Write>(session: &PracticeSession, out: &mut W) -> io::Result<()> {
    let Some(card) = session.current_card() else {
        return Ok(());
    };
    writeln!(
        out,
        "\nCard {} of {} ({:.0}% done)",
        session.position(),
        session.len(),
        session.progress_percent()
    )?;
    match session.side() {
        CardSide::Question => {
            writeln!(out, "Q: {}", card.question)?;
            write!(out, "[Enter] flip  [q] quit > ")?;
        }
        CardSide::Answer => {
            writeln!(out, "A: {}", card.answer)?;
            write!(out, "[y] got it  [n] missed it  [f] flip back  [q] quit > ")?;
        }
    }
    out.flush()
}

fn render_summary<W: Write>(summary: &SessionSummary, out: &mut W) -> io::Result<()> {
    writeln!(
        out,
        "\nSession complete! {}% ({} correct, {} incorrect of {})",
        summary.percentage, summary.correct, summary.incorrect, summary.total
    )?;
    write!(out, "[r] practice again  [q] quit > ")?;
    out.flush()
}

/// Run practice passes over a collection until the user quits.
///
/// Returns the summary of the last completed pass, if any.
pub async fn run_practice<S, R, W, G>(
    service: &mut CollectionService<S>,
    collection_id: Uuid,
    input: &mut R,
    out: &mut W,
    advance_delay: Duration,
    rng: &mut G,
) -> anyhow::Result<Option<SessionSummary>>
where
    S: CollectionStore,
    R: BufRead,
    W: Write,
    G: Rng + ?Sized,
{
    let collection = service.get(collection_id)?;
    let mut session = match PracticeSession::start(&collection, rng) {
        Ok(session) => session,
        Err(CoreError::NoCards) => {
            writeln!(out, "{} has no cards to practice. Add some first.", collection.title)?;
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };
    tracing::info!(%collection_id, cards = session.len(), "practice started");

    let mut last_summary = None;
    loop {
        if let Some(summary) = session.summary() {
            render_summary(&summary, out)?;
            last_summary = Some(summary);
            match read_key(input)?.as_deref() {
                Some("r") => {
                    let cards = service.get(collection_id)?.cards;
                    match session.restart(&cards, rng) {
                        Ok(()) => continue,
                        Err(CoreError::NoCards) => {
                            writeln!(out, "\nNo cards left to practice.")?;
                            return Ok(last_summary);
                        }
                        Err(err) => return Err(err.into()),
                    }
                }
                _ => return Ok(last_summary),
            }
        }

        render_card(&session, out)?;
        let Some(key) = read_key(input)? else {
            writeln!(out)?;
            return Ok(last_summary);
        };
        match key.as_str() {
            "" | "f" => session.flip(),
            "y" | "n" => match session.answer(key == "y", service)? {
                AnswerOutcome::Ignored => writeln!(out, "Flip the card to see the answer first.")?,
                AnswerOutcome::Advanced { .. } => {
                    tokio::time::sleep(advance_delay).await;
                    session.finish_advance();
                }
                AnswerOutcome::Completed { .. } => {}
            },
            "q" => {
                writeln!(
                    out,
                    "Stopped after {} of {} cards.",
                    session.current_index(),
                    session.len()
                )?;
                return Ok(last_summary);
            }
            other => writeln!(out, "Unknown key {other:?}.")?,
        }
    }
}
