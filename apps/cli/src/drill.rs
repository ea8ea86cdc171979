//! Interactive drill loop over one quiz session.

use std::io::{self, BufRead, Write};

use kikitori_core::{primary_hint, QuizSession, SessionSummary, VocabItem};

use crate::audio::AudioPlayer;

/// Run one session over `items`, reading answers from stdin.
///
/// Commands: `:p` replays the audio, `:h` shows the reading, `:q` ends the
/// session early. Anything else is graded as an answer.
pub fn run_session(items: Vec<VocabItem>, player: &AudioPlayer) -> anyhow::Result<()> {
    let total = items.len();
    let mut session = QuizSession::new();
    session.start(items);

    println!(
        "{total} items. Type the English meaning; ':p' replays audio, ':h' shows the reading, ':q' quits.\n"
    );

    let stdin = io::stdin();
    let mut announce = true;
    loop {
        // Pull out what the prompt needs before grading mutates the queue.
        let Some((characters, hint, audio_url)) = session.current().map(|entry| {
            (
                entry.item.characters.clone(),
                primary_hint(&entry.item).to_string(),
                entry.item.audio_urls.first().cloned(),
            )
        }) else {
            break;
        };

        if announce {
            if player.enabled() {
                println!("[{} left] 🔊", session.remaining());
            } else {
                // No audio available; fall back to showing the surface form.
                println!("[{} left] {}", session.remaining(), characters);
            }
            if let Some(url) = &audio_url {
                player.play(url);
            }
            announce = false;
        }

        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        match input {
            "" => continue,
            ":q" => break,
            ":p" => {
                if let Some(url) = &audio_url {
                    player.play(url);
                }
                continue;
            }
            ":h" => {
                println!("hint: {hint}");
                continue;
            }
            _ => {}
        }

        let outcome = session.submit(input);
        if outcome.ok {
            println!("✓ correct\n");
        } else if outcome.hint.is_empty() {
            println!("✗ answer: {}\n", outcome.correct_answer);
        } else {
            println!("✗ answer: {} ({})\n", outcome.correct_answer, outcome.hint);
        }
        session.advance();
        announce = true;
    }

    print_summary(&session.summary());
    Ok(())
}

fn print_summary(summary: &SessionSummary) {
    println!("Session summary");
    println!("  correct: {}", summary.correct);
    println!("  wrong:   {}", summary.wrong);
    println!("  total:   {}", summary.total);
    println!(
        "  time:    {}m{:02}s",
        summary.elapsed_seconds / 60,
        summary.elapsed_seconds % 60
    );
}
