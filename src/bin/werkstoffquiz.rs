//! Terminal front-end for the Werkstoffquiz

use std::io::{self, BufRead, Write};

use dotenv::dotenv;
use werkstoffquiz_core::{OptionMark, QuizConfig, QuizSession, RoundState};

const HELP_TEXT: &str = "Befehle: 1-3 antworten | n nächste Frage | a Frage hinzufügen | c Antwortkatalog verwalten | q beenden";

fn main() -> io::Result<()> {
    // A missing .env is fine, the defaults apply.
    dotenv().ok();
    pretty_env_logger::init();

    let config = QuizConfig::from_env();
    log::info!(
        "Using {} and {}",
        config.questions_path.display(),
        config.catalog_path.display()
    );

    let mut session = QuizSession::open(config);
    let stdin = io::stdin();
    let mut input = stdin.lock();

    println!("=== Werkstoffquiz ===");
    println!("{}", HELP_TEXT);
    show_state(session.state());

    loop {
        let Some(line) = prompt_line(&mut input, "> ")? else {
            break;
        };

        match line.as_str() {
            "q" | "quit" => break,
            "n" | "next" => show_state(session.next_round()),
            "a" | "add" => add_question_form(&mut session, &mut input)?,
            "c" | "catalog" => catalog_form(&mut session, &mut input)?,
            "" => {}
            choice => match choice.parse::<usize>() {
                Ok(n) if (1..=werkstoffquiz_core::OPTION_COUNT).contains(&n) => {
                    match session.answer_option(n - 1) {
                        Ok(_) => show_state(session.state()),
                        Err(e) => println!("{}", e),
                    }
                }
                _ => println!("{}", HELP_TEXT),
            },
        }
    }

    Ok(())
}

fn show_state(state: &RoundState) {
    if let Some(reason) = state.blocked_reason() {
        println!("\n{}", reason);
        return;
    }

    match state {
        RoundState::Ready(round) => {
            println!("\n{}", round.prompt);
            for (i, option) in round.options.iter().enumerate() {
                println!("  [{}] {}", i + 1, option);
            }
        }
        RoundState::Answered { round, result } => {
            for (i, (option, mark)) in round.options.iter().zip(&result.marks).enumerate() {
                let tag = match mark {
                    OptionMark::Correct => "✓",
                    OptionMark::Incorrect => "✗",
                    OptionMark::Neutral => " ",
                };
                println!("  {} [{}] {}", tag, i + 1, option);
            }
            // Green for correct, red otherwise.
            let color = if result.is_correct { "32" } else { "31" };
            println!("\x1b[1;{}m{}\x1b[0m  (n für die nächste Frage)", color, result.feedback());
        }
        _ => {}
    }
}

/// Two-field form; an empty question cancels.
fn add_question_form(session: &mut QuizSession, input: &mut impl BufRead) -> io::Result<()> {
    println!("-- Neue Frage hinzufügen (leere Frage bricht ab) --");
    let Some(prompt) = prompt_line(input, "Frage: ")? else {
        return Ok(());
    };
    if prompt.is_empty() {
        println!("Abgebrochen.");
        return Ok(());
    }
    let Some(answer) = prompt_line(input, "Korrekte Antwort: ")? else {
        return Ok(());
    };

    match session.add_question(&prompt, &answer) {
        Ok(grew) => {
            if grew {
                println!("'{}' zum Katalog hinzugefügt.", answer.trim());
            }
            println!("Frage erfolgreich gespeichert.");
            show_state(session.state());
        }
        Err(e) => println!("Fehler: {}", e),
    }
    Ok(())
}

/// Sorted listing plus repeated entry; an empty line closes the form.
fn catalog_form(session: &mut QuizSession, input: &mut impl BufRead) -> io::Result<()> {
    println!("-- Antwortkatalog ({} Einträge) --", session.catalog().len());
    for entry in session.sorted_catalog() {
        println!("  {}", entry);
    }

    loop {
        let Some(text) = prompt_line(input, "Neue Antwort (leer schließt): ")? else {
            break;
        };
        if text.is_empty() {
            break;
        }
        match session.add_catalog_entry(&text) {
            Ok(()) => println!("'{}' zum Katalog hinzugefügt.", text),
            Err(e) => println!("Warnung: {}", e),
        }
    }

    show_state(session.state());
    Ok(())
}

/// Read one trimmed line; `None` at end of input.
fn prompt_line(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{}", label);
    io::stdout().flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}
