//! Terminal session — walks the questionnaire on stdin/stdout, then shows
//! the generated results.
//!
//! Input conventions: an empty line moves to the next question, `:back`
//! returns to the previous one, `:quit` abandons the session. Anything
//! else is parsed as an answer to the current question and the question is
//! shown again with the updated value.
//!
//! Multi-choice answers take a comma list, `+N`/`-N` to toggle one option,
//! or `:none` to clear the selection. Goals take `a; b; c` for all three or
//! `N: text` for one slot; a leading `N:` wins, so `1: a; b` fills slot 1
//! with `a; b`. Slider values outside the question's bounds are rejected.

use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};

use crate::error::QuestionnaireError;
use crate::questionnaire::{
    AdvanceOutcome, AnswerValue, QuestionDefinition, QuestionKind, QuestionnaireEngine, RangePart,
    RangeSlider,
};
use crate::render;
use crate::results::QuestionnaireId;

/// A parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Next,
    Back,
    Quit,
    /// Replace the whole answer.
    Set(AnswerValue),
    /// Select or deselect one multi-choice option.
    Toggle {
        option: &'static str,
        selected: bool,
    },
    /// Fill one goal slot.
    Slot { slot: usize, text: String },
}

/// Parse one input line against the question being shown.
pub fn parse_command(question: &QuestionDefinition, line: &str) -> Result<Command, String> {
    let line = line.trim();
    match line {
        "" => return Ok(Command::Next),
        ":back" => return Ok(Command::Back),
        ":quit" => return Ok(Command::Quit),
        _ => {}
    }

    match question.kind {
        QuestionKind::FreeText => Ok(Command::Set(AnswerValue::text(line))),
        QuestionKind::SingleChoice { options } => {
            pick_option(options, line).map(|o| Command::Set(AnswerValue::text(o)))
        }
        QuestionKind::MultiChoice { options } => {
            if line == ":none" {
                return Ok(Command::Set(AnswerValue::TextSet(Vec::new())));
            }
            if let Some(rest) = line.strip_prefix('+') {
                let option = pick_option(options, rest)?;
                return Ok(Command::Toggle {
                    option,
                    selected: true,
                });
            }
            if let Some(rest) = line.strip_prefix('-') {
                let option = pick_option(options, rest)?;
                return Ok(Command::Toggle {
                    option,
                    selected: false,
                });
            }
            let picked = line
                .split(',')
                .map(|item| pick_option(options, item))
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Command::Set(AnswerValue::set(picked)))
        }
        QuestionKind::DualRange { first, second } => {
            let numbers = parse_integers(line)?;
            match numbers.as_slice() {
                [a, b] => {
                    let a = within(&first, *a)?;
                    let b = within(&second, *b)?;
                    Ok(Command::Set(AnswerValue::IntegerPair(a, b)))
                }
                _ => Err(format!(
                    "Enter two numbers: {} then {}",
                    first.label.to_lowercase(),
                    second.label.to_lowercase()
                )),
            }
        }
        QuestionKind::TripleText => {
            if let Some((slot, text)) = line.split_once(':') {
                if let Ok(n) = slot.trim().parse::<usize>() {
                    if (1..=3).contains(&n) {
                        return Ok(Command::Slot {
                            slot: n - 1,
                            text: text.trim().to_string(),
                        });
                    }
                    return Err("Goal numbers are 1, 2 or 3".to_string());
                }
            }
            let goals: Vec<&str> = line.split(';').map(str::trim).collect();
            match goals.as_slice() {
                [a, b, c] => Ok(Command::Set(AnswerValue::triple(*a, *b, *c))),
                _ => Err("Enter three goals separated by ';', or 'N: goal' for one".to_string()),
            }
        }
        QuestionKind::RatingScale { scale } => {
            let hint = || format!("Enter a number from {} to {}", scale.min, scale.max);
            let n = line.parse::<i64>().map_err(|_| hint())?;
            if !(scale.min..=scale.max).contains(&n) {
                return Err(hint());
            }
            Ok(Command::Set(AnswerValue::Integer(n)))
        }
    }
}

fn within(slider: &RangeSlider, value: i64) -> Result<i64, String> {
    if (slider.min..=slider.max).contains(&value) {
        Ok(value)
    } else {
        Err(format!(
            "{} must be between {} and {}",
            slider.label, slider.min, slider.max
        ))
    }
}

fn pick_option(options: &'static [&'static str], input: &str) -> Result<&'static str, String> {
    let input = input.trim();
    if let Ok(n) = input.parse::<usize>() {
        return options
            .get(n.wrapping_sub(1))
            .copied()
            .ok_or_else(|| format!("Choose a number from 1 to {}", options.len()));
    }
    options
        .iter()
        .find(|o| o.eq_ignore_ascii_case(input))
        .copied()
        .ok_or_else(|| format!("Unknown option: {input}"))
}

fn parse_integers(line: &str) -> Result<Vec<i64>, String> {
    line.split(|c: char| c.is_whitespace() || c == ',' || c == '/')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<i64>().map_err(|_| format!("Not a number: {s}")))
        .collect()
}

/// Apply an answer-editing command to the engine.
pub fn apply_edit(
    engine: &mut QuestionnaireEngine,
    question: &QuestionDefinition,
    command: Command,
) -> Result<(), QuestionnaireError> {
    match command {
        Command::Set(AnswerValue::IntegerPair(a, b)) => {
            engine.set_range_part(question.id, RangePart::First, a)?;
            engine.set_range_part(question.id, RangePart::Second, b)
        }
        Command::Set(value) => engine.set_answer(question.id, value),
        Command::Toggle { option, selected } => engine.toggle_choice(question.id, option, selected),
        Command::Slot { slot, text } => engine.set_goal_slot(question.id, slot, text),
        Command::Next | Command::Back | Command::Quit => Ok(()),
    }
}

/// How a terminal session ended.
#[derive(Debug)]
pub enum SessionEnd {
    Completed(QuestionnaireId),
    Failed,
    Abandoned,
}

/// Interactive questionnaire over stdin/stdout.
pub struct TerminalSession {
    lines: Lines<BufReader<Stdin>>,
}

impl TerminalSession {
    pub fn new() -> Self {
        Self {
            lines: BufReader::new(tokio::io::stdin()).lines(),
        }
    }

    /// Walk the engine to completion.
    pub async fn run(&mut self, engine: &mut QuestionnaireEngine) -> SessionEnd {
        loop {
            let question = match engine.current_question() {
                Ok(q) => q,
                Err(e) => {
                    tracing::error!("Questionnaire cursor invalid: {}", e);
                    return SessionEnd::Failed;
                }
            };
            let answer = engine.answers().and_then(|a| a.get(question.id));
            println!(
                "\n{}",
                render::render_question(
                    question,
                    answer,
                    engine.current_step(),
                    engine.total_steps(),
                    engine.progress_fraction(),
                )
            );
            if engine.is_last_step() {
                eprint!("(empty line to complete the assessment) > ");
            } else {
                eprint!("> ");
            }

            let line = match self.lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return SessionEnd::Abandoned,
                Err(e) => {
                    tracing::error!("Error reading stdin: {}", e);
                    return SessionEnd::Abandoned;
                }
            };

            let command = match parse_command(question, &line) {
                Ok(c) => c,
                Err(hint) => {
                    eprintln!("{hint}");
                    continue;
                }
            };

            match command {
                Command::Quit => return SessionEnd::Abandoned,
                Command::Back => {
                    engine.retreat();
                }
                Command::Next => match engine.advance().await {
                    AdvanceOutcome::Continuing { .. } | AdvanceOutcome::InFlight => {}
                    AdvanceOutcome::Completed { questionnaire_id } => {
                        return SessionEnd::Completed(questionnaire_id);
                    }
                    AdvanceOutcome::Failed { .. } => return SessionEnd::Failed,
                },
                edit => {
                    if let Err(e) = apply_edit(engine, question, edit) {
                        eprintln!("{e}");
                    }
                }
            }
        }
    }
}

impl Default for TerminalSession {
    fn default() -> Self {
        Self::new()
    }
}
