//! Interactive chat session on top of rustyline.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use solace_application::SessionCoordinator;
use solace_infrastructure::attachment_loader::load_image;

use crate::display;

const COMMANDS: [&str; 6] = ["/new", "/chats", "/open", "/image", "/delete", "/quit"];

/// Completion, highlighting and hints for slash commands.
#[derive(Clone)]
struct ReplHelper {
    commands: Vec<String>,
}

impl ReplHelper {
    fn new() -> Self {
        Self {
            commands: COMMANDS.iter().map(|cmd| cmd.to_string()).collect(),
        }
    }
}

impl Helper for ReplHelper {}

impl Completer for ReplHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            let candidates: Vec<Pair> = self
                .commands
                .iter()
                .filter(|cmd| cmd.starts_with(line))
                .map(|cmd| Pair {
                    display: cmd.clone(),
                    replacement: cmd.clone(),
                })
                .collect();
            Ok((0, candidates))
        } else {
            Ok((0, vec![]))
        }
    }
}

impl Highlighter for ReplHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        if line.starts_with('/') {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for ReplHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.starts_with('/') && !line.contains(' ') {
            self.commands
                .iter()
                .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
                .map(|cmd| cmd[line.len()..].to_string())
        } else {
            None
        }
    }
}

impl Validator for ReplHelper {}

/// One line of input.
#[derive(Debug, PartialEq, Eq)]
enum Input<'a> {
    Message(&'a str),
    New,
    Chats,
    Open(&'a str),
    Image(&'a str),
    Delete,
    Quit,
    Unknown(&'a str),
}

fn parse(line: &str) -> Input<'_> {
    if !line.starts_with('/') {
        return match line {
            "quit" | "exit" => Input::Quit,
            _ => Input::Message(line),
        };
    }

    let (command, argument) = match line.split_once(' ') {
        Some((command, argument)) => (command, argument.trim()),
        None => (line, ""),
    };
    match (command, argument) {
        ("/new", _) => Input::New,
        ("/chats", _) => Input::Chats,
        ("/open", id) if !id.is_empty() => Input::Open(id),
        ("/image", path) if !path.is_empty() => Input::Image(path),
        ("/delete", _) => Input::Delete,
        ("/quit" | "/exit", _) => Input::Quit,
        _ => Input::Unknown(command),
    }
}

fn prompt(coordinator: &SessionCoordinator) -> String {
    let view = coordinator.view();
    let title = view.active_chat_title.as_deref().unwrap_or("new chat");
    let marker = if view.has_attachment() { " +img" } else { "" };
    format!("{}{}> ", title, marker)
}

/// Runs the chat REPL until `/quit` or end of input.
///
/// Failures are already reported through the coordinator's notifier, so
/// the loop only stops on editor errors.
pub async fn run(coordinator: &SessionCoordinator) -> Result<()> {
    let mut rl = Editor::new()?;
    rl.set_helper(Some(ReplHelper::new()));

    println!("{}", "=== Solace ===".bright_magenta().bold());
    println!(
        "{}",
        "Type a message to chat. Commands: /new, /chats, /open <id>, /image <path>, /delete, /quit"
            .bright_black()
    );
    println!();

    let _ = coordinator.refresh_chats().await;

    loop {
        let readline = rl.readline(&prompt(coordinator));

        let line = match readline {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => {
                println!("{}", "CTRL-C detected. Type /quit to exit.".yellow());
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                eprintln!("{}", format!("Error: {:?}", err).red());
                break;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let _ = rl.add_history_entry(trimmed);

        match parse(trimmed) {
            Input::Quit => {
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Input::Message(text) => {
                if let Ok(pair) = coordinator.send_message(text).await {
                    display::print_message(&pair);
                }
            }
            Input::New => {
                let _ = coordinator.new_chat().await;
            }
            Input::Chats => {
                if let Ok(sessions) = coordinator.refresh_chats().await {
                    display::print_chats(&sessions);
                }
            }
            Input::Open(chat_id) => {
                if let Ok(session) = coordinator.select_chat(chat_id).await {
                    display::print_messages(&session.messages);
                }
            }
            Input::Image(path) => match load_image(Path::new(path)).await {
                Ok(raw) => {
                    let _ = coordinator.attach_image(&raw);
                }
                Err(e) => eprintln!("{}", format!("Error attaching image: {}", e).red()),
            },
            Input::Delete => {
                let _ = coordinator.delete_active_chat().await;
            }
            Input::Unknown(command) => {
                println!("{}", format!("Unknown command {}", command).bright_black());
            }
        }
    }

    Ok(())
}
