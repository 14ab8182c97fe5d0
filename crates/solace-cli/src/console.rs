//! Terminal implementations of the presentation collaborators.

use async_trait::async_trait;
use colored::Colorize;
use solace_core::collaborator::{Confirmation, Notifier};
use std::io::{self, Write};

/// Prints notifications as status lines. Errors go to stderr in red.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl Notifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        if message.starts_with("Error") {
            eprintln!("{}", message.red());
        } else {
            println!("{}", message.bright_green());
        }
    }
}

/// Asks on the terminal and waits for a y/N answer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptConfirmation;

#[async_trait]
impl Confirmation for PromptConfirmation {
    async fn confirm(&self, prompt: &str) -> bool {
        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            print!("{} {} ", prompt.bright_yellow(), "[y/N]".bright_black());
            let _ = io::stdout().flush();

            let mut answer = String::new();
            if io::stdin().read_line(&mut answer).is_err() {
                return false;
            }
            matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
        })
        .await
        .unwrap_or(false)
    }
}
