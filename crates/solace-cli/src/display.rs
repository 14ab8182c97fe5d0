//! Colored terminal rendering.

use chrono::{DateTime, Local, Utc};
use colored::Colorize;
use solace_application::SettingsState;
use solace_core::chat::{ChatSession, MessagePair};
use solace_core::journal::{JournalEntry, JournalForm};

fn local_time(at: &DateTime<Utc>) -> String {
    at.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

pub fn print_chats(sessions: &[ChatSession]) {
    if sessions.is_empty() {
        println!("{}", "No conversations yet.".bright_black());
        return;
    }
    for session in sessions {
        println!(
            "{}  {}  {}",
            session.id.bright_black(),
            session.title.bold(),
            format!(
                "{} · {} messages",
                local_time(&session.timestamp),
                session.messages.len()
            )
            .bright_black()
        );
    }
}

pub fn print_message(pair: &MessagePair) {
    if pair.user_text.is_empty() {
        println!("{}", "You: [image]".green());
    } else {
        println!("{} {}", "You:".green().bold(), pair.user_text.green());
    }
    println!("{}", "Assistant:".bright_blue().bold());
    for line in pair.assistant_text.lines() {
        println!("{}", line.bright_blue());
    }
    println!();
}

pub fn print_messages(messages: &[MessagePair]) {
    if messages.is_empty() {
        println!("{}", "No messages yet.".bright_black());
    }
    messages.iter().for_each(print_message);
}

pub fn print_entries(entries: &[JournalEntry]) {
    if entries.is_empty() {
        println!("{}", "No journal entries yet.".bright_black());
        return;
    }
    for entry in entries {
        let preview: String = entry.content.chars().take(60).collect();
        let marker = if entry.emotion_analysis.is_some() { " *" } else { "" };
        println!(
            "{}  {}{}  {}",
            entry.id.bright_black(),
            entry.title().bold(),
            marker.bright_magenta(),
            preview.bright_black()
        );
    }
}

pub fn print_form(form: &JournalForm) {
    println!("{}", form.title.bold());
    println!("{}", form.content);
    if let Some(analysis) = &form.analysis {
        println!();
        println!("{}", "Analysis:".bright_magenta().bold());
        println!("{}", analysis.bright_magenta());
    }
}

pub fn print_settings(state: &SettingsState) {
    let settings = &state.settings;
    println!("{} {}", "User type:".bold(), settings.user_type());
    println!(
        "{} {}",
        "Template:".bold(),
        settings.selected_template.as_deref().unwrap_or("(none)")
    );
    println!("{}", "System prompt:".bold());
    println!("{}", settings.system_prompt);
}

pub fn print_templates(state: &SettingsState) {
    if state.catalog.is_empty() {
        println!("{}", "No templates available.".bright_black());
        return;
    }
    let selected = state.settings.selected_template.as_deref();
    for name in state.catalog.names() {
        let first_line = state
            .catalog
            .get(name)
            .and_then(|text| text.lines().next())
            .unwrap_or_default();
        let marker = if selected == Some(name) { "*" } else { " " };
        println!(
            "{} {}  {}",
            marker.bright_green(),
            name.bold(),
            first_line.bright_black()
        );
    }
}
