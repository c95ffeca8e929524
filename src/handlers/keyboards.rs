//! Inline keyboard layouts shared by the handlers

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Main menu: start a dialogue or open settings
pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Start Dialogue", "start_dialogue")],
        vec![InlineKeyboardButton::callback("Settings", "settings")],
    ])
}

/// Single Start Dialogue button, used as a nudge outside conversations
pub fn start_dialogue() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Start Dialogue",
        "start_dialogue",
    )]])
}

/// Difficulty selection row
pub fn difficulty_selection() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![
        InlineKeyboardButton::callback("Beginner", "level_beginner"),
        InlineKeyboardButton::callback("Intermediate", "level_intermediate"),
        InlineKeyboardButton::callback("Advanced", "level_advanced"),
    ]])
}

/// Attached to text replies from the patient
pub fn make_diagnosis() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Make Diagnosis",
        "make_diagnosis",
    )]])
}

/// Attached to voice replies from the patient
pub fn voice_reply() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Make Diagnosis", "make_diagnosis")],
        vec![InlineKeyboardButton::callback("Show Transcription", "show_transcription")],
    ])
}

/// Settings menu
pub fn settings() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::callback("Toggle Voice Mode", "toggle_voice")],
        vec![InlineKeyboardButton::callback("Back to Main Menu", "main_menu")],
    ])
}

/// Offered after a consultation completes
pub fn new_dialogue() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![InlineKeyboardButton::callback(
        "Start New Dialogue",
        "start_dialogue",
    )]])
}
