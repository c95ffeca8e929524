//! Callback query handlers module
//!
//! This module contains handlers for all inline keyboard button callbacks:
//! starting a dialogue, picking a difficulty, submitting a diagnosis, and
//! the settings menu.

use teloxide::{Bot, types::{CallbackQuery, ChatId}, prelude::*};
use tracing::{debug, info, warn};

use crate::catalog::Difficulty;
use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::utils::errors::{MedBuddyError, Result};

/// Main callback query dispatcher
pub async fn handle_callback_query(
    bot: Bot,
    query: CallbackQuery,
    services: ServiceFactory,
) -> Result<()> {
    let user = query.from;
    let user_id = user.id.0 as i64;
    let chat_id = query
        .message
        .as_ref()
        .map(|m| m.chat().id)
        .unwrap_or(ChatId(user_id));

    debug!(user_id = user_id, callback_data = ?query.data, "Processing callback query");

    // Answer first to clear the loading state on the button
    if let Err(e) = bot.answer_callback_query(query.id.clone()).await {
        warn!(error = %e, callback_id = %query.id, "Failed to answer callback query");
    }

    let Some(data) = query.data else {
        warn!(user_id = user_id, "Callback query without data");
        return Ok(());
    };

    match data.as_str() {
        "start_dialogue" => handle_start_dialogue(bot, chat_id, user_id, services).await,
        "make_diagnosis" => handle_make_diagnosis(bot, chat_id, user_id, services).await,
        "settings" => handle_settings(bot, chat_id, user_id, services).await,
        "toggle_voice" => handle_toggle_voice(bot, chat_id, user_id, services).await,
        "show_transcription" => handle_show_transcription(bot, chat_id, user_id, services).await,
        "main_menu" => handle_main_menu(bot, chat_id).await,
        other => {
            if let Some(level) = other.strip_prefix("level_") {
                handle_level_selection(bot, chat_id, user_id, level, services).await
            } else {
                warn!(user_id = user_id, data = %other, "Unknown callback data");
                Ok(())
            }
        }
    }
}

/// Show the difficulty keyboard with the dialogue instructions
async fn handle_start_dialogue(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let mut info_message =
        "You can ask questions to the patient and when you're ready make a diagnosis.\n\n"
            .to_string();

    match services.database.users.find_by_telegram_id(user_id).await {
        Ok(Some(user)) if user.voice_mode => {
            info_message.push_str("Voice mode is enabled. You can send voice messages!\n\n");
        }
        Ok(_) => {}
        Err(e) => {
            warn!(user_id = user_id, error = %e, "Failed to check voice mode");
        }
    }

    info_message.push_str("Please select difficulty level:");
    bot.send_message(chat_id, info_message)
        .reply_markup(keyboards::difficulty_selection())
        .await?;

    Ok(())
}

/// Start a consultation at the chosen difficulty
async fn handle_level_selection(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    level: &str,
    services: ServiceFactory,
) -> Result<()> {
    let Some(difficulty) = Difficulty::parse(level) else {
        warn!(user_id = user_id, level = %level, "Unknown difficulty level");
        return Ok(());
    };

    let state = match services.dialog_service.start(user_id, difficulty).await {
        Ok(state) => state,
        Err(MedBuddyError::NoScenarioAvailable { difficulty }) => {
            warn!(user_id = user_id, difficulty = %difficulty, "No scenario available");
            bot.send_message(
                chat_id,
                "Sorry, no patient case is available for this level right now. \
                 Please pick another difficulty.",
            )
            .reply_markup(keyboards::difficulty_selection())
            .await?;
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    if let Err(e) = services
        .database
        .users
        .set_current_level(user_id, difficulty.as_str())
        .await
    {
        warn!(user_id = user_id, error = %e, "Failed to store current level");
    }

    let mut message = format!("{}\n\n", state.scenario.initial_complaint);
    if difficulty == Difficulty::Beginner && !state.scenario.hints.is_empty() {
        message.push_str("Here are some suggested questions you might want to ask:\n");
        for hint in &state.scenario.hints {
            message.push_str(&format!("- {hint}\n"));
        }
        message.push('\n');
    }
    message.push_str("You can start asking questions to the patient.");

    bot.send_message(chat_id, message).await?;
    Ok(())
}

/// Flag the user's next message as a diagnosis
async fn handle_make_diagnosis(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    if !services.dialog_service.is_active(user_id).await {
        bot.send_message(chat_id, crate::dialog::NO_ACTIVE_CONVERSATION)
            .reply_markup(keyboards::start_dialogue())
            .await?;
        return Ok(());
    }

    services.dialog_service.set_awaiting_diagnosis(user_id).await;
    info!(user_id = user_id, "Awaiting diagnosis");

    bot.send_message(chat_id, "Please provide your diagnosis:").await?;
    Ok(())
}

/// Show the settings menu with the current voice mode
async fn handle_settings(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let user = services
        .database
        .users
        .find_by_telegram_id(user_id)
        .await?
        .ok_or(MedBuddyError::UserNotFound { user_id })?;

    let current_mode = if user.voice_mode {
        "Voice Mode: ON 🗣"
    } else {
        "Voice Mode: OFF 📝"
    };

    bot.send_message(
        chat_id,
        format!("Settings\n\n{current_mode}\n\nYou can toggle between voice and text modes:"),
    )
    .reply_markup(keyboards::settings())
    .await?;

    Ok(())
}

/// Flip the voice mode preference
async fn handle_toggle_voice(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    let voice_mode = services.database.users.toggle_voice_mode(user_id).await?;
    info!(user_id = user_id, voice_mode = voice_mode, "Voice mode toggled");

    let new_mode = if voice_mode {
        "Voice Mode: ON 🗣"
    } else {
        "Voice Mode: OFF 📝"
    };
    bot.send_message(chat_id, format!("Mode updated! {new_mode}")).await?;

    Ok(())
}

/// Send the text of the patient's last voice reply
async fn handle_show_transcription(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    services: ServiceFactory,
) -> Result<()> {
    match services.dialog_service.last_reply(user_id).await {
        Some(reply) => bot.send_message(chat_id, reply).await?,
        None => {
            bot.send_message(chat_id, "No recent bot response available.")
                .await?
        }
    };

    Ok(())
}

/// Back to the main menu
async fn handle_main_menu(bot: Bot, chat_id: ChatId) -> Result<()> {
    bot.send_message(chat_id, "Main Menu:")
        .reply_markup(keyboards::main_menu())
        .await?;
    Ok(())
}
