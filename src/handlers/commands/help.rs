//! Help command handler

use teloxide::{Bot, types::Message, prelude::*};
use crate::utils::errors::Result;

/// Handle /help command
pub async fn handle_help(bot: Bot, msg: Message) -> Result<()> {
    let help_text = "🩺 MedBuddy Help\n\n\
        /start - Start the bot and open the main menu\n\
        /help - Show this help message\n\
        /stats - Show your practice statistics\n\n\
        Start a dialogue, interview the patient in English, then press \
        \"Make Diagnosis\" when you are ready.";

    bot.send_message(msg.chat.id, help_text).await?;
    Ok(())
}
