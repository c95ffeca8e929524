//! Start command handler
//!
//! Handles the /start command: registers the user and shows the main menu.

use teloxide::{Bot, types::Message, prelude::*};
use tracing::{debug, info};

use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::utils::errors::Result;

/// Handle /start command - entry point for every user
pub async fn handle_start(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        crate::utils::errors::MedBuddyError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;
    debug!(user_id = user_id, chat_id = ?chat_id, "Processing /start command");

    let db_user = services
        .database
        .initialize_user(user_id, user.username.clone())
        .await?;
    info!(user_id = user_id, db_id = db_user.id, "User registered or fetched");

    bot.send_message(
        chat_id,
        "Добро пожаловать в Medical English Practice Bot! Здесь вы можете практиковать \
         медицинский английский, проводя консультации с пациентами.",
    )
    .reply_markup(keyboards::main_menu())
    .await?;

    Ok(())
}
