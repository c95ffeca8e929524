//! Stats command handler
//!
//! Shows a user's practice history: sessions played, correct diagnoses,
//! average question count.

use teloxide::{Bot, types::Message, prelude::*};
use tracing::debug;

use crate::services::ServiceFactory;
use crate::utils::errors::{MedBuddyError, Result};

/// Handle /stats command
pub async fn handle_stats(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        MedBuddyError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;
    debug!(user_id = user_id, "Processing /stats command");

    let text = match services.database.user_statistics(user_id).await {
        Ok(stats) if stats.total_sessions > 0 => format!(
            "📊 Ваша статистика:\n\n\
             • Консультаций проведено: {}\n\
             • Верных диагнозов: {}\n\
             • Вопросов в среднем: {:.1}",
            stats.total_sessions, stats.correct_diagnoses, stats.average_questions
        ),
        Ok(_) => "Вы еще не завершили ни одной консультации. \
                  Используйте /start, чтобы начать!"
            .to_string(),
        Err(MedBuddyError::UserNotFound { .. }) => {
            "Сначала запустите бота командой /start.".to_string()
        }
        Err(e) => return Err(e),
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
