//! Message handlers module
//!
//! Handles incoming text and voice messages: patient questions, diagnosis
//! submissions, and voice transcription with spoken replies.

use teloxide::net::Download;
use teloxide::{Bot, types::{InputFile, Message}, prelude::*};
use tracing::{debug, error, info};

use crate::dialog::NO_ACTIVE_CONVERSATION;
use crate::evaluation::{build_feedback, build_terms_message};
use crate::handlers::keyboards;
use crate::services::ServiceFactory;
use crate::utils::errors::{MedBuddyError, Result};
use crate::utils::logging;

/// Handle any incoming private message
pub async fn handle_message(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        MedBuddyError::InvalidInput("No user in message".to_string())
    })?;

    let user_id = user.id.0 as i64;
    debug!(user_id = user_id, chat_id = ?msg.chat.id, "Processing message");

    if msg.voice().is_some() {
        return handle_voice_message(bot, msg, services).await;
    }

    if let Some(text) = msg.text() {
        let text = text.to_string();
        return handle_text_message(bot, msg, text, services).await;
    }

    Ok(())
}

/// Handle a text message: a patient question or a diagnosis
pub async fn handle_text_message(
    bot: Bot,
    msg: Message,
    text: String,
    services: ServiceFactory,
) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        MedBuddyError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    if !services.dialog_service.is_active(user_id).await {
        bot.send_message(chat_id, NO_ACTIVE_CONVERSATION)
            .reply_markup(keyboards::start_dialogue())
            .await?;
        return Ok(());
    }

    if services.dialog_service.take_awaiting_diagnosis(user_id).await {
        return handle_diagnosis(bot, chat_id, user_id, text.trim(), services).await;
    }

    // A regular question to the patient
    services.dialog_service.record_question(user_id, &text).await;
    let Some(state) = services.dialog_service.get_context(user_id).await else {
        bot.send_message(chat_id, NO_ACTIVE_CONVERSATION)
            .reply_markup(keyboards::start_dialogue())
            .await?;
        return Ok(());
    };

    logging::log_user_action(user_id, "question", Some(&text));

    let reply = match services.openai_service.generate_reply(&text, &state).await {
        Ok(reply) => {
            services.dialog_service.set_last_reply(user_id, &reply).await;
            reply
        }
        Err(e) => {
            error!(user_id = user_id, error = %e, "Failed to generate patient reply");
            "Sorry, there was an error processing your message. Please try again.".to_string()
        }
    };

    bot.send_message(chat_id, reply)
        .reply_markup(keyboards::make_diagnosis())
        .await?;

    Ok(())
}

/// Score the submitted diagnosis and close the consultation
async fn handle_diagnosis(
    bot: Bot,
    chat_id: ChatId,
    user_id: i64,
    diagnosis: &str,
    services: ServiceFactory,
) -> Result<()> {
    let Some((result, state)) = services
        .dialog_service
        .submit_diagnosis(user_id, diagnosis)
        .await
    else {
        bot.send_message(chat_id, NO_ACTIVE_CONVERSATION)
            .reply_markup(keyboards::start_dialogue())
            .await?;
        return Ok(());
    };

    logging::log_diagnosis_result(
        user_id,
        &state.scenario.id,
        result.tier.as_str(),
        state.questions_asked.len(),
    );

    let feedback = build_feedback(&result, diagnosis, &state.scenario, state.questions_asked.len());
    bot.send_message(chat_id, feedback).await?;

    if let Some(terms) = build_terms_message(&state.scenario) {
        bot.send_message(chat_id, terms).await?;
    }

    services.dialog_service.end(user_id).await;

    bot.send_message(
        chat_id,
        "The consultation is complete. Would you like to see another patient?",
    )
    .reply_markup(keyboards::new_dialogue())
    .await?;

    Ok(())
}

/// Handle a voice message: transcribe, ask the patient, reply with synthesized speech
pub async fn handle_voice_message(bot: Bot, msg: Message, services: ServiceFactory) -> Result<()> {
    let user = msg.from.as_ref().ok_or_else(|| {
        MedBuddyError::InvalidInput("No user in message".to_string())
    })?;
    let user_id = user.id.0 as i64;
    let chat_id = msg.chat.id;

    let Some(voice) = msg.voice() else {
        return Ok(());
    };

    let db_user = services
        .database
        .users
        .find_by_telegram_id(user_id)
        .await?
        .ok_or(MedBuddyError::UserNotFound { user_id })?;

    if !db_user.voice_mode {
        bot.send_message(
            chat_id,
            "Voice mode is disabled. Enable it in Settings to send voice messages.",
        )
        .await?;
        return Ok(());
    }

    if !services.dialog_service.is_active(user_id).await {
        bot.send_message(chat_id, NO_ACTIVE_CONVERSATION)
            .reply_markup(keyboards::start_dialogue())
            .await?;
        return Ok(());
    }

    let file = bot.get_file(voice.file.id.clone()).await?;
    let mut audio: Vec<u8> = Vec::new();
    bot.download_file(&file.path, &mut audio).await?;
    logging::log_voice_step(user_id, "download", true);

    let question = match services.openai_service.transcribe(audio).await {
        Ok(question) => question,
        Err(e) => {
            logging::log_voice_step(user_id, "transcribe", false);
            error!(user_id = user_id, error = %e, "Voice transcription failed");
            bot.send_message(
                chat_id,
                "Sorry, your voice message could not be transcribed. \
                 Please try again or use text input.",
            )
            .await?;
            return Ok(());
        }
    };
    logging::log_voice_step(user_id, "transcribe", true);
    info!(user_id = user_id, question = %question, "Voice message transcribed");

    if services.dialog_service.take_awaiting_diagnosis(user_id).await {
        return handle_diagnosis(bot, chat_id, user_id, &question, services).await;
    }

    services.dialog_service.record_question(user_id, &question).await;
    let Some(state) = services.dialog_service.get_context(user_id).await else {
        bot.send_message(chat_id, NO_ACTIVE_CONVERSATION)
            .reply_markup(keyboards::start_dialogue())
            .await?;
        return Ok(());
    };

    let reply = match services.openai_service.generate_reply(&question, &state).await {
        Ok(reply) => reply,
        Err(e) => {
            error!(user_id = user_id, error = %e, "Failed to generate patient reply");
            bot.send_message(
                chat_id,
                "Sorry, there was an error processing your message. Please try again.",
            )
            .reply_markup(keyboards::make_diagnosis())
            .await?;
            return Ok(());
        }
    };

    services.dialog_service.set_last_reply(user_id, &reply).await;

    match services
        .openai_service
        .synthesize(&reply, state.scenario.patient_gender)
        .await
    {
        Ok(speech) => {
            logging::log_voice_step(user_id, "synthesize", true);
            bot.send_voice(chat_id, InputFile::memory(speech))
                .reply_markup(keyboards::voice_reply())
                .await?;
        }
        Err(e) => {
            // Fall back to a text reply when synthesis is unavailable
            logging::log_voice_step(user_id, "synthesize", false);
            error!(user_id = user_id, error = %e, "Speech synthesis failed");
            bot.send_message(chat_id, reply)
                .reply_markup(keyboards::voice_reply())
                .await?;
        }
    }

    Ok(())
}
