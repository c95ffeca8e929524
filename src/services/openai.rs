//! OpenAI service implementation
//!
//! This service drives the simulated patient: chat completions for the
//! patient's answers, Whisper for voice transcription, and TTS for spoken
//! replies. The consultation core never touches this service; only the
//! message handlers do.

use std::time::Duration;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use crate::catalog::{Difficulty, PatientGender};
use crate::config::settings::OpenAiConfig;
use crate::dialog::ConversationState;
use crate::utils::errors::{MedBuddyError, OpenAiError, Result};

/// Telegram voice message text limit
const MAX_TTS_INPUT: usize = 4096;

/// Chat completion response shape (the fields we read)
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

/// OpenAI-backed patient simulation service
#[derive(Debug, Clone)]
pub struct OpenAiService {
    client: Client,
    config: OpenAiConfig,
}

impl OpenAiService {
    /// Create a new OpenAiService instance
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent("MedBuddy-Bot/1.0")
            .build()
            .map_err(MedBuddyError::Http)?;

        Ok(Self { client, config })
    }

    /// Generate the patient's answer to the doctor's question
    pub async fn generate_reply(&self, question: &str, state: &ConversationState) -> Result<String> {
        debug!(scenario_id = %state.scenario.id, "Generating patient reply");

        let body = json!({
            "model": self.config.chat_model,
            "messages": [
                {"role": "system", "content": build_patient_prompt(state)},
                {"role": "user", "content": question}
            ],
            "max_tokens": 150
        });

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let detail = response.text().await.unwrap_or_default();
            return Err(OpenAiError::RequestFailed(format!("{status}: {detail}")).into());
        }

        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|c| !c.is_empty())
            .ok_or(OpenAiError::EmptyResponse)?;

        debug!(reply_length = content.len(), "Patient reply generated");
        Ok(content)
    }

    /// Transcribe a voice message with the Whisper API
    pub async fn transcribe(&self, audio: Vec<u8>) -> Result<String> {
        info!(audio_bytes = audio.len(), "Transcribing voice message");

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("voice.ogg")
            .mime_str("audio/ogg")
            .map_err(MedBuddyError::Http)?;
        let form = reqwest::multipart::Form::new()
            .text("model", self.config.transcription_model.clone())
            .text("response_format", "text")
            .part("file", part);

        let response = self
            .client
            .post(format!("{}/audio/transcriptions", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .multipart(form)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(OpenAiError::TranscriptionFailed(status.to_string()).into());
        }

        let text = response.text().await?;
        let text = text.trim().to_string();
        if text.is_empty() {
            return Err(OpenAiError::TranscriptionFailed("empty transcript".to_string()).into());
        }

        info!(transcript_length = text.len(), "Voice transcription completed");
        Ok(text)
    }

    /// Synthesize the patient's reply to speech, voiced by patient gender
    pub async fn synthesize(&self, text: &str, gender: PatientGender) -> Result<Vec<u8>> {
        if text.is_empty() {
            return Err(OpenAiError::SynthesisFailed("empty input text".to_string()).into());
        }

        let input: String = text.chars().take(MAX_TTS_INPUT).collect();
        let voice = match gender {
            PatientGender::Female => "nova",
            PatientGender::Male => "echo",
        };
        debug!(voice = voice, input_length = input.len(), "Requesting speech synthesis");

        let body = json!({
            "model": self.config.tts_model,
            "voice": voice,
            "input": input,
            "response_format": "opus",
            "speed": 1.0
        });

        let response = self
            .client
            .post(format!("{}/audio/speech", self.config.api_base))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            return Err(OpenAiError::SynthesisFailed(status.to_string()).into());
        }

        let audio = response.bytes().await?.to_vec();
        if audio.len() < 100 {
            return Err(OpenAiError::SynthesisFailed(format!(
                "audio content too small ({} bytes)",
                audio.len()
            ))
            .into());
        }

        info!(audio_bytes = audio.len(), "Speech synthesis completed");
        Ok(audio)
    }
}

/// Build the system prompt that keeps the model in the patient role
fn build_patient_prompt(state: &ConversationState) -> String {
    let scenario = &state.scenario;

    let mut prompt = String::from(
        "You are a patient talking to a doctor during a medical consultation. \
         You must ALWAYS respond as the patient, never as the doctor. \
         Always respond in English and stay in character as someone seeking medical help. ",
    );

    prompt.push_str(&format!("Your initial complaint is: {}. ", scenario.initial_complaint));
    prompt.push_str("Your current symptoms include: ");
    let mut symptoms: Vec<_> = scenario.symptoms.iter().collect();
    symptoms.sort_by(|a, b| a.0.cmp(b.0));
    prompt.push_str(
        &symptoms
            .iter()
            .map(|(name, description)| format!("{name}: {description}"))
            .collect::<Vec<_>>()
            .join(", "),
    );

    match state.difficulty {
        Difficulty::Beginner => {
            prompt.push_str(
                ". Provide clear, straightforward answers. Be direct about your symptoms. \
                 If the doctor misses an important question, you can give subtle hints.",
            );
        }
        Difficulty::Intermediate => {
            prompt.push_str(
                ". Provide moderately detailed answers. Sometimes forget to mention minor details \
                 unless specifically asked. You may occasionally need clarifying questions.",
            );
        }
        Difficulty::Advanced => {
            prompt.push_str(
                ". Provide complex, sometimes vague answers that require follow-up questions. \
                 You might go off-topic occasionally or mention seemingly unrelated symptoms. \
                 The doctor needs to guide the conversation to get precise information.",
            );
        }
    }

    prompt.push_str(" Stay in character and provide consistent responses based on these symptoms.");
    prompt
}
