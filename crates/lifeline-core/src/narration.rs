//! Narration renderer: turn guidance text into an audio clip via a speech
//! synthesis service, using a scoped temporary file.
//!
//! Narration is always non-fatal: a synthesis failure is returned to the
//! caller to log as a warning, and the textual guidance stays usable.

use crate::error::NarrationError;
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

/// Language code sent with every synthesis request.
pub const NARRATION_LANG: &str = "en";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Synthesized speech bytes (MP3). Created on demand, never cached.
#[derive(Debug, Clone)]
pub struct AudioClip(Vec<u8>);

impl AudioClip {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Backend that writes synthesized speech for `text` to `out`. Implementations
/// must not leave partial files on failure paths they control; the caller owns
/// the lifetime of `out` either way.
#[async_trait]
pub trait SpeechClient: Send + Sync {
    async fn synthesize_to(
        &self,
        text: &str,
        lang: &str,
        out: &Path,
    ) -> Result<(), NarrationError>;
}

/// The translate TTS endpoint rejects single requests much over this many
/// characters, so longer text is synthesized chunk by chunk.
const TTS_MAX_CHUNK_CHARS: usize = 100;

/// Split text into chunks of at most `max_chars` characters, breaking at
/// whitespace where possible. Words longer than the limit are hard-split at
/// character boundaries (multibyte-safe).
fn chunk_text(text: &str, max_chars: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if word_len > max_chars {
            if !current.is_empty() {
                chunks.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let mut piece = String::new();
            let mut piece_len = 0usize;
            for ch in word.chars() {
                if piece_len == max_chars {
                    chunks.push(std::mem::take(&mut piece));
                    piece_len = 0;
                }
                piece.push(ch);
                piece_len += 1;
            }
            if !piece.is_empty() {
                chunks.push(piece);
            }
            continue;
        }

        if !current.is_empty() && current_len + 1 + word_len > max_chars {
            chunks.push(std::mem::take(&mut current));
            current_len = 0;
        }
        if !current.is_empty() {
            current.push(' ');
            current_len += 1;
        }
        current.push_str(word);
        current_len += word_len;
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}

/// Google Translate TTS client (the endpoint behind the gTTS library).
/// Normal speaking rate; language is whatever the caller passes (the
/// renderer always passes [`NARRATION_LANG`]).
///
/// Long text is split into sub-limit chunks and the MP3 bytes are
/// concatenated, the same way gTTS handles its per-request length cap.
pub struct TranslateTts {
    url: String,
    client: reqwest::Client,
}

impl TranslateTts {
    pub fn new(url: impl Into<String>) -> Result<Self, NarrationError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| NarrationError::Synthesis(e.to_string()))?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }

    async fn fetch_chunk(&self, chunk: &str, lang: &str) -> Result<Vec<u8>, NarrationError> {
        let response = self
            .client
            .get(&self.url)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", lang),
                ("ttsspeed", "1"),
                ("q", chunk),
            ])
            .send()
            .await
            .map_err(|e| NarrationError::Synthesis(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NarrationError::Synthesis(format!(
                "TTS endpoint returned {}",
                status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| NarrationError::Synthesis(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[async_trait]
impl SpeechClient for TranslateTts {
    async fn synthesize_to(
        &self,
        text: &str,
        lang: &str,
        out: &Path,
    ) -> Result<(), NarrationError> {
        // MP3 frames are self-contained, so per-chunk responses concatenate
        // into one playable stream.
        let mut audio = Vec::new();
        for chunk in chunk_text(text, TTS_MAX_CHUNK_CHARS) {
            audio.extend(self.fetch_chunk(&chunk, lang).await?);
        }
        tokio::fs::write(out, &audio).await?;
        Ok(())
    }
}

/// Offline speech backend: writes a fixed byte stamp instead of real audio.
/// Keeps keyless demos and tests deterministic.
#[derive(Debug, Default)]
pub struct SilentTts;

#[async_trait]
impl SpeechClient for SilentTts {
    async fn synthesize_to(
        &self,
        _text: &str,
        _lang: &str,
        out: &Path,
    ) -> Result<(), NarrationError> {
        tokio::fs::write(out, b"ID3\x03\x00\x00\x00\x00\x00\x00").await?;
        Ok(())
    }
}

/// Renders guidance text into an [`AudioClip`] through a scoped temp file.
pub struct Narrator {
    speech: Arc<dyn SpeechClient>,
}

impl Narrator {
    pub fn new(speech: Arc<dyn SpeechClient>) -> Self {
        Self { speech }
    }

    /// Synthesize `text` and return the audio bytes. The backing temp file is
    /// removed on every exit path: it is owned by this frame and dropped
    /// whether synthesis succeeds, fails, or the read fails.
    pub async fn narrate(&self, text: &str) -> Result<AudioClip, NarrationError> {
        let file = tempfile::Builder::new()
            .prefix("lifeline-narration-")
            .suffix(".mp3")
            .tempfile()?;

        self.speech
            .synthesize_to(text, NARRATION_LANG, file.path())
            .await?;

        let bytes = tokio::fs::read(file.path()).await?;
        if bytes.is_empty() {
            return Err(NarrationError::EmptyAudio);
        }
        tracing::debug!(target: "lifeline::narration", bytes = bytes.len(), "narration rendered");
        Ok(AudioClip(bytes))
    }
}
