//! Shared fixtures for the queue integration tests: scripted collaborators
//! that record every call and can fail or block on demand.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Notify;

use omniconvert_core::converter::{ImageReencoder, InferenceService};
use omniconvert_core::entry::{ConversionResult, FilePayload};
use omniconvert_core::error::ConversionError;
use omniconvert_pipeline::{ConversionQueue, Dispatcher, QueueConfig};

/// Bytes returned by [`MockReencoder`] for every successful encode.
pub const ENCODED_BYTES: &[u8] = b"encoded-image";

/// A collaborator call, in the order it was made.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Reencode { file: String, target: String },
    Image { file: String, target: String },
    Audio { file: String, target: String },
    Text { text: String, target: String },
    Document { file: String, target: String },
}

/// Shared call log for both collaborators.
#[derive(Debug, Default, Clone)]
pub struct CallLog(Arc<Mutex<Vec<Call>>>);

impl CallLog {
    fn push(&self, call: Call) {
        self.0.lock().unwrap().push(call);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.0.lock().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

/// Holds the first collaborator call open until the test releases it.
/// Later calls pass straight through.
#[derive(Debug, Default)]
pub struct Gate {
    pub started: Notify,
    pub release: Notify,
    used: AtomicBool,
}

impl Gate {
    async fn pass(&self) {
        if self.used.swap(true, Ordering::SeqCst) {
            return;
        }
        self.started.notify_one();
        self.release.notified().await;
    }
}

/// Tracks how many collaborator calls are running at once.
#[derive(Debug, Default, Clone)]
pub struct InFlight {
    current: Arc<AtomicUsize>,
    peak: Arc<AtomicUsize>,
}

impl InFlight {
    fn enter(&self) {
        let now = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);
    }

    fn exit(&self) {
        self.current.fetch_sub(1, Ordering::SeqCst);
    }

    /// Highest number of overlapping calls observed.
    pub fn peak(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }
}

/// Scripted inference service.
///
/// Answers `"{modality}:{target}"`. Fails any call whose file name (or
/// text, for the text path) contains the configured marker.
#[derive(Default)]
pub struct MockInference {
    log: CallLog,
    fail_marker: Option<String>,
    gate: Option<Arc<Gate>>,
    in_flight: InFlight,
    delay: Option<Duration>,
}

impl MockInference {
    pub fn new(log: CallLog) -> Self {
        Self {
            log,
            ..Self::default()
        }
    }

    pub fn failing_on(mut self, marker: &str) -> Self {
        self.fail_marker = Some(marker.to_string());
        self
    }

    pub fn gated(mut self, gate: Arc<Gate>) -> Self {
        self.gate = Some(gate);
        self
    }

    /// Record overlap in `in_flight`, holding each call open for `delay`.
    pub fn tracking(mut self, in_flight: InFlight, delay: Duration) -> Self {
        self.in_flight = in_flight;
        self.delay = Some(delay);
        self
    }

    async fn answer(
        &self,
        call: Call,
        subject: &str,
        modality: &str,
        target: &str,
    ) -> Result<String, ConversionError> {
        self.log.push(call);
        self.in_flight.enter();
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(gate) = &self.gate {
            gate.pass().await;
        }
        self.in_flight.exit();
        match &self.fail_marker {
            Some(marker) if subject.contains(marker.as_str()) => {
                Err(ConversionError::Service("quota exceeded".to_string()))
            }
            _ => Ok(format!("{modality}:{target}")),
        }
    }
}

#[async_trait]
impl InferenceService for MockInference {
    async fn infer_from_image(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let call = Call::Image {
            file: payload.name.clone(),
            target: target_format.to_string(),
        };
        self.answer(call, &payload.name, "image", target_format).await
    }

    async fn infer_from_audio(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let call = Call::Audio {
            file: payload.name.clone(),
            target: target_format.to_string(),
        };
        self.answer(call, &payload.name, "audio", target_format).await
    }

    async fn infer_from_text(
        &self,
        text: &str,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let call = Call::Text {
            text: text.to_string(),
            target: target_format.to_string(),
        };
        self.answer(call, text, "text", target_format).await
    }

    async fn infer_from_document(
        &self,
        payload: &FilePayload,
        target_format: &str,
    ) -> Result<String, ConversionError> {
        let call = Call::Document {
            file: payload.name.clone(),
            target: target_format.to_string(),
        };
        self.answer(call, &payload.name, "document", target_format).await
    }
}

/// Re-encoder that records the call and returns [`ENCODED_BYTES`].
pub struct MockReencoder {
    log: CallLog,
}

impl MockReencoder {
    pub fn new(log: CallLog) -> Self {
        Self { log }
    }
}

#[async_trait]
impl ImageReencoder for MockReencoder {
    async fn reencode(
        &self,
        payload: &FilePayload,
        target_mime: &str,
    ) -> Result<ConversionResult, ConversionError> {
        self.log.push(Call::Reencode {
            file: payload.name.clone(),
            target: target_mime.to_string(),
        });
        Ok(ConversionResult::Binary {
            bytes: ENCODED_BYTES.to_vec(),
            media_type: target_mime.to_string(),
        })
    }
}

/// Build a queue over the given inference mock and a recording re-encoder.
pub fn build_queue(
    log: &CallLog,
    inference: MockInference,
    config: QueueConfig,
) -> ConversionQueue {
    let dispatcher = Dispatcher::new(
        Arc::new(MockReencoder::new(log.clone())),
        Arc::new(inference),
    );
    ConversionQueue::new(dispatcher, config)
}

/// Queue with default config and a non-failing, non-blocking inference mock.
pub fn default_queue(log: &CallLog) -> ConversionQueue {
    build_queue(log, MockInference::new(log.clone()), QueueConfig::default())
}

pub fn text_file(name: &str, content: &str) -> FilePayload {
    FilePayload::new(name, "text/plain", content.as_bytes().to_vec())
}

pub fn image_file(name: &str) -> FilePayload {
    FilePayload::new(name, "image/jpeg", b"\xff\xd8\xff fake jpeg".to_vec())
}

pub fn audio_file(name: &str) -> FilePayload {
    FilePayload::new(name, "audio/mpeg", b"ID3 fake mp3".to_vec())
}

pub fn pdf_file(name: &str) -> FilePayload {
    FilePayload::new(name, "application/pdf", b"%PDF-1.4 fake".to_vec())
}

pub fn archive_file(name: &str) -> FilePayload {
    FilePayload::new(name, "application/zip", b"PK fake zip".to_vec())
}
