use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, RecvTimeoutError, Sender, unbounded};
use tracing::{debug, warn};

use crate::tools::InputMode;

use super::preview::{Preview, decode_preview};
use super::{FileBlob, ImageProbe, ImageSource, Result, SourceError, validate_image_url};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceState {
    Empty,
    Pending { generation: u64, mode: InputMode },
    Ready { source: ImageSource, preview: Preview },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolverNotice {
    Ready { generation: u64, mode: InputMode },
    Rejected { generation: u64, message: String },
}

struct Completion {
    generation: u64,
    outcome: Result<(ImageSource, Preview)>,
}

pub struct InputResolver {
    state: SourceState,
    generation: u64,
    probe: Arc<dyn ImageProbe>,
    sender: Sender<Completion>,
    receiver: Receiver<Completion>,
}

impl std::fmt::Debug for InputResolver {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("InputResolver")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish()
    }
}

impl InputResolver {
    pub fn new(probe: Arc<dyn ImageProbe>) -> Self {
        let (sender, receiver) = unbounded();
        Self {
            state: SourceState::Empty,
            generation: 0,
            probe,
            sender,
            receiver,
        }
    }

    pub fn state(&self) -> &SourceState {
        &self.state
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn queued(&self) -> usize {
        self.receiver.len()
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SourceState::Pending { .. })
    }

    pub fn current(&self) -> Option<&ImageSource> {
        match &self.state {
            SourceState::Ready { source, .. } => Some(source),
            _ => None,
        }
    }

    pub fn preview(&self) -> Option<&Preview> {
        match &self.state {
            SourceState::Ready { preview, .. } => Some(preview),
            _ => None,
        }
    }

    pub fn select_file(&mut self, blob: FileBlob) -> u64 {
        let generation = self.begin(InputMode::File);
        debug!(generation, name = blob.name(), bytes = blob.len(), "file selected");
        let sender = self.sender.clone();
        rayon::spawn(move || {
            let outcome = decode_preview(&blob).map(|preview| (ImageSource::File(blob), preview));
            let _ = sender.send(Completion {
                generation,
                outcome,
            });
        });
        generation
    }

    pub fn select_url(&mut self, raw: &str) -> Result<u64> {
        let url = match validate_image_url(raw) {
            Ok(url) => url,
            Err(error) => {
                self.reset();
                return Err(error);
            }
        };
        let generation = self.begin(InputMode::Url);
        debug!(generation, %url, "url selected");
        let sender = self.sender.clone();
        let probe = Arc::clone(&self.probe);
        let spawned = thread::Builder::new()
            .name(format!("image-probe-{generation}"))
            .spawn(move || {
                let outcome = probe.probe(&url).map(|info| {
                    let preview = Preview::Remote {
                        url: url.clone(),
                        info,
                    };
                    (ImageSource::Url(url), preview)
                });
                let _ = sender.send(Completion {
                    generation,
                    outcome,
                });
            });
        if let Err(error) = spawned {
            self.reset();
            return Err(error.into());
        }
        Ok(generation)
    }

    pub fn clear(&mut self) {
        self.reset();
    }

    pub fn poll(&mut self) -> Vec<ResolverNotice> {
        let arrived = self.receiver.try_iter().collect::<Vec<_>>();
        arrived
            .into_iter()
            .filter_map(|completion| self.apply(completion))
            .collect()
    }

    pub fn wait(&mut self) -> Option<ResolverNotice> {
        while self.is_pending() {
            let completion = self.receiver.recv().ok()?;
            if let Some(notice) = self.apply(completion) {
                return Some(notice);
            }
        }
        None
    }

    pub fn wait_timeout(&mut self, timeout: Duration) -> Option<ResolverNotice> {
        let deadline = Instant::now() + timeout;
        while self.is_pending() {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.receiver.recv_timeout(remaining) {
                Ok(completion) => {
                    if let Some(notice) = self.apply(completion) {
                        return Some(notice);
                    }
                }
                Err(RecvTimeoutError::Timeout | RecvTimeoutError::Disconnected) => return None,
            }
        }
        None
    }

    pub fn settle(&mut self) -> Result<ImageSource> {
        if let Some(ResolverNotice::Rejected { message, .. }) = self.wait() {
            return Err(SourceError::Rejected(message));
        }
        self.current()
            .cloned()
            .ok_or_else(|| SourceError::Rejected("no image selected".to_string()))
    }

    fn begin(&mut self, mode: InputMode) -> u64 {
        self.generation += 1;
        self.state = SourceState::Pending {
            generation: self.generation,
            mode,
        };
        self.generation
    }

    fn reset(&mut self) {
        self.generation += 1;
        self.state = SourceState::Empty;
    }

    fn apply(&mut self, completion: Completion) -> Option<ResolverNotice> {
        if completion.generation != self.generation {
            debug!(
                stale = completion.generation,
                current = self.generation,
                "discarding superseded source result"
            );
            return None;
        }
        let generation = completion.generation;
        match completion.outcome {
            Ok((source, preview)) => {
                let mode = source.mode();
                self.state = SourceState::Ready { source, preview };
                Some(ResolverNotice::Ready { generation, mode })
            }
            Err(error) => {
                warn!(generation, %error, "source rejected");
                self.state = SourceState::Empty;
                Some(ResolverNotice::Rejected {
                    generation,
                    message: error.to_string(),
                })
            }
        }
    }
}
