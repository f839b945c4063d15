//! Scripted `LlmBackend` for tests: replies are handed out in call order and
//! can be held back until the test releases them.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::oneshot;

use super::{LlmBackend, LlmError, ModelRequest};

struct Scripted {
    reply: Result<String, LlmError>,
    gate: Option<oneshot::Receiver<()>>,
}

#[derive(Default)]
pub struct ScriptedBackend {
    replies: Mutex<VecDeque<Scripted>>,
    requests: Mutex<Vec<ModelRequest>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_text(self, text: impl Into<String>) -> Self {
        self.push_text(text);
        self
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.push(Ok(text.into()), None);
    }

    pub fn push_error(&self, error: LlmError) {
        self.push(Err(error), None);
    }

    /// Queues a reply that is only returned once the sender fires.
    pub fn push_gated(&self, text: impl Into<String>) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        self.push(Ok(text.into()), Some(rx));
        tx
    }

    pub fn requests(&self) -> Vec<ModelRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn push(&self, reply: Result<String, LlmError>, gate: Option<oneshot::Receiver<()>>) {
        self.replies
            .lock()
            .unwrap()
            .push_back(Scripted { reply, gate });
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn generate(&self, request: &ModelRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self.replies.lock().unwrap().pop_front();
        let Some(Scripted { reply, gate }) = next else {
            return Err(LlmError::Api {
                status: 500,
                message: "no scripted reply left".to_string(),
            });
        };
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        reply
    }
}
