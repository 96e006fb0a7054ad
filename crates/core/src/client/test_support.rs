//! Scripted transport for client tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use sheerid_domain::{ApiRequest, ClientConfig, Result, SheerIdError};

use super::ports::Transport;
use super::service::SheerId;

/// Records every request and answers from a queue (empty body when drained).
#[derive(Default)]
pub struct RecordingTransport {
    pub requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<Vec<u8>>>>,
}

impl RecordingTransport {
    pub fn respond(&self, body: &str) -> &Self {
        self.responses.lock().unwrap().push_back(Ok(body.as_bytes().to_vec()));
        self
    }

    pub fn fail(&self, status: u16) -> &Self {
        self.responses
            .lock()
            .unwrap()
            .push_back(Err(SheerIdError::HttpStatus { status, body: "failed".into() }));
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: ApiRequest) -> Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request);
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| Ok(Vec::new()))
    }
}

pub fn client() -> (SheerId, Arc<RecordingTransport>) {
    let transport = Arc::new(RecordingTransport::default());
    let config = ClientConfig::new("token").with_base_url("https://api.test");
    (SheerId::new(config, transport.clone()), transport)
}
