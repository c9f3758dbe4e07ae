//! テスト用: 台本通りの応答を返し、受け取った要求を記録する StructuredGeneration

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::ports::outbound::{GenerationRequest, StructuredGeneration};
use common::error::Error;

pub struct ScriptedGeneration {
    replies: Mutex<VecDeque<Result<String, Error>>>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedGeneration {
    pub fn new(replies: Vec<Result<String, Error>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 受け取った要求（呼び出し順）
    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl StructuredGeneration for ScriptedGeneration {
    fn generate(&self, request: &GenerationRequest) -> Result<String, Error> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(Error::system("ScriptedGeneration: no scripted reply left")))
    }
}
