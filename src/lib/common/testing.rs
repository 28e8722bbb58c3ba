use crate::common::{
    Announcement, Directory, DispatchGateway, FcmMessage, MulticastResponse, NotifyError,
};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayCall {
    One,
    Topic,
    Multicast,
}

/// Records every message and fails the calls it is told to fail.
#[derive(Default)]
pub struct MockGateway {
    pub sent: Mutex<Vec<(GatewayCall, FcmMessage)>>,
    pub fail_all: bool,
    // zero-based multicast call numbers that fail
    pub fail_multicast_calls: HashSet<usize>,
    // tokens reported as undeliverable inside a multicast
    pub rejected_tokens: HashSet<String>,
}

impl MockGateway {
    pub fn failing() -> Self {
        MockGateway {
            fail_all: true,
            ..Default::default()
        }
    }

    pub fn sent(&self) -> Vec<FcmMessage> {
        self.sent.lock().unwrap().iter().map(|(_, m)| m.clone()).collect()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.sent.lock().unwrap().iter().map(|(c, _)| *c).collect()
    }

    // returns the zero-based number of this call among calls of the same kind
    fn record(&self, call: GatewayCall, message: &FcmMessage) -> usize {
        let mut sent = self.sent.lock().unwrap();
        let n = sent.iter().filter(|(c, _)| *c == call).count();
        sent.push((call, message.clone()));
        n
    }

    fn single(&self, call: GatewayCall, message: &FcmMessage) -> Result<String, NotifyError> {
        self.record(call, message);
        if self.fail_all {
            return Err(NotifyError::Dispatch("unavailable".into()));
        }
        Ok("projects/test/messages/1".into())
    }
}

#[async_trait]
impl DispatchGateway for MockGateway {
    async fn send_to_one(&self, message: &FcmMessage) -> Result<String, NotifyError> {
        self.single(GatewayCall::One, message)
    }

    async fn send_to_topic(&self, message: &FcmMessage) -> Result<String, NotifyError> {
        self.single(GatewayCall::Topic, message)
    }

    async fn send_multicast(
        &self,
        message: &FcmMessage,
    ) -> Result<MulticastResponse, NotifyError> {
        let call = self.record(GatewayCall::Multicast, message);
        if self.fail_all || self.fail_multicast_calls.contains(&call) {
            return Err(NotifyError::Dispatch("quota exceeded".into()));
        }
        let tokens = message.tokens.clone().unwrap_or_default();
        let failure_count = tokens
            .iter()
            .filter(|t| self.rejected_tokens.contains(*t))
            .count();
        Ok(MulticastResponse {
            success_count: tokens.len() - failure_count,
            failure_count,
        })
    }
}

#[derive(Default)]
pub struct MockDirectory {
    pub tokens: Vec<String>,
    pub announcements: HashMap<String, Announcement>,
    pub broken: bool,
}

#[async_trait]
impl Directory for MockDirectory {
    async fn list_device_tokens(&self) -> Result<Vec<String>, NotifyError> {
        if self.broken {
            return Err(NotifyError::Store("deadline exceeded".into()));
        }
        Ok(self.tokens.clone())
    }

    async fn get_announcement(&self, id: &str) -> Result<Option<Announcement>, NotifyError> {
        if self.broken {
            return Err(NotifyError::Store("deadline exceeded".into()));
        }
        Ok(self.announcements.get(id).cloned())
    }
}
