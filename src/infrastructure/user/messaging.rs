//! Outgoing user messages
//!
//! There is no real transport: the default sender only records the recipient
//! in the log.

use std::fmt::Debug;

use tracing::info;

#[cfg(test)]
use mockall::automock;

/// Sends a message to a single recipient
#[cfg_attr(test, automock)]
pub trait MessageSender: Send + Sync + Debug {
    fn send(&self, email: &str);
}

/// Sender that logs each recipient and delivers nothing
#[derive(Debug, Clone, Default)]
pub struct LogMessageSender;

impl LogMessageSender {
    pub fn new() -> Self {
        Self
    }
}

impl MessageSender for LogMessageSender {
    fn send(&self, email: &str) {
        info!(email = %email, "Sending message to email");
    }
}
