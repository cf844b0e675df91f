use std::pin::Pin;
use std::time::Duration;
use tokio::time::{Sleep, sleep};

/// One-shot timer that can be armed, re-armed and disarmed
///
/// [`Deadline::expired`] completes once per arming and is pending while
/// disarmed. Awaiting it inside `select!` is cancel-safe.
#[derive(Default)]
pub struct Deadline {
    sleep: Option<Pin<Box<Sleep>>>,
}

impl Deadline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fire after `duration`, replacing any earlier arming
    pub fn arm(&mut self, duration: Duration) {
        self.sleep = Some(Box::pin(sleep(duration)));
    }

    pub fn disarm(&mut self) {
        self.sleep = None;
    }

    pub fn is_armed(&self) -> bool {
        self.sleep.is_some()
    }

    /// Wait until the armed deadline passes, then disarm
    pub async fn expired(&mut self) {
        match self.sleep.as_mut() {
            Some(sleep) => {
                sleep.as_mut().await;
                self.sleep = None;
            }
            None => std::future::pending().await,
        }
    }
}
