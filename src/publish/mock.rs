use std::sync::Mutex;

use crate::error::{Result, ShipitError};
use crate::publish::ReleasePublisher;

/// A release recorded by [MockPublisher]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedRelease {
    pub tag: String,
    pub title: String,
    pub body: String,
}

/// Publisher for tests: records releases, or fails with a given status
#[derive(Default)]
pub struct MockPublisher {
    failure_status: Option<u16>,
    published: Mutex<Vec<PublishedRelease>>,
}

impl MockPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// A publisher whose every call is answered with `status`
    pub fn failing(status: u16) -> Self {
        MockPublisher {
            failure_status: Some(status),
            published: Mutex::default(),
        }
    }

    pub fn published(&self) -> Vec<PublishedRelease> {
        self.published
            .lock()
            .map(|published| published.clone())
            .unwrap_or_default()
    }
}

impl ReleasePublisher for MockPublisher {
    fn publish_release(&self, tag: &str, title: &str, body: &str) -> Result<String> {
        if let Some(status) = self.failure_status {
            return Err(ShipitError::remote_release(
                Some(status),
                "mock publisher rejected the release",
            ));
        }

        let mut published = self
            .published
            .lock()
            .map_err(|_| ShipitError::remote_release(None, "mock publisher poisoned"))?;
        published.push(PublishedRelease {
            tag: tag.to_string(),
            title: title.to_string(),
            body: body.to_string(),
        });

        Ok(format!("https://example.invalid/releases/tag/{}", tag))
    }
}
