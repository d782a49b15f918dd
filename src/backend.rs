//! The browser-automation capability interface and a recording stub.
//!
//! The interpreter core never touches a real browser; it sequences calls
//! against this trait. A production backend wraps an actual driver, while
//! [`RecordingBrowser`] captures the call stream for tests and dry runs.

use crate::error::BackendError;
use ahash::AHashMap;

/// The capability interface the executor requires of its automation
/// collaborator. One implementation instance corresponds to one active
/// browser/page session for the duration of a run.
pub trait Browser {
    fn navigate_to(&mut self, url: &str) -> Result<(), BackendError>;

    fn fill_field(&mut self, selector: &str, value: &str) -> Result<(), BackendError>;

    fn click_element(&mut self, selector: &str) -> Result<(), BackendError>;

    fn send_file(&mut self, selector: &str, file_path: &str) -> Result<(), BackendError>;

    /// Releases the underlying session. Must be idempotent; the executor
    /// calls it exactly once at run end, whether the run succeeded or not.
    fn close(&mut self) -> Result<(), BackendError>;
}

/// One recorded backend call, in execution order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowserAction {
    Navigate { url: String },
    Fill { selector: String, value: String },
    Click { selector: String },
    Upload { selector: String, file_path: String },
}

/// A `Browser` that records every call instead of driving a real page.
///
/// Individual operations (`navigate`, `fillField`, `clickElement`,
/// `sendFile`, `close`) can be scripted to fail, which lets tests observe
/// abort behavior at any point of a workflow.
#[derive(Debug, Default)]
pub struct RecordingBrowser {
    actions: Vec<BrowserAction>,
    failures: AHashMap<String, String>,
    close_count: u32,
}

impl RecordingBrowser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scripts the named operation to fail with the given message.
    pub fn fail_on(&mut self, operation: &str, message: &str) {
        self.failures
            .insert(operation.to_string(), message.to_string());
    }

    pub fn actions(&self) -> &[BrowserAction] {
        &self.actions
    }

    pub fn is_closed(&self) -> bool {
        self.close_count > 0
    }

    pub fn close_count(&self) -> u32 {
        self.close_count
    }

    pub fn last_navigation(&self) -> Option<&str> {
        self.actions.iter().rev().find_map(|action| match action {
            BrowserAction::Navigate { url } => Some(url.as_str()),
            _ => None,
        })
    }

    /// The most recent value filled into the given selector, if any.
    pub fn field_value(&self, selector: &str) -> Option<&str> {
        self.actions.iter().rev().find_map(|action| match action {
            BrowserAction::Fill { selector: s, value } if s == selector => Some(value.as_str()),
            _ => None,
        })
    }

    pub fn clicked(&self, selector: &str) -> bool {
        self.actions
            .iter()
            .any(|action| matches!(action, BrowserAction::Click { selector: s } if s == selector))
    }

    pub fn uploaded_file(&self, selector: &str) -> Option<&str> {
        self.actions.iter().rev().find_map(|action| match action {
            BrowserAction::Upload {
                selector: s,
                file_path,
            } if s == selector => Some(file_path.as_str()),
            _ => None,
        })
    }

    fn check(&self, operation: &str) -> Result<(), BackendError> {
        match self.failures.get(operation) {
            Some(message) => Err(BackendError::new(message.clone())),
            None => Ok(()),
        }
    }
}

impl Browser for RecordingBrowser {
    fn navigate_to(&mut self, url: &str) -> Result<(), BackendError> {
        self.check("navigate")?;
        self.actions.push(BrowserAction::Navigate {
            url: url.to_string(),
        });
        Ok(())
    }

    fn fill_field(&mut self, selector: &str, value: &str) -> Result<(), BackendError> {
        self.check("fillField")?;
        self.actions.push(BrowserAction::Fill {
            selector: selector.to_string(),
            value: value.to_string(),
        });
        Ok(())
    }

    fn click_element(&mut self, selector: &str) -> Result<(), BackendError> {
        self.check("clickElement")?;
        self.actions.push(BrowserAction::Click {
            selector: selector.to_string(),
        });
        Ok(())
    }

    fn send_file(&mut self, selector: &str, file_path: &str) -> Result<(), BackendError> {
        self.check("sendFile")?;
        self.actions.push(BrowserAction::Upload {
            selector: selector.to_string(),
            file_path: file_path.to_string(),
        });
        Ok(())
    }

    fn close(&mut self) -> Result<(), BackendError> {
        self.check("close")?;
        self.close_count += 1;
        Ok(())
    }
}
