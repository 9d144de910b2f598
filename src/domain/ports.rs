use crate::domain::model::{Service, TicketReceipt, TicketRequest};
use crate::utils::error::Result;
use async_trait::async_trait;

/// The remote ticket-issuing service.
#[async_trait]
pub trait TicketBackend: Send + Sync {
    async fn services(&self) -> Result<Vec<Service>>;
    async fn register(&self, request: &TicketRequest) -> Result<TicketReceipt>;
}

/// Everything the kiosk needs from whoever is standing in front of it.
///
/// `None` from an input or a selection means the user backed out.
pub trait Prompter {
    fn text(&mut self, label: &str, placeholder: &str) -> Result<Option<String>>;
    fn select(&mut self, label: &str, options: &[String]) -> Result<Option<usize>>;
    fn notice(&mut self, notice: Notice) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Error,
    Success,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub detail: Option<String>,
}

impl Notice {
    pub fn info(title: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            title: title.into(),
            detail: None,
        }
    }

    pub fn error(title: impl Into<String>, detail: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            detail: Some(detail.into()),
        }
    }

    pub fn success(title: impl Into<String>, detail: Option<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            detail,
        }
    }
}

/// Where kiosk settings come from; implemented by both the CLI and the TOML config.
pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn location_id(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
}
