pub mod kiosk;

pub use crate::domain::model::{Service, TicketReceipt, TicketRequest};
pub use crate::domain::ports::{ConfigProvider, Notice, NoticeKind, Prompter, TicketBackend};
pub use crate::utils::error::Result;
