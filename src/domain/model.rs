use crate::domain::registrant::Registrant;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A queue the kiosk can issue tickets for, as listed by `GET /api/services`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    pub id_service: i64,
    pub name: String,
}

/// Body of `POST /api/ticket-registration`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dpi: Option<String>,
    pub name: String,
    pub id_service: i64,
    pub location_id: String,
}

impl TicketRequest {
    pub fn new(registrant: &Registrant, id_service: i64, location_id: &str) -> Self {
        Self {
            dpi: registrant.dpi.as_ref().map(|d| d.as_str().to_string()),
            name: registrant.name.clone(),
            id_service,
            location_id: location_id.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Cashier {
    pub name: String,
}

/// Registration response. The backend has answered with both the raw ticket
/// fields and the already-formatted `turno`/`ventanilla` pair, so every field
/// is optional here and [`RegistrationResponse::into_receipt`] reconciles them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResponse {
    pub correlativo: Option<String>,
    pub prefix: Option<String>,
    pub turn_number: Option<i64>,
    pub cashier: Option<Cashier>,
    pub turno: Option<String>,
    pub ventanilla: Option<String>,
}

impl RegistrationResponse {
    /// Returns `None` when the response carries no ticket identifier at all.
    pub fn into_receipt(self) -> Option<TicketReceipt> {
        let turno = non_empty(self.turno)
            .or_else(|| non_empty(self.correlativo))
            .or_else(|| {
                self.turn_number
                    .map(|n| format!("{}{:03}", self.prefix.as_deref().unwrap_or(""), n))
            })?;

        let ventanilla =
            non_empty(self.ventanilla).or_else(|| non_empty(self.cashier.map(|c| c.name)));

        Some(TicketReceipt {
            turno,
            ventanilla,
            issued_at: Local::now(),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// What the result screen shows: the ticket and, when already assigned, the counter.
#[derive(Debug, Clone, Serialize)]
pub struct TicketReceipt {
    pub turno: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ventanilla: Option<String>,
    pub issued_at: DateTime<Local>,
}
