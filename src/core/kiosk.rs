use crate::core::{Notice, Prompter, Result, TicketBackend, TicketReceipt, TicketRequest};
use crate::domain::registrant::Registrant;

pub const DEFAULT_LOCATION_ID: &str = "sucursal-central-01";
pub const DEFAULT_WELCOME: &str = "Welcome! Take a ticket and we will call you shortly.";

const SERVICES_FAILED: &str = "Could not load services";
const REGISTRATION_FAILED: &str = "Could not register the ticket";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationMode {
    WithDpi,
    WithoutDpi,
}

/// How a single kiosk session ended.
#[derive(Debug, Clone)]
pub enum SessionOutcome {
    Issued(TicketReceipt),
    /// The user backed out before a ticket was requested.
    Abandoned,
    /// The backend could not be reached or refused the request.
    Failed,
    Exit,
}

/// Drives the kiosk screens: home, identity capture, service choice and the
/// ticket result. One request is in flight at a time.
pub struct KioskEngine<B: TicketBackend> {
    backend: B,
    location_id: String,
    welcome: String,
}

impl<B: TicketBackend> KioskEngine<B> {
    pub fn new(backend: B, location_id: impl Into<String>) -> Self {
        Self {
            backend,
            location_id: location_id.into(),
            welcome: DEFAULT_WELCOME.to_string(),
        }
    }

    pub fn with_welcome(mut self, welcome: impl Into<String>) -> Self {
        self.welcome = welcome.into();
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Runs sessions until the user exits, or a single one when `once` is set.
    /// Returns the number of tickets issued.
    pub async fn run<P: Prompter>(&self, prompter: &mut P, once: bool) -> Result<usize> {
        tracing::info!("🚀 Kiosk started at location {}", self.location_id);
        prompter.notice(Notice::info(self.welcome.clone()))?;

        let mut issued = 0;
        loop {
            match self.run_session(prompter).await? {
                SessionOutcome::Exit => break,
                SessionOutcome::Issued(_) => issued += 1,
                SessionOutcome::Abandoned | SessionOutcome::Failed => {}
            }
            if once {
                break;
            }
        }

        tracing::info!("Kiosk stopped after issuing {} tickets", issued);
        Ok(issued)
    }

    pub async fn run_session<P: Prompter>(&self, prompter: &mut P) -> Result<SessionOutcome> {
        let mode = match choose_mode(prompter)? {
            Some(mode) => mode,
            None => return Ok(SessionOutcome::Exit),
        };
        tracing::debug!("Session started: {:?}", mode);

        let registrant = match capture_identity(prompter, mode)? {
            Some(registrant) => registrant,
            None => return Ok(SessionOutcome::Abandoned),
        };

        let services = match self.backend.services().await {
            Ok(services) => services,
            Err(e) => {
                tracing::error!("❌ Failed to load services: {}", e);
                prompter.notice(Notice::error("Error", SERVICES_FAILED))?;
                return Ok(SessionOutcome::Failed);
            }
        };

        if services.is_empty() {
            tracing::warn!("Backend returned an empty service list");
            prompter.notice(Notice::info("No services are available right now"))?;
            return Ok(SessionOutcome::Failed);
        }

        let names: Vec<String> = services.iter().map(|s| s.name.clone()).collect();
        let service = match prompter.select("Select a service", &names)? {
            Some(index) if index < services.len() => &services[index],
            _ => return Ok(SessionOutcome::Abandoned),
        };

        let request =
            TicketRequest::new(&registrant, service.id_service, &self.location_id);
        match self.backend.register(&request).await {
            Ok(receipt) => {
                tracing::info!(
                    "✅ Issued ticket {} for service {}",
                    receipt.turno,
                    service.id_service
                );
                prompter.notice(Notice::success(
                    format!("Your ticket is {}", receipt.turno),
                    receipt
                        .ventanilla
                        .as_ref()
                        .map(|v| format!("Please go to counter {}", v)),
                ))?;
                Ok(SessionOutcome::Issued(receipt))
            }
            Err(e) => {
                tracing::error!("❌ Failed to register ticket: {}", e);
                prompter.notice(Notice::error("Error", REGISTRATION_FAILED))?;
                Ok(SessionOutcome::Failed)
            }
        }
    }
}

fn choose_mode<P: Prompter>(prompter: &mut P) -> Result<Option<RegistrationMode>> {
    let options = vec![
        "Register with DPI".to_string(),
        "Register without DPI".to_string(),
        "Exit".to_string(),
    ];
    Ok(match prompter.select("How would you like to register?", &options)? {
        Some(0) => Some(RegistrationMode::WithDpi),
        Some(1) => Some(RegistrationMode::WithoutDpi),
        _ => None,
    })
}

/// Asks until the form is valid; `None` when the user backs out.
fn capture_identity<P: Prompter>(
    prompter: &mut P,
    mode: RegistrationMode,
) -> Result<Option<Registrant>> {
    loop {
        let raw_dpi = match mode {
            RegistrationMode::WithDpi => {
                let Some(raw) = prompter.text("DPI", "1234567890123")? else {
                    return Ok(None);
                };
                Some(raw)
            }
            RegistrationMode::WithoutDpi => None,
        };

        let Some(first) = prompter.text("First name", "")? else {
            return Ok(None);
        };
        let Some(last) = prompter.text("Last name", "")? else {
            return Ok(None);
        };

        let result = match &raw_dpi {
            Some(raw) => Registrant::with_dpi(raw, &first, &last),
            None => Registrant::without_dpi(&first, &last),
        };

        match result {
            Ok(registrant) => return Ok(Some(registrant)),
            Err(e) => {
                tracing::debug!("Registration form rejected: {}", e);
                prompter.notice(Notice::error(e.title(), e.to_string()))?;
            }
        }
    }
}
