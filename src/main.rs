use anyhow::Context;
use clap::Parser;
use turno_kiosk::adapters::terminal::{is_interactive, TerminalPrompter};
use turno_kiosk::core::TicketBackend;
use turno_kiosk::domain::dpi;
use turno_kiosk::domain::model::TicketRequest;
use turno_kiosk::domain::registrant::Registrant;
use turno_kiosk::utils::{logger, validation::Validate};
use turno_kiosk::{CliConfig, Command, HttpTicketBackend, KioskEngine, KioskError, Settings, Verdict};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.log_json {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }
    tracing::debug!(
        "Config file: {:?}, base URL override: {:?}, location override: {:?}",
        cli.config,
        cli.base_url,
        cli.location_id
    );

    if let Command::Validate { dpi, json } = &cli.command {
        let all_valid = run_validate(dpi, *json)?;
        if !all_valid {
            std::process::exit(1);
        }
        return Ok(());
    }

    let settings = match Settings::resolve(&cli).and_then(|s| s.validate().map(|_| s)) {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!("❌ Configuration validation failed: {}", e);
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };
    tracing::info!(
        "Using backend {} (location {})",
        settings.base_url,
        settings.location_id
    );

    let backend = HttpTicketBackend::from_config(&settings)?;

    let result = match cli.command {
        Command::Validate { .. } => unreachable!("validate returns before the backend is set up"),
        Command::Services => list_services(&backend).await,
        Command::Register {
            service,
            first_name,
            last_name,
            dpi,
        } => {
            register_once(
                &backend,
                &settings,
                service,
                &first_name,
                &last_name,
                dpi.as_deref(),
            )
            .await
        }
        Command::Kiosk { once } => run_kiosk(backend, &settings, once).await,
    };

    if let Err(e) = result {
        tracing::error!("❌ {}", e);
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(if e.is_backend_failure() { 2 } else { 1 });
    }

    Ok(())
}

fn run_validate(values: &[String], json: bool) -> anyhow::Result<bool> {
    let mut all_valid = true;
    for raw in values {
        let result = dpi::validate(raw);
        all_valid &= result.is_ok();

        if json {
            let verdict = Verdict::from(&result);
            println!(
                "{}",
                serde_json::to_string(&serde_json::json!({ "input": raw, "verdict": verdict }))
                    .context("failed to encode verdict")?
            );
            continue;
        }

        match result {
            Ok(dpi) => println!(
                "✅ {} (department {}, municipality {})",
                dpi,
                dpi.department(),
                dpi.municipality()
            ),
            Err(rejection) => println!("❌ {}: {}", raw, rejection),
        }
    }
    Ok(all_valid)
}

async fn list_services(backend: &HttpTicketBackend) -> Result<(), KioskError> {
    let services = backend.services().await?;
    if services.is_empty() {
        println!("No services available");
    }
    for service in services {
        println!("{}\t{}", service.id_service, service.name);
    }
    Ok(())
}

async fn register_once(
    backend: &HttpTicketBackend,
    settings: &Settings,
    service: i64,
    first_name: &str,
    last_name: &str,
    dpi: Option<&str>,
) -> Result<(), KioskError> {
    let registrant = match dpi {
        Some(raw) => Registrant::with_dpi(raw, first_name, last_name)?,
        None => Registrant::without_dpi(first_name, last_name)?,
    };

    let request = TicketRequest::new(&registrant, service, &settings.location_id);
    let receipt = backend.register(&request).await?;

    println!("🎫 Ticket: {}", receipt.turno);
    if let Some(ventanilla) = &receipt.ventanilla {
        println!("🪟 Counter: {}", ventanilla);
    }
    println!("🕒 Issued at: {}", receipt.issued_at.format("%Y-%m-%d %H:%M:%S"));
    Ok(())
}

async fn run_kiosk(
    backend: HttpTicketBackend,
    settings: &Settings,
    once: bool,
) -> Result<(), KioskError> {
    if !is_interactive() {
        return Err(KioskError::ConfigError {
            message: "the kiosk needs an interactive terminal".to_string(),
        });
    }

    let mut engine = KioskEngine::new(backend, settings.location_id.clone());
    if let Some(welcome) = &settings.welcome_message {
        engine = engine.with_welcome(welcome.clone());
    }

    let mut prompter = TerminalPrompter::new();
    let issued = engine.run(&mut prompter, once).await?;
    println!("👋 {} tickets issued", issued);
    Ok(())
}
