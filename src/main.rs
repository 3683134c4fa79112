use std::io::{stderr, stdout, BufWriter, Write};
use std::process::exit;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{anyhow, bail, Result};
use tracing::{info, warn};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, Layer};

use biometric_payment_engine::actors::{RecorderActor, RecorderHandle};
use biometric_payment_engine::client::BiometricClient;
use biometric_payment_engine::config::EngineConfig;
use biometric_payment_engine::engine::{Checkout, FlowOutcome, FlowStage, PaymentFlow, PaymentForm, PaymentIntent};
use biometric_payment_engine::models::{replay_balance, Role};
use biometric_payment_engine::scanner::{RandomDecider, ScanDecider, ScanKind, ScanSimulator};
use biometric_payment_engine::session::{LoginForm, RegistrationForm, SessionManager};
use biometric_payment_engine::storage::{write_transactions, SessionStorage, TokenStore};

const DEMO_MOBILE: &str = "9876543210";

struct App {
    config: EngineConfig,
    session: SessionManager<SessionStorage>,
    recorder: RecorderHandle,
    scanner: Arc<ScanSimulator<RandomDecider>>,
    client: Arc<BiometricClient>
}

#[tokio::main]
async fn main() -> Result<()> {
    //NOTE: Positional arguments are few enough that clap would be overkill here.
    let args: Vec<String> = std::env::args().skip(1).collect();

    let Some(position) = args.first().and_then(|command| log_level_position(command)) else {
        if let Some(command) = args.first() {
            eprintln!("Unknown command '{command}'");
        }
        print_usage();
        exit(1);
    };

    let log_level = args.get(position)
        .map(|s| parse_log_level(s)).unwrap_or_else(|| LevelFilter::ERROR);

    setup_logging(log_level);
    dotenv::dotenv().ok();

    let config = EngineConfig::from_env()?;
    let app = App::new(config);

    let timer = Instant::now();

    match args[0].as_str() {
        "pay" => {
            let amount = args.get(1).ok_or_else(|| anyhow!("pay needs an amount"))?;
            let merchant = args.get(2).map(String::as_str).unwrap_or("Merchant");
            app.pay(amount, merchant).await?;
        },
        "request" => {
            let amount = args.get(1).ok_or_else(|| anyhow!("request needs an amount"))?;
            app.request(amount, args.get(2).map(String::as_str)).await?;
        },
        "scan" => {
            let kind = match args.get(1).map(String::as_str) {
                Some("fingerprint") | None => ScanKind::Fingerprint,
                Some("palm-vein") => ScanKind::PalmVein,
                Some(other) => bail!("Unknown scan type '{other}', expected fingerprint or palm-vein")
            };
            app.checkout(kind, args.get(2).map(String::as_str), args.get(3).map(String::as_str)).await?;
        },
        "health" => {
            return app.health().await;
        },
        other => bail!("Unknown command '{other}'")
    }

    info!("Completed in: {:?}", timer.elapsed());

    app.write_results_to_stdout().await?;
    app.session.logout().await;

    Ok(())
}

/// Where the optional log level sits for each command, after its own arguments.
fn log_level_position(command: &str) -> Option<usize> {
    match command {
        "health" => Some(1),
        "pay" | "request" => Some(3),
        "scan" => Some(4),
        _ => None
    }
}

impl App {
    fn new(config: EngineConfig) -> Self {
        let storage = Arc::new(SessionStorage::new());
        let client = Arc::new(BiometricClient::new(config.backend_url.clone(), config.auth_delay));
        let session = SessionManager::new(storage.clone(), TokenStore::new(config.token_ttl), client.clone(), config.initial_balance);

        Self {
            recorder: RecorderActor::spawn(storage),
            scanner: Arc::new(ScanSimulator::new(config.decider(), config.scan_timing)),
            session,
            client,
            config
        }
    }

    /// Customer pays a merchant, authorized by the biometric backend.
    async fn pay(&self, amount: &str, merchant: &str) -> Result<()> {
        self.session.register(&RegistrationForm {
            name: "Demo User".to_string(),
            email: "demo@example.com".to_string(),
            mobile: DEMO_MOBILE.to_string(),
            role: Role::Customer,
            fingerprint: true
        }).await?;

        let mut flow = self.flow(Role::Customer);
        let form = PaymentForm::new(amount).with_counterparty(merchant);
        let stage = flow.submit(&form).await?.clone();

        report(&mut flow, &stage);

        Ok(())
    }

    /// Merchant requests a payment and the customer confirms with a scan.
    async fn request(&self, amount: &str, description: Option<&str>) -> Result<()> {
        self.session.login(&LoginForm { mobile: DEMO_MOBILE.to_string(), fingerprint: true }).await?;

        let mut flow = self.flow(Role::Merchant);
        let mut form = PaymentForm::new(amount);
        if let Some(description) = description {
            form = form.with_description(description);
        }

        flow.submit(&form).await?;
        let stage = flow.await_scan().await?.clone();

        report(&mut flow, &stage);

        Ok(())
    }

    /// Scan-to-pay checkout, falling back to a demo purchase for missing values.
    async fn checkout(&self, kind: ScanKind, amount: Option<&str>, merchant: Option<&str>) -> Result<()> {
        self.session.login(&LoginForm { mobile: DEMO_MOBILE.to_string(), fingerprint: true }).await?;

        let intent = PaymentIntent::from_query(amount, merchant)?;
        info!("Checkout [{}]: {} to [{}] via {}", intent.id, self.config.format_amount(intent.amount.value()), intent.merchant, intent.bank);

        let checkout = Checkout::new(self.recorder.clone(), self.scanner.clone(), self.config.redirect_delay);
        let outcome = checkout.pay(intent, kind).await?;

        match outcome.notification() {
            notification if notification.is_error() => warn!("{notification:?}"),
            notification => info!("{notification:?}")
        }

        Ok(())
    }

    async fn health(&self) -> Result<()> {
        match self.client.endpoint() {
            None => println!("simulated"),
            Some(endpoint) if self.client.check_health().await => println!("healthy {endpoint}"),
            Some(endpoint) => bail!("Biometric backend at {endpoint} is unreachable")
        }

        Ok(())
    }

    fn flow(&self, role: Role) -> PaymentFlow<RandomDecider> {
        PaymentFlow::new(role, self.recorder.clone(), self.scanner.clone(), self.client.clone(), self.config.redirect_delay)
    }

    async fn write_results_to_stdout(&self) -> Result<()> {
        let records = self.recorder.history().await?;
        let summary = self.recorder.summary().await?;

        if replay_balance(self.config.initial_balance, &records) != Some(summary.balance) {
            warn!("Balance {} does not match the recorded transactions", self.config.format_amount(summary.balance));
        }

        info!(
            "Balance {} (in {}, out {})",
            self.config.format_amount(summary.balance),
            self.config.format_amount(summary.incoming_total),
            self.config.format_amount(summary.outgoing_total)
        );

        let mut output = BufWriter::new(stdout().lock());
        write_transactions(&mut output, &records)?;
        output.flush()?;

        Ok(())
    }
}

fn report<D: ScanDecider>(flow: &mut PaymentFlow<D>, stage: &FlowStage) {
    for notification in flow.take_notifications() {
        if notification.is_error() {
            warn!("{notification:?}");
        } else {
            info!("{notification:?}");
        }
    }

    match stage {
        FlowStage::Complete(FlowOutcome::Approved(record)) => info!("{:?} payment [{}] approved", flow.role(), record.id),
        FlowStage::Complete(FlowOutcome::Declined) => warn!("Payment declined"),
        FlowStage::Complete(FlowOutcome::StorageFailure) => warn!("Payment authorized but not recorded"),
        other => warn!("Payment flow stopped at {}", other.name())
    }

    if let Some(redirect) = flow.redirect() {
        info!("Redirecting to {} in {:?}", redirect.route.path(), redirect.after);
    }
}

fn print_usage() {
    eprintln!("Usage: biometric-payment-engine <command> [args...] [log_level:optional] > [output].csv");
    eprintln!("Commands:");
    eprintln!("  pay <amount> <merchant> [log_level]                          customer payment");
    eprintln!("  request <amount> <description> [log_level]                   merchant payment request");
    eprintln!("  scan <fingerprint|palm-vein> <amount> <merchant> [log_level] scan-to-pay checkout");
    eprintln!("  health [log_level]                                           check the biometric backend");
    eprintln!("The log level is only read after all of a command's arguments.");
    eprintln!("Available log levels: error, warn, info, debug, trace (default: error)");
}

fn parse_log_level(level: &str) -> LevelFilter {
    match level.to_lowercase().as_str() {
        "trace" => LevelFilter::TRACE,
        "debug" => LevelFilter::DEBUG,
        "info" => LevelFilter::INFO,
        "warn" => LevelFilter::WARN,
        "error" => LevelFilter::ERROR,
        _ => {
            eprintln!("Invalid log level '{}', defaulting to 'error'", level);
            LevelFilter::ERROR
        }
    }
}

fn setup_logging(level: LevelFilter) {
    //NOTE: Transactions go to stdout, so logging has to use stderr
    let terminal_log = fmt::layer()
        .with_target(false)
        .with_writer(stderr)
        .with_filter(level);

    tracing_subscriber::registry()
        .with(terminal_log)
        .init();
}
