use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use application::{ConnectionSettings, PrinterBridge};
use domain::format::{LcdOpt, PrintAlign, TextStyle};
use domain::{BridgeError, ErrorReply};
use infrastructure::config::BridgeConfig;
use infrastructure::{
    InProcessBinder, InProcessBroadcasts, JsonLinesPublisher, RecordingLauncher, SimulatedPrinter,
    probe_device,
};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to config directory
    #[arg(long, default_value = "config")]
    config_dir: String,

    /// Override the reconnect delay in milliseconds
    #[arg(long)]
    reconnect_delay_ms: Option<u64>,

    /// Override the probed OS API level
    #[arg(long)]
    sdk_int: Option<u32>,

    /// Override the probed SoC model
    #[arg(long)]
    soc_model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Query the printer status code
    Status,
    /// Report service and printer firmware versions
    Version,
    /// Feed paper by a number of pixels
    Feed { px: i32 },
    /// Print one line of text
    Text {
        text: String,
        #[arg(long)]
        size: Option<i32>,
        /// 0 left, 1 center, 2 right
        #[arg(long)]
        align: Option<i32>,
        #[arg(long)]
        underline: bool,
    },
    /// Print a QR code
    Qr {
        data: String,
        #[arg(long, default_value_t = 300)]
        size: i32,
        #[arg(long, default_value_t = 1)]
        align: i32,
    },
    /// Open the cash drawer
    CashBox,
    /// Control the customer display: 0 init, 1 wakeup, 2 sleep, 3 clear, 4 reset
    Lcd { op: i32 },
    /// Deliver a QSC scan broadcast and emit the resulting event
    Qsc { value: String },
}

fn init_tracing(fallback: &str) {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| fallback.to_string()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Prefer the workspace copy of the config when run from the project root.
fn resolve_config_dir(requested: &str) -> String {
    let dev_dir = "crates/printer-bridge/config";
    if !std::path::Path::new(requested).exists() && std::path::Path::new(dev_dir).exists() {
        dev_dir.to_string()
    } else {
        requested.to_string()
    }
}

async fn execute(bridge: &PrinterBridge, command: Command) -> Result<Value, BridgeError> {
    let printer = bridge.commands();
    match command {
        Command::Status => {
            let code = printer.printer_status().await?;
            Ok(json!({ "status": code, "message": domain::status::message(code) }))
        }
        Command::Version => {
            let service = printer.service_version().await?;
            let firmware = printer.printer_version().await?;
            Ok(json!({ "service": service, "printer": firmware }))
        }
        Command::Feed { px } => printer.paper_out(px).await.map(|_| Value::Null),
        Command::Text {
            text,
            size,
            align,
            underline,
        } => {
            let align = align
                .map(PrintAlign::try_from)
                .transpose()
                .map_err(|e| BridgeError::InvalidArgument(e.to_string()))?;
            let style = TextStyle {
                text_size: size,
                underline: underline.then_some(true),
                align,
                ..TextStyle::default()
            };
            printer
                .print_text(&text, Some(&style))
                .await
                .map(|_| Value::Null)
        }
        Command::Qr { data, size, align } => {
            let align = PrintAlign::try_from(align)
                .map_err(|e| BridgeError::InvalidArgument(e.to_string()))?;
            printer
                .print_qr_code(&data, size, size, align)
                .await
                .map(|_| Value::Null)
        }
        Command::CashBox => printer.open_cash_box().await.map(|_| Value::Null),
        Command::Lcd { op } => {
            let opt =
                LcdOpt::try_from(op).map_err(|e| BridgeError::InvalidArgument(e.to_string()))?;
            printer.config_lcd(opt).await.map(|_| Value::Null)
        }
        Command::Qsc { value } => {
            let relayed = bridge
                .relay()
                .on_broadcast(application::scan::QSC_ACTION, Some(value))
                .await;
            Ok(json!({ "relayed": relayed }))
        }
    }
}

/// Returns whether the command succeeded.
async fn run() -> Result<bool> {
    dotenv().ok();

    let args = Args::parse();

    let config_dir = resolve_config_dir(&args.config_dir);
    let mut config = BridgeConfig::load(&config_dir)
        .with_context(|| format!("loading configuration from {}", config_dir))?;

    if let Some(delay) = args.reconnect_delay_ms {
        config.reconnect_delay_ms = delay;
    }
    if let Some(sdk) = args.sdk_int {
        config.device.sdk_int = Some(sdk);
    }
    if let Some(soc) = args.soc_model {
        config.device.soc_model = Some(soc);
    }

    init_tracing(&config.log_filter);

    info!("🖨️ Nyx Printer Bridge Starting...");
    info!("📂 Config directory: {}", config_dir);

    let device = config.device.merge_into(probe_device());
    let identities = config.identity.table();
    let identity = identities.resolve(&device);
    info!(
        sdk_int = ?device.sdk_int,
        soc_model = ?device.soc_model,
        package = %identity.package,
        "✅ Resolved printer service identity"
    );

    let printer = Arc::new(SimulatedPrinter::new());
    let binder = Arc::new(InProcessBinder::new());
    binder.register(identity.package.clone(), printer);

    let bridge = PrinterBridge::new(
        binder,
        Arc::new(InProcessBroadcasts::new()),
        Arc::new(RecordingLauncher::default()),
        Arc::new(JsonLinesPublisher::new(std::io::stdout())),
        ConnectionSettings {
            identities,
            device,
            reconnect_delay: config.reconnect_delay(),
        },
    );

    bridge.initialize();
    if !bridge.connection().is_bound() {
        bridge.shutdown();
        bail!("printer service {} did not bind", identity.package);
    }

    let outcome = execute(&bridge, args.command).await;
    bridge.shutdown();

    match outcome {
        Ok(value) => {
            println!("{}", json!({ "code": 0, "result": value }));
            info!("👋 Good bye!");
            Ok(true)
        }
        Err(e) => {
            warn!(code = e.code(), "Command failed: {}", e);
            let reply: ErrorReply = e.into();
            println!("{}", serde_json::to_string(&reply)?);
            Ok(false)
        }
    }
}

fn main() {
    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("❌ Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };
    match rt.block_on(run()) {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            eprintln!("\n❌ CRITICAL ERROR: {:?}", e);
            std::process::exit(1);
        }
    }
}
