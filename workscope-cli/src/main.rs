use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use workscope_core::settings::{default_settings_path, load_settings, settings_schema};
use workscope_core::ToolRegistry;

#[derive(Parser, Debug)]
#[command(name = "workscope")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Sandboxed project browsing and Python structure tools")]
struct Args {
    /// Project root every path is resolved against (overrides the settings file)
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,

    /// Settings file to load instead of ~/.workscope/settings.toml
    #[arg(long, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Write logs to stderr instead of ~/.workscope/trace/workscope.log
    #[arg(long)]
    log_stderr: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the definitions of every available tool
    Tools,
    /// Invoke one tool and print its JSON response
    Call {
        /// Tool name, e.g. get_project_structure
        tool: String,
        /// Tool arguments as a JSON object
        #[arg(long, default_value = "{}")]
        args: String,
    },
    /// Print the JSON schema of the settings file
    SettingsSchema,
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_tracing(args.log_stderr)?;

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let ok = runtime.block_on(async {
        let local = tokio::task::LocalSet::new();
        local.run_until(async_main(args)).await
    })?;

    if !ok {
        std::process::exit(1);
    }
    Ok(())
}

/// Returns false when a tool call reported a failure.
async fn async_main(args: Args) -> Result<bool> {
    info!(
        "CLI startup: root={:?}, settings={:?}, command={:?}",
        args.root, args.settings, args.command
    );

    if let Command::SettingsSchema = args.command {
        println!("{}", serde_json::to_string_pretty(&settings_schema())?);
        return Ok(true);
    }

    let settings_path = match args.settings {
        Some(path) => path,
        None => default_settings_path()?,
    };
    let mut settings = load_settings(&settings_path)?;
    if let Some(root) = args.root {
        settings.root = root;
    }
    info!(root = %settings.root.display(), "Using project root");

    let registry = ToolRegistry::with_default_tools(Arc::new(settings));

    match args.command {
        Command::Tools => {
            println!("{}", serde_json::to_string_pretty(&registry.definitions())?);
            Ok(true)
        }
        Command::Call { tool, args } => {
            let arguments: serde_json::Value = serde_json::from_str(&args)
                .with_context(|| format!("--args is not valid JSON: {args}"))?;
            let response = registry.call(&tool, arguments).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(response.ok)
        }
        Command::SettingsSchema => Ok(true),
    }
}

fn setup_tracing(log_stderr: bool) -> Result<()> {
    use std::fs;
    use tracing_subscriber::fmt;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if log_stderr {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true),
            )
            .with(filter)
            .init();
        return Ok(());
    }

    let home = dirs::home_dir().unwrap_or_else(std::env::temp_dir);
    let trace_dir = home.join(".workscope").join("trace");
    fs::create_dir_all(&trace_dir)?;

    let log_file = trace_dir.join("workscope.log");
    let file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_file)?;

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true)
                .with_thread_ids(true)
                .with_file(true)
                .with_line_number(true),
        )
        .with(filter)
        .init();

    info!("Tracing initialized to {:?}", log_file);
    Ok(())
}
