//! mcstarter - headless console for a Minecraft server
//!
//! Starts the server, prints its classified output and player changes,
//! and forwards every line typed on stdin as a console command. Ctrl-C
//! asks the server to stop; a second Ctrl-C kills it.

use std::path::PathBuf;
use std::process;

use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use mcstarter::{
    handle_startup_error, Config, ProcessPriority, ProcessSupervisor, ServerEvent, ServerMessage,
    ServerStatus,
};

/// Command line arguments
#[derive(Debug, Parser)]
#[command(name = "mcstarter", version, about = "Run and supervise a Minecraft server")]
struct Args {
    /// Server jar to launch
    jar: PathBuf,

    /// Path to configuration file
    #[arg(short, long, env = "MCSTARTER_CONFIG")]
    config: Option<PathBuf>,

    /// Java executable (overrides configuration)
    #[arg(long)]
    java: Option<PathBuf>,

    /// Initial heap size in megabytes
    #[arg(long)]
    min_ram: Option<u32>,

    /// Maximum heap size in megabytes
    #[arg(long)]
    max_ram: Option<u32>,

    /// Priority once the server is ready (0 = high .. 4 = idle)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=4))]
    priority: Option<u8>,

    /// Enable debug logging
    #[arg(short, long, env = "MCSTARTER_DEBUG")]
    debug: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Configuration loading logs before the configured level is known
    let bootstrap = build_subscriber(&filter_directive(&args, "info"), std::io::stderr);
    let loaded = tracing::subscriber::with_default(bootstrap, || load_configuration(&args));
    let config = match loaded {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", handle_startup_error(&e));
            process::exit(1);
        }
    };

    build_subscriber(&filter_directive(&args, &config.logging.level), std::io::stderr).init();

    let code = match run(args, config).await {
        Ok(()) => 0,
        Err(e) => {
            error!("{:#}", e);
            if let Some(e) = e.downcast_ref::<mcstarter::Error>() {
                eprintln!("{}", handle_startup_error(e));
            }
            1
        }
    };

    // The blocking stdin reader would otherwise hold the runtime open
    process::exit(code);
}

/// `RUST_LOG` wins, then `--debug`, then `level`
fn filter_directive(args: &Args, level: &str) -> String {
    if let Ok(directive) = std::env::var("RUST_LOG") {
        return directive;
    }
    if args.debug {
        "debug".to_string()
    } else {
        level.to_string()
    }
}

fn build_subscriber<W>(directive: &str, writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(directive))
        .with_target(false)
        .with_writer(writer)
        .compact()
        .finish()
}

/// Load configuration from file or defaults, then apply command line overrides
fn load_configuration(args: &Args) -> mcstarter::Result<Config> {
    let mut config = match &args.config {
        Some(path) => mcstarter::init_with_config(path)?,
        None => mcstarter::init()?,
    };

    apply_overrides(args, &mut config);
    Ok(config)
}

fn apply_overrides(args: &Args, config: &mut Config) {
    if let Some(java) = &args.java {
        config.java.path = java.clone();
    }
    if let Some(min) = args.min_ram {
        config.java.min_ram_mb = min;
    }
    if let Some(max) = args.max_ram {
        config.java.max_ram_mb = max;
    }
    if let Some(index) = args.priority {
        config.server.priority = ProcessPriority::from_index(usize::from(index));
    }
}

async fn run(args: Args, config: Config) -> anyhow::Result<()> {
    let server = config.server_configuration(&args.jar);

    let supervisor = ProcessSupervisor::with_event_capacity(config.events.channel_capacity);
    let mut events = supervisor.subscribe();

    info!("Starting {}", server.jar_path.display());
    debug!("java {}", server.command_line());
    supervisor.start(&server).await?;

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;
    let mut stop_requested = false;

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                print_event(&event);
                if event == ServerEvent::StatusChanged(ServerStatus::Closed) {
                    break;
                }
            }
            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) if line.trim() == "stop" => supervisor.stop(),
                    Ok(Some(line)) if !line.trim().is_empty() => supervisor.send_command(line.trim()),
                    Ok(Some(_)) => {}
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        warn!("Failed to read stdin: {}", e);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                if stop_requested {
                    warn!("Killing server");
                    supervisor.kill();
                } else {
                    info!("Stopping server (Ctrl-C again to kill)");
                    stop_requested = true;
                    supervisor.stop();
                }
            }
        }
    }

    info!("👋 Server closed");
    Ok(())
}

fn print_event(event: &ServerEvent) {
    match event {
        ServerEvent::Message(message) => println!("{}", format_message(message)),
        ServerEvent::Notice(text) => println!("* {}", text),
        ServerEvent::StatusChanged(status) => info!("Server is {}", status),
        ServerEvent::PlayerChanged { joined: true, name } => info!("+ {}", name),
        ServerEvent::PlayerChanged { joined: false, name } => info!("- {}", name),
    }
}

fn format_message(message: &ServerMessage) -> String {
    match (message.time.is_empty(), message.level_name.is_empty()) {
        (true, _) => message.text.clone(),
        (false, true) => format!("{} {}", message.time, message.text),
        (false, false) => format!("{} [{}] {}", message.time, message.level_name, message.text),
    }
}
