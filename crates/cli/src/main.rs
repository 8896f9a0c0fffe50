use clap::{Parser, Subcommand};
use qname_relay_domain::{CliOverrides, TransformerKind};
use tracing::info;

mod bootstrap;
mod commands;
mod di;
mod server;

#[derive(Parser)]
#[command(name = "qname-relay")]
#[command(version)]
#[command(about = "Authoritative DNS relay that rewrites replies from commands in the query name")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Listening port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Backend server, ADDRESS or ADDRESS:PORT
    #[arg(long)]
    backend: Option<String>,

    /// Zone the backend is authoritative for
    #[arg(long)]
    backend_domain: Option<String>,

    /// Labels in the relay's own zone
    #[arg(long)]
    zone_labels: Option<usize>,

    /// Worker tasks
    #[arg(short = 'w', long)]
    workers: Option<usize>,

    /// Response transformer (cookie, passthrough)
    #[arg(long)]
    transformer: Option<TransformerKind>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the relay (default)
    Serve,

    /// Build a query name from a template
    Generate {
        #[arg(short, long)]
        template: String,

        #[arg(short, long)]
        domain: String,

        /// Component argument, repeatable
        #[arg(short, long = "arg", value_name = "NAME=VALUE", value_parser = commands::parse_arg)]
        args: Vec<(String, String)>,
    },

    /// Decode a query name against a template
    Parse {
        #[arg(short, long)]
        template: String,

        qname: String,
    },

    /// List the arguments a template needs
    Describe {
        #[arg(short, long)]
        template: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Command::Generate {
            ref template,
            ref domain,
            ref args,
        }) => {
            println!("{}", commands::generate(template, domain, args)?);
            return Ok(());
        }
        Some(Command::Parse {
            ref template,
            ref qname,
        }) => {
            for line in commands::parse(template, qname)? {
                println!("{}", line);
            }
            return Ok(());
        }
        Some(Command::Describe { ref template }) => {
            print!("{}", commands::describe(template)?);
            return Ok(());
        }
        Some(Command::Serve) | None => {}
    }

    let cli_overrides = CliOverrides {
        bind_address: cli.bind,
        port: cli.port,
        backend: cli.backend,
        backend_domain: cli.backend_domain,
        zone_labels: cli.zone_labels,
        num_workers: cli.workers,
        transformer: cli.transformer,
        log_level: cli.log_level,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    info!("Starting qname-relay v{}", env!("CARGO_PKG_VERSION"));
    bootstrap::log_config(&config);

    let use_case = di::build_relay(&config)?;
    server::start_dns_server(&config, use_case).await?;

    info!("Server shutdown complete");
    Ok(())
}
