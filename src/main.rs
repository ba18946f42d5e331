use anyhow::Context;
use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use folio::{Config, Mode, Site};

/// Portfolio renderer for headless CMS content.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Content mode, `static` or `live`. Derived from the host when absent.
    #[arg(long, global = true, env = "FOLIO_MODE")]
    mode: Option<Mode>,

    /// Deployment host name.
    #[arg(long, global = true, env = "FOLIO_HOST")]
    host: Option<String>,

    /// Base address of the CMS.
    #[arg(long = "api", global = true, env = "STRAPI_URL")]
    api_base: Option<String>,

    /// Consolidated content snapshot.
    #[arg(long, global = true, env = "FOLIO_SNAPSHOT")]
    snapshot: Option<Utf8PathBuf>,

    /// Public assets directory.
    #[arg(long, global = true)]
    public: Option<Utf8PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the whole site into a directory.
    Build {
        #[arg(long)]
        dist: Option<Utf8PathBuf>,
    },
    /// Render pages on request.
    #[cfg(feature = "server")]
    Serve {
        #[arg(long)]
        port: Option<u16>,
    },
    /// Fetch every record from the CMS into the snapshot file.
    #[cfg(feature = "live")]
    Snapshot {
        #[arg(long, env = "STRAPI_API_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    #[cfg(feature = "logging")]
    init_logging()?;

    let args = Args::parse();

    let mut builder = Config::builder();
    if let Some(mode) = args.mode {
        builder = builder.mode(mode);
    }
    if let Some(host) = args.host {
        builder = builder.host(host);
    }
    if let Some(api_base) = args.api_base {
        builder = builder.api_base(api_base);
    }
    if let Some(snapshot) = args.snapshot {
        builder = builder.snapshot(snapshot);
    }
    if let Some(public) = args.public {
        builder = builder.public(public);
    }

    match args.command {
        Command::Build { dist } => {
            if let Some(dist) = dist {
                builder = builder.dist(dist);
            }
            let config = builder.finish()?;
            let site = Site::new(&config)?;
            site.build(&config.dist, &config.public)?;
        }
        #[cfg(feature = "server")]
        Command::Serve { port } => {
            if let Some(port) = port {
                builder = builder.port(port);
            }
            let config = builder.finish()?;
            let site = Site::new(&config)?;
            folio::server::start(site, config.public.clone(), config.port)?;
        }
        #[cfg(feature = "live")]
        Command::Snapshot { token } => {
            let config = builder.finish()?;
            snapshot(&config, token)?;
        }
    }

    Ok(())
}

/// Write the snapshot document. Any failure here ends the process.
#[cfg(feature = "live")]
fn snapshot(config: &Config, token: Option<String>) -> anyhow::Result<()> {
    use std::time::Instant;

    use folio::source::ApiSource;
    use tracing::info;

    let s = Instant::now();
    info!(api = %config.api_base, "fetching data from the CMS");

    let mut source = ApiSource::new(&config.api_base)?;
    if let Some(token) = token {
        source = source.with_token(token);
    }

    let snapshot = source
        .fetch_snapshot()
        .context("Error fetching data from the CMS")?;

    let text = serde_json::to_string_pretty(&snapshot)?;
    if let Some(parent) = config.snapshot.parent().filter(|p| !p.as_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&config.snapshot, text)
        .with_context(|| format!("Couldn't write the snapshot to {}", config.snapshot))?;

    info!(
        path = %config.snapshot,
        elapsed_ms = s.elapsed().as_millis() as u64,
        "snapshot written"
    );

    Ok(())
}

#[cfg(feature = "logging")]
fn init_logging() -> anyhow::Result<()> {
    use tracing_indicatif::IndicatifLayer;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;
    use tracing_subscriber::{EnvFilter, fmt};

    let indicatif = IndicatifLayer::new();
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(indicatif.get_stderr_writer()))
        .with(indicatif)
        .try_init()?;

    Ok(())
}
