use clap::{Parser, Subcommand};
use siteshell::client::{self, FetchState};
use siteshell::config::{self, DEFAULT_CONFIG_FILE, SiteConfig};
use siteshell::router::{MemoryHistory, slug_to_path};
use siteshell::view::{CONFIG_MISSING_MESSAGE, View};
use siteshell::{generate, output};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "siteshell")]
#[command(about = "Render a marketing site from a JSON site manifest")]
#[command(long_about = "\
Render a marketing site from a JSON site manifest

The manifest describes the site's identity, navigation, footer, and pages.
Each page is a list of typed sections:

  hero                       large heading + body
  text-block, content-block  heading + body (line breaks kept)
  image-block                heading + body + image placeholder
  profile-row, testimonial,  labeled block
  faq, contact-form
  anything else              not rendered

The manifest location comes from, in increasing priority:
  siteshell.toml (manifest_url), SITESHELL_MANIFEST_URL, --manifest

Run 'siteshell gen-config' to generate a documented siteshell.toml.")]
#[command(version)]
struct Cli {
    /// Config file
    #[arg(long, default_value = DEFAULT_CONFIG_FILE, global = true)]
    config: PathBuf,

    /// Manifest location: http(s) URL, file:// URL, or local path
    #[arg(long, global = true)]
    manifest: Option<String>,

    /// Site name shown instead of the manifest's business name
    #[arg(long, global = true)]
    site_name: Option<String>,

    /// Log progress at info level (otherwise RUST_LOG applies)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the HTML document for one path
    Render {
        /// Path or slug to render ("about", "/about", "home")
        #[arg(long, default_value = "/")]
        path: String,
    },
    /// Export every page to static HTML
    Build {
        /// Output directory
        #[arg(long, default_value = "dist")]
        output: PathBuf,
    },
    /// Load the manifest and list its pages and links
    Check,
    /// Print a stock siteshell.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match &cli.command {
        Command::Render { path } => {
            let site_config = resolve_site_config(&cli)?;
            let history = MemoryHistory::new(&slug_to_path(path));
            let mut view = View::mount(site_config.clone(), history);
            if let Some(url) = site_config.manifest_url() {
                let source = client::source_for(url, &site_config.fetch);
                if view.start_load(source).is_some() {
                    view.wait_for_load();
                }
            }
            println!("{}", view.render().into_string());
        }
        Command::Build { output: output_dir } => {
            let site_config = resolve_site_config(&cli)?;
            let manifest = load_manifest(&site_config)?;
            let report = generate::generate(Arc::clone(&manifest), &site_config, output_dir)?;
            output::print_generate_output(&manifest, &report);
            println!("==> Build complete: {}", output_dir.display());
        }
        Command::Check => {
            let site_config = resolve_site_config(&cli)?;
            let manifest = load_manifest(&site_config)?;
            output::print_check_output(&manifest);
            println!("==> Manifest is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Config file, then environment, then CLI flags.
fn resolve_site_config(cli: &Cli) -> Result<SiteConfig, config::ConfigError> {
    let mut site_config = config::load_config_with_env(&cli.config)?;
    if let Some(manifest) = &cli.manifest {
        site_config.manifest_url = Some(manifest.clone());
    }
    if let Some(site_name) = &cli.site_name {
        site_config.site_name = Some(site_name.clone());
    }
    Ok(site_config)
}

/// Fetch the manifest once, turning every non-loaded state into an error.
fn load_manifest(
    site_config: &SiteConfig,
) -> Result<Arc<siteshell::types::Manifest>, Box<dyn std::error::Error>> {
    let Some(url) = site_config.manifest_url() else {
        return Err(CONFIG_MISSING_MESSAGE.into());
    };
    let source = client::source_for(url, &site_config.fetch);
    match client::load(Some(url), source.as_ref()) {
        FetchState::Loaded(manifest) => Ok(manifest),
        FetchState::Failed(message) => Err(format!("{message} ({url})").into()),
        other => Err(format!("unexpected fetch state: {other:?}").into()),
    }
}
