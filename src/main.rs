use clap::Parser;
use relinfo::config;
use relinfo::convert::ImageMagick;
use relinfo::pipeline;
use relinfo::ReleaseError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "relinfo",
    version,
    about = "Update the resource script, installer defines and icons from CMakeLists.txt"
)]
struct Cli {
    /// Packaging directory; other paths resolve relative to it.
    #[arg(long, default_value = "packaging")]
    packaging_dir: PathBuf,

    /// Image conversion program (overrides the settings file).
    #[arg(long)]
    converter: Option<String>,

    /// Only update the resource and installer scripts.
    #[arg(long)]
    skip_icons: bool,

    /// Print the project info and exit without writing anything.
    #[arg(long)]
    check: bool,

    /// Write the default settings file into the packaging directory.
    #[arg(long)]
    init_settings: bool,

    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<(), ReleaseError> {
    let base_dir = cli.packaging_dir;

    if cli.init_settings {
        match config::init_settings(&base_dir)? {
            Some(path) => tracing::info!("Wrote default settings to {}", path.display()),
            None => tracing::warn!(
                "{} already exists, leaving it untouched",
                config::settings_path(&base_dir).display()
            ),
        }
        return Ok(());
    }

    let mut settings = config::load_settings(&base_dir)?;
    if let Some(converter) = cli.converter {
        settings.converter = converter;
    }

    if cli.check {
        let info = pipeline::read_info(&settings, &base_dir).await?;
        println!("{} {}", info.project_name, info.version);
        println!("{}", info.app_name);
        println!("{}", info.app_url);
        return Ok(());
    }

    let mut converter = ImageMagick::new(settings.converter.clone());
    let report = pipeline::run(&settings, &base_dir, &mut converter, cli.skip_icons).await?;
    for path in &report.written {
        tracing::debug!("wrote {}", path.display());
    }
    Ok(())
}
