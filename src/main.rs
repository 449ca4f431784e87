use clap::{Parser, Subcommand};
use folio::avatar::ProfilePicture;
use folio::generate::{self, Personalization};
use folio::search::SearchService;
use folio::settings::FileStore;
use folio::theme::{Theme, ThemeController};
use folio::{config, output};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Static generator for a personal portfolio page")]
#[command(long_about = "\
Static generator for a personal portfolio page

One JSON document describes the profile, journey, articles, publications,
media coverage and social stats. 'folio build' renders it into a single
page with carousels, navbar search, a light/dark theme toggle and scroll
highlighting.

Source structure:

  content/
  ├── site.toml                    # Site config (optional)
  └── assets/                      # Copied to the output
      ├── data/content.json        # The content document
      └── img/                     # Avatars and other images

The theme and uploaded profile picture live in a small settings file
(--settings) and are baked into the page on every build.

Run 'folio gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Settings file holding the theme and profile picture
    #[arg(long, default_value = ".folio/settings.json", global = true)]
    settings: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render the portfolio page into the output directory
    Build,
    /// Validate config and content without building
    Check,
    /// Search articles, publications and media
    Search {
        /// Case-insensitive substring to look for
        query: String,
    },
    /// Show or change the stored theme
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },
    /// Store a new profile picture, or clear the stored one
    Avatar {
        /// Image file to upload (at most 5MB)
        #[arg(required_unless_present = "clear")]
        file: Option<PathBuf>,
        /// Remove the stored picture
        #[arg(long, conflicts_with = "file")]
        clear: bool,
    },
    /// Print a stock site.toml with all options documented
    GenConfig,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the stored theme (default)
    Get,
    /// Store a theme
    Set { theme: Theme },
    /// Flip between dark and light
    Toggle,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Command::Build => {
            let store = FileStore::open(&cli.settings)?;
            let personal = Personalization::from_store(store);
            println!("==> Building {} → {}", cli.source.display(), cli.output.display());
            let report = generate::generate(&cli.source, &cli.output, &personal)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let report = generate::check(&cli.source)?;
            output::print_check_output(&report);
        }
        Command::Search { query } => {
            let (_, doc) = generate::load_site(&cli.source)?;
            let service = SearchService::from_document(&doc);
            output::print_search_output(&service.query(&query));
        }
        Command::Theme { action } => {
            let mut theme = ThemeController::init(FileStore::open(&cli.settings)?);
            match action.unwrap_or(ThemeAction::Get) {
                ThemeAction::Get => {}
                ThemeAction::Set { theme: value } => theme.set(value)?,
                ThemeAction::Toggle => {
                    theme.toggle()?;
                }
            }
            output::print_theme(theme.theme());
        }
        Command::Avatar { file, clear } => {
            let mut picture = ProfilePicture::new(FileStore::open(&cli.settings)?);
            if clear {
                picture.clear()?;
                println!("Profile picture cleared");
            } else if let Some(file) = file {
                let site = config::load_config(&cli.source)?;
                let bytes = std::fs::read(&file)?;
                let data_url = picture.upload(&bytes, &site.avatar)?;
                println!("{}", output::format_avatar_saved(&data_url));
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
