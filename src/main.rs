use clap::{Parser, Subcommand};
use env_logger::{Builder, Env};
use gist_site::{config, generate, output};
use log::LevelFilter;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gist-site")]
#[command(about = "Build a static landing page from gists and local files")]
#[command(long_about = "\
Build a static landing page from gists and local files

Everything is described in one TOML file (site.toml by default):

  title = \"Jane Doe\"
  theme = \"default\"                  # or \"dark\", or a path to .scss/.css

  [[links]]                          # pages rendered from a gist
  output_dir = \"notes\"
  gist_id = \"aa5a315d61ae9438b18d\"

  [[links]]                          # a plain link
  title = \"Blog\"
  url = \"https://blog.example.com\"

  [[social_links]]
  type = \"github\"
  url = \"https://github.com/jane\"

Output (dist/ by default):

  dist/
  ├── index.html                     # avatar, links, social icons
  ├── style.<hash>.css               # theme, fingerprinted
  └── notes/                         # one directory per gist link
      └── index.html                 # from index.md in the gist

Markdown becomes sanitized, minified HTML; .scss becomes compressed CSS;
everything else is copied as is.

Run 'gist-site gen-config' to generate a documented site.toml.")]
#[command(version)]
struct Cli {
    /// Site configuration file
    #[arg(long, short, default_value = "site.toml", global = true)]
    config: PathBuf,

    /// Output directory
    #[arg(long, short, default_value = "dist", global = true)]
    output: PathBuf,

    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(long, short, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch gists and build the whole site
    Build,
    /// Validate the configuration and check that local sources exist
    Check,
    /// Print a stock site.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Build => {
            let config = config::load_config(&cli.config)?;
            println!("==> Building {} \u{2192} {}", cli.config.display(), cli.output.display());
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?;
            let report = runtime.block_on(generate::build(&config, &cli.output))?;
            output::print_build_output(&report);
            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            let config = config::load_config(&cli.config)?;
            println!("==> Checking {}", cli.config.display());
            let sources: Vec<_> = config
                .local_sources()
                .into_iter()
                .map(|path| (path, path.is_file()))
                .collect();
            output::print_check_output(&sources);
            let missing = sources.iter().filter(|(_, exists)| !exists).count();
            if missing > 0 {
                return Err(format!("{missing} local source(s) missing").into());
            }
            println!("==> Configuration is valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Initialize `env_logger`: warnings by default, more with each `-v`.
fn init_logging(verbose: u8) {
    let env = Env::default().filter_or("RUST_LOG", "warn");
    let mut builder = Builder::from_env(env);
    builder
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false);

    if std::env::var("RUST_LOG").is_err() {
        let level = match verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        };
        builder.filter_module("gist_site", level);
    }
    builder.init();
}
