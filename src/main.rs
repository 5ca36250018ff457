use clap::{Parser, Subcommand};
use revpress::config::{self, SiteConfig};
use revpress::convert::PandocConverter;
use revpress::site::{self, BuildContext};
use revpress::vcs::GitBackend;
use revpress::{output, scan};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "revpress")]
#[command(about = "Publish every git revision of your LaTeX articles as HTML")]
#[command(long_about = "\
Publish every git revision of your LaTeX articles as HTML

Each source file becomes an article directory holding one page per commit
that touched it, a latest page, and a version index. Pages are rendered with
pandoc; history comes from git.

Repository structure:

  repo/
  ├── config.toml                  # Optional overrides
  ├── blogs/                       # Standalone posts
  │   └── 2025/
  │       ├── post.tex             # → docs/blogs/2025/post/
  │       └── figures-post/        # Eponymous folder (keeps figures alongside)
  │           └── figures-post.tex # → docs/blogs/2025/figures-post/
  ├── collections/                 # One directory per collection
  │   └── series/
  │       ├── 01-intro.tex         # Ordered by path, prev/next navigation
  │       └── 02-details.tex
  └── filters/note-filter.lua      # Optional pandoc Lua filter

Run with no arguments to build the current directory.
Run 'revpress gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Repository root
    #[arg(long, default_value = ".", global = true)]
    root: PathBuf,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Render every article, collection, and index page (default)
    Build,
    /// List discovered posts and collections without rendering
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn init_tracing(verbose: bool) {
    let env = std::env::var("REVPRESS_LOG").unwrap_or_else(|_| {
        if verbose {
            "revpress=debug".to_string()
        } else {
            "revpress=info".to_string()
        }
    });
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_env_filter(EnvFilter::new(env))
        .try_init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command.unwrap_or(Command::Build) {
        Command::Build => {
            let root = resolve_root(&cli.root)?;
            let config = config::load_config(&root)?;
            let paths = config.resolve_paths(&root);

            println!("==> Scanning {}", root.display());
            let tree = scan_sources(&config, &root)?;

            println!("==> Rendering → {}", paths.output.display());
            let vcs = GitBackend::new(config.git.binary.clone(), root.clone());
            let converter = PandocConverter::new(&config.pandoc, &config.markup);
            let output_root = paths.output.clone();
            let ctx = BuildContext::new(&config, paths, &vcs, &converter);
            let summary = site::build(&ctx, &tree, |event| {
                output::print_build_event(event, &root, &output_root)
            })?;
            output::print_build_summary(&summary);

            println!("==> Build complete: {}", output_root.display());
        }
        Command::Check => {
            let root = resolve_root(&cli.root)?;
            let config = config::load_config(&root)?;
            println!("==> Checking {}", root.display());
            let tree = scan_sources(&config, &root)?;
            output::print_scan_output(&tree, &root);
            println!("==> Sources are valid");
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Absolute repository root; git paths are computed relative to it.
fn resolve_root(root: &Path) -> std::io::Result<PathBuf> {
    root.canonicalize()
}

fn scan_sources(config: &SiteConfig, root: &Path) -> Result<scan::SourceTree, scan::ScanError> {
    let paths = config.resolve_paths(root);
    scan::scan(&paths.blogs, &paths.collections, &config.markup.extension)
}
