use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use ecresolve::{
    print_settings, render_toml, should_use_colors, walk_paths, EditorConfigResolver,
    OutputContext, OutputMode, ResolveOptions, ResolvedSettings, DEFAULT_CONFIG_NAME,
};
use tracing::Level;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Toml,
}

#[derive(Parser)]
#[command(name = "ecresolve")]
#[command(version, about = "Show the effective .editorconfig settings for files")]
struct Cli {
    /// Target files or directories (files need not exist)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Config file name to look for in each directory
    #[arg(long, value_name = "NAME", default_value = DEFAULT_CONFIG_NAME)]
    config: String,

    /// Directory relative paths are resolved against (default: current directory)
    #[arg(long, value_name = "DIR")]
    cwd: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Force colored output
    #[arg(long)]
    color: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Enable verbose logging (sets log level to DEBUG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let resolver = match &cli.cwd {
        Some(dir) => EditorConfigResolver::with_base_dir(dir),
        None => EditorConfigResolver::new(),
    };
    let options = ResolveOptions::with_config(&cli.config);

    let mode = match cli.format {
        Format::Text => OutputMode::Text,
        Format::Toml => OutputMode::Toml,
    };
    let ctx = OutputContext::new(mode, should_use_colors(cli.color, cli.no_color));

    let (targets, walk_failed) = collect_targets(&resolver, &cli.paths);

    let results: Vec<(PathBuf, ResolvedSettings)> = targets
        .into_iter()
        .map(|target| {
            let settings = resolver.get_editor_config_data(&target, &options);
            (target, settings)
        })
        .collect();

    match ctx.mode {
        OutputMode::Text => {
            for (path, settings) in &results {
                print_settings(path, settings, &ctx);
            }
        }
        OutputMode::Toml => match render_toml(&results) {
            Ok(document) => print!("{document}"),
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::from(1);
            }
        },
    }

    if walk_failed {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn init_tracing(verbose: bool) {
    // The level only applies when RUST_LOG sets no directives
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// Existing directories expand to their files; anything else is a single
/// target, whether or not it exists.
fn collect_targets(resolver: &EditorConfigResolver, paths: &[PathBuf]) -> (Vec<PathBuf>, bool) {
    let mut targets = Vec::new();
    let mut walk_failed = false;

    for path in paths {
        let absolute = resolver.absolutize(path);
        if !absolute.is_dir() {
            targets.push(absolute);
            continue;
        }

        for entry in walk_paths(&[absolute.as_path()]) {
            match entry {
                Ok(file) => targets.push(file),
                Err(e) => {
                    eprintln!("Error: {e}");
                    walk_failed = true;
                }
            }
        }
    }

    (targets, walk_failed)
}
