//! noisekit CLI - procedural noise textures and VFX sprites
//!
//! This binary validates job documents and renders them to PNG files.

use clap::{ArgGroup, Parser, Subcommand};
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use noisekit_cli::commands;

/// noisekit - Procedural Noise Texture and VFX Sprite Generator
#[derive(Parser)]
#[command(name = "noisekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Log pipeline stages to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a job file without generating anything
    Validate {
        /// Path to the job file (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Generate PNG output from a job file
    Generate {
        /// Path to the job file (JSON)
        #[arg(short, long)]
        spec: String,

        /// Output root directory (default: current directory)
        #[arg(short, long)]
        out_root: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print a default job document
    #[command(group(ArgGroup::new("kind").required(true).args(["noise", "sprite"])))]
    Template {
        /// Noise type (perlin, simplex, fbm, turbulence, ridged, domain_warp)
        #[arg(long)]
        noise: Option<String>,

        /// Sprite shape (circle, square, line, n_gon, star, glow, flame, ...)
        #[arg(long)]
        sprite: Option<String>,

        /// Add an animation with this many frames
        #[arg(long)]
        frames: Option<u32>,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Validate { spec, json } => commands::validate::run(&spec, json),
        Commands::Generate {
            spec,
            out_root,
            json,
        } => commands::generate::run(&spec, out_root.as_deref(), json),
        Commands::Template {
            noise,
            sprite,
            frames,
        } => commands::template::run(noise.as_deref(), sprite.as_deref(), frames),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {:#}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_generate() {
        let cli = Cli::try_parse_from([
            "noisekit",
            "generate",
            "--spec",
            "clouds.json",
            "--out-root",
            "out",
            "--json",
        ])
        .unwrap();
        match cli.command {
            Commands::Generate {
                spec,
                out_root,
                json,
            } => {
                assert_eq!(spec, "clouds.json");
                assert_eq!(out_root.as_deref(), Some("out"));
                assert!(json);
            }
            _ => panic!("expected generate command"),
        }
    }

    #[test]
    fn test_cli_parses_global_verbose() {
        let cli = Cli::try_parse_from(["noisekit", "validate", "-s", "job.json", "--verbose"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn test_template_requires_one_kind() {
        assert!(Cli::try_parse_from(["noisekit", "template"]).is_err());
        assert!(Cli::try_parse_from([
            "noisekit", "template", "--noise", "fbm", "--sprite", "star"
        ])
        .is_err());
        let cli = Cli::try_parse_from(["noisekit", "template", "--sprite", "flame", "--frames", "8"])
            .unwrap();
        match cli.command {
            Commands::Template {
                noise,
                sprite,
                frames,
            } => {
                assert!(noise.is_none());
                assert_eq!(sprite.as_deref(), Some("flame"));
                assert_eq!(frames, Some(8));
            }
            _ => panic!("expected template command"),
        }
    }
}
