//! Generate command implementation
//!
//! Renders a job and writes its PNG files:
//! - `<name>.png` for a single frame
//! - `<name>_atlas.png` for an animation composed as an atlas
//! - `<name>_frames/frame_0000.png`, ... for an animation composed as a sequence
//!
//! Existing files are never replaced; see [`crate::output::versioned_path`].

use anyhow::{Context, Result};
use colored::Colorize;
use noisekit_backend::png::write_frame_to_vec_with_hash;
use noisekit_backend::{
    animate_with_progress, center_seams, generate, Animatable, Animation, Atlas, CancelToken,
    Frame, GenerateError, Outcome, PngConfig,
};
use noisekit_spec::{AnimationSpec, Composition, Job, JobError, Recipe};
use std::io::Write;
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{debug, info};

use super::json_output::{
    error_codes, job_error_to_json, GenerateOutput, JsonError, OutputRecord,
};
use super::{frame_count, load_job, print_job_errors};
use crate::output::{frame_file_name, versioned_path};

/// Rendered job, ready to write.
#[derive(Debug, Clone, PartialEq)]
pub enum Rendered {
    Single(Frame),
    Atlas(Atlas<Frame>),
    Sequence(Vec<Frame>),
}

/// Run the generate command
///
/// # Arguments
/// * `spec_path` - Path to the job file
/// * `out_root` - Output directory (default: current directory)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success, 1 on any failure
pub fn run(spec_path: &str, out_root: Option<&str>, json_output: bool) -> Result<ExitCode> {
    let out_root = Path::new(out_root.unwrap_or("."));
    if json_output {
        run_json(spec_path, out_root)
    } else {
        run_human(spec_path, out_root)
    }
}

/// Renders every frame of a job.
///
/// With `seamless_preview` set, each frame is shifted by half its size
/// before any atlas packing, so every cell shows its own wrap seams.
pub fn render_job(
    job: &Job,
    token: &CancelToken,
    progress: impl FnMut(u32, u32),
) -> Result<Outcome<Rendered>, GenerateError> {
    let Some(animation) = &job.animation else {
        let preview = job.seamless_preview;
        return Ok(generate(&job.recipe, job.width(), job.height(), token)?.map(|frame| {
            Rendered::Single(if preview { preview_frame(&frame) } else { frame })
        }));
    };

    let outcome = match &job.recipe {
        Recipe::Noise(recipe) => {
            animate_job(recipe, job, animation, token, progress)?.map(|a| a.map(Frame::Gray))
        }
        Recipe::Sprite(sprite) => {
            animate_job(sprite, job, animation, token, progress)?.map(|a| a.map(Frame::Rgba))
        }
    };

    Ok(outcome.map(|animation| match animation {
        Animation::Atlas(atlas) => Rendered::Atlas(atlas),
        Animation::Sequence(frames) => Rendered::Sequence(frames),
    }))
}

fn preview_frame(frame: &Frame) -> Frame {
    match frame {
        Frame::Gray(field) => Frame::Gray(center_seams(field)),
        Frame::Rgba(field) => Frame::Rgba(center_seams(field)),
    }
}

fn animate_job<A: Animatable>(
    template: &A,
    job: &Job,
    spec: &AnimationSpec,
    token: &CancelToken,
    progress: impl FnMut(u32, u32),
) -> Result<Outcome<Animation<A::Buffer>>, GenerateError> {
    let (width, height) = (job.width(), job.height());
    if !job.seamless_preview {
        return animate_with_progress(template, spec, width, height, token, progress);
    }

    let sequence = spec.clone().with_composition(Composition::Sequence);
    let frames = match animate_with_progress(template, &sequence, width, height, token, progress)? {
        Outcome::Complete(Animation::Sequence(frames)) => frames,
        Outcome::Complete(other) => return Ok(Outcome::Complete(other)),
        Outcome::Cancelled => return Ok(Outcome::Cancelled),
    };
    let frames: Vec<A::Buffer> = frames.iter().map(center_seams).collect();

    Ok(Outcome::Complete(match spec.composition {
        Composition::Atlas => {
            let (rows, cols) = spec.grid()?;
            Animation::Atlas(Atlas::pack(&frames, rows, cols)?)
        }
        Composition::Sequence => Animation::Sequence(frames),
    }))
}

/// Writes a rendered job under `out_root`, returning one record per file.
pub fn write_rendered(
    job: &Job,
    rendered: &Rendered,
    out_root: &Path,
    config: &PngConfig,
) -> Result<Vec<OutputRecord>> {
    std::fs::create_dir_all(out_root)
        .with_context(|| format!("Failed to create output directory: {}", out_root.display()))?;

    match rendered {
        Rendered::Single(frame) => {
            let path = versioned_path(out_root, &job.name, ".png");
            Ok(vec![write_png(frame, &path, config)?])
        }
        Rendered::Atlas(atlas) => {
            let path = versioned_path(out_root, &format!("{}_atlas", job.name), ".png");
            Ok(vec![write_png(&atlas.buffer, &path, config)?])
        }
        Rendered::Sequence(frames) => {
            let dir = versioned_path(out_root, &format!("{}_frames", job.name), "");
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("Failed to create frame directory: {}", dir.display()))?;
            frames
                .iter()
                .enumerate()
                .map(|(i, frame)| write_png(frame, &dir.join(frame_file_name(i)), config))
                .collect()
        }
    }
}

fn write_png(frame: &Frame, path: &Path, config: &PngConfig) -> Result<OutputRecord> {
    let (bytes, hash) = write_frame_to_vec_with_hash(frame, config)?;
    std::fs::write(path, &bytes)
        .with_context(|| format!("Failed to write output file: {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "wrote output");
    Ok(OutputRecord {
        path: path.display().to_string(),
        width: frame.width(),
        height: frame.height(),
        hash,
    })
}

fn run_human(spec_path: &str, out_root: &Path) -> Result<ExitCode> {
    let start = Instant::now();
    println!("{} {}", "Generating from:".cyan().bold(), spec_path);
    println!("{} {}", "Output root:".cyan().bold(), out_root.display());

    let loaded = match load_job(Path::new(spec_path)) {
        Ok(loaded) => loaded,
        Err(JobError::Invalid(errors)) => {
            print_job_errors(&errors);
            return Ok(ExitCode::from(1));
        }
        Err(e) => {
            return Err(e).with_context(|| format!("Failed to load job file: {}", spec_path))
        }
    };
    let job = &loaded.job;
    let frames = frame_count(job);
    println!(
        "{} {} ({}, {}x{}, {} frame(s))",
        "Job:".dimmed(),
        job.name,
        job.recipe.kind(),
        job.width(),
        job.height(),
        frames
    );

    let token = CancelToken::new();
    let outcome = render_job(job, &token, |done, total| {
        print!("\r  {} frame {}/{}", "Rendering".dimmed(), done, total);
        let _ = std::io::stdout().flush();
    })
    .context("Generation failed")?;
    if job.animation.is_some() {
        println!();
    }
    let Outcome::Complete(rendered) = outcome else {
        anyhow::bail!("generation was cancelled");
    };

    let records = write_rendered(job, &rendered, out_root, &PngConfig::default())?;
    for record in &records {
        println!(
            "  {} {} {}",
            "+".green(),
            record.path,
            format!("({})", &record.hash[..16]).dimmed()
        );
    }

    let duration_ms = start.elapsed().as_millis() as u64;
    println!(
        "\n{} Generated {} file(s) ({}ms)",
        "SUCCESS".green().bold(),
        records.len(),
        duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

fn run_json(spec_path: &str, out_root: &Path) -> Result<ExitCode> {
    let start = Instant::now();
    let elapsed = || start.elapsed().as_millis() as u64;

    let output = match load_job(Path::new(spec_path)) {
        Err(e) => GenerateOutput::failure(job_error_to_json(&e, spec_path), elapsed()),
        Ok(loaded) => render_json(&loaded.job, &CancelToken::new(), out_root, elapsed),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(if output.success {
        ExitCode::SUCCESS
    } else {
        ExitCode::from(1)
    })
}

/// Renders and writes a job, reporting every failure as a JSON error.
fn render_json(
    job: &Job,
    token: &CancelToken,
    out_root: &Path,
    elapsed: impl Fn() -> u64,
) -> GenerateOutput {
    let rendered = match render_job(job, token, |done, total| {
        debug!(done, total, "frame rendered");
    }) {
        Ok(Outcome::Complete(rendered)) => rendered,
        Ok(Outcome::Cancelled) => {
            return GenerateOutput::failure(
                vec![JsonError::new(
                    error_codes::GENERATION_ERROR,
                    "generation was cancelled",
                )],
                elapsed(),
            )
        }
        Err(e) => {
            return GenerateOutput::failure(
                vec![JsonError::new(error_codes::GENERATION_ERROR, e.to_string())],
                elapsed(),
            )
        }
    };

    match write_rendered(job, &rendered, out_root, &PngConfig::default()) {
        Ok(records) => GenerateOutput::success(records, elapsed()),
        Err(e) => GenerateOutput::failure(
            vec![JsonError::new(error_codes::WRITE_ERROR, format!("{:#}", e))],
            elapsed(),
        ),
    }
}
