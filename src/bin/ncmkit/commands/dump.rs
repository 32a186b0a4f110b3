use super::decode_file;
use crate::error::{CliError, Result};
use crate::output::Output;
use crate::tagging::tagged_audio;
use crate::util::{expand_inputs, sibling_path};
use crate::Context;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::borrow::Cow;
use std::fs;
use std::path::{Path, PathBuf};

const DUMP_PROGRESS_TEMPLATE: &str = "{prefix} [{bar:40}] {pos}/{len}";

#[derive(Args)]
/// Arguments of `ncmkit dump`.
pub struct CmdArgs {
    /// Output directory (default: next to each input).
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also write the embedded cover image.
    #[arg(long)]
    pub cover: bool,

    /// Overwrite existing output files.
    #[arg(long)]
    pub overwrite: bool,

    /// Write the bare stream without an ID3 tag.
    #[arg(long)]
    pub no_tag: bool,

    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Input files (supports glob)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

/// Effective options after merging settings and flags.
struct DumpOptions {
    output_dir: Option<PathBuf>,
    cover: bool,
    overwrite: bool,
    tag: bool,
}

#[derive(Serialize)]
/// One entry of the `--json` report.
struct DumpJson {
    file: String,
    status: &'static str,
    format: Option<&'static str>,
    output: Option<String>,
    cover: Option<String>,
    tagged: bool,
    error: Option<String>,
    error_kind: Option<&'static str>,
}

/// Files written for one input.
struct Dumped {
    format: ncmkit::MusicFormat,
    audio_path: PathBuf,
    cover_path: Option<PathBuf>,
    tagged: bool,
}

/// Decode every input, keep going past failures, fail the batch at the end.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let opts = DumpOptions {
        output_dir: args.output.clone().or_else(|| ctx.settings.output_dir.clone()),
        cover: args.cover || ctx.settings.cover,
        overwrite: args.overwrite || ctx.settings.overwrite,
        tag: !args.no_tag,
    };
    if let Some(dir) = &opts.output_dir {
        fs::create_dir_all(dir)?;
    }

    let progress = if ctx.out.quiet() || args.json || inputs.len() < 2 {
        None
    } else {
        let bar = ProgressBar::new(inputs.len() as u64);
        bar.set_style(
            ProgressStyle::with_template(DUMP_PROGRESS_TEMPLATE)
                .map_err(|e| CliError::Message(e.to_string()))?
                .progress_chars("=>-"),
        );
        bar.set_prefix("dump");
        Some(bar)
    };

    let mut reports = Vec::new();
    let mut failed = 0usize;

    for input in &inputs {
        let result = dump_one(input, &opts);
        match &result {
            Ok(dumped) => {
                let line = format!(
                    "[OK] {} -> {}",
                    input.display(),
                    dumped.audio_path.display()
                );
                if !args.json {
                    if let Some(bar) = &progress {
                        bar.println(line);
                    } else {
                        ctx.out.info_user(line);
                    }
                }
            }
            Err(err) => {
                failed += 1;
                if !args.json {
                    let line = format!("[FAIL] {}", err.user_message());
                    if let Some(bar) = &progress {
                        bar.suspend(|| Output::error_user(&line));
                    } else {
                        Output::error_user(&line);
                    }
                }
            }
        }
        if args.json {
            reports.push(to_json(input, &result));
        }
        if let Some(bar) = &progress {
            bar.inc(1);
        }
    }

    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    } else {
        ctx.out.info_user(format!(
            "done: {} ok, {failed} failed",
            inputs.len() - failed
        ));
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: inputs.len(),
        });
    }
    Ok(())
}

/// Decode one container and write its outputs.
fn dump_one(input: &Path, opts: &DumpOptions) -> Result<Dumped> {
    let decoded = decode_file(input)?;
    let dir = opts.output_dir.as_deref();

    let audio_path = sibling_path(input, dir, decoded.format.extension());
    let audio = if opts.tag {
        tagged_audio(&decoded)?
    } else {
        Cow::Borrowed(decoded.audio.as_slice())
    };
    let tagged = matches!(audio, Cow::Owned(_));
    write_output(&audio_path, &audio, opts.overwrite)?;

    let cover_path = match (&decoded.cover, opts.cover) {
        (Some(cover), true) => {
            let path = sibling_path(input, dir, cover.extension());
            write_output(&path, &cover.data, opts.overwrite)?;
            Some(path)
        }
        _ => None,
    };

    Ok(Dumped {
        format: decoded.format,
        audio_path,
        cover_path,
        tagged,
    })
}

/// Refuses to replace an existing file unless `overwrite` is set.
fn write_output(path: &Path, data: &[u8], overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(CliError::OutputExists(path.display().to_string()));
    }
    fs::write(path, data)?;
    Ok(())
}

/// Report entry for one input.
fn to_json(input: &Path, result: &Result<Dumped>) -> DumpJson {
    let file = input.display().to_string();
    match result {
        Ok(dumped) => DumpJson {
            file,
            status: "ok",
            format: Some(dumped.format.extension()),
            output: Some(dumped.audio_path.display().to_string()),
            cover: dumped
                .cover_path
                .as_ref()
                .map(|path| path.display().to_string()),
            tagged: dumped.tagged,
            error: None,
            error_kind: None,
        },
        Err(err) => DumpJson {
            file,
            status: "error",
            format: None,
            output: None,
            cover: None,
            tagged: false,
            error: Some(err.user_message()),
            error_kind: Some(err.kind()),
        },
    }
}
