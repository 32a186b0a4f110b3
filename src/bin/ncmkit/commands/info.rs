use super::decode_file;
use crate::error::{CliError, Result};
use crate::output::Output;
use crate::util::expand_inputs;
use crate::Context;
use clap::Args;
use ncmkit::{Decoded, Metadata};
use serde::Serialize;
use std::path::Path;

#[derive(Args)]
/// Arguments of `ncmkit info`.
pub struct CmdArgs {
    /// JSON output
    #[arg(long)]
    pub json: bool,

    /// Input files (supports glob)
    #[arg(value_name = "INPUT")]
    pub inputs: Vec<String>,
}

#[derive(Serialize)]
/// One entry of the `--json` report.
struct InfoJson {
    file: String,
    status: &'static str,
    format: Option<&'static str>,
    format_flag: Option<u8>,
    metadata: Option<Metadata>,
    cover_mime: Option<&'static str>,
    cover_len: Option<usize>,
    audio_len: Option<usize>,
    error: Option<String>,
    error_kind: Option<&'static str>,
}

/// Print what each container holds; nothing is written.
pub fn run(ctx: &Context, args: &CmdArgs) -> Result<()> {
    let inputs = expand_inputs(&args.inputs)?;
    let mut reports = Vec::new();
    let mut failed = 0usize;

    for input in &inputs {
        let result = decode_file(input);
        if result.is_err() {
            failed += 1;
        }
        if args.json {
            reports.push(to_json(input, result));
            continue;
        }
        match result {
            Ok(decoded) => print_info(ctx, input, &decoded),
            Err(err) => Output::error_user(format!("[FAIL] {}", err.user_message())),
        }
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if failed > 0 {
        return Err(CliError::BatchFailed {
            failed,
            total: inputs.len(),
        });
    }
    Ok(())
}

/// Human-readable listing for one decoded file.
fn print_info(ctx: &Context, input: &Path, decoded: &Decoded) {
    let meta = &decoded.metadata;
    ctx.out.info_user(input.display());
    ctx.out.info_user(format!(
        "  format:  {} (flag {})",
        decoded.format,
        decoded.format_flag()
    ));
    if decoded.has_metadata {
        ctx.out.info_user(format!("  title:   {}", meta.music_name));
        ctx.out.info_user(format!("  artist:  {}", meta.artist_names()));
        ctx.out.info_user(format!("  album:   {}", meta.album));
        if meta.bitrate > 0 {
            ctx.out
                .info_user(format!("  bitrate: {} kbps", meta.bitrate / 1000));
        }
        if meta.duration > 0 {
            let secs = meta.duration / 1000;
            ctx.out
                .info_user(format!("  length:  {}:{:02}", secs / 60, secs % 60));
        }
    } else {
        ctx.out.warn_user(format!(
            "{}: no metadata block; format sniffed from audio",
            input.display()
        ));
    }
    match &decoded.cover {
        Some(cover) => ctx.out.info_user(format!(
            "  cover:   {} ({} bytes)",
            cover.mime_type(),
            cover.data.len()
        )),
        None => ctx.out.info_user("  cover:   none"),
    }
    ctx.out
        .info_user(format!("  audio:   {} bytes", decoded.audio.len()));
    ctx.out
        .info_diag(format!("  music id: {}", meta.music_id));
}

/// Report entry for one input.
fn to_json(input: &Path, result: Result<Decoded>) -> InfoJson {
    let file = input.display().to_string();
    match result {
        Ok(decoded) => InfoJson {
            file,
            status: "ok",
            format: Some(decoded.format.extension()),
            format_flag: Some(decoded.format_flag()),
            cover_mime: decoded.cover.as_ref().map(ncmkit::Cover::mime_type),
            cover_len: decoded.cover.as_ref().map(|cover| cover.data.len()),
            audio_len: Some(decoded.audio.len()),
            metadata: decoded.has_metadata.then_some(decoded.metadata),
            error: None,
            error_kind: None,
        },
        Err(err) => InfoJson {
            file,
            status: "error",
            format: None,
            format_flag: None,
            metadata: None,
            cover_mime: None,
            cover_len: None,
            audio_len: None,
            error: Some(err.user_message()),
            error_kind: Some(err.kind()),
        },
    }
}
