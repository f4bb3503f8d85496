use color_eyre::eyre::{bail, Context};
use serde::Deserialize;
use std::ffi::OsStr;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

#[derive(Deserialize)]
struct FfprobeOutput {
    #[serde(default)]
    streams: Vec<StreamInfo>,
    format: FormatInfo,
}

#[derive(Deserialize)]
struct StreamInfo {
    width: Option<u32>,
    height: Option<u32>,
}

#[derive(Deserialize)]
struct FormatInfo {
    size: String,
}

/// Probed metadata of one media file.
#[derive(Debug, Clone, Copy)]
pub struct MediaProbe {
    pub width: u32,
    pub height: u32,
    pub size: i64,
}

impl MediaProbe {
    /// The `"W x H"` string stored on the photo row.
    #[must_use]
    pub fn resolution(&self) -> String {
        format!("{} x {}", self.width, self.height)
    }
}

/// Executes ffprobe and returns its stdout as a String.
pub async fn run_ffprobe<S: AsRef<OsStr>>(args: &[S]) -> color_eyre::Result<String> {
    let output = Command::new("ffprobe")
        .args(args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await
        .context("failed to run ffprobe")?;

    if output.status.success() {
        String::from_utf8(output.stdout).context("ffprobe output was not valid UTF-8")
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        bail!("ffprobe failed: {}", stderr.trim());
    }
}

/// Probe a media file for its resolution and byte size.
///
/// # Errors
///
/// Returns an error if ffprobe fails, reports no stream with dimensions, or
/// produces output that cannot be parsed.
pub async fn probe_media(path: &Path) -> color_eyre::Result<MediaProbe> {
    let Some(path_str) = path.as_os_str().to_str() else {
        bail!("ffprobe input path is not valid UTF-8");
    };

    let args = &[
        "-v",
        "quiet",
        "-print_format",
        "json",
        "-show_format",
        "-show_streams",
        path_str,
    ];

    let ffprobe_json = run_ffprobe(args).await?;
    let probe: FfprobeOutput =
        serde_json::from_str(&ffprobe_json).context("failed to parse ffprobe JSON output")?;

    let Some((width, height)) = probe
        .streams
        .iter()
        .find_map(|s| Some((s.width?, s.height?)))
    else {
        bail!("no stream with dimensions in {}", path.display());
    };

    let size: i64 = probe
        .format
        .size
        .parse()
        .context("failed to parse ffprobe size field")?;

    Ok(MediaProbe {
        width,
        height,
        size,
    })
}
