//! Metadata probing and thumbnail generation for uploaded media.
//!
//! Every thumbnail is a 200×200 PNG: the source frame is scaled to fit the
//! box while preserving its aspect ratio, then centered on a white canvas.
//! Photos are processed natively with the `image` crate; videos go through a
//! single `ffmpeg` invocation that extracts one representative frame with the
//! equivalent scale+pad filter. Resolution and byte size come from `ffprobe`.

mod ffmpeg;
mod ffprobe;
mod photo;
mod video;

use color_eyre::Result;
use std::path::Path;

pub use ffprobe::{probe_media, MediaProbe};

/// Width and height of generated thumbnails, in pixels.
pub const THUMBNAIL_SIZE: u32 = 200;

/// Generate the thumbnail for one stored media file.
///
/// # Errors
///
/// Returns an error if the source file is malformed or unreadable, or if the
/// `ffmpeg` invocation fails for a video.
pub async fn generate_thumbnail(input: &Path, output: &Path, is_video: bool) -> Result<()> {
    if let Some(parent) = output.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    if is_video {
        video::generate_video_thumbnail(input, output).await
    } else {
        let input = input.to_owned();
        let output = output.to_owned();
        tokio::task::spawn_blocking(move || photo::generate_photo_thumbnail(&input, &output))
            .await??;
        Ok(())
    }
}
