use crate::ffmpeg::run_ffmpeg;
use crate::THUMBNAIL_SIZE;
use color_eyre::Result;
use std::ffi::OsString;
use std::path::Path;

/// Extract one representative frame from a video and write it as the
/// white-padded square thumbnail.
pub async fn generate_video_thumbnail(input: &Path, output: &Path) -> Result<()> {
    let args: Vec<OsString> = vec![
        "-y".into(),
        "-i".into(),
        input.as_os_str().to_owned(),
        "-frames:v".into(),
        "1".into(),
        "-vf".into(),
        scale_pad_filter(THUMBNAIL_SIZE).into(),
        output.as_os_str().to_owned(),
    ];
    run_ffmpeg(&args).await
}

/// ffmpeg filter that scales into a `size`×`size` box (aspect preserved) and
/// pads the remainder with white, centered.
fn scale_pad_filter(size: u32) -> String {
    format!(
        "scale={size}:{size}:force_original_aspect_ratio=decrease,\
         pad={size}:{size}:(ow-iw)/2:(oh-ih)/2:white"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_scales_then_pads_with_white() {
        let filter = scale_pad_filter(200);
        assert_eq!(
            filter,
            "scale=200:200:force_original_aspect_ratio=decrease,pad=200:200:(ow-iw)/2:(oh-ih)/2:white"
        );
    }
}
