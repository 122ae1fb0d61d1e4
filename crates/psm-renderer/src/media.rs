//! Media directives: images, video, audio, PDF, SVG and maps.

use crate::args::DirectiveLine;

/// Embedded media element selected by a directive tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// `#IMG <src> ["alt"] [width=] [height=] [fit=] [alt=]`
    Image,
    /// `#VIDEO youtube=<id> ["title"] [width=] [height=]`
    Video,
    /// `#AUDIO <src> [width=] [height=]`
    Audio,
    /// `#PDF <src> [width=] [height=]`
    Pdf,
    /// `#SVG <src> ["alt"] [width=] [height=] [fit=] [alt=]`
    Svg,
    /// `#MAP <embed-url> [width=] [height=]`
    Map,
}

/// Error returned when a media directive cannot be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    /// Video source other than `youtube=<id>`.
    #[error("unsupported video source `{0}`, only youtube=<id> is supported")]
    UnsupportedVideoSource(String),
}

const YOUTUBE_EMBED: &str = "https://www.youtube.com/embed/";
const VIDEO_WIDTH: &str = "560";
const VIDEO_HEIGHT: &str = "315";

/// Render a media directive block.
///
/// Only the first line of the block is read. Missing attributes render as
/// empty strings.
pub fn render_media(kind: MediaKind, block: &str) -> Result<String, MediaError> {
    let line = DirectiveLine::parse(block);
    let src = line.source.unwrap_or_default();
    let args = &line.args;
    let width = args.get_or_empty("width");
    let height = args.get_or_empty("height");

    let html = match kind {
        MediaKind::Image | MediaKind::Svg => {
            let alt = args
                .get("alt")
                .or_else(|| args.first_quoted())
                .unwrap_or_default();
            let fit = args.get_or_empty("fit");
            format!(
                r#"<img src="{src}" alt="{alt}" width="{width}" height="{height}" class="img object-fit-{fit}">"#
            )
        }
        MediaKind::Video => {
            let video_id = youtube_id(src)
                .ok_or_else(|| MediaError::UnsupportedVideoSource(src.to_owned()))?;
            let title = args.first_quoted().unwrap_or_default();
            let width = args.get("width").unwrap_or(VIDEO_WIDTH);
            let height = args.get("height").unwrap_or(VIDEO_HEIGHT);
            let heading = if title.is_empty() {
                String::new()
            } else {
                format!("<h3>{title}</h3>\n")
            };
            format!(
                "<div class=\"psm-video-wrapper\">\n{heading}<iframe width=\"{width}\" height=\"{height}\" \
                 src=\"{YOUTUBE_EMBED}{video_id}\" title=\"{title}\" frameborder=\"0\" \
                 allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share\" \
                 referrerpolicy=\"strict-origin-when-cross-origin\" allowfullscreen></iframe>\n</div>"
            )
        }
        MediaKind::Audio => {
            format!(r#"<audio src="{src}" width="{width}" height="{height}" controls></audio>"#)
        }
        MediaKind::Pdf => format!(
            r#"<embed src="{src}" width="{width}" height="{height}" type="application/pdf">"#
        ),
        MediaKind::Map => format!(
            r#"<iframe src="{src}" width="{width}" height="{height}" allowfullscreen></iframe>"#
        ),
    };

    Ok(html + "\n")
}

/// Extract the video id from a `youtube=<id>` source.
fn youtube_id(src: &str) -> Option<&str> {
    let (provider, id) = src.split_once('=')?;
    (provider.eq_ignore_ascii_case("youtube") && !id.is_empty()).then_some(id)
}
