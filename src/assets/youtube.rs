//! Thumbnail candidates for a video link.
//!
//! Only URL handling lives here; fetching the images is the shell's job. A candidate that fails
//! to load is hidden from the grid without affecting the others.

use crate::foundation::error::{ThumbError, ThumbResult};

const THUMBNAIL_HOST: &str = "https://img.youtube.com/vi";
const VIDEO_ID_LEN: usize = 11;

/// Resolution variants published for every video.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThumbnailVariant {
    /// 120x90.
    Default,
    /// 320x180.
    Medium,
    /// 480x360.
    High,
    /// Up to 1280x720; not every video has one.
    Max,
}

impl ThumbnailVariant {
    /// All variants, smallest first.
    pub const ALL: [Self; 4] = [Self::Default, Self::Medium, Self::High, Self::Max];

    fn file_name(self) -> &'static str {
        match self {
            Self::Default => "default.jpg",
            Self::Medium => "mqdefault.jpg",
            Self::High => "hqdefault.jpg",
            Self::Max => "maxresdefault.jpg",
        }
    }
}

/// Image URL of one thumbnail variant.
pub fn thumbnail_url(video_id: &str, variant: ThumbnailVariant) -> String {
    format!("{THUMBNAIL_HOST}/{video_id}/{}", variant.file_name())
}

/// Pull the 11-character video id out of a watch, short, embed or share link.
pub fn extract_video_id(url: &str) -> ThumbResult<String> {
    let url = url.trim();
    if url.is_empty() {
        return Err(ThumbError::invalid_input("video URL is empty"));
    }
    let invalid = || ThumbError::invalid_input(format!("not a recognized video URL: '{url}'"));

    let rest = url
        .strip_prefix("https://")
        .or_else(|| url.strip_prefix("http://"))
        .unwrap_or(url);
    let (host, path) = rest.split_once('/').unwrap_or((rest, ""));
    let host = host.to_ascii_lowercase();
    let host = ["www.", "m.", "music."]
        .iter()
        .find_map(|p| host.strip_prefix(p))
        .unwrap_or(&host);

    let (path, query) = match path.split_once('?') {
        Some((p, q)) => (p, q),
        None => (path, ""),
    };
    let path = path.split('#').next().unwrap_or_default();
    let query = query.split('#').next().unwrap_or_default();

    let candidate = match host {
        "youtu.be" => path.split('/').next(),
        "youtube.com" | "youtube-nocookie.com" => {
            let mut segs = path.split('/').filter(|s| !s.is_empty());
            match segs.next() {
                Some("watch") => query
                    .split('&')
                    .find_map(|kv| kv.strip_prefix("v=")),
                Some("embed" | "shorts" | "v" | "live") => segs.next(),
                _ => None,
            }
        }
        _ => None,
    };

    let id = candidate.ok_or_else(invalid)?;
    if !is_video_id(id) {
        return Err(invalid());
    }
    Ok(id.to_string())
}

fn is_video_id(s: &str) -> bool {
    s.len() == VIDEO_ID_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// One entry in the candidate grid.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailCandidate {
    /// Resolution variant.
    pub variant: ThumbnailVariant,
    /// Image URL.
    pub url: String,
    hidden: bool,
}

impl ThumbnailCandidate {
    /// `false` once the candidate failed to load.
    pub fn is_visible(&self) -> bool {
        !self.hidden
    }
}

/// The ordered candidate grid for one video.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ThumbnailGrid {
    video_id: String,
    candidates: Vec<ThumbnailCandidate>,
}

impl ThumbnailGrid {
    /// Grid for a video link.
    pub fn from_url(url: &str) -> ThumbResult<Self> {
        Ok(Self::for_video_id(&extract_video_id(url)?))
    }

    /// Grid for a known video id, one candidate per variant.
    pub fn for_video_id(video_id: &str) -> Self {
        Self {
            video_id: video_id.to_string(),
            candidates: ThumbnailVariant::ALL
                .iter()
                .map(|&variant| ThumbnailCandidate {
                    variant,
                    url: thumbnail_url(video_id, variant),
                    hidden: false,
                })
                .collect(),
        }
    }

    /// Video id the grid was built for.
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    /// Every candidate, hidden or not.
    pub fn candidates(&self) -> &[ThumbnailCandidate] {
        &self.candidates
    }

    /// Candidates that have not failed, in variant order.
    pub fn visible(&self) -> impl Iterator<Item = &ThumbnailCandidate> {
        self.candidates.iter().filter(|c| c.is_visible())
    }

    /// Hide the candidate with this URL. Returns `false` for unknown URLs.
    pub fn mark_failed(&mut self, url: &str) -> bool {
        match self.candidates.iter_mut().find(|c| c.url == url) {
            Some(c) => {
                c.hidden = true;
                true
            }
            None => false,
        }
    }

    /// Image source for a visible candidate.
    pub fn source_for(&self, url: &str) -> Option<crate::assets::loader::ImageSource> {
        self.visible()
            .find(|c| c.url == url)
            .map(|c| crate::assets::loader::ImageSource::Thumbnail {
                variant: c.variant,
                url: c.url.clone(),
            })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/youtube.rs"]
mod tests;
