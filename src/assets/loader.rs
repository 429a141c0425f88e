//! The one asynchronous boundary of an editing session: fetching and decoding the base image.
//!
//! The shell starts a load with [`LoadTracker::begin`], awaits the bytes however it likes, then
//! hands them back with the ticket. Only the most recent ticket may install an image; anything
//! older is reported as [`ThumbError::StaleResult`] and dropped without being decoded.

use std::path::Path;

use crate::assets::decode::{BaseImage, decode_image};
use crate::assets::youtube::ThumbnailVariant;
use crate::foundation::error::{ThumbError, ThumbResult};

/// Still-image extensions accepted from a file picker.
pub const STILL_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "bmp"];
/// Short video containers accepted for preview only.
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm"];

/// What a source decodes to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MediaKind {
    /// A raster image that can serve as the base image.
    Still,
    /// A video file; previewable by the shell but never composited.
    Video,
}

/// Where a base image comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImageSource {
    /// A user-selected file, identified by name.
    File {
        /// File name including extension.
        name: String,
    },
    /// One of the thumbnail candidates of a video.
    Thumbnail {
        /// Resolution variant.
        variant: ThumbnailVariant,
        /// Fully-qualified image URL.
        url: String,
    },
}

impl ImageSource {
    /// Classify the source, rejecting unsupported file types.
    pub fn media_kind(&self) -> ThumbResult<MediaKind> {
        match self {
            Self::File { name } => classify_file_name(name),
            Self::Thumbnail { .. } => Ok(MediaKind::Still),
        }
    }
}

/// Classify a file by extension (case-insensitive).
pub fn classify_file_name(name: &str) -> ThumbResult<MediaKind> {
    let ext = Path::new(name)
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or_else(|| ThumbError::invalid_input(format!("file '{name}' has no extension")))?;
    if STILL_EXTENSIONS.contains(&ext.as_str()) {
        Ok(MediaKind::Still)
    } else if VIDEO_EXTENSIONS.contains(&ext.as_str()) {
        Ok(MediaKind::Video)
    } else {
        Err(ThumbError::invalid_input(format!(
            "unsupported file type '.{ext}'"
        )))
    }
}

/// Handle for one in-flight load.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    source: ImageSource,
    kind: MediaKind,
}

impl LoadTicket {
    /// Monotonic load generation.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Source this ticket was issued for.
    pub fn source(&self) -> &ImageSource {
        &self.source
    }

    /// Classified media kind.
    pub fn kind(&self) -> MediaKind {
        self.kind
    }
}

/// Issues load tickets and rejects superseded results.
#[derive(Debug, Default)]
pub struct LoadTracker {
    current: u64,
    pending: bool,
}

impl LoadTracker {
    /// Fresh tracker with no load in flight.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load; every earlier ticket becomes stale.
    pub fn begin(&mut self, source: ImageSource) -> ThumbResult<LoadTicket> {
        let kind = source.media_kind()?;
        self.current += 1;
        self.pending = true;
        Ok(LoadTicket {
            generation: self.current,
            source,
            kind,
        })
    }

    /// `true` while the latest ticket has not completed or failed.
    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Ok if `ticket` is the latest one.
    pub fn check(&self, ticket: &LoadTicket) -> ThumbResult<()> {
        if ticket.generation != self.current {
            return Err(ThumbError::StaleResult {
                ticket: ticket.generation,
                current: self.current,
            });
        }
        Ok(())
    }

    /// Decode the bytes for `ticket`. Stale tickets are rejected before any decoding.
    pub fn complete(&mut self, ticket: &LoadTicket, bytes: &[u8]) -> ThumbResult<BaseImage> {
        self.check(ticket)?;
        self.pending = false;
        if ticket.kind == MediaKind::Video {
            return Err(ThumbError::invalid_input(
                "video sources are preview-only; pick a still image to edit",
            ));
        }
        decode_image(bytes)
    }

    /// Record that the fetch for `ticket` failed before producing bytes.
    pub fn fail(&mut self, ticket: &LoadTicket) -> ThumbResult<()> {
        self.check(ticket)?;
        self.pending = false;
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/loader.rs"]
mod tests;
