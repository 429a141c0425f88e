/// Image decoding into a retained, render-ready paint.
pub mod decode;
/// Ticketed base-image loads.
pub mod loader;
/// Thumbnail candidates derived from a video link.
pub mod youtube;
