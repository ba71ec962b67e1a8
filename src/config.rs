/// Deployment and layout constants
///
/// Everything here is compiled in. The gallery has no CLI flags and no
/// environment variables; pointing it at a different CDN or collection
/// means editing these values.

use crate::gallery::bucket::BirthdayAnchor;

/// CDN origin serving the manifest and the photos (no trailing slash)
pub const CDN_BASE: &str = "https://akadra-family.com";

/// Collection name, i.e. the `<collection>` in `/photos/<collection>/index.json`
pub const COLLECTION: &str = "hime";

/// Hime's birthday. Age buckets are bounded by anniversaries of this date.
pub const BIRTHDAY: BirthdayAnchor = BirthdayAnchor::new(2021, 10, 23);

// ========== Layout ==========

/// Edge length of a square photo tile, in logical pixels
pub const TILE_SIZE: f32 = 180.0;

/// Gap between tiles within a section grid
pub const GRID_SPACING: f32 = 10.0;

/// Vertical space reserved for a section heading
pub const HEADING_HEIGHT: f32 = 48.0;

/// Vertical gap between consecutive sections
pub const SECTION_GAP: f32 = 32.0;

/// Padding around the scrollable gallery content
pub const PAGE_PADDING: f32 = 20.0;

/// Initial window size; also the viewport estimate before the first
/// scroll event reports real bounds
pub const WINDOW_WIDTH: f32 = 1100.0;
pub const WINDOW_HEIGHT: f32 = 800.0;

/// Longest edge of the decoded grid thumbnails
pub const THUMBNAIL_SIZE: u32 = 256;
