/// Gallery core
///
/// Pure, widget-free logic of the manifest-to-view pipeline:
/// - Age bucketing and bucket labels (bucket.rs)
/// - The view tree built from buckets (view.rs)
/// - Chip navigation state and scroll synchronization (sync.rs)
/// - The lightbox state machine (lightbox.rs)
///
/// Nothing in here touches iced; every module is testable with plain data.

pub mod bucket;
pub mod lightbox;
pub mod sync;
pub mod view;
