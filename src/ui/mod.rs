/// Widget layer
///
/// Thin projection of the pure gallery view tree onto iced widgets:
/// - Header, chip bar, and section grids (gallery.rs)
/// - The full-screen lightbox overlay (lightbox.rs)
///
/// No gallery logic lives here; everything it draws comes precomputed from
/// the `gallery` module.

pub mod gallery;
pub mod lightbox;
