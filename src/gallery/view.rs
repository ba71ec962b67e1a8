/// Gallery view tree
///
/// `render_gallery` turns a validated manifest into a platform-free
/// description of everything on screen: section headings, photo tiles with
/// resolved URLs, and the chip entries for navigation. The widget layer is a
/// thin projection of this tree, so grouping, labeling and ordering are all
/// testable right here.

use crate::gallery::bucket::{self, AgeGroup, UNKNOWN_AGE};
use crate::manifest::Manifest;

/// Message shown instead of the gallery when the manifest has no items
pub const EMPTY_MESSAGE: &str = "写真がありません";

/// Identifier of a rendered section, derived from its bucket's age year
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn for_age(age_year: i32) -> Self {
        if age_year == UNKNOWN_AGE {
            Self("age-unknown".to_string())
        } else {
            Self(format!("age-{}", age_year))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One photo tile
#[derive(Debug, Clone, PartialEq)]
pub struct TileView {
    /// Manifest key, used to track thumbnail loads
    pub key: String,
    /// Absolute photo URL
    pub url: String,
    /// Accessible description, also the lightbox caption
    pub alt: String,
}

/// One age-group section: a heading plus its grid of tiles
#[derive(Debug, Clone, PartialEq)]
pub struct SectionView {
    pub id: SectionId,
    pub heading: String,
    pub tiles: Vec<TileView>,
}

/// Navigation chip for one section
#[derive(Debug, Clone, PartialEq)]
pub struct ChipEntry {
    pub section: SectionId,
    pub label: String,
}

/// The whole gallery, ready for the widget layer
#[derive(Debug, Clone, PartialEq)]
pub enum GalleryView {
    /// Manifest had no items: a single message, no sections, no chips
    Empty { message: &'static str },
    /// At least one group rendered
    Grouped {
        total_count: usize,
        updated_at: String,
        sections: Vec<SectionView>,
        chips: Vec<ChipEntry>,
    },
}

impl GalleryView {
    pub fn sections(&self) -> &[SectionView] {
        match self {
            GalleryView::Empty { .. } => &[],
            GalleryView::Grouped { sections, .. } => sections,
        }
    }
}

/// Build the view tree for a manifest. Pure: calling it twice with the same
/// inputs yields the same tree, so a re-render can never duplicate sections.
pub fn render_gallery(
    manifest: &Manifest,
    anchor: &bucket::BirthdayAnchor,
    base: &str,
) -> GalleryView {
    let groups = bucket::bucket_items(&manifest.items);

    if groups.is_empty() {
        return GalleryView::Empty {
            message: EMPTY_MESSAGE,
        };
    }

    let sections: Vec<SectionView> = groups
        .iter()
        .map(|group| render_section(group, anchor, base))
        .collect();

    let chips = groups
        .iter()
        .map(|group| ChipEntry {
            section: SectionId::for_age(group.age_year),
            label: format!("{} ({})", bucket::age_label(group.age_year), group.items.len()),
        })
        .collect();

    GalleryView::Grouped {
        total_count: manifest.items.len(),
        updated_at: manifest.updated_at.clone(),
        sections,
        chips,
    }
}

fn render_section(group: &AgeGroup, anchor: &bucket::BirthdayAnchor, base: &str) -> SectionView {
    let label = bucket::age_range_label(anchor, group.age_year);
    let alt = format!("ひめの写真（{}）", bucket::age_label(group.age_year));

    let tiles = group
        .items
        .iter()
        .map(|item| TileView {
            key: item.key.clone(),
            // Pure concatenation, exactly as published. A bad key renders a
            // broken image, it never aborts the pipeline.
            url: format!("{}/{}", base, item.key),
            alt: alt.clone(),
        })
        .collect();

    SectionView {
        id: SectionId::for_age(group.age_year),
        heading: format!("{}（{}枚）", label, group.items.len()),
        tiles,
    }
}
