/// Chip navigation and scroll synchronization
///
/// The chip bar mirrors the rendered sections one-to-one and tracks which
/// section sits in the viewport's reading area. Visibility is modeled
/// without any platform observer: section pixel spans are derived from the
/// deterministic grid layout, and each scroll event produces a batch of
/// visibility reports that a pure selection function reduces to at most one
/// active section.

use crate::gallery::view::{ChipEntry, SectionId, SectionView};

/// Layout parameters the section spans are derived from. These must match
/// the widget layer's constants exactly or the active chip will drift.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayoutParams {
    pub columns: usize,
    pub tile_size: f32,
    pub grid_spacing: f32,
    pub heading_height: f32,
    pub section_gap: f32,
    pub page_padding: f32,
}

impl LayoutParams {
    /// Columns that fit in the given content width, never less than one
    pub fn columns_for_width(width: f32, tile_size: f32, grid_spacing: f32, page_padding: f32) -> usize {
        let usable = width - 2.0 * page_padding + grid_spacing;
        let per_tile = tile_size + grid_spacing;
        ((usable / per_tile).floor() as usize).max(1)
    }
}

/// Vertical extent of one section in scroll-content coordinates
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpan {
    pub id: SectionId,
    pub top: f32,
    pub bottom: f32,
}

impl SectionSpan {
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Compute each section's pixel span inside the scrollable content
pub fn section_spans(sections: &[SectionView], layout: &LayoutParams) -> Vec<SectionSpan> {
    let mut y = layout.page_padding;
    let mut spans = Vec::with_capacity(sections.len());

    for section in sections {
        let rows = section.tiles.len().div_ceil(layout.columns.max(1));
        let grid_height = if rows == 0 {
            0.0
        } else {
            rows as f32 * layout.tile_size + (rows - 1) as f32 * layout.grid_spacing
        };
        let bottom = y + layout.heading_height + grid_height;

        spans.push(SectionSpan {
            id: section.id.clone(),
            top: y,
            bottom,
        });

        y = bottom + layout.section_gap;
    }

    spans
}

/// The slice of the viewport that counts as the "reading area". Fractions
/// are cut off the top and bottom; the defaults leave the band between 20%
/// and 30% of the viewport height, so the active section is the one under
/// the upper-middle of the screen, not merely any visible one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    pub top_cut: f32,
    pub bottom_cut: f32,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top_cut: 0.20,
            bottom_cut: 0.70,
        }
    }
}

/// How much of one section overlaps the reading band right now
#[derive(Debug, Clone, PartialEq)]
pub struct VisibilityReport {
    pub section: SectionId,
    pub ratio: f32,
    pub is_intersecting: bool,
}

impl ViewportBand {
    /// One report per span for the current scroll position.
    /// `ratio` is overlap height over section height, like an intersection
    /// ratio against a root shrunk to the band.
    pub fn reports(
        &self,
        spans: &[SectionSpan],
        scroll_y: f32,
        viewport_height: f32,
    ) -> Vec<VisibilityReport> {
        let band_top = scroll_y + viewport_height * self.top_cut;
        let band_bottom = scroll_y + viewport_height * (1.0 - self.bottom_cut);

        spans
            .iter()
            .map(|span| {
                let overlap =
                    (span.bottom.min(band_bottom) - span.top.max(band_top)).max(0.0);
                let ratio = if span.height() > 0.0 {
                    overlap / span.height()
                } else {
                    0.0
                };
                VisibilityReport {
                    section: span.id.clone(),
                    ratio,
                    is_intersecting: overlap > 0.0,
                }
            })
            .collect()
    }
}

/// Pick the section whose chip should be active: the intersecting section
/// with the greatest ratio, ties going to the earliest report. `None` when
/// nothing intersects; the caller keeps the current chip rather than
/// flickering to an undefined state.
pub fn select_active(reports: &[VisibilityReport]) -> Option<&SectionId> {
    let mut best: Option<&VisibilityReport> = None;

    for report in reports.iter().filter(|r| r.is_intersecting) {
        match best {
            Some(current) if report.ratio <= current.ratio => {}
            _ => best = Some(report),
        }
    }

    best.map(|r| &r.section)
}

/// The chip bar: one chip per section, exactly one active at a time.
/// Holding the active chip as an index makes a multi-active state
/// unrepresentable, so racing updates can at worst pick the wrong single
/// chip, never two.
#[derive(Debug, Clone, PartialEq)]
pub struct ChipBar {
    chips: Vec<ChipEntry>,
    active: usize,
}

impl ChipBar {
    /// Build the bar with the first chip active. `None` for an empty chip
    /// list; an empty gallery has no chip bar at all.
    pub fn new(chips: Vec<ChipEntry>) -> Option<Self> {
        if chips.is_empty() {
            None
        } else {
            Some(Self { chips, active: 0 })
        }
    }

    /// Total transition: the given section's chip becomes the single active
    /// one. Unknown ids leave the bar untouched.
    pub fn activate(&mut self, id: &SectionId) {
        if let Some(index) = self.chips.iter().position(|c| &c.section == id) {
            self.active = index;
        }
    }

    pub fn active(&self) -> &SectionId {
        &self.chips[self.active].section
    }

    pub fn is_active(&self, id: &SectionId) -> bool {
        self.active() == id
    }

    /// Chips in section order, each with its active flag
    pub fn iter(&self) -> impl Iterator<Item = (&ChipEntry, bool)> {
        self.chips
            .iter()
            .enumerate()
            .map(|(i, chip)| (chip, i == self.active))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gallery::view::TileView;

    fn section(id: &str, tiles: usize) -> SectionView {
        SectionView {
            id: SectionId::for_age(id.parse().unwrap_or(-1)),
            heading: id.to_string(),
            tiles: (0..tiles)
                .map(|i| TileView {
                    key: format!("{}/{}", id, i),
                    url: String::new(),
                    alt: String::new(),
                })
                .collect(),
        }
    }

    fn layout(columns: usize) -> LayoutParams {
        LayoutParams {
            columns,
            tile_size: 100.0,
            grid_spacing: 10.0,
            heading_height: 40.0,
            section_gap: 30.0,
            page_padding: 20.0,
        }
    }

    fn chip(age: i32) -> ChipEntry {
        ChipEntry {
            section: SectionId::for_age(age),
            label: format!("{}", age),
        }
    }

    #[test]
    fn test_section_spans_accumulate() {
        // 5 tiles over 2 columns = 3 rows; 2 tiles = 1 row
        let spans = section_spans(&[section("0", 5), section("1", 2)], &layout(2));

        assert_eq!(spans[0].top, 20.0);
        // 40 heading + 3*100 tiles + 2*10 gaps
        assert_eq!(spans[0].bottom, 20.0 + 40.0 + 320.0);
        // next section starts after the section gap
        assert_eq!(spans[1].top, spans[0].bottom + 30.0);
        assert_eq!(spans[1].bottom, spans[1].top + 40.0 + 100.0);
    }

    #[test]
    fn test_columns_for_width() {
        assert_eq!(LayoutParams::columns_for_width(1100.0, 180.0, 10.0, 20.0), 5);
        // Too narrow for even one tile still yields a single column
        assert_eq!(LayoutParams::columns_for_width(50.0, 180.0, 10.0, 20.0), 1);
    }

    #[test]
    fn test_band_ratio() {
        let spans = vec![SectionSpan {
            id: SectionId::for_age(0),
            top: 0.0,
            bottom: 100.0,
        }];

        // Band sits at 20%..30% of the viewport: content y 200..300 for a
        // 1000-tall viewport at scroll 0, missing a section that ends at 100
        let band = ViewportBand::default();
        let reports = band.reports(&spans, 0.0, 1000.0);
        assert!(!reports[0].is_intersecting);

        // 100-tall viewport: band covers content y 20..30, a 10px overlap
        // of the 100px section
        let reports = band.reports(&spans, 0.0, 100.0);
        assert!(reports[0].is_intersecting);
        assert!((reports[0].ratio - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_select_active_max_ratio_wins() {
        let reports = vec![
            VisibilityReport {
                section: SectionId::for_age(0),
                ratio: 0.2,
                is_intersecting: true,
            },
            VisibilityReport {
                section: SectionId::for_age(1),
                ratio: 0.8,
                is_intersecting: true,
            },
        ];
        assert_eq!(select_active(&reports), Some(&SectionId::for_age(1)));
    }

    #[test]
    fn test_select_active_tie_goes_to_first() {
        let reports = vec![
            VisibilityReport {
                section: SectionId::for_age(0),
                ratio: 0.5,
                is_intersecting: true,
            },
            VisibilityReport {
                section: SectionId::for_age(1),
                ratio: 0.5,
                is_intersecting: true,
            },
        ];
        assert_eq!(select_active(&reports), Some(&SectionId::for_age(0)));
    }

    #[test]
    fn test_select_active_none_intersecting() {
        let reports = vec![VisibilityReport {
            section: SectionId::for_age(0),
            ratio: 0.0,
            is_intersecting: false,
        }];
        assert_eq!(select_active(&reports), None);
    }

    #[test]
    fn test_chip_bar_first_active() {
        let bar = ChipBar::new(vec![chip(0), chip(1), chip(-1)]).unwrap();
        assert!(bar.is_active(&SectionId::for_age(0)));
    }

    #[test]
    fn test_chip_bar_exactly_one_active() {
        let mut bar = ChipBar::new(vec![chip(0), chip(1), chip(-1)]).unwrap();
        bar.activate(&SectionId::for_age(1));

        let active: Vec<bool> = bar.iter().map(|(_, a)| a).collect();
        assert_eq!(active, vec![false, true, false]);

        // Activating an id the bar doesn't know leaves state untouched
        bar.activate(&SectionId::for_age(99));
        assert!(bar.is_active(&SectionId::for_age(1)));
    }

    #[test]
    fn test_chip_bar_empty_is_none() {
        assert!(ChipBar::new(vec![]).is_none());
    }
}
