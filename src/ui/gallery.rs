/// Gallery widgets: header, chip bar, and the scrollable section grids

use iced::widget::image::Handle;
use iced::widget::{button, column, container, mouse_area, row, scrollable, text, Column, Row};
use iced::{ContentFit, Element, Length, Theme};
use std::collections::HashMap;

use crate::config;
use crate::gallery::sync::ChipBar;
use crate::gallery::view::{SectionView, TileView};
use crate::Message;

/// Id of the gallery scrollable, shared by `on_scroll` wiring and the
/// chip-click scroll-to task
pub fn scroll_id() -> scrollable::Id {
    scrollable::Id::new("gallery")
}

/// Full-window centered message: loading, fetch failure, or empty gallery
pub fn status_page(message: &str) -> Element<'_, Message> {
    container(text(message).size(20))
        .width(Length::Fill)
        .height(Length::Fill)
        .center_x(Length::Fill)
        .center_y(Length::Fill)
        .into()
}

/// Title plus the photo-count and last-updated displays
pub fn header(total_count: usize, updated_at: &str) -> Element<'_, Message> {
    let counts = row![
        text(format!("全{}枚", total_count)).size(14),
        text(format!("更新: {}", updated_at)).size(14),
    ]
    .spacing(16);

    container(
        column![text("ひめフォトギャラリー").size(32), counts].spacing(8),
    )
    .padding([16.0, config::PAGE_PADDING])
    .into()
}

/// The chip row. Rendered outside the scroll area so it stays fixed while
/// sections scroll beneath it.
pub fn chip_bar(bar: &ChipBar) -> Element<'_, Message> {
    let mut chips = Row::new().spacing(8);

    for (chip, is_active) in bar.iter() {
        let style: fn(&Theme, button::Status) -> button::Style = if is_active {
            button::primary
        } else {
            button::secondary
        };

        chips = chips.push(
            button(text(chip.label.clone()).size(14))
                .style(style)
                .padding([6.0, 12.0])
                .on_press(Message::ChipPressed(chip.section.clone())),
        );
    }

    container(chips)
        .padding([8.0, config::PAGE_PADDING])
        .into()
}

/// The scrollable stack of sections. Heights here must match the layout
/// constants the section spans are computed from.
pub fn sections<'a>(
    sections: &'a [SectionView],
    thumbnails: &HashMap<String, Handle>,
    columns: usize,
) -> Element<'a, Message> {
    let mut list = Column::new().spacing(config::SECTION_GAP);

    for section in sections {
        list = list.push(section_widget(section, thumbnails, columns));
    }

    scrollable(
        container(list)
            .padding(config::PAGE_PADDING)
            .width(Length::Fill),
    )
    .id(scroll_id())
    .on_scroll(Message::GalleryScrolled)
    .width(Length::Fill)
    .height(Length::Fill)
    .into()
}

fn section_widget<'a>(
    section: &'a SectionView,
    thumbnails: &HashMap<String, Handle>,
    columns: usize,
) -> Element<'a, Message> {
    let heading = container(text(section.heading.as_str()).size(20))
        .center_y(config::HEADING_HEIGHT);

    let mut grid = Column::new().spacing(config::GRID_SPACING);
    for chunk in section.tiles.chunks(columns.max(1)) {
        let mut tiles = Row::new().spacing(config::GRID_SPACING);
        for tile in chunk {
            tiles = tiles.push(tile_widget(tile, thumbnails.get(&tile.key)));
        }
        grid = grid.push(tiles);
    }

    column![heading, grid].into()
}

/// One photo tile. Clicking it opens the lightbox whether or not its
/// thumbnail has arrived yet.
fn tile_widget<'a>(tile: &'a TileView, thumbnail: Option<&Handle>) -> Element<'a, Message> {
    let content: Element<'a, Message> = match thumbnail {
        Some(handle) => iced::widget::image(handle.clone())
            .width(config::TILE_SIZE)
            .height(config::TILE_SIZE)
            .content_fit(ContentFit::Cover)
            .into(),
        None => container(text("…").size(24))
            .style(container::rounded_box)
            .center_x(config::TILE_SIZE)
            .center_y(config::TILE_SIZE)
            .into(),
    };

    mouse_area(content)
        .on_press(Message::TilePressed {
            url: tile.url.clone(),
            alt: tile.alt.clone(),
        })
        .into()
}
