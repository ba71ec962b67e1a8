/// Lightbox overlay widget
///
/// Stacked over the gallery when the lightbox is open. Clicking the dark
/// backdrop or pressing Escape closes it; clicking the photo itself is
/// captured before it reaches the backdrop, so the lightbox stays open.

use iced::widget::image::Handle;
use iced::widget::{column, container, mouse_area, opaque, text};
use iced::{Alignment, Color, ContentFit, Element, Length, Theme};

use crate::gallery::lightbox::Lightbox;
use crate::Message;

/// Bounds of the displayed photo; the image scales to fit inside
const PHOTO_WIDTH: f32 = 960.0;
const PHOTO_HEIGHT: f32 = 620.0;

pub fn overlay(lightbox: &Lightbox, photo: Option<Handle>) -> Element<'_, Message> {
    let photo_area: Element<'_, Message> = match photo {
        Some(handle) => iced::widget::image(handle)
            .width(PHOTO_WIDTH)
            .height(PHOTO_HEIGHT)
            .content_fit(ContentFit::Contain)
            .into(),
        // Bytes still in flight; keep the frame so the overlay doesn't jump
        None => container(text("読み込み中…").size(18))
            .center_x(PHOTO_WIDTH)
            .center_y(PHOTO_HEIGHT)
            .into(),
    };

    let content = column![
        mouse_area(photo_area).on_press(Message::LightboxImagePressed),
        text(lightbox.alt().to_string()).size(14),
    ]
    .spacing(12)
    .align_x(Alignment::Center);

    // Inner opaque captures clicks on the photo/caption; only true backdrop
    // clicks fall through to the dismissing mouse_area
    opaque(
        mouse_area(
            container(opaque(content))
                .width(Length::Fill)
                .height(Length::Fill)
                .center_x(Length::Fill)
                .center_y(Length::Fill)
                .style(backdrop),
        )
        .on_press(Message::LightboxDismissed),
    )
}

fn backdrop(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(Color::from_rgba(0.0, 0.0, 0.0, 0.88).into()),
        ..container::Style::default()
    }
}
