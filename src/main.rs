use iced::widget::image::Handle;
use iced::widget::{column, scrollable, stack};
use iced::{keyboard, Element, Size, Subscription, Task, Theme};
use std::collections::{HashMap, HashSet};

mod config;
mod gallery;
mod manifest;
mod net;
mod ui;

use gallery::lightbox::Lightbox;
use gallery::sync::{self, ChipBar, LayoutParams, SectionSpan, ViewportBand};
use gallery::view::{self, GalleryView, SectionId};
use manifest::{Manifest, ManifestError};

/// Main application state
struct HimeGallery {
    /// Where the manifest-to-view pipeline currently stands
    stage: Stage,
    /// The full-screen photo viewer; independent of the pipeline stage
    lightbox: Lightbox,
    /// Decoded photo for the open lightbox, dropped on close
    lightbox_photo: Option<Handle>,
    /// Current window size, drives the grid column count
    window: Size,
}

/// Pipeline stage. The manifest fetch is the single suspension point:
/// nothing renders until it resolves, and a failure is terminal for the
/// session (no retries; relaunch to try again).
enum Stage {
    Loading,
    Failed(String),
    Ready(Ready),
}

/// Everything derived from a successfully fetched manifest
struct Ready {
    view: GalleryView,
    /// None when the gallery is empty (no sections, no chip bar)
    chip_bar: Option<ChipBar>,
    /// Section pixel spans matching the current column count
    spans: Vec<SectionSpan>,
    columns: usize,
    /// Decoded thumbnails by manifest key
    thumbnails: HashMap<String, Handle>,
    /// Keys with a fetch in flight
    pending: HashSet<String>,
    scroll_y: f32,
    viewport_height: f32,
}

/// Application messages (events)
#[derive(Debug, Clone)]
enum Message {
    /// The manifest fetch resolved, one way or the other
    ManifestFetched(Result<Manifest, ManifestError>),
    /// User clicked a navigation chip
    ChipPressed(SectionId),
    /// The gallery scrollable moved
    GalleryScrolled(scrollable::Viewport),
    /// The window was resized
    WindowResized(Size),
    /// User clicked a photo tile
    TilePressed { url: String, alt: String },
    /// A tile thumbnail finished downloading/decoding
    ThumbnailFetched {
        key: String,
        result: Result<Handle, String>,
    },
    /// The lightbox's full-size photo arrived
    LightboxPhotoFetched {
        src: String,
        result: Result<Handle, String>,
    },
    /// Click on the lightbox photo itself; deliberately keeps it open
    LightboxImagePressed,
    /// Backdrop click or Escape
    LightboxDismissed,
}

impl HimeGallery {
    /// Create the application and kick off the manifest fetch
    fn new() -> (Self, Task<Message>) {
        println!(
            "🖼️ Hime gallery starting, manifest from {}/photos/{}/index.json",
            config::CDN_BASE,
            config::COLLECTION
        );

        (
            HimeGallery {
                stage: Stage::Loading,
                lightbox: Lightbox::closed(),
                lightbox_photo: None,
                window: Size::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT),
            },
            Task::perform(
                manifest::fetch_manifest(
                    config::CDN_BASE.to_string(),
                    config::COLLECTION.to_string(),
                ),
                Message::ManifestFetched,
            ),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestFetched(Ok(manifest)) => {
                println!(
                    "✅ Manifest loaded: {} photos, updated {}",
                    manifest.items.len(),
                    manifest.updated_at
                );

                let view = view::render_gallery(&manifest, &config::BIRTHDAY, config::CDN_BASE);
                let columns = columns_for(self.window.width);
                let spans = sync::section_spans(view.sections(), &layout_params(columns));
                let chip_bar = match &view {
                    GalleryView::Grouped { chips, .. } => ChipBar::new(chips.clone()),
                    GalleryView::Empty { .. } => None,
                };

                let mut ready = Ready {
                    view,
                    chip_bar,
                    spans,
                    columns,
                    thumbnails: HashMap::new(),
                    pending: HashSet::new(),
                    scroll_y: 0.0,
                    viewport_height: self.window.height,
                };

                let task = request_nearby_thumbnails(&mut ready);
                self.stage = Stage::Ready(ready);
                task
            }

            Message::ManifestFetched(Err(error)) => {
                eprintln!("❌ Manifest fetch failed: {}", error);
                self.stage = Stage::Failed(error.to_string());
                Task::none()
            }

            Message::ChipPressed(section) => {
                let Stage::Ready(ready) = &mut self.stage else {
                    return Task::none();
                };

                // Optimistic: the chip activates now, not when the scroll
                // feedback catches up
                if let Some(bar) = &mut ready.chip_bar {
                    bar.activate(&section);
                }

                match ready.spans.iter().find(|s| s.id == section) {
                    Some(span) => scrollable::scroll_to(
                        ui::gallery::scroll_id(),
                        scrollable::AbsoluteOffset {
                            x: 0.0,
                            y: (span.top - config::PAGE_PADDING).max(0.0),
                        },
                    ),
                    None => Task::none(),
                }
            }

            Message::GalleryScrolled(viewport) => {
                let Stage::Ready(ready) = &mut self.stage else {
                    return Task::none();
                };

                ready.scroll_y = viewport.absolute_offset().y;
                ready.viewport_height = viewport.bounds().height;

                let reports = ViewportBand::default().reports(
                    &ready.spans,
                    ready.scroll_y,
                    ready.viewport_height,
                );
                // No intersecting section: keep the current chip
                if let Some(active) = sync::select_active(&reports) {
                    if let Some(bar) = &mut ready.chip_bar {
                        bar.activate(active);
                    }
                }

                request_nearby_thumbnails(ready)
            }

            Message::WindowResized(size) => {
                self.window = size;

                let Stage::Ready(ready) = &mut self.stage else {
                    return Task::none();
                };

                ready.columns = columns_for(size.width);
                ready.spans =
                    sync::section_spans(ready.view.sections(), &layout_params(ready.columns));
                request_nearby_thumbnails(ready)
            }

            Message::TilePressed { url, alt } => {
                println!("🔍 Opening lightbox: {}", url);
                self.lightbox.open(url.clone(), alt);
                self.lightbox_photo = None;

                Task::perform(
                    async move {
                        let result = net::fetch_photo(url.clone()).await;
                        (url, result)
                    },
                    |(src, result)| Message::LightboxPhotoFetched { src, result },
                )
            }

            Message::ThumbnailFetched { key, result } => {
                if let Stage::Ready(ready) = &mut self.stage {
                    ready.pending.remove(&key);
                    match result {
                        Ok(handle) => {
                            ready.thumbnails.insert(key, handle);
                        }
                        // One broken photo degrades to its placeholder only
                        Err(error) => eprintln!("⚠️ Thumbnail failed for {}: {}", key, error),
                    }
                }
                Task::none()
            }

            Message::LightboxPhotoFetched { src, result } => {
                // Discard stale results: the lightbox may have been closed
                // or reopened on another photo while this was in flight
                if self.lightbox.accepts(&src) {
                    match result {
                        Ok(handle) => self.lightbox_photo = Some(handle),
                        Err(error) => eprintln!("⚠️ Lightbox photo failed: {}", error),
                    }
                }
                Task::none()
            }

            Message::LightboxImagePressed => Task::none(),

            Message::LightboxDismissed => {
                self.lightbox.close();
                self.lightbox_photo = None;
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let base: Element<'_, Message> = match &self.stage {
            Stage::Loading => ui::gallery::status_page("読み込み中…"),
            Stage::Failed(message) => ui::gallery::status_page(message),
            Stage::Ready(ready) => match &ready.view {
                GalleryView::Empty { message } => ui::gallery::status_page(message),
                GalleryView::Grouped {
                    total_count,
                    updated_at,
                    sections,
                    ..
                } => {
                    let mut page = column![ui::gallery::header(*total_count, updated_at)];
                    if let Some(bar) = &ready.chip_bar {
                        page = page.push(ui::gallery::chip_bar(bar));
                    }
                    page = page.push(ui::gallery::sections(
                        sections,
                        &ready.thumbnails,
                        ready.columns,
                    ));
                    page.into()
                }
            },
        };

        if self.lightbox.is_open() {
            stack![
                base,
                ui::lightbox::overlay(&self.lightbox, self.lightbox_photo.clone())
            ]
            .into()
        } else {
            base
        }
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            keyboard::on_key_press(handle_key),
            iced::window::resize_events().map(|(_id, size)| Message::WindowResized(size)),
        ])
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

/// Escape closes the lightbox; closing an already-closed one is a no-op
fn handle_key(key: keyboard::Key, _modifiers: keyboard::Modifiers) -> Option<Message> {
    match key {
        keyboard::Key::Named(keyboard::key::Named::Escape) => Some(Message::LightboxDismissed),
        _ => None,
    }
}

fn columns_for(width: f32) -> usize {
    LayoutParams::columns_for_width(
        width,
        config::TILE_SIZE,
        config::GRID_SPACING,
        config::PAGE_PADDING,
    )
}

fn layout_params(columns: usize) -> LayoutParams {
    LayoutParams {
        columns,
        tile_size: config::TILE_SIZE,
        grid_spacing: config::GRID_SPACING,
        heading_height: config::HEADING_HEIGHT,
        section_gap: config::SECTION_GAP,
        page_padding: config::PAGE_PADDING,
    }
}

/// Kick off thumbnail fetches for every tile whose section sits within one
/// viewport above or two below the visible range and isn't loaded or in
/// flight yet. This is the lazy-loading policy: far-away sections cost
/// nothing until scrolled toward.
fn request_nearby_thumbnails(ready: &mut Ready) -> Task<Message> {
    let min_y = ready.scroll_y - ready.viewport_height;
    let max_y = ready.scroll_y + 2.0 * ready.viewport_height;

    let mut tasks = Vec::new();

    for (section, span) in ready.view.sections().iter().zip(&ready.spans) {
        if span.bottom < min_y || span.top > max_y {
            continue;
        }

        for tile in &section.tiles {
            if ready.thumbnails.contains_key(&tile.key) || ready.pending.contains(&tile.key) {
                continue;
            }
            ready.pending.insert(tile.key.clone());

            let key = tile.key.clone();
            let url = tile.url.clone();
            tasks.push(Task::perform(
                async move { (key, net::fetch_thumbnail(url).await) },
                |(key, result)| Message::ThumbnailFetched { key, result },
            ));
        }
    }

    Task::batch(tasks)
}

fn main() -> iced::Result {
    iced::application("Hime Gallery", HimeGallery::update, HimeGallery::view)
        .subscription(HimeGallery::subscription)
        .theme(HimeGallery::theme)
        .window_size(Size::new(config::WINDOW_WIDTH, config::WINDOW_HEIGHT))
        .centered()
        .run_with(HimeGallery::new)
}
