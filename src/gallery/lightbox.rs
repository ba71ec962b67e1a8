/// Lightbox state machine
///
/// Two states, closed and open. Closing clears the image source so the
/// decoded full-size photo is dropped immediately instead of lingering for
/// the rest of the session.

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Lightbox {
    is_open: bool,
    current_src: String,
    current_alt: String,
}

impl Lightbox {
    pub fn closed() -> Self {
        Self::default()
    }

    /// Closed to open, triggered by a tile click
    pub fn open(&mut self, src: String, alt: String) {
        self.is_open = true;
        self.current_src = src;
        self.current_alt = alt;
    }

    /// Open to closed, triggered by a backdrop click or Escape.
    /// Clears src/alt; a close on an already-closed lightbox is a no-op.
    pub fn close(&mut self) {
        self.is_open = false;
        self.current_src.clear();
        self.current_alt.clear();
    }

    /// Whether a photo fetched for `src` still belongs on screen. False
    /// once the lightbox closed or reopened on another photo while the
    /// fetch was in flight; such results must be discarded.
    pub fn accepts(&self, src: &str) -> bool {
        self.is_open && self.current_src == src
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    pub fn src(&self) -> &str {
        &self.current_src
    }

    pub fn alt(&self) -> &str {
        &self.current_alt
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_closed() {
        let lightbox = Lightbox::closed();
        assert!(!lightbox.is_open());
        assert_eq!(lightbox.src(), "");
    }

    #[test]
    fn test_open_sets_src_and_alt() {
        let mut lightbox = Lightbox::closed();
        lightbox.open("https://cdn.example/x.jpg".into(), "ひめの写真（0歳）".into());

        assert!(lightbox.is_open());
        assert_eq!(lightbox.src(), "https://cdn.example/x.jpg");
        assert_eq!(lightbox.alt(), "ひめの写真（0歳）");
    }

    #[test]
    fn test_close_clears_src() {
        let mut lightbox = Lightbox::closed();
        lightbox.open("https://cdn.example/x.jpg".into(), "alt".into());
        lightbox.close();

        assert!(!lightbox.is_open());
        assert_eq!(lightbox.src(), "");
        assert_eq!(lightbox.alt(), "");
    }

    #[test]
    fn test_close_when_closed_is_noop() {
        let mut lightbox = Lightbox::closed();
        lightbox.close();
        assert_eq!(lightbox, Lightbox::closed());
    }

    #[test]
    fn test_accepts_current_photo_only() {
        let mut lightbox = Lightbox::closed();
        lightbox.open("a".into(), "alt".into());
        assert!(lightbox.accepts("a"));
        assert!(!lightbox.accepts("b"));
    }

    #[test]
    fn test_closed_while_fetch_in_flight_discards() {
        let mut lightbox = Lightbox::closed();
        lightbox.open("a".into(), "alt".into());
        lightbox.close();
        assert!(!lightbox.accepts("a"));
    }

    #[test]
    fn test_reopened_on_another_photo_discards_old_fetch() {
        let mut lightbox = Lightbox::closed();
        lightbox.open("a".into(), "alt a".into());
        lightbox.open("b".into(), "alt b".into());
        assert!(!lightbox.accepts("a"));
        assert!(lightbox.accepts("b"));
    }

    #[test]
    fn test_reopen_replaces_photo() {
        let mut lightbox = Lightbox::closed();
        lightbox.open("a".into(), "alt a".into());
        lightbox.open("b".into(), "alt b".into());
        assert_eq!(lightbox.src(), "b");
        assert_eq!(lightbox.alt(), "alt b");
    }
}
