//! Frame layout
//!
//! ```text
//! +---------------------------------+
//! | Title (1 line)                  |
//! +---------------------------------+
//! |                                 |
//! | Content                         |
//! |                                 |
//! +---------------------------------+
//! | Message line (1 line)           |
//! | Status bar (1 line)             |
//! +---------------------------------+
//! ```

use ratatui::prelude::*;

/// Regions of one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AppLayout {
    pub title: Rect,
    pub content: Rect,
    /// Spinner, notice or error
    pub message: Rect,
    pub status_bar: Rect,
}

impl AppLayout {
    /// Splits the terminal area.
    ///
    /// Below four lines everything goes to the content area.
    #[must_use]
    pub fn new(area: Rect) -> Self {
        if area.height < 4 {
            return AppLayout {
                content: area,
                ..AppLayout::default()
            };
        }

        let bottom = area.y + area.height;
        AppLayout {
            title: Rect::new(area.x, area.y, area.width, 1),
            content: Rect::new(area.x, area.y + 1, area.width, area.height - 3),
            message: Rect::new(area.x, bottom - 2, area.width, 1),
            status_bar: Rect::new(area.x, bottom - 1, area.width, 1),
        }
    }
}

/// Splits the main-mode content into the status panel and the menu
pub fn split_main(content: Rect, status_height: u16) -> (Rect, Rect) {
    let status_height = status_height.min(content.height);
    let status = Rect::new(content.x, content.y, content.width, status_height);
    let menu = Rect::new(
        content.x,
        content.y + status_height,
        content.width,
        content.height - status_height,
    );
    (status, menu)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standard_layout() {
        let layout = AppLayout::new(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.title, Rect::new(0, 0, 80, 1));
        assert_eq!(layout.content, Rect::new(0, 1, 80, 21));
        assert_eq!(layout.message, Rect::new(0, 22, 80, 1));
        assert_eq!(layout.status_bar, Rect::new(0, 23, 80, 1));
    }

    #[test]
    fn test_tiny_terminal() {
        let area = Rect::new(0, 0, 20, 3);
        let layout = AppLayout::new(area);
        assert_eq!(layout.content, area);
        assert_eq!(layout.status_bar, Rect::default());
    }

    #[test]
    fn test_split_main() {
        let (status, menu) = split_main(Rect::new(0, 1, 80, 20), 8);
        assert_eq!(status, Rect::new(0, 1, 80, 8));
        assert_eq!(menu, Rect::new(0, 9, 80, 12));

        let (status, menu) = split_main(Rect::new(0, 0, 80, 5), 8);
        assert_eq!(status.height, 5);
        assert_eq!(menu.height, 0);
    }

    proptest! {
        #[test]
        fn prop_regions_stay_inside(w in 0u16..300, h in 0u16..200, x in 0u16..50, y in 0u16..50) {
            let area = Rect::new(x, y, w, h);
            let layout = AppLayout::new(area);
            for region in [layout.title, layout.content, layout.message, layout.status_bar] {
                if region.area() > 0 {
                    prop_assert!(area.contains(region.as_position()));
                    prop_assert!(region.bottom() <= area.bottom());
                }
            }
            let total = layout.title.height + layout.content.height
                + layout.message.height + layout.status_bar.height;
            prop_assert_eq!(total, h);
        }
    }
}
