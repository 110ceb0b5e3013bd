use artworks::{Canvas, Color, Point};
use gallery::{MenuEntry, MenuScroller};

use crate::layout::{Layout, Rect};

const CONTENT_BACKGROUND: Color = Color::new(0.96, 0.96, 0.97, 1.0);
const SIDEBAR_BACKGROUND: Color = Color::new(0.15, 0.16, 0.2, 1.0);
const HOVER_BACKGROUND: Color = Color::new(0.22, 0.23, 0.28, 1.0);
const SEPARATOR: Color = Color::new(1.0, 1.0, 1.0, 0.06);
const SCROLL_THUMB: Color = Color::new(1.0, 1.0, 1.0, 0.35);
const CANVAS_SHADOW: Color = Color::new(0.0, 0.0, 0.0, 0.12);
const SCROLL_TRACK_WIDTH: u32 = 3;
const LABEL_CHAR_WIDTH: u32 = 6;

/// Everything the compositor needs for one frame.
pub(crate) struct FrameView<'a> {
    pub layout: &'a Layout,
    pub menu: &'a [MenuEntry],
    pub scroller: &'a MenuScroller,
    pub hovered: Option<usize>,
    pub canvas: &'a Canvas,
    pub canvas_rect: Rect,
}

/// Hue that identifies a menu entry, spread evenly around the wheel.
pub(crate) fn row_hue(index: usize, len: usize) -> f32 {
    if len == 0 {
        return 0.0;
    }
    index as f32 * 360.0 / len as f32
}

pub(crate) fn compose(frame: &mut Canvas, view: &FrameView<'_>) {
    frame.background(CONTENT_BACKGROUND);
    draw_sidebar(frame, view);

    let rect = view.canvas_rect;
    frame.fill_rect(rect.x + 3, rect.y + 3, rect.width, rect.height, CANVAS_SHADOW);
    frame.blit(view.canvas, rect.x, rect.y);
}

fn draw_sidebar(frame: &mut Canvas, view: &FrameView<'_>) {
    let layout = view.layout;
    let sidebar = layout.sidebar();
    frame.fill_rect(sidebar.x, sidebar.y, sidebar.width, sidebar.height, SIDEBAR_BACKGROUND);

    let len = view.menu.len();
    for (slot, index) in view.scroller.visible_range().enumerate() {
        let Some(entry) = view.menu.get(index) else {
            break;
        };
        let row = layout.row_rect(slot);
        if row.y >= i64::from(sidebar.height) {
            break;
        }
        draw_row(frame, row, entry, row_hue(index, len), view.hovered == Some(index));
    }

    if view.scroller.needs_scrolling() && len > 0 {
        let track_x = sidebar.x + i64::from(sidebar.width.saturating_sub(SCROLL_TRACK_WIDTH));
        let height = u64::from(sidebar.height);
        let thumb_y = height * view.scroller.offset() as u64 / len as u64;
        let thumb_height = (height * view.scroller.visible() as u64 / len as u64).max(1);
        frame.fill_rect(
            track_x,
            thumb_y as i64,
            SCROLL_TRACK_WIDTH,
            thumb_height as u32,
            SCROLL_THUMB,
        );
    }
}

fn draw_row(frame: &mut Canvas, row: Rect, entry: &MenuEntry, hue: f32, hovered: bool) {
    if entry.highlighted {
        frame.fill_rect(row.x, row.y, row.width, row.height, Color::hsb(hue, 45.0, 70.0));
    } else if hovered {
        frame.fill_rect(row.x, row.y, row.width, row.height, HOVER_BACKGROUND);
    }

    let mid_y = row.y as f32 + row.height as f32 / 2.0;
    let radius = row.height as f32 * 0.22;
    let chip = Point::new(row.x as f32 + row.height as f32 / 2.0, mid_y);
    let (chip_color, label_color) = if entry.placeholder {
        (Color::hsba(hue, 15.0, 60.0, 70.0), Color::rgba(255, 255, 255, 60))
    } else {
        (Color::hsb(hue, 60.0, 95.0), Color::rgba(255, 255, 255, 170))
    };
    frame.fill_circle(chip, radius, chip_color);

    // Title stand-in: a bar as long as the title would be.
    let label_x = row.x + i64::from(row.height);
    let available = row.width.saturating_sub(row.height + 12);
    let label_width = (entry.title.chars().count() as u32 * LABEL_CHAR_WIDTH).min(available);
    let label_height = (row.height / 6).max(2);
    frame.fill_rect(
        label_x,
        mid_y as i64 - i64::from(label_height / 2),
        label_width,
        label_height,
        label_color,
    );

    frame.fill_rect(row.x, row.y + i64::from(row.height) - 1, row.width, 1, SEPARATOR);
}
