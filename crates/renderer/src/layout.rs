use artworks::{CanvasSize, Point};

/// Gap kept between the content area edge and the sketch canvas.
pub const CANVAS_PADDING: u32 = 10;

/// Axis-aligned rectangle in window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    pub x: i64,
    pub y: i64,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub fn new(x: i64, y: i64, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (left, top) = (self.x as f64, self.y as f64);
        x >= left && y >= top && x < left + f64::from(self.width) && y < top + f64::from(self.height)
    }
}

/// Window split into a menu sidebar on the left and the sketch area on the right.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    width: u32,
    height: u32,
    sidebar_width: u32,
    row_height: u32,
}

impl Layout {
    pub fn new(width: u32, height: u32, sidebar_width: u32, row_height: u32) -> Self {
        Self {
            width,
            height,
            sidebar_width: sidebar_width.min(width),
            row_height: row_height.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn row_height(&self) -> u32 {
        self.row_height
    }

    pub fn sidebar(&self) -> Rect {
        Rect::new(0, 0, self.sidebar_width, self.height)
    }

    pub fn content(&self) -> Rect {
        Rect::new(
            i64::from(self.sidebar_width),
            0,
            self.width - self.sidebar_width,
            self.height,
        )
    }

    /// Width handed to the stage when sizing fit-to-container sketches.
    pub fn container_width(&self) -> u32 {
        self.content().width
    }

    /// Menu rows that fit entirely inside the sidebar.
    pub fn visible_rows(&self) -> usize {
        (self.height / self.row_height) as usize
    }

    /// Rectangle of the `slot`-th visible row, counted from the top.
    pub fn row_rect(&self, slot: usize) -> Rect {
        let y = i64::from(self.row_height).saturating_mul(slot as i64);
        Rect::new(0, y, self.sidebar_width, self.row_height)
    }

    /// Menu index under the cursor, given the scroller's first visible row.
    pub fn row_at(&self, x: f64, y: f64, offset: usize, len: usize) -> Option<usize> {
        if !self.sidebar().contains(x, y) {
            return None;
        }
        let slot = (y / f64::from(self.row_height)).floor() as usize;
        if slot >= self.visible_rows() {
            return None;
        }
        let index = offset + slot;
        (index < len).then_some(index)
    }

    /// Where a canvas of `size` sits in the content area: centred when it fits,
    /// pinned to the padded top-left corner when it does not.
    pub fn canvas_rect(&self, size: CanvasSize) -> Rect {
        let content = self.content();
        let place = |available: u32, extent: u32| -> i64 {
            let spare = available.saturating_sub(extent) / 2;
            i64::from(spare.max(CANVAS_PADDING))
        };
        Rect::new(
            content.x + place(content.width, size.width),
            content.y + place(content.height, size.height),
            size.width,
            size.height,
        )
    }

    /// Window coordinates relative to the canvas origin. Not clamped, so the
    /// pointer may lie outside the canvas.
    pub fn to_canvas(&self, canvas: Rect, x: f64, y: f64) -> Point {
        Point::new((x - canvas.x as f64) as f32, (y - canvas.y as f64) as f32)
    }
}
