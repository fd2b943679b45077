//! Caret and selection geometry.
//!
//! Converts absolute character offsets into positions in the host's drawing
//! space. The terminal host uses one unit per cell; a pixel host passes real
//! glyph metrics.

/// Horizontal pad added on both sides of a selection outline
pub const SELECTION_INSET: f32 = 6.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EditorMetrics {
    pub char_width: f32,
    pub line_height: f32,
    pub padding_left: f32,
    pub padding_top: f32,
}

impl EditorMetrics {
    /// One unit per terminal cell, no padding
    pub fn cells() -> Self {
        Self {
            char_width: 1.0,
            line_height: 1.0,
            padding_left: 0.0,
            padding_top: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Scroll {
    pub left: f32,
    pub top: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LineCol {
    pub line: usize,
    pub col: usize,
}

/// Convert a character offset to a (line, column) pair by counting newlines.
pub fn offset_to_line_col(text: &str, offset: usize) -> LineCol {
    let mut line = 0;
    let mut line_start = 0;
    for (i, c) in text.chars().take(offset).enumerate() {
        if c == '\n' {
            line += 1;
            line_start = i + 1;
        }
    }
    LineCol {
        line,
        col: offset - line_start,
    }
}

/// Closed rectilinear outline of a selection. The closing edge from the last
/// point back to the first is implicit.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SelectionShape {
    points: Vec<Point>,
}

impl SelectionShape {
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// (min, max) corners of the outline
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let first = *self.points.first()?;
        Some(self.points.iter().fold((first, first), |(lo, hi), p| {
            (
                Point::new(lo.x.min(p.x), lo.y.min(p.y)),
                Point::new(hi.x.max(p.x), hi.y.max(p.y)),
            )
        }))
    }

    /// Even-odd point-in-polygon test
    pub fn contains(&self, p: Point) -> bool {
        let n = self.points.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let (a, b) = (self.points[i], self.points[j]);
            if (a.y > p.y) != (b.y > p.y) && p.x < (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x {
                inside = !inside;
            }
            j = i;
        }
        inside
    }

    fn from_edges(lefts: &[f32], rights: &[f32], top: f32, line_height: f32) -> Self {
        let n = lefts.len();
        if n == 0 {
            return Self::default();
        }

        let mut raw = Vec::with_capacity(4 * n);
        raw.push(Point::new(lefts[0], top));
        raw.push(Point::new(rights[0], top));
        for i in 0..n {
            let y = top + (i + 1) as f32 * line_height;
            raw.push(Point::new(rights[i], y));
            if i + 1 < n {
                raw.push(Point::new(rights[i + 1], y));
            }
        }
        raw.push(Point::new(lefts[n - 1], top + n as f32 * line_height));
        for i in (0..n).rev() {
            let y = top + i as f32 * line_height;
            raw.push(Point::new(lefts[i], y));
            if i > 0 {
                raw.push(Point::new(lefts[i - 1], y));
            }
        }

        let mut points: Vec<Point> = Vec::with_capacity(raw.len());
        for p in raw {
            if points.last() != Some(&p) {
                points.push(p);
            }
        }
        while points.len() > 1 && points.last() == points.first() {
            points.pop();
        }
        drop_collinear(&mut points);
        Self { points }
    }
}

/// Remove points lying on a straight run between their neighbours
fn drop_collinear(points: &mut Vec<Point>) {
    let mut i = 0;
    while points.len() > 4 && i < points.len() {
        let n = points.len();
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        let cur = points[i];
        if (prev.x == cur.x && cur.x == next.x) || (prev.y == cur.y && cur.y == next.y) {
            points.remove(i);
            i = i.saturating_sub(1);
        } else {
            i += 1;
        }
    }
}

pub fn selection_shape(
    text: &str,
    start: usize,
    end: usize,
    scroll: Scroll,
    metrics: &EditorMetrics,
) -> SelectionShape {
    selection_shape_with_inset(text, start, end, scroll, metrics, SELECTION_INSET)
}

/// Build the outline of the selection `[start, end)` (either order).
pub fn selection_shape_with_inset(
    text: &str,
    start: usize,
    end: usize,
    scroll: Scroll,
    metrics: &EditorMetrics,
    inset: f32,
) -> SelectionShape {
    let (start, end) = (start.min(end), start.max(end));
    if start == end {
        return SelectionShape::default();
    }

    let s = offset_to_line_col(text, start);
    let e = offset_to_line_col(text, end);
    let line_lens: Vec<usize> = text.split('\n').map(|l| l.chars().count()).collect();
    let line_len = |l: usize| line_lens.get(l).copied().unwrap_or(0);

    // A selection ending at column 0 stops at the end of the previous line
    let end_line = if e.col == 0 && e.line > s.line {
        e.line - 1
    } else {
        e.line
    };

    let mut lefts = Vec::new();
    let mut rights = Vec::new();
    for line in s.line..=end_line {
        let c1 = if line == s.line { s.col } else { 0 };
        let mut c2 = if line == end_line {
            if line == e.line {
                e.col
            } else {
                line_len(line)
            }
        } else {
            line_len(line).max(1)
        };
        if c2 <= c1 {
            c2 = c1 + 1;
        }

        lefts.push(metrics.padding_left + c1 as f32 * metrics.char_width - scroll.left - inset);
        rights.push(metrics.padding_left + c2 as f32 * metrics.char_width - scroll.left + inset);
    }

    let top = metrics.padding_top + s.line as f32 * metrics.line_height - scroll.top;
    SelectionShape::from_edges(&lefts, &rights, top, metrics.line_height)
}

/// Top-left corner of the caret cell, before scrolling.
pub fn caret_pixel_position(text: &str, offset: usize, metrics: &EditorMetrics) -> Point {
    let lc = offset_to_line_col(text, offset);
    Point::new(
        metrics.padding_left + lc.col as f32 * metrics.char_width,
        metrics.padding_top + lc.line as f32 * metrics.line_height,
    )
}

/// Font parameters the metrics were measured for
#[derive(Debug, Clone, PartialEq)]
pub struct FontKey {
    pub family: String,
    pub size: f32,
    pub weight: u16,
}

/// Process-wide metrics cache, re-measured only when the font changes.
#[derive(Debug, Default)]
pub struct MetricsCache {
    cached: Option<(FontKey, EditorMetrics)>,
}

impl MetricsCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_or_measure(
        &mut self,
        font: &FontKey,
        measure: impl FnOnce() -> EditorMetrics,
    ) -> EditorMetrics {
        match &self.cached {
            Some((key, metrics)) if key == font => *metrics,
            _ => {
                let metrics = measure();
                self.cached = Some((font.clone(), metrics));
                metrics
            }
        }
    }

    pub fn invalidate(&mut self) {
        self.cached = None;
    }

    pub fn is_cached(&self) -> bool {
        self.cached.is_some()
    }
}
