/// An axis-aligned rectangle: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self { x, y, w, h }
    }

    pub fn area(&self) -> f64 {
        self.w * self.h
    }

    /// Shrink along the longer axis to `ratio` of its extent, keeping the origin.
    pub fn shrink_longer_axis(self, ratio: f64) -> Self {
        if self.w > self.h {
            Self {
                w: self.w * ratio,
                ..self
            }
        } else {
            Self {
                h: self.h * ratio,
                ..self
            }
        }
    }

    /// Inset by `pad` on each side, per axis, only where the axis is wide enough.
    pub fn inset(self, pad: f64) -> Self {
        let mut r = self;
        if r.w > 2.0 * pad {
            r.x += pad;
            r.w -= 2.0 * pad;
        }
        if r.h > 2.0 * pad {
            r.y += pad;
            r.h -= 2.0 * pad;
        }
        r
    }

    /// Whether `other` lies inside `self`, allowing `eps` of float slack.
    pub fn contains(&self, other: &Rect, eps: f64) -> bool {
        other.x >= self.x - eps
            && other.y >= self.y - eps
            && other.x + other.w <= self.x + self.w + eps
            && other.y + other.h <= self.y + self.h + eps
    }

    /// Area shared with `other` (0 when disjoint or merely touching).
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = (self.x + self.w).min(other.x + other.w) - self.x.max(other.x);
        let h = (self.y + self.h).min(other.y + other.h) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }
}

/// Scale `sizes` so they sum to the area of `rect`.
pub fn normalize_sizes(sizes: &[u64], rect: Rect) -> Vec<f64> {
    let total: f64 = sizes.iter().map(|&s| s as f64).sum();
    if total <= 0.0 {
        return vec![0.0; sizes.len()];
    }
    let scale = rect.area() / total;
    sizes.iter().map(|&s| s as f64 * scale).collect()
}

/// Squarified treemap (Bruls, Huizing, van Wijk).
///
/// `areas` must be sorted descending and sum to `rect.area()`. Returns one rectangle
/// per area, in input order. Strips are laid along the shorter side of the free space
/// and grown while the worst aspect ratio in the strip does not get worse.
pub fn squarify(areas: &[f64], rect: Rect) -> Vec<Rect> {
    let mut result = Vec::with_capacity(areas.len());
    let mut remaining = areas;
    let mut free = rect;

    while !remaining.is_empty() {
        // Degenerate free space: nothing left to divide.
        if free.w <= 1e-9 || free.h <= 1e-9 || remaining.iter().sum::<f64>() <= 0.0 {
            result.extend(remaining.iter().map(|_| Rect::new(free.x, free.y, 0.0, 0.0)));
            break;
        }

        let short = free.w.min(free.h);
        let mut k = 1;
        while k < remaining.len()
            && worst_aspect_ratio(&remaining[..k], short)
                >= worst_aspect_ratio(&remaining[..k + 1], short)
        {
            k += 1;
        }

        let (row, rest) = remaining.split_at(k);
        free = lay_strip(row, free, &mut result);
        remaining = rest;
    }

    result
}

/// Squarify, then inset every produced rectangle by `pad`.
pub fn padded_squarify(areas: &[f64], rect: Rect, pad: f64) -> Vec<Rect> {
    squarify(areas, rect)
        .into_iter()
        .map(|r| r.inset(pad))
        .collect()
}

/// Place `row` as one strip against the shorter side of `free`; return what is left.
fn lay_strip(row: &[f64], free: Rect, out: &mut Vec<Rect>) -> Rect {
    let sum: f64 = row.iter().sum();

    if free.w >= free.h {
        // Column on the left edge, items stacked top to bottom.
        let width = sum / free.h;
        let mut y = free.y;
        for &area in row {
            let h = area / width;
            out.push(Rect::new(free.x, y, width, h));
            y += h;
        }
        Rect::new(free.x + width, free.y, (free.w - width).max(0.0), free.h)
    } else {
        // Row on the top edge, items left to right.
        let height = sum / free.w;
        let mut x = free.x;
        for &area in row {
            let w = area / height;
            out.push(Rect::new(x, free.y, w, height));
            x += w;
        }
        Rect::new(free.x, free.y + height, free.w, (free.h - height).max(0.0))
    }
}

fn worst_aspect_ratio(row: &[f64], side: f64) -> f64 {
    let sum: f64 = row.iter().sum();
    if row.is_empty() || sum <= 0.0 || side <= 0.0 {
        return f64::MAX;
    }
    let side_sq = side * side;
    let sum_sq = sum * sum;
    let max_r = row.iter().copied().fold(0.0, f64::max);
    let min_r = row.iter().copied().fold(f64::INFINITY, f64::min);
    if min_r <= 0.0 {
        return f64::MAX;
    }
    let a = (side_sq * max_r) / sum_sq;
    let b = sum_sq / (side_sq * min_r);
    a.max(b)
}
