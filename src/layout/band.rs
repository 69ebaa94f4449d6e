use super::squarify::Rect;

/// Lay `sizes` out as one horizontal row of full-height rectangles.
///
/// Widths are proportional to size. `gap` units separate neighbours; when the gaps
/// alone would use up the width, they collapse to zero.
pub fn band(sizes: &[u64], rect: Rect, gap: f64) -> Vec<Rect> {
    let total: f64 = sizes.iter().map(|&s| s as f64).sum();
    if sizes.is_empty() || total <= 0.0 {
        return sizes
            .iter()
            .map(|_| Rect::new(rect.x, rect.y, 0.0, 0.0))
            .collect();
    }

    let gaps = sizes.len().saturating_sub(1) as f64;
    let gap = if gap * gaps >= rect.w { 0.0 } else { gap };
    let usable = rect.w - gap * gaps;

    let mut x = rect.x;
    sizes
        .iter()
        .map(|&s| {
            let w = s as f64 / total * usable;
            let r = Rect::new(x, rect.y, w, rect.h);
            x += w + gap;
            r
        })
        .collect()
}
