//! Page math along one axis.
//!
//! A page is one viewport extent. Page `i` sits at offset `i * viewport`,
//! except that no page offset exceeds the maximum scroll, so a trailing
//! partial page shares the final, clamped offset.

/// Content overhang smaller than this fraction of a page does not add a page.
const PAGE_EPSILON: f32 = 1e-3;

/// Largest scroll offset on the axis. Never negative.
pub fn max_scroll(content: f32, viewport: f32) -> f32 {
    (content - viewport).max(0.0)
}

/// Number of pages on the axis. Always at least one.
///
/// `viewport` must be positive.
pub fn page_count(content: f32, viewport: f32) -> usize {
    if content <= viewport {
        return 1;
    }
    let pages = (content / viewport - PAGE_EPSILON).ceil();
    if pages.is_finite() && pages >= 1.0 {
        pages as usize
    } else {
        1
    }
}

/// Scroll offset that shows page `page`. Out-of-range pages map to the last
/// page.
pub fn page_offset(page: usize, content: f32, viewport: f32) -> f32 {
    let page = page.min(page_count(content, viewport) - 1);
    (page as f32 * viewport).min(max_scroll(content, viewport))
}

/// Page whose offset is closest to `offset`. Ties go to the lower page.
pub fn nearest_page(offset: f32, content: f32, viewport: f32) -> usize {
    let last = page_count(content, viewport) - 1;
    let below = clamp_page((offset / viewport).floor(), last);
    let above = (below + 1).min(last);
    let d_below = (page_offset(below, content, viewport) - offset).abs();
    let d_above = (page_offset(above, content, viewport) - offset).abs();
    if d_above < d_below { above } else { below }
}

/// Page to settle on when a drag is released at `offset` with `velocity`
/// (positive velocity moves toward higher offsets).
///
/// A fast release moves to the next page boundary in the direction of
/// motion. A slow one settles on the nearest page.
pub fn release_page(
    offset: f32,
    velocity: f32,
    flick_velocity: f32,
    content: f32,
    viewport: f32,
) -> usize {
    let last = page_count(content, viewport) - 1;
    if velocity > flick_velocity {
        clamp_page((offset / viewport).floor() + 1.0, last)
    } else if velocity < -flick_velocity {
        clamp_page((offset / viewport).ceil() - 1.0, last)
    } else {
        nearest_page(offset, content, viewport)
    }
}

fn clamp_page(raw: f32, last: usize) -> usize {
    if raw.is_nan() || raw <= 0.0 {
        0
    } else if raw >= last as f32 {
        last
    } else {
        raw as usize
    }
}
