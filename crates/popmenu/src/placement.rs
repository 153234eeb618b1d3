#![forbid(unsafe_code)]

//! Popup measurement and viewport clamping.
//!
//! The popup opens with its top-left corner at the pointer cell and is
//! shifted left/up only when it would cross the right/bottom viewport edge,
//! never past the viewport origin.

use popmenu_core::geometry::{Point, Rect, Size};

use crate::item::MenuItem;

/// Width/height the popup border adds on each axis.
const BORDER_OVERHEAD: u16 = 2;

/// Compute the popup size for the given items.
///
/// Width follows the widest row that does not hug its content
/// (`fit_content`); when every row hugs its content, the widest row wins.
/// One row of height per item, plus the border.
#[must_use]
pub fn menu_size(items: &[MenuItem]) -> Size {
    let full_rows = items
        .iter()
        .filter(|item| !item.fit_content())
        .map(MenuItem::row_width)
        .max()
        .unwrap_or(0);
    let width = if full_rows > 0 {
        full_rows
    } else {
        items.iter().map(MenuItem::row_width).max().unwrap_or(0)
    };

    Size::new(
        width.max(1).saturating_add(BORDER_OVERHEAD),
        (items.len() as u16).saturating_add(BORDER_OVERHEAD),
    )
}

/// Clamp a popup origin so the popup stays inside the viewport.
///
/// Mirrors the open gesture's placement rule: keep the origin at the
/// pointer unless the popup would overflow, then shift it back by the
/// overflow, bottoming out at the viewport origin.
#[must_use]
pub fn clamp_origin(origin: Point, size: Size, viewport: Rect) -> Point {
    let mut x = origin.x;
    if origin.x.saturating_add(size.width) > viewport.right() {
        x = viewport.right().saturating_sub(size.width);
    }

    let mut y = origin.y;
    if origin.y.saturating_add(size.height) > viewport.bottom() {
        y = viewport.bottom().saturating_sub(size.height);
    }

    Point::new(x.max(viewport.x), y.max(viewport.y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn viewport() -> Rect {
        Rect::new(0, 0, 80, 24)
    }

    #[test]
    fn size_counts_rows_and_border() {
        let items = vec![
            MenuItem::button("hello"),
            MenuItem::rule(),
            MenuItem::checkbox("wrap"),
        ];
        let size = menu_size(&items);
        assert_eq!(size.height, 3 + 2);
        // "wrap" + affordance column (6) beats "hello" (5), plus border.
        assert_eq!(size.width, 6 + 2);
    }

    #[test]
    fn fit_content_rows_do_not_widen_the_menu() {
        let items = vec![
            MenuItem::button("ok"),
            MenuItem::button("a very long fit-content row").with_fit_content(true),
        ];
        assert_eq!(menu_size(&items).width, 2 + 2);
    }

    #[test]
    fn all_fit_content_rows_fall_back_to_widest() {
        let items = vec![
            MenuItem::button("abc").with_fit_content(true),
            MenuItem::button("a").with_fit_content(true),
        ];
        assert_eq!(menu_size(&items).width, 3 + 2);
    }

    #[test]
    fn empty_menu_still_has_a_frame() {
        let size = menu_size(&[]);
        assert_eq!(size, Size::new(3, 2));
    }

    #[test]
    fn origin_unchanged_when_popup_fits() {
        let p = clamp_origin(Point::new(10, 5), Size::new(20, 6), viewport());
        assert_eq!(p, Point::new(10, 5));
    }

    #[test]
    fn right_edge_overflow_shifts_left() {
        let p = clamp_origin(Point::new(75, 5), Size::new(20, 6), viewport());
        assert_eq!(p, Point::new(60, 5));
    }

    #[test]
    fn bottom_edge_overflow_shifts_up() {
        let p = clamp_origin(Point::new(10, 22), Size::new(20, 6), viewport());
        assert_eq!(p, Point::new(10, 18));
    }

    #[test]
    fn corner_overflow_shifts_both() {
        let p = clamp_origin(Point::new(79, 23), Size::new(20, 6), viewport());
        assert_eq!(p, Point::new(60, 18));
    }

    #[test]
    fn oversized_popup_pins_to_viewport_origin() {
        let p = clamp_origin(Point::new(40, 12), Size::new(200, 50), viewport());
        assert_eq!(p, Point::new(0, 0));
    }

    #[test]
    fn clamp_respects_viewport_offset() {
        let vp = Rect::new(5, 3, 40, 10);
        let p = clamp_origin(Point::new(44, 12), Size::new(10, 4), vp);
        assert_eq!(p, Point::new(35, 9));
        // Never left/above the viewport origin.
        let p = clamp_origin(Point::new(0, 0), Size::new(10, 4), vp);
        assert_eq!(p, Point::new(5, 3));
    }

    proptest! {
        #[test]
        fn clamped_popup_stays_inside_viewport(
            px in 0u16..120,
            py in 0u16..40,
            w in 1u16..60,
            h in 1u16..20,
        ) {
            let vp = viewport();
            let p = clamp_origin(Point::new(px, py), Size::new(w, h), vp);
            prop_assert!(p.x >= vp.x);
            prop_assert!(p.y >= vp.y);
            if w <= vp.width && h <= vp.height {
                prop_assert!(p.x + w <= vp.right());
                prop_assert!(p.y + h <= vp.bottom());
            }
        }
    }
}
