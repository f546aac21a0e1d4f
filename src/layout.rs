//! Dashboard Grid Layout
//!
//! Pure geometry for the widget grid: per-page presets, upward compaction
//! and the auto-arrange behind the toolbar buttons. The `LayoutPort` trait
//! keeps the placement backend swappable; the CSS grid dashboard implements
//! it.

use crate::models::WidgetGeometry;

pub const GRID_COLUMNS: u32 = 12;
/// Height of a minimized widget (header only)
pub const MINIMIZED_HEIGHT: u32 = 1;
/// Restore fallback when no height was remembered
pub const DEFAULT_RESTORED_HEIGHT: u32 = 4;

/// Pages with their own saved layout
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutPage {
    Assistant,
    Optimiseur,
}

impl LayoutPage {
    pub fn as_str(self) -> &'static str {
        match self {
            LayoutPage::Assistant => "assistant",
            LayoutPage::Optimiseur => "optimiseur",
        }
    }
}

/// Grid placement seam. The dashboard reads current geometry through it and
/// pushes rearranged geometry back.
pub trait LayoutPort {
    fn geometry(&self) -> Vec<WidgetGeometry>;
    fn apply(&self, layout: Vec<WidgetGeometry>);
}

/// Runs a pure geometry transform through the port
pub fn rearrange<P, F>(port: &P, transform: F)
where
    P: LayoutPort + ?Sized,
    F: FnOnce(&[WidgetGeometry]) -> Vec<WidgetGeometry>,
{
    let next = transform(&port.geometry());
    port.apply(next);
}

fn widget(id: &str, x: u32, y: u32, w: u32, h: u32) -> WidgetGeometry {
    WidgetGeometry {
        id: id.to_string(),
        x,
        y,
        w,
        h,
    }
}

/// Default arrangement for a page, applied on first visit and from the
/// "réorganiser" button
pub fn preset(page: LayoutPage) -> Vec<WidgetGeometry> {
    match page {
        LayoutPage::Assistant => vec![
            widget("inventory-widget", 0, 0, 8, 6),
            widget("shopping-list-widget", 0, 6, 8, 5),
            widget("tools-widget", 8, 0, 4, 7),
            widget("recipe-book-widget", 8, 6, 4, 5),
            widget("generate-list-widget", 0, 11, 6, 5),
            widget("recipe-generator-widget", 6, 11, 6, 5),
        ],
        LayoutPage::Optimiseur => vec![
            widget("flyer-deals-widget", 0, 0, 12, 6),
            widget("store-selection-widget", 0, 6, 6, 8),
            widget("optimization-widget", 6, 6, 6, 5),
            widget("route-widget", 6, 11, 6, 3),
        ],
    }
}

/// Overwrites geometry for widgets the preset names; others keep theirs
pub fn apply_preset(current: &[WidgetGeometry], preset: &[WidgetGeometry]) -> Vec<WidgetGeometry> {
    current
        .iter()
        .map(|entry| {
            preset
                .iter()
                .find(|p| p.id == entry.id)
                .cloned()
                .unwrap_or_else(|| entry.clone())
        })
        .collect()
}

fn overlaps(a: &WidgetGeometry, b: &WidgetGeometry) -> bool {
    a.x < b.x + b.w && b.x < a.x + a.w && a.y < b.y + b.h && b.y < a.y + a.h
}

/// Moves every widget as far up as it can go without collisions, keeping
/// columns. Visual order (top-to-bottom, left-to-right) decides who moves
/// first.
pub fn compact(layout: &[WidgetGeometry]) -> Vec<WidgetGeometry> {
    let mut ordered = layout.to_vec();
    ordered.sort_by_key(|g| (g.y, g.x));

    let mut placed: Vec<WidgetGeometry> = Vec::new();
    for mut entry in ordered {
        let mut y = 0;
        loop {
            entry.y = y;
            if placed.iter().all(|other| !overlaps(&entry, other)) {
                break;
            }
            y += 1;
        }
        placed.push(entry);
    }
    placed
}

/// Re-places widgets row by row, left to right, filling gaps. Visual order
/// is preserved; sizes are kept (width clamped to the grid).
pub fn smart_arrange(layout: &[WidgetGeometry]) -> Vec<WidgetGeometry> {
    let mut ordered = layout.to_vec();
    ordered.sort_by_key(|g| (g.y, g.x));

    let mut placed: Vec<WidgetGeometry> = Vec::new();
    for mut entry in ordered {
        entry.w = entry.w.clamp(1, GRID_COLUMNS);
        'scan: for y in 0.. {
            for x in 0..=(GRID_COLUMNS - entry.w) {
                entry.x = x;
                entry.y = y;
                if placed.iter().all(|other| !overlaps(&entry, other)) {
                    break 'scan;
                }
            }
        }
        placed.push(entry);
    }
    placed
}

/// Height to restore a minimized widget to
pub fn restore_height(remembered: Option<u32>) -> u32 {
    remembered.unwrap_or(DEFAULT_RESTORED_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_stay_inside_the_grid() {
        for page in [LayoutPage::Assistant, LayoutPage::Optimiseur] {
            let layout = preset(page);
            assert!(!layout.is_empty());
            for entry in &layout {
                assert!(entry.x + entry.w <= GRID_COLUMNS, "{} overflows", entry.id);
            }
            // ids unique
            for (i, a) in layout.iter().enumerate() {
                assert!(layout.iter().skip(i + 1).all(|b| b.id != a.id));
            }
        }
    }

    #[test]
    fn preset_application_skips_unknown_widgets() {
        let current = vec![widget("a", 3, 9, 4, 2), widget("extra", 0, 0, 2, 2)];
        let wanted = vec![widget("a", 0, 0, 6, 3)];
        let applied = apply_preset(&current, &wanted);
        assert_eq!(applied[0], widget("a", 0, 0, 6, 3));
        assert_eq!(applied[1], widget("extra", 0, 0, 2, 2));
    }

    #[test]
    fn compact_pulls_widgets_up_in_their_column() {
        let layout = vec![widget("a", 0, 4, 6, 2), widget("b", 0, 9, 6, 2)];
        let packed = compact(&layout);
        assert_eq!(packed[0], widget("a", 0, 0, 6, 2));
        assert_eq!(packed[1], widget("b", 0, 2, 6, 2));
    }

    #[test]
    fn compact_keeps_side_by_side_widgets_apart() {
        let layout = vec![widget("a", 0, 3, 6, 2), widget("b", 6, 3, 6, 2)];
        let packed = compact(&layout);
        assert_eq!(packed[0].y, 0);
        assert_eq!(packed[1].y, 0);
        assert_eq!(packed[1].x, 6);
    }

    #[test]
    fn smart_arrange_fills_row_gaps() {
        let layout = vec![
            widget("a", 0, 0, 6, 2),
            widget("b", 6, 0, 6, 2),
            widget("c", 0, 5, 6, 2),
        ];
        let arranged = smart_arrange(&layout);
        assert_eq!(arranged[2], widget("c", 0, 2, 6, 2));
    }

    #[test]
    fn smart_arrange_moves_a_wide_widget_to_its_own_row() {
        let layout = vec![widget("a", 0, 0, 8, 2), widget("b", 9, 7, 8, 2)];
        let arranged = smart_arrange(&layout);
        assert_eq!(arranged[1], widget("b", 0, 2, 8, 2));
    }

    #[test]
    fn saved_layouts_accept_the_legacy_id_key() {
        let json = r#"[{"gs-id": "inventory-widget", "x": 0, "y": 0, "w": 8, "h": 6}]"#;
        let layout: Vec<WidgetGeometry> = serde_json::from_str(json).unwrap();
        assert_eq!(layout[0].id, "inventory-widget");
    }

    #[test]
    fn restore_uses_the_remembered_height() {
        assert_eq!(restore_height(Some(6)), 6);
        assert_eq!(restore_height(None), DEFAULT_RESTORED_HEIGHT);
    }

    #[test]
    fn rearrange_round_trips_through_the_port() {
        use std::cell::RefCell;

        struct FakePort(RefCell<Vec<WidgetGeometry>>);
        impl LayoutPort for FakePort {
            fn geometry(&self) -> Vec<WidgetGeometry> {
                self.0.borrow().clone()
            }
            fn apply(&self, layout: Vec<WidgetGeometry>) {
                *self.0.borrow_mut() = layout;
            }
        }

        let port = FakePort(RefCell::new(vec![widget("a", 0, 4, 6, 2)]));
        rearrange(&port, compact);
        assert_eq!(port.geometry()[0].y, 0);
    }
}
