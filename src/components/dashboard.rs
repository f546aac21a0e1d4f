//! Dashboard Grid Components
//!
//! CSS-grid rendering of a page's widget layout, the per-widget frame with
//! its minimize control, and the arrangement toolbar.

use leptos::prelude::*;
use leptos::task::spawn_local;
use std::collections::BTreeMap;

use crate::api;
use crate::layout::{self, LayoutPage, LayoutPort, GRID_COLUMNS, MINIMIZED_HEIGHT};
use crate::models::WidgetGeometry;

/// Pixel height of one grid row
const ROW_HEIGHT_PX: u32 = 70;

/// Reactive widget layout for one page. Copyable; hand it to every frame on
/// the page.
#[derive(Clone, Copy)]
pub struct GridLayout {
    page: LayoutPage,
    geometry: RwSignal<Vec<WidgetGeometry>>,
    saved_heights: RwSignal<BTreeMap<String, u32>>,
}

impl GridLayout {
    pub fn new(page: LayoutPage) -> Self {
        Self {
            page,
            geometry: RwSignal::new(layout::preset(page)),
            saved_heights: RwSignal::new(BTreeMap::new()),
        }
    }

    /// Fetches the saved arrangement; an empty answer keeps the preset
    pub fn load(&self) {
        let grid = *self;
        spawn_local(async move {
            match api::layout::get_layout(grid.page.as_str()).await {
                Ok(saved) if !saved.is_empty() => {
                    grid.geometry
                        .update(|g| *g = layout::apply_preset(g, &saved));
                }
                Ok(_) => {}
                Err(e) => {
                    web_sys::console::warn_1(
                        &format!("[GRID] disposition non chargée: {e}").into(),
                    );
                }
            }
        });
    }

    fn persist(&self) {
        let page = self.page.as_str();
        let snapshot = self.geometry.get_untracked();
        spawn_local(async move {
            if let Err(e) = api::layout::save_layout(page, &snapshot).await {
                web_sys::console::warn_1(
                    &format!("[GRID] disposition non sauvegardée: {e}").into(),
                );
            }
        });
    }

    /// Inline CSS placement for one widget
    pub fn style_for(&self, id: &str) -> String {
        match self.geometry.get().iter().find(|g| g.id == id) {
            Some(g) => format!(
                "grid-column: {} / span {}; grid-row: {} / span {};",
                g.x + 1,
                g.w,
                g.y + 1,
                g.h
            ),
            None => String::new(),
        }
    }

    pub fn is_minimized(&self, id: &str) -> bool {
        self.geometry
            .get()
            .iter()
            .any(|g| g.id == id && g.h == MINIMIZED_HEIGHT)
    }

    /// Collapses a widget to one row, or restores its remembered height
    pub fn toggle_minimize(&self, id: &str) {
        let current = self
            .geometry
            .get_untracked()
            .iter()
            .find(|g| g.id == id)
            .map(|g| g.h);
        let current = match current {
            Some(h) => h,
            None => return,
        };

        let next = if current == MINIMIZED_HEIGHT {
            layout::restore_height(self.saved_heights.get_untracked().get(id).copied())
        } else {
            self.saved_heights.update(|heights| {
                heights.insert(id.to_string(), current);
            });
            MINIMIZED_HEIGHT
        };

        let id = id.to_string();
        layout::rearrange(self, |entries| {
            entries
                .iter()
                .cloned()
                .map(|mut entry| {
                    if entry.id == id {
                        entry.h = next;
                    }
                    entry
                })
                .collect()
        });
    }

    pub fn reset_to_preset(&self) {
        let wanted = layout::preset(self.page);
        layout::rearrange(self, |entries| layout::apply_preset(entries, &wanted));
    }

    pub fn compact_widgets(&self) {
        layout::rearrange(self, layout::compact);
    }

    pub fn auto_arrange(&self) {
        layout::rearrange(self, layout::smart_arrange);
    }
}

impl LayoutPort for GridLayout {
    fn geometry(&self) -> Vec<WidgetGeometry> {
        self.geometry.get_untracked()
    }

    fn apply(&self, layout: Vec<WidgetGeometry>) {
        self.geometry.set(layout);
        self.persist();
    }
}

/// Grid container for a page's widgets
#[component]
pub fn DashboardGrid(children: Children) -> impl IntoView {
    let style = format!(
        "display: grid; grid-template-columns: repeat({GRID_COLUMNS}, 1fr); \
         grid-auto-rows: {ROW_HEIGHT_PX}px; gap: 10px;"
    );

    view! {
        <div class="dashboard-grid" style=style>
            {children()}
        </div>
    }
}

/// Frame around one widget: title bar, minimize control, grid placement
#[component]
pub fn GridWidget(
    grid: GridLayout,
    #[prop(into)] id: String,
    #[prop(into)] title: String,
    children: Children,
) -> impl IntoView {
    let id_for_style = id.clone();
    let id_for_body = id.clone();
    let id_for_icon = id.clone();
    let id_for_toggle = id.clone();

    // Tour steps find widgets by this frame id
    view! {
        <div
            class="grid-widget"
            id=id
            style=move || grid.style_for(&id_for_style)
        >
            <div class="widget-header">
                <h2>{title}</h2>
                <button
                    class="btn-minimize"
                    title="Minimiser / Restaurer"
                    on:click=move |_| grid.toggle_minimize(&id_for_toggle)
                >
                    {move || if grid.is_minimized(&id_for_icon) { "□" } else { "─" }}
                </button>
            </div>
            <div class=move || {
                if grid.is_minimized(&id_for_body) {
                    "widget-body minimized"
                } else {
                    "widget-body"
                }
            }>
                {children()}
            </div>
        </div>
    }
}

/// Arrangement buttons shown above the grid
#[component]
pub fn LayoutToolbar(grid: GridLayout) -> impl IntoView {
    view! {
        <div class="layout-toolbar">
            <button class="btn btn-small" on:click=move |_| grid.reset_to_preset()>
                "Disposition idéale"
            </button>
            <button class="btn btn-small" on:click=move |_| grid.compact_widgets()>
                "Compacter"
            </button>
            <button class="btn btn-small" on:click=move |_| grid.auto_arrange()>
                "Réorganiser"
            </button>
        </div>
    }
}
