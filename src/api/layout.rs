//! Per-user Dashboard Layout Endpoints
//!
//! One geometry list per page name, stored server-side.

use crate::error::Result;
use crate::models::WidgetGeometry;

pub async fn get_layout(page: &str) -> Result<Vec<WidgetGeometry>> {
    super::get_json(&format!("user/layout?page={page}")).await
}

pub async fn save_layout(page: &str, layout: &[WidgetGeometry]) -> Result<()> {
    super::send_no_content("POST", &format!("user/layout?page={page}"), Some(&layout)).await
}
