use axum::Json;
use contracts::system::menu::{MenuNode, MenuRow};

use crate::system::menu::build_menu_tree;

/// POST /api/system/menu/tree
pub async fn build_tree(Json(rows): Json<Vec<MenuRow>>) -> Json<Vec<MenuNode>> {
    let tree = build_menu_tree(&rows);
    tracing::debug!("Built menu tree: {} rows -> {} top-level nodes", rows.len(), tree.len());
    Json(tree)
}
