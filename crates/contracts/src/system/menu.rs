use serde::{Deserialize, Serialize};

use crate::shared::lenient;

/// Flat menu row as returned by the ERP (one row per page)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuRow {
    #[serde(default, deserialize_with = "lenient::deserialize_text_or_empty")]
    pub mainmenu: String,
    #[serde(default, deserialize_with = "lenient::deserialize_text_or_empty")]
    pub submenu: String,
    #[serde(default, deserialize_with = "lenient::deserialize_text_or_empty")]
    pub pagename: String,
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub route: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_integer")]
    pub pageid: Option<i64>,
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub menuimage: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub subimage: Option<String>,
    #[serde(default, deserialize_with = "lenient::deserialize_text")]
    pub pageimage: Option<String>,
}

/// Sidebar node: main menu, submenu or page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuNode {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(rename = "pageId", default, skip_serializing_if = "Option::is_none")]
    pub page_id: Option<i64>,
    #[serde(rename = "subNav", default)]
    pub sub_nav: Vec<MenuNode>,
}

impl MenuNode {
    /// Inner node without a route
    pub fn group(title: impl Into<String>, icon: Option<String>) -> Self {
        Self {
            title: title.into(),
            path: None,
            icon,
            page_id: None,
            sub_nav: Vec::new(),
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.sub_nav.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_menu_row_lenient() {
        let row: MenuRow = serde_json::from_value(json!({
            "mainmenu": "Sales",
            "submenu": null,
            "pagename": "Enquiry",
            "route": "/sales/enquiry",
            "pageid": "12"
        }))
        .unwrap();

        assert_eq!(row.mainmenu, "Sales");
        assert_eq!(row.submenu, "");
        assert_eq!(row.pageid, Some(12));
        assert_eq!(row.menuimage, None);
    }

    #[test]
    fn test_menu_node_serializes_sub_nav() {
        let node = MenuNode::group("Reports", None);
        let out = serde_json::to_value(&node).unwrap();
        assert_eq!(out, json!({"title": "Reports", "subNav": []}));
    }
}
