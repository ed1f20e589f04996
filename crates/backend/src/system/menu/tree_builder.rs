use contracts::system::menu::{MenuNode, MenuRow};

/// Builds the sidebar tree (main menu → submenu → page) from flat rows.
///
/// Nodes are deduplicated by title at every level and keep the order in
/// which they first appear. A row with an empty submenu puts its page
/// straight under the main menu; a row with an empty page name only
/// creates the menu nodes.
pub fn build_menu_tree(rows: &[MenuRow]) -> Vec<MenuNode> {
    let mut tree: Vec<MenuNode> = Vec::new();

    for row in rows {
        let main_title = row.mainmenu.trim();
        if main_title.is_empty() {
            tracing::debug!("Skipping menu row without main menu: {:?}", row.pagename);
            continue;
        }

        let main = find_or_insert(&mut tree, main_title, || row.menuimage.clone());

        let sub_title = row.submenu.trim();
        let parent = if sub_title.is_empty() {
            main
        } else {
            find_or_insert(&mut main.sub_nav, sub_title, || row.subimage.clone())
        };

        let page_title = row.pagename.trim();
        if page_title.is_empty() {
            continue;
        }
        if parent.sub_nav.iter().any(|node| node.title == page_title) {
            continue;
        }
        parent.sub_nav.push(MenuNode {
            title: page_title.to_string(),
            path: row.route.clone(),
            icon: row.pageimage.clone(),
            page_id: row.pageid,
            sub_nav: Vec::new(),
        });
    }

    for node in tree.iter_mut() {
        flatten_redundant(node);
    }
    tree
}

/// Collapse `X → [X → children]` into `X → children`, recursively
fn flatten_redundant(node: &mut MenuNode) {
    while node.sub_nav.len() == 1 && node.sub_nav[0].title == node.title {
        let child = node.sub_nav.remove(0);
        if node.path.is_none() {
            node.path = child.path;
        }
        if node.icon.is_none() {
            node.icon = child.icon;
        }
        if node.page_id.is_none() {
            node.page_id = child.page_id;
        }
        node.sub_nav = child.sub_nav;
    }

    for child in node.sub_nav.iter_mut() {
        flatten_redundant(child);
    }
}

fn find_or_insert<'a, F>(nodes: &'a mut Vec<MenuNode>, title: &str, icon: F) -> &'a mut MenuNode
where
    F: FnOnce() -> Option<String>,
{
    let index = match nodes.iter().position(|node| node.title == title) {
        Some(index) => index,
        None => {
            nodes.push(MenuNode::group(title, icon()));
            nodes.len() - 1
        }
    };
    &mut nodes[index]
}
