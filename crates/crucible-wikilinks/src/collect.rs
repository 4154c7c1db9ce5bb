//! Extract resolved wikilinks from a parsed markdown-it AST

use markdown_it::Node;

use crate::plugin::WikilinkNode;
use crate::resolver::ResolvedLink;

/// All wikilinks in `root`, in document order
pub fn collect_wikilinks(root: &Node) -> Vec<ResolvedLink> {
    let mut links = Vec::new();
    walk_node(root, &mut links);
    links
}

fn walk_node(node: &Node, links: &mut Vec<ResolvedLink>) {
    if let Some(wikilink) = node.cast::<WikilinkNode>() {
        links.push(wikilink.link.clone());
    }

    for child in node.children.iter() {
        walk_node(child, links);
    }
}
