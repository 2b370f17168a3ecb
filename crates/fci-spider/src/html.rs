//! Small helpers over `select` nodes, shared by the extractors.

use select::node::Node;
use select::predicate::Name;

/// Text content, trimmed.
pub fn text(node: &Node) -> String {
    node.text().trim().to_string()
}

pub fn first_child<'a>(node: &Node<'a>, name: &str) -> Option<Node<'a>> {
    node.children().find(|child| child.is(Name(name)))
}

/// The `td` cells of a row.
pub fn cells<'a>(row: &Node<'a>) -> Vec<Node<'a>> {
    row.children().filter(|child| child.is(Name("td"))).collect()
}

/// Trimmed text of the first `span` directly under `cell`.
pub fn span_text(cell: &Node) -> Option<String> {
    first_child(cell, "span").map(|span| text(&span))
}

/// Rows of `table` itself, the ones of nested tables are left out.
///
/// Rows are looked up as descendants since the parser inserts a `tbody`
/// when the markup omits it.
pub fn rows<'a>(table: &Node<'a>) -> Vec<Node<'a>> {
    table
        .find(Name("tr"))
        .filter(|row| owning_table(row).map(|t| t.index()) == Some(table.index()))
        .collect()
}

fn owning_table<'a>(node: &Node<'a>) -> Option<Node<'a>> {
    let mut parent = node.parent();
    while let Some(p) = parent {
        if p.is(Name("table")) {
            return Some(p);
        }
        parent = p.parent();
    }
    None
}

/// Text segments of `node` separated by `<br>`, trimmed, blank ones dropped.
pub fn line_broken_texts(node: &Node) -> Vec<String> {
    let mut lines = vec![String::new()];
    for child in node.children() {
        if child.is(Name("br")) {
            lines.push(String::new());
        } else if let Some(line) = lines.last_mut() {
            line.push_str(&child.text());
        }
    }
    lines
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .map(String::from)
        .collect()
}
