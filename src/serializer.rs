//! Level-order rendering of a parse tree.
//!
//! One line per tree depth, labels on a line separated by `" # "`, and one
//! blank line between consecutive depths:
//!
//! ```text
//! Program
//!
//! Identifier(p) # Decls # CompoundStatement
//! ```

use std::collections::VecDeque;

use crate::ast::AstNode;

pub const NODE_SEPARATOR: &str = " # ";
pub const LEVEL_SEPARATOR: &str = "\n\n";

/// Render `root` breadth-first; `None` renders as the empty string
pub fn level_order_string(root: Option<&AstNode>) -> String {
    levels(root).join(LEVEL_SEPARATOR)
}

/// Labels of each tree depth, top to bottom, joined with `" # "`
pub fn levels(root: Option<&AstNode>) -> Vec<String> {
    let mut lines = Vec::new();
    let mut queue: VecDeque<&AstNode> = root.into_iter().collect();

    while !queue.is_empty() {
        let level_size = queue.len();
        let mut labels = Vec::with_capacity(level_size);

        for _ in 0..level_size {
            let Some(node) = queue.pop_front() else {
                break;
            };
            labels.push(node.label());
            queue.extend(node.children.iter());
        }

        lines.push(labels.join(NODE_SEPARATOR));
    }

    lines
}
