use crate::tree::node::Expr;

/// Flatten a tree into its pre-order node sequence.
///
/// Each node precedes its children, and children follow [`Expr::children`] order. A node
/// reachable along several paths appears once per occurrence. An absent root yields an empty
/// sequence. The returned references point into the borrowed tree.
pub fn linearize(root: Option<&Expr>) -> Vec<&Expr> {
    let mut out = Vec::new();
    if let Some(root) = root {
        push_pre_order(root, &mut out);
    }
    out
}

fn push_pre_order<'a>(node: &'a Expr, out: &mut Vec<&'a Expr>) {
    out.push(node);
    for child in node.children() {
        push_pre_order(child, out);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compare/linearize.rs"]
mod tests;
