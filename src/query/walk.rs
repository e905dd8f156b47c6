use super::types::Node;

/// Pre-order depth-first iterator over a node and all of its descendants.
///
/// The starting node is yielded first; siblings come out in source order.
pub struct Descendants<'a> {
    stack: Vec<&'a Node>
}

impl<'a> Iterator for Descendants<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().into_iter().rev());
        Some(node)
    }
}

impl Node {
    /// Iterate over this node and every node below it
    pub fn descendants(&self) -> Descendants<'_> {
        Descendants {
            stack: vec![self]
        }
    }
}
