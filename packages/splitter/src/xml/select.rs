//! Tagged result of a node lookup.

use roxmltree::Node;

/// Result of looking up nodes in a parsed document.
///
/// A lookup either finds nothing, exactly one node, or several nodes. The
/// shape is normalized once here so callers can iterate uniformly.
#[derive(Debug, Clone)]
pub enum NodeMatch<'a, 'input> {
    /// Nothing matched; the branch emits nothing.
    NoMatch,
    /// Exactly one node matched.
    One(Node<'a, 'input>),
    /// Two or more nodes matched, in document order.
    Many(Vec<Node<'a, 'input>>),
}

impl<'a, 'input> NodeMatch<'a, 'input> {
    /// Normalize a list of nodes.
    #[must_use]
    pub fn from_nodes(mut nodes: Vec<Node<'a, 'input>>) -> Self {
        match nodes.len() {
            0 => Self::NoMatch,
            1 => nodes.pop().map_or(Self::NoMatch, Self::One),
            _ => Self::Many(nodes),
        }
    }

    /// Normalize an optional single node.
    #[must_use]
    pub fn from_option(node: Option<Node<'a, 'input>>) -> Self {
        node.map_or(Self::NoMatch, Self::One)
    }

    /// Number of matched nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::NoMatch => 0,
            Self::One(_) => 1,
            Self::Many(nodes) => nodes.len(),
        }
    }

    /// Whether nothing matched.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::NoMatch)
    }
}

impl<'a, 'input> IntoIterator for NodeMatch<'a, 'input> {
    type Item = Node<'a, 'input>;
    type IntoIter = std::vec::IntoIter<Node<'a, 'input>>;

    fn into_iter(self) -> Self::IntoIter {
        match self {
            Self::NoMatch => Vec::new().into_iter(),
            Self::One(node) => vec![node].into_iter(),
            Self::Many(nodes) => nodes.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    #[test]
    fn test_from_nodes_normalizes_shape() {
        let xml = "<testsuites><testsuite/><testsuite/></testsuites>";
        let doc = Document::parse(xml).unwrap();
        let suites: Vec<_> = doc.root_element().children().collect();

        assert!(matches!(NodeMatch::from_nodes(Vec::new()), NodeMatch::NoMatch));
        assert!(matches!(
            NodeMatch::from_nodes(suites[..1].to_vec()),
            NodeMatch::One(_)
        ));

        let many = NodeMatch::from_nodes(suites);
        assert!(matches!(many, NodeMatch::Many(_)));
        assert_eq!(many.len(), 2);
    }

    #[test]
    fn test_into_iter_one() {
        let doc = Document::parse("<testsuite/>").unwrap();
        let matched = NodeMatch::from_option(Some(doc.root_element()));

        assert!(!matched.is_empty());
        assert_eq!(matched.into_iter().count(), 1);
    }

    #[test]
    fn test_into_iter_no_match() {
        let matched = NodeMatch::from_option(None);
        assert!(matched.is_empty());
        assert_eq!(matched.into_iter().count(), 0);
    }
}
