//! XML utility functions for navigating and extracting data from DOM trees.

use roxmltree::Node;

use super::select::NodeMatch;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use report_splitter::xml::get_tag_name;
///
/// let xml = r#"<coverage><packages/></coverage>"#;
/// let doc = Document::parse(xml).unwrap();
/// let packages = doc.root_element().first_element_child().unwrap();
/// assert_eq!(get_tag_name(packages), "packages");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find all child elements with the given tag name.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use report_splitter::xml::find_children;
///
/// let xml = r#"<testsuite><testcase/><properties/><testcase/></testsuite>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let cases: Vec<_> = find_children(doc.root_element(), "testcase").collect();
/// assert_eq!(cases.len(), 2);
/// ```
pub fn find_children<'a, 'input>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children()
        .filter(move |child| child.is_element() && get_tag_name(*child) == tag)
}

/// Get all element children of a node.
///
/// Text nodes, comments and processing instructions are excluded.
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

/// Get the first element child of a node, the "grouping" element that
/// Cobertura uses to wrap repeated children (`<classes>`, `<methods>`).
pub fn first_element_child<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    element_children(node).next()
}

/// Select elements along a slash-separated path of child steps.
///
/// Every matching element at each step contributes, so
/// `packages/package` collects the packages of all `<packages>` groups.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use report_splitter::xml::{select_path, NodeMatch};
///
/// let xml = r#"<coverage><sources><source>a</source><source>b</source></sources></coverage>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let sources = select_path(doc.root_element(), "sources/source");
/// assert_eq!(sources.len(), 2);
/// assert!(matches!(
///     select_path(doc.root_element(), "packages/package"),
///     NodeMatch::NoMatch
/// ));
/// ```
pub fn select_path<'a, 'input>(node: Node<'a, 'input>, path: &str) -> NodeMatch<'a, 'input> {
    let mut current = vec![node];

    for step in path.split('/').filter(|s| !s.is_empty()) {
        current = current
            .into_iter()
            .flat_map(|n| n.children())
            .filter(|child| child.is_element() && get_tag_name(*child) == step)
            .collect();
        if current.is_empty() {
            break;
        }
    }

    NodeMatch::from_nodes(current)
}

/// Get the concatenated text of all descendant text nodes.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use report_splitter::xml::text_content;
///
/// let xml = r#"<failure>expected <b>1</b> got 2</failure>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(text_content(doc.root_element()), "expected 1 got 2");
/// ```
pub fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Get the exact source text spanned by a node.
///
/// For elements this is the whole element, from its start tag to the end of
/// its closing tag.
pub fn subtree_text<'input>(node: Node<'_, 'input>) -> &'input str {
    let input = node.document().input_text();
    input.get(node.range()).unwrap_or_default()
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Check if a node has a specific tag name.
pub fn has_tag(node: Node<'_, '_>, tag: &str) -> bool {
    node.is_element() && get_tag_name(node) == tag
}
