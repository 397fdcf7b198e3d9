//! XML utility functions for navigating and extracting data from DOM trees.
//!
//! Two flavours of lookup exist on purpose: the `find_child*` family matches
//! on local name only and ignores namespaces, the `*_ns` family requires the
//! element to live in the given namespace.

use roxmltree::Node;

/// Get the tag name without namespace prefix.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ovm_harvester::xml::get_tag_name;
///
/// let xml = r#"<o:Subjekt xmlns:o="urn:x"><o:Nazev>Obec</o:Nazev></o:Subjekt>"#;
/// let doc = Document::parse(xml).unwrap();
/// assert_eq!(get_tag_name(doc.root_element()), "Subjekt");
/// ```
pub fn get_tag_name<'a>(node: Node<'a, '_>) -> &'a str {
    node.tag_name().name()
}

/// Find the first child element with the given local name, in any namespace.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ovm_harvester::xml::find_child;
///
/// let xml = r#"<root xmlns="urn:a"><child1/><child2 xmlns="urn:b"/></root>"#;
/// let doc = Document::parse(xml).unwrap();
/// let root = doc.root_element();
///
/// assert!(find_child(root, "child1").is_some());
/// assert!(find_child(root, "child2").is_some());
/// assert!(find_child(root, "missing").is_none());
/// ```
pub fn find_child<'a, 'input>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    element_children(node).find(|child| get_tag_name(*child) == tag)
}

/// Find all child elements with the given tag name in namespace `ns`.
pub fn find_children_ns<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'a str,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> {
    element_children(node).filter(move |child| child.has_tag_name((ns, tag)))
}

/// Collect all elements reached by a slash-separated, namespace-qualified
/// path relative to `node`, in document order.
///
/// Every step matches children in `ns` only, so `"Email/Polozka/Email"`
/// behaves like the XPath `ns:Email/ns:Polozka/ns:Email`.
///
/// # Examples
/// ```
/// use roxmltree::Document;
/// use ovm_harvester::xml::find_by_path_ns;
///
/// let xml = r#"<s xmlns="urn:x"><a><b>1</b><b>2</b></a><a><b>3</b></a></s>"#;
/// let doc = Document::parse(xml).unwrap();
///
/// let found = find_by_path_ns(doc.root_element(), "urn:x", "a/b");
/// let texts: Vec<_> = found.iter().filter_map(|n| n.text()).collect();
/// assert_eq!(texts, ["1", "2", "3"]);
/// ```
pub fn find_by_path_ns<'a, 'input>(
    node: Node<'a, 'input>,
    ns: &'a str,
    path: &'a str,
) -> Vec<Node<'a, 'input>> {
    let mut current = vec![node];
    for part in path.split('/') {
        current = current
            .into_iter()
            .flat_map(|n| find_children_ns(n, ns, part))
            .collect();
    }
    current
}

/// Concatenated text of all descendant text nodes, untrimmed.
///
/// Returns `None` when the element contains no text node at all.
pub fn text_content(node: Node<'_, '_>) -> Option<String> {
    let mut texts = node
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .peekable();

    texts.peek()?;
    Some(texts.collect())
}

/// Text of the first child element named `tag` (namespace ignored).
///
/// A present but empty child yields `Some("")`; only a missing child is `None`.
pub fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    find_child(node, tag).map(|child| text_content(child).unwrap_or_default())
}

/// Get an attribute value from a node.
pub fn get_attribute<'a>(node: Node<'a, '_>, name: &str) -> Option<&'a str> {
    node.attribute(name)
}

/// Get all element children of a node.
///
/// # Returns
/// Iterator over element children (excludes text nodes, comments, etc.)
pub fn element_children<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|child| child.is_element())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roxmltree::Document;

    const NS: &str = "urn:test";

    #[test]
    fn test_get_tag_name_with_namespace() {
        let xml = r#"<ns:root xmlns:ns="http://example.com"><ns:child/></ns:root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(get_tag_name(doc.root_element()), "root");
    }

    #[test]
    fn test_find_child_returns_first_match() {
        let xml = r#"<root><a>1</a><a>2</a></root>"#;
        let doc = Document::parse(xml).unwrap();
        let a = find_child(doc.root_element(), "a").unwrap();
        assert_eq!(a.text(), Some("1"));
    }

    #[test]
    fn test_find_child_skips_non_elements() {
        let xml = r#"<root><!-- a -->text<?a b?><a/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_child(doc.root_element(), "a").is_some());
    }

    #[test]
    fn test_find_child_ignores_namespace() {
        let xml = r#"<root xmlns="urn:test"><x:a xmlns:x="urn:other">v</x:a></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(child_text(doc.root_element(), "a"), Some("v".to_string()));
    }

    #[test]
    fn test_find_children_ns_requires_namespace() {
        let xml = r#"<root xmlns="urn:test"><a/><x:a xmlns:x="urn:other"/><a/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(find_children_ns(doc.root_element(), NS, "a").count(), 2);
    }

    #[test]
    fn test_find_by_path_ns_missing_step() {
        let xml = r#"<root xmlns="urn:test"><a><c/></a></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert!(find_by_path_ns(doc.root_element(), NS, "a/b").is_empty());
    }

    #[test]
    fn test_text_content_is_verbatim() {
        let xml = "<root>  spaced <b>bold</b> tail </root>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(
            text_content(doc.root_element()),
            Some("  spaced bold tail ".to_string())
        );
    }

    #[test]
    fn test_text_content_empty_element() {
        let xml = "<root><empty/></root>";
        let doc = Document::parse(xml).unwrap();
        let empty = find_child(doc.root_element(), "empty").unwrap();
        assert_eq!(text_content(empty), None);
    }

    #[test]
    fn test_child_text_present_but_empty() {
        let xml = "<root><ICO/></root>";
        let doc = Document::parse(xml).unwrap();
        assert_eq!(child_text(doc.root_element(), "ICO"), Some(String::new()));
        assert_eq!(child_text(doc.root_element(), "IdDS"), None);
    }

    #[test]
    fn test_get_attribute() {
        let xml = r#"<root type="801"/>"#;
        let doc = Document::parse(xml).unwrap();
        let root = doc.root_element();

        assert_eq!(get_attribute(root, "type"), Some("801"));
        assert_eq!(get_attribute(root, "missing"), None);
    }

    #[test]
    fn test_element_children() {
        let xml = r#"<root>text<child1/>more<child2/></root>"#;
        let doc = Document::parse(xml).unwrap();
        assert_eq!(element_children(doc.root_element()).count(), 2);
    }
}
