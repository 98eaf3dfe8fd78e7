use roxmltree::Node;

/// Optional-field lookups over an XML element.
///
/// Elements are matched on their local name, so `<report_metadata>` and
/// `<dmarc:report_metadata>` are the same field. Every lookup answers
/// "present" (`Some`) or "absent" (`None`); deciding whether absence is
/// an error is left to the caller.
pub trait ElementExt<'a, 'input: 'a> {
    /// First direct child element called `name`.
    fn child_element(&self, name: &str) -> Option<Node<'a, 'input>>;

    /// All direct child elements called `name`, in document order.
    fn child_elements(&self, name: &str) -> Vec<Node<'a, 'input>>;

    /// Follow a chain of child element names, e.g. `["date_range", "begin"]`.
    fn find_path(&self, path: &[&str]) -> Option<Node<'a, 'input>>;

    /// Text of the child element `name`. An element with no text is
    /// present with an empty value.
    fn field(&self, name: &str) -> Option<String>;

    /// Local names of all direct child elements.
    fn child_tags(&self) -> Vec<String>;
}

fn is_element_named(node: &Node, name: &str) -> bool {
    node.is_element() && node.tag_name().name() == name
}

impl<'a, 'input: 'a> ElementExt<'a, 'input> for Node<'a, 'input> {
    fn child_element(&self, name: &str) -> Option<Node<'a, 'input>> {
        self.children().find(|n| is_element_named(n, name))
    }

    fn child_elements(&self, name: &str) -> Vec<Node<'a, 'input>> {
        self.children()
            .filter(|n| is_element_named(n, name))
            .collect()
    }

    fn find_path(&self, path: &[&str]) -> Option<Node<'a, 'input>> {
        path.iter()
            .try_fold(*self, |node, name| node.child_element(name))
    }

    fn field(&self, name: &str) -> Option<String> {
        self.child_element(name)
            .map(|n| n.text().unwrap_or_default().to_string())
    }

    fn child_tags(&self) -> Vec<String> {
        self.children()
            .filter(|n| n.is_element())
            .map(|n| n.tag_name().name().to_string())
            .collect()
    }
}
