use std::collections::BTreeMap;
use std::fmt::Write as _;

/// A node in a rendered subtree: either an element or a text run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

/// An owned element in a rendered page subtree.
///
/// Loaders build these wholesale from fetched records, mutate them in
/// response to widget events (carousel navigation, unit toggles, language
/// switches), and serialize them to HTML. A subtree is owned exclusively by
/// the loader that created it and is replaced, never diffed, on re-render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    attrs: BTreeMap<String, String>,
    classes: Vec<String>,
    children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: BTreeMap::new(),
            classes: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    // ==================== Builder helpers ====================

    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn with_class(mut self, class: &str) -> Self {
        self.add_class(class);
        self
    }

    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.children.push(Node::Text(text.into()));
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        self.children.push(Node::Element(child));
        self
    }

    // ==================== Attributes ====================

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attrs.insert(name.into(), value.into());
    }

    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    // ==================== Classes ====================

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn add_class(&mut self, class: &str) {
        if !self.has_class(class) {
            self.classes.push(class.to_string());
        }
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.retain(|c| c != class);
    }

    /// Add or remove `class` so that its presence matches `on`.
    pub fn toggle_class(&mut self, class: &str, on: bool) {
        if on {
            self.add_class(class);
        } else {
            self.remove_class(class);
        }
    }

    // ==================== Children and text ====================

    pub fn push(&mut self, child: Element) {
        self.children.push(Node::Element(child));
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Remove every child. Loaders call this exactly once before population
    /// to clear placeholder content.
    pub fn clear(&mut self) {
        self.children.clear();
    }

    /// Replace all children with a single text run.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.children.clear();
        self.children.push(Node::Text(text.into()));
    }

    /// Concatenated text of this element and its descendants.
    pub fn text(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Child elements (skipping text runs).
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    pub fn child_elements_mut(&mut self) -> impl Iterator<Item = &mut Element> {
        self.children.iter_mut().filter_map(|node| match node {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        })
    }

    /// Visit this element and every descendant element, pre-order.
    pub fn for_each_element_mut(&mut self, f: &mut impl FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.for_each_element_mut(f);
            }
        }
    }

    /// Find the first descendant (or self) matching the predicate.
    pub fn find(&self, predicate: &impl Fn(&Element) -> bool) -> Option<&Element> {
        if predicate(self) {
            return Some(self);
        }
        self.child_elements().find_map(|el| el.find(predicate))
    }

    pub fn find_mut(&mut self, predicate: &impl Fn(&Element) -> bool) -> Option<&mut Element> {
        if predicate(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(el) = child {
                if let Some(found) = el.find_mut(predicate) {
                    return Some(found);
                }
            }
        }
        None
    }

    // ==================== Serialization ====================

    /// Serialize to HTML. Text and attribute values are escaped.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        let _ = write!(out, "<{}", self.tag);
        if !self.classes.is_empty() {
            let _ = write!(out, " class=\"{}\"", escape_attr(&self.classes.join(" ")));
        }
        for (name, value) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", name, escape_attr(value));
        }
        if is_void_tag(&self.tag) {
            out.push_str(">");
            return;
        }
        out.push('>');
        for child in &self.children {
            match child {
                Node::Element(el) => el.write_html(out),
                Node::Text(text) => out.push_str(&escape_text(text)),
            }
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => collect_text(&el.children, out),
        }
    }
}

fn is_void_tag(tag: &str) -> bool {
    matches!(tag, "img" | "br" | "hr" | "input" | "meta" | "link")
}

fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

fn escape_attr(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Class Tests ====================

    #[test]
    fn test_add_class_is_idempotent() {
        let mut el = Element::new("div");
        el.add_class("active");
        el.add_class("active");
        assert!(el.has_class("active"));
        assert_eq!(el.to_html(), r#"<div class="active"></div>"#);
    }

    #[test]
    fn test_toggle_class() {
        let mut el = Element::new("button");
        el.toggle_class("active", true);
        assert!(el.has_class("active"));
        el.toggle_class("active", false);
        assert!(!el.has_class("active"));
    }

    #[test]
    fn test_remove_absent_class_is_noop() {
        let mut el = Element::new("div").with_class("card");
        el.remove_class("active");
        assert!(el.has_class("card"));
    }

    // ==================== Text Tests ====================

    #[test]
    fn test_set_text_replaces_children() {
        let mut el = Element::new("p")
            .with_text("old")
            .with_child(Element::new("span").with_text("nested"));
        el.set_text("new");
        assert_eq!(el.text(), "new");
        assert_eq!(el.children().len(), 1);
    }

    #[test]
    fn test_text_concatenates_descendants() {
        let el = Element::new("div")
            .with_text("a")
            .with_child(Element::new("span").with_text("b"));
        assert_eq!(el.text(), "ab");
    }

    // ==================== Traversal Tests ====================

    #[test]
    fn test_find_by_attribute() {
        let tree = Element::new("main").with_child(
            Element::new("div").with_child(Element::new("button").with_attr("id", "lang-en")),
        );
        let found = tree.find(&|el| el.attr("id") == Some("lang-en"));
        assert!(found.is_some());
        assert_eq!(found.unwrap().tag(), "button");
    }

    #[test]
    fn test_for_each_element_mut_visits_all() {
        let mut tree = Element::new("div")
            .with_child(Element::new("p"))
            .with_child(Element::new("p").with_child(Element::new("span")));
        let mut count = 0;
        tree.for_each_element_mut(&mut |_| count += 1);
        assert_eq!(count, 4); // div + p + p + span
    }

    // ==================== Serialization Tests ====================

    #[test]
    fn test_html_escapes_text() {
        let el = Element::new("p").with_text("a < b & c");
        assert_eq!(el.to_html(), "<p>a &lt; b &amp; c</p>");
    }

    #[test]
    fn test_html_escapes_attribute_quotes() {
        let el = Element::new("div").with_attr("data-note", r#"say "hola""#);
        assert_eq!(
            el.to_html(),
            r#"<div data-note="say &quot;hola&quot;"></div>"#
        );
    }

    #[test]
    fn test_img_renders_as_void_element() {
        let el = Element::new("img").with_attr("src", "a.jpg");
        assert_eq!(el.to_html(), r#"<img src="a.jpg">"#);
    }

    #[test]
    fn test_classes_render_before_attributes() {
        let el = Element::new("a")
            .with_class("model-card")
            .with_attr("href", "portfolio.html?id=m1");
        assert_eq!(
            el.to_html(),
            r#"<a class="model-card" href="portfolio.html?id=m1"></a>"#
        );
    }
}
