use scraper::{ElementRef, Html};

/// Owned HTML tree. Only elements, text and comments survive parsing.
/// Comment bodies are dropped; the node is kept so raw child positions
/// match the source markup.
#[derive(Debug, Clone)]
pub enum Node {
    Element(Element),
    Text(String),
    Comment,
}

#[derive(Debug, Clone)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

#[derive(Debug, Clone)]
pub struct Document {
    root: Element,
}

/// Element filter. `nth_child` is 1-based and counts element siblings only,
/// like CSS `:nth-child`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Predicate {
    pub id: Option<&'static str>,
    pub tag: Option<&'static str>,
    pub class: Option<&'static str>,
    pub nth_child: Option<usize>,
}

impl Predicate {
    pub const fn id(id: &'static str) -> Self {
        Self { id: Some(id), tag: None, class: None, nth_child: None }
    }

    pub const fn tag(tag: &'static str) -> Self {
        Self { id: None, tag: Some(tag), class: None, nth_child: None }
    }

    pub const fn class(class: &'static str) -> Self {
        Self { id: None, tag: None, class: Some(class), nth_child: None }
    }

    pub const fn with_class(self, class: &'static str) -> Self {
        Self { class: Some(class), ..self }
    }

    pub const fn nth_child(self, n: usize) -> Self {
        Self { nth_child: Some(n), ..self }
    }

    /// `position` is the zero-based index among the parent's element children.
    pub fn matches(&self, el: &Element, position: usize) -> bool {
        if let Some(id) = self.id {
            if el.attr("id") != Some(id) {
                return false;
            }
        }
        if let Some(tag) = self.tag {
            if !el.tag.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(class) = self.class {
            if !el.has_class(class) {
                return false;
            }
        }
        match self.nth_child {
            Some(n) => position + 1 == n,
            None => true,
        }
    }
}

impl Node {
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    fn push_text(&self, out: &mut String) {
        match self {
            Node::Element(el) => el.children.iter().for_each(|c| c.push_text(out)),
            Node::Text(t) => out.push_str(t),
            Node::Comment => {}
        }
    }

    pub fn text(&self) -> String {
        let mut out = String::new();
        self.push_text(&mut out);
        out
    }
}

impl Element {
    /// Children that are elements; text and comment nodes are skipped.
    pub fn element_children(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// The `index`-th element child, as a node.
    pub fn element_child(&self, index: usize) -> Option<&Node> {
        self.children
            .iter()
            .filter(|n| matches!(n, Node::Element(_)))
            .nth(index)
    }

    /// Raw child at `index`, whitespace text nodes included.
    pub fn content(&self, index: usize) -> Option<&Node> {
        self.children.get(index)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|c| c.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Concatenated text of all descendant text nodes.
    pub fn text(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            child.push_text(&mut out);
        }
        out
    }

    fn find_first(&self, pred: &Predicate) -> Option<&Element> {
        for (pos, child) in self.element_children().enumerate() {
            if pred.matches(child, pos) {
                return Some(child);
            }
            if let Some(found) = child.find_first(pred) {
                return Some(found);
            }
        }
        None
    }

    fn collect_elements<'a>(&'a self, out: &mut Vec<&'a Element>) {
        for child in self.element_children() {
            out.push(child);
            child.collect_elements(out);
        }
    }
}

impl Document {
    pub fn parse(html: &str) -> Self {
        let html = Html::parse_document(html);
        let top = convert(html.root_element());
        Self {
            root: Element {
                tag: String::new(),
                attrs: Vec::new(),
                children: vec![Node::Element(top)],
            },
        }
    }

    /// First element in document order matching `pred`.
    pub fn find_first(&self, pred: &Predicate) -> Option<&Element> {
        self.root.find_first(pred)
    }

    /// Every element in document order.
    pub fn elements(&self) -> Vec<&Element> {
        let mut out = Vec::new();
        self.root.collect_elements(&mut out);
        out
    }
}

fn convert(el: ElementRef<'_>) -> Element {
    let value = el.value();
    let children = el
        .children()
        .filter_map(|child| match child.value() {
            scraper::Node::Element(_) => ElementRef::wrap(child).map(|e| Node::Element(convert(e))),
            scraper::Node::Text(t) => Some(Node::Text(t.text.to_string())),
            scraper::Node::Comment(_) => Some(Node::Comment),
            _ => None,
        })
        .collect();

    Element {
        tag: value.name().to_string(),
        attrs: value
            .attrs()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body>
<div class="wrap">
  <!-- note -->
  <p>one</p>
  <div class="row x">first</div>
  <div class="row">second <b>bold</b><!-- hidden --></div>
</div>
</body></html>"#;

    #[test]
    fn element_children_skip_text_and_comments() {
        let doc = Document::parse(PAGE);
        let wrap = doc.find_first(&Predicate::class("wrap")).unwrap();
        let tags: Vec<&str> = wrap.element_children().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags, vec!["p", "div", "div"]);
        assert!(wrap.children.len() > 3);
        assert!(matches!(wrap.content(0), Some(Node::Text(_))));
    }

    #[test]
    fn nth_child_counts_element_siblings() {
        let doc = Document::parse(PAGE);
        let second = doc
            .find_first(&Predicate::class("row").nth_child(3))
            .unwrap();
        assert!(second.text().starts_with("second"));
        assert!(doc.find_first(&Predicate::class("row").nth_child(1)).is_none());
    }

    #[test]
    fn text_excludes_comments() {
        let doc = Document::parse(PAGE);
        let el = doc.find_first(&Predicate::class("row").nth_child(3)).unwrap();
        assert_eq!(el.text(), "second bold");
    }

    #[test]
    fn class_matching_is_token_based() {
        let doc = Document::parse(PAGE);
        let first = doc.find_first(&Predicate::class("x")).unwrap();
        assert!(first.has_class("row"));
        assert!(!first.has_class("ro"));
        assert!(doc.find_first(&Predicate::tag("b")).is_some());
    }

    #[test]
    fn id_predicate_matches_attribute() {
        let doc = Document::parse(r#"<div><p id="panel-A">a</p><p id="panel-B">b</p></div>"#);
        assert_eq!(doc.find_first(&Predicate::id("panel-B")).unwrap().text(), "b");
        assert!(doc.find_first(&Predicate::id("panel")).is_none());
        assert!(doc.find_first(&Predicate::id("panel-A").nth_child(2)).is_none());
    }

    #[test]
    fn elements_in_document_order() {
        let doc = Document::parse(PAGE);
        let tags: Vec<&str> = doc.elements().iter().map(|e| e.tag.as_str()).collect();
        assert_eq!(tags[..3], ["html", "head", "body"]);
        assert_eq!(tags.last(), Some(&"b"));
    }
}
