use super::document::{Document, Element, Node, Predicate};

/// One positional move down the tree.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// Nth raw child, zero-based, counting text and comment nodes too.
    Content(usize),
    /// First element child matching the predicate (`div:nth-child(2)`).
    Child(Predicate),
}

/// What to read once the path is walked.
#[derive(Debug, Clone, Copy)]
pub enum Leaf {
    Text,
    Attr(&'static str),
}

impl Step {
    pub fn apply<'a>(&self, node: &'a Node) -> Option<&'a Node> {
        let el = node.as_element()?;
        match *self {
            Step::Content(i) => el.content(i),
            Step::Child(pred) => el
                .children
                .iter()
                .filter(|n| n.as_element().is_some())
                .enumerate()
                .find(|(pos, n)| n.as_element().is_some_and(|e| pred.matches(e, *pos)))
                .map(|(_, n)| n),
        }
    }
}

impl Leaf {
    pub fn read(&self, node: &Node) -> Option<String> {
        match *self {
            Leaf::Text => Some(node.text()),
            Leaf::Attr(name) => node.as_element()?.attr(name).map(str::to_string),
        }
    }
}

/// Walk `steps` from `start`. On failure returns the index of the step that
/// did not resolve.
pub fn descend<'a>(start: &'a Node, steps: &[Step]) -> Result<&'a Node, usize> {
    steps
        .iter()
        .enumerate()
        .try_fold(start, |node, (i, step)| step.apply(node).ok_or(i))
}

/// Anchor element plus a fixed descent.
#[derive(Debug, Clone)]
pub struct Locator {
    pub anchor: Predicate,
    pub steps: Vec<Step>,
}

impl Locator {
    pub fn resolve<'a>(&self, doc: &'a Document) -> Option<&'a Element> {
        let anchor = doc.find_first(&self.anchor)?;
        let mut current = anchor;
        for step in &self.steps {
            let next = match *step {
                Step::Child(pred) => current
                    .element_children()
                    .enumerate()
                    .find(|(pos, e)| pred.matches(e, *pos))
                    .map(|(_, e)| e),
                Step::Content(i) => current.content(i).and_then(Node::as_element),
            };
            current = next?;
        }
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"<html><body><div class="outer">
  <div class="a"><span>x</span></div>
  <div class="b">
    <span id="one">1</span>
    <em data-v="7">2</em>
  </div>
</div></body></html>"#;

    #[test]
    fn locator_follows_child_predicates() {
        let doc = Document::parse(PAGE);
        let loc = Locator {
            anchor: Predicate::class("outer"),
            steps: vec![Step::Child(Predicate::tag("div").nth_child(2)), Step::Child(Predicate::tag("em"))],
        };
        let em = loc.resolve(&doc).unwrap();
        assert_eq!(em.tag, "em");
        assert_eq!(em.attr("data-v"), Some("7"));
    }

    #[test]
    fn content_steps_count_whitespace_nodes() {
        let doc = Document::parse(PAGE);
        let b = doc.find_first(&Predicate::class("b")).unwrap();
        let start = b.content(1).unwrap();
        assert_eq!(Leaf::Text.read(start).as_deref(), Some("1"));

        let outer = doc.find_first(&Predicate::class("outer")).unwrap();
        let first = outer.element_child(1).unwrap();
        let em = descend(first, &[Step::Content(3)]).unwrap();
        assert_eq!(Leaf::Attr("data-v").read(em).as_deref(), Some("7"));
    }

    #[test]
    fn descend_reports_failing_step() {
        let doc = Document::parse(PAGE);
        let outer = doc.find_first(&Predicate::class("outer")).unwrap();
        let a = outer.element_child(0).unwrap();
        // content 0 of div.a is the span; its content 0 is text, which has no children
        assert_eq!(
            descend(a, &[Step::Content(0), Step::Content(0), Step::Content(0)]).err(),
            Some(2)
        );
        assert!(Leaf::Attr("style").read(a).is_none());
    }
}
