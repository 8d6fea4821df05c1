use ego_tree::NodeRef;
use scraper::node::Node;
use scraper::ElementRef;

use crate::heuristics::AttributeCue;

/// Flattens an element subtree into one whitespace-normalised string.
///
/// Besides visible text, the projection carries the `alt`, `class` and `src`
/// attributes of every visited element plus synthetic keywords (`Available`,
/// `Dryer`, ...) for icons and CSS classes that only encode state visually.
pub struct RichTextProjector<'c> {
    cues: &'c [AttributeCue],
    skipped_tags: &'c [String],
}

impl<'c> RichTextProjector<'c> {
    pub fn new(cues: &'c [AttributeCue], skipped_tags: &'c [String]) -> Self {
        Self { cues, skipped_tags }
    }

    pub fn project(&self, element: ElementRef) -> String {
        let mut ctx = ProjectionContext::default();
        self.visit_element(element, &mut ctx);
        ctx.finish()
    }

    fn visit_element(&self, element: ElementRef, ctx: &mut ProjectionContext) {
        let attrs = element.value();
        let alt = attrs.attr("alt").unwrap_or_default().to_lowercase();
        let class = attrs.attr("class").unwrap_or_default().to_lowercase();
        let src = attrs.attr("src").unwrap_or_default().to_lowercase();

        for literal in [&alt, &class, &src] {
            ctx.append_token(literal);
        }
        for cue in self.cues {
            if cue.matches(&src, &class) {
                ctx.append_token(&cue.token);
            }
        }

        for child in element.children() {
            self.visit_node(child, ctx);
        }
    }

    fn visit_node(&self, node: NodeRef<'_, Node>, ctx: &mut ProjectionContext) {
        match node.value() {
            Node::Text(text) => ctx.append_token(text),
            Node::Element(el) if self.is_skipped(el.name()) => {}
            Node::Element(_) => {
                if let Some(element) = ElementRef::wrap(node) {
                    self.visit_element(element, ctx);
                }
            }
            // comments, doctypes and processing instructions are invisible
            _ => {}
        }
    }

    fn is_skipped(&self, tag: &str) -> bool {
        self.skipped_tags
            .iter()
            .any(|skipped| skipped.eq_ignore_ascii_case(tag))
    }
}

#[derive(Default)]
struct ProjectionContext {
    builder: String,
    last_was_space: bool,
}

impl ProjectionContext {
    /// Appends `text` followed by a separator, collapsing whitespace runs.
    fn append_token(&mut self, text: &str) {
        for ch in text.chars() {
            self.push(ch);
        }
        self.push(' ');
    }

    fn push(&mut self, ch: char) {
        if ch.is_whitespace() {
            if !self.last_was_space {
                self.builder.push(' ');
                self.last_was_space = true;
            }
        } else {
            self.builder.push(ch);
            self.last_was_space = false;
        }
    }

    fn finish(self) -> String {
        self.builder.trim().to_string()
    }
}
