//! Small typed view tree. Components describe nodes, `html` turns them into markup.

pub mod html;

pub use html::{render, render_document};

#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Element {
    pub tag: &'static str,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    /// Concatenated text of this node and its descendants.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        match self {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) => el.children.iter().for_each(|c| c.collect_text(out)),
        }
    }

    /// Visit every element depth-first, parents before children.
    pub fn walk_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        if let Node::Element(el) = self {
            f(el);
            for child in &mut el.children {
                child.walk_mut(f);
            }
        }
    }

    pub fn find_by_id(&self, id: &str) -> Option<&Element> {
        let el = self.as_element()?;
        if el.get_attr("id") == Some(id) {
            return Some(el);
        }
        el.children.iter().find_map(|c| c.find_by_id(id))
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Element {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Set an attribute, replacing an existing value.
    pub fn attr(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn class(mut self, class: &str) -> Self {
        for name in class.split_whitespace() {
            self.add_class(name);
        }
        self
    }

    pub fn child(mut self, child: impl Into<Node>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn remove_attr(&mut self, name: &str) {
        self.attrs.retain(|(k, _)| k != name);
    }

    pub fn has_class(&self, name: &str) -> bool {
        self.get_attr("class")
            .map(|c| c.split_whitespace().any(|n| n == name))
            .unwrap_or(false)
    }

    pub fn add_class(&mut self, name: &str) {
        if self.has_class(name) {
            return;
        }
        let classes = match self.get_attr("class") {
            Some(existing) if !existing.is_empty() => format!("{} {}", existing, name),
            _ => name.to_string(),
        };
        self.set_attr("class", classes);
    }

    pub fn remove_class(&mut self, name: &str) {
        let Some(existing) = self.get_attr("class") else {
            return;
        };
        let remaining = existing
            .split_whitespace()
            .filter(|n| *n != name)
            .collect::<Vec<_>>()
            .join(" ");
        if remaining.is_empty() {
            self.remove_attr("class");
        } else {
            self.set_attr("class", remaining);
        }
    }

    pub fn toggle_class(&mut self, name: &str, on: bool) {
        if on {
            self.add_class(name);
        } else {
            self.remove_class(name);
        }
    }
}
