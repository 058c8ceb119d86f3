use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{Element, Node};

const VOID_TAGS: &[&str] = &["br", "hr", "img", "input", "link", "meta", "source"];

pub fn render(node: &Node) -> String {
    let mut out = String::new();
    write_node(node, &mut out);
    out
}

/// Full HTML document around a body tree.
pub fn render_document(title: &str, lang: &str, head_extra: &[Node], body: &Node) -> String {
    let mut out = String::from("<!DOCTYPE html>\n");
    out.push_str(&format!(
        "<html lang=\"{}\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{}</title>",
        encode_double_quoted_attribute(lang),
        encode_text(title)
    ));
    for node in head_extra {
        write_node(node, &mut out);
    }
    out.push_str("</head><body>");
    write_node(body, &mut out);
    out.push_str("</body></html>\n");
    out
}

fn write_node(node: &Node, out: &mut String) {
    match node {
        Node::Text(text) => out.push_str(&encode_text(text)),
        Node::Element(el) => write_element(el, out),
    }
}

fn write_element(el: &Element, out: &mut String) {
    out.push('<');
    out.push_str(el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&encode_double_quoted_attribute(value));
        out.push('"');
    }
    out.push('>');

    if VOID_TAGS.contains(&el.tag) {
        return;
    }

    for child in &el.children {
        write_node(child, out);
    }
    out.push_str("</");
    out.push_str(el.tag);
    out.push('>');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escapes_text_and_attributes() {
        let node: Node = Element::new("a")
            .attr("href", "https://wa.me/81?text=a\"b")
            .text("<Toyota & co>")
            .into();
        assert_eq!(
            render(&node),
            "<a href=\"https://wa.me/81?text=a&quot;b\">&lt;Toyota &amp; co&gt;</a>"
        );
    }

    #[test]
    fn test_void_elements() {
        let node: Node = Element::new("img").attr("src", "x.jpg").attr("alt", "").into();
        assert_eq!(render(&node), "<img src=\"x.jpg\" alt=\"\">");
    }

    #[test]
    fn test_document_wrapper() {
        let doc = render_document("CARJU", "en", &[], &Element::new("main").into());
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains("<title>CARJU</title>"));
        assert!(doc.contains("<body><main></main></body>"));
    }
}
