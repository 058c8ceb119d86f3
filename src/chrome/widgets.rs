use crate::models::ContactChannels;
use crate::storage::SessionMarker;
use crate::view::{Element, Node};

pub const PROMO_FLAG: &str = "carju_promo_seen";

/// Open/closed state shared by the mobile nav, modals and read-more blocks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Disclosure {
    open: bool,
}

impl Disclosure {
    pub fn closed() -> Self {
        Self { open: false }
    }

    pub fn opened() -> Self {
        Self { open: true }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Flip and return the new state.
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

fn toggle_button(controls: &str, label: &str, state: Disclosure) -> Element {
    Element::new("button")
        .attr("type", "button")
        .attr("aria-controls", controls)
        .attr("aria-expanded", state.is_open().to_string())
        .text(label)
}

fn panel(id: &str, class: &str, state: Disclosure) -> Element {
    let mut panel = Element::new("div").id(id).class(class);
    panel.toggle_class("hidden", !state.is_open());
    panel
}

pub fn mobile_nav(links: &[(&str, &str)], state: Disclosure) -> Element {
    let menu = panel("mobile-menu", "nav-links", state).children(
        links
            .iter()
            .map(|(href, label)| Element::new("a").attr("href", *href).text(*label)),
    );
    Element::new("nav")
        .class("site-nav")
        .child(toggle_button("mobile-menu", "☰", state).class("nav-toggle"))
        .child(menu)
}

pub fn modal(id: &str, title: &str, body: Vec<Node>, state: Disclosure) -> Element {
    panel(id, "modal", state)
        .attr("role", "dialog")
        .attr("aria-modal", "true")
        .child(
            Element::new("div")
                .class("modal-content")
                .child(Element::new("h3").text(title))
                .children(body)
                .child(
                    Element::new("button")
                        .class("modal-close")
                        .attr("type", "button")
                        .attr("aria-label", "Close")
                        .text("×"),
                ),
        )
}

pub fn read_more(id: &str, summary: Vec<Node>, more: Vec<Node>, state: Disclosure) -> Element {
    let label = if state.is_open() { "Read less" } else { "Read more" };
    Element::new("div")
        .class("read-more")
        .child(Element::new("div").class("read-more-summary").children(summary))
        .child(panel(id, "read-more-body", state).children(more))
        .child(toggle_button(id, label, state).class("read-more-toggle"))
}

/// Shown at most once per session.
pub fn promo_banner(text: &str, session: &mut SessionMarker) -> Option<Element> {
    if !session.mark(PROMO_FLAG) {
        return None;
    }
    Some(
        Element::new("div")
            .id("promo-banner")
            .class("promo-banner")
            .attr("role", "status")
            .child(Element::new("p").text(text))
            .child(
                Element::new("button")
                    .class("promo-close")
                    .attr("type", "button")
                    .attr("aria-label", "Dismiss")
                    .text("×"),
            ),
    )
}

pub fn social_links(contact: &ContactChannels) -> Option<Element> {
    let mut links = Vec::new();
    if let Some(digits) = contact.whatsapp_digits() {
        links.push(
            Element::new("a")
                .id("wa-link")
                .attr("href", format!("https://wa.me/{}", digits))
                .attr("rel", "noopener")
                .text("WhatsApp"),
        );
    }
    if let Some(tiktok) = contact.tiktok.as_deref().filter(|t| !t.trim().is_empty()) {
        links.push(
            Element::new("a")
                .id("tiktok-link")
                .attr("href", tiktok.trim())
                .attr("rel", "noopener")
                .text("TikTok"),
        );
    }
    if links.is_empty() {
        None
    } else {
        Some(Element::new("div").class("socials").children(links))
    }
}

pub fn callback_form() -> Element {
    let field = |name: &str, label: &str, kind: &str, required: bool| {
        let input = Element::new("input")
            .attr("type", kind)
            .attr("name", name)
            .id(&format!("callback-{}", name));
        let input = if required {
            input.attr("required", "required")
        } else {
            input
        };
        Element::new("label")
            .attr("for", format!("callback-{}", name))
            .text(label)
            .child(input)
    };

    Element::new("form")
        .id("callback-form")
        .class("callback-form")
        .attr("method", "post")
        .child(field("name", "Name", "text", false))
        .child(field("phone", "Phone / WhatsApp", "tel", true))
        .child(field("note", "Best time to call", "text", false))
        .child(
            Element::new("button")
                .attr("type", "submit")
                .text("Request a callback"),
        )
}

pub fn footer(site_name: &str, year: i32) -> Element {
    Element::new("footer")
        .class("site-footer")
        .child(Element::new("small").text(format!("© {} {}", year, site_name)))
}
