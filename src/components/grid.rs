use rand::seq::SliceRandom;
use rand::Rng;

use crate::inquiry::{Inquiry, InquiryTarget};
use crate::models::{CatalogItem, ContentBundle, WILDCARD};
use crate::parsers::{match_key, CurrencyFormatter};
use crate::view::{Element, Node};

pub const NO_MATCHES_TEXT: &str = "No matching vehicles yet. Try another brand or category.";

/// One side of the filter: anything, or items whose match key equals this one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Any,
    Key(String),
}

impl Filter {
    /// Select value as shown in the dropdown.
    pub fn from_selection(value: &str) -> Self {
        let key = match_key(value);
        if key.is_empty() || key == match_key(WILDCARD) {
            Filter::Any
        } else {
            Filter::Key(key)
        }
    }

    pub fn accepts(&self, item_key: &str) -> bool {
        match self {
            Filter::Any => true,
            Filter::Key(key) => key == item_key,
        }
    }

    pub fn is_any(&self) -> bool {
        matches!(self, Filter::Any)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridSelection {
    pub brand: String,
    pub category: String,
}

impl Default for GridSelection {
    fn default() -> Self {
        Self {
            brand: WILDCARD.to_string(),
            category: WILDCARD.to_string(),
        }
    }
}

impl GridSelection {
    pub fn new(brand: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            brand: brand.into(),
            category: category.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum GridView<'a> {
    Cards(Vec<&'a CatalogItem>),
    NoMatches,
}

pub struct CatalogGrid<'a> {
    items: &'a [CatalogItem],
    brands: &'a [String],
    categories: &'a [String],
    card_count: usize,
}

impl<'a> CatalogGrid<'a> {
    pub fn new(bundle: &'a ContentBundle, card_count: usize) -> Self {
        Self {
            items: &bundle.catalog_items,
            brands: &bundle.brands,
            categories: &bundle.categories,
            card_count,
        }
    }

    pub fn brand_options(&self) -> Vec<String> {
        with_wildcard(self.brands)
    }

    pub fn category_options(&self) -> Vec<String> {
        with_wildcard(self.categories)
    }

    /// Pick the cards for a selection.
    ///
    /// With both filters on "All" this is a fresh random sample on every call;
    /// otherwise the first matches in list order.
    pub fn select<R: Rng + ?Sized>(&self, selection: &GridSelection, rng: &mut R) -> GridView<'a> {
        let brand = Filter::from_selection(&selection.brand);
        let category = Filter::from_selection(&selection.category);

        let chosen: Vec<&'a CatalogItem> = if brand.is_any() && category.is_any() {
            self.items
                .choose_multiple(rng, self.card_count)
                .collect()
        } else {
            self.items
                .iter()
                .filter(|item| brand.accepts(&item.brand_key) && category.accepts(&item.category_key))
                .take(self.card_count)
                .collect()
        };

        if chosen.is_empty() {
            GridView::NoMatches
        } else {
            GridView::Cards(chosen)
        }
    }

    /// Filter selects plus the grid for the current selection.
    pub fn render<R: Rng + ?Sized>(
        &self,
        selection: &GridSelection,
        rng: &mut R,
        fmt: &CurrencyFormatter,
        target: &InquiryTarget,
    ) -> Node {
        let grid = Element::new("div").id("brandGrid").class("grid");
        let grid = match self.select(selection, rng) {
            GridView::Cards(items) => grid.children(items.into_iter().map(|item| card_view(item, fmt, target))),
            GridView::NoMatches => grid.child(
                Element::new("div")
                    .class("muted small no-matches")
                    .text(NO_MATCHES_TEXT),
            ),
        };

        Element::new("div")
            .class("catalog")
            .child(
                Element::new("div")
                    .class("filters")
                    .child(select_view("brandSelect", "Brand", &self.brand_options(), &selection.brand))
                    .child(select_view(
                        "categorySelect",
                        "Category",
                        &self.category_options(),
                        &selection.category,
                    )),
            )
            .child(grid)
            .into()
    }
}

fn with_wildcard(labels: &[String]) -> Vec<String> {
    std::iter::once(WILDCARD.to_string())
        .chain(labels.iter().cloned())
        .collect()
}

pub fn select_view(id: &str, label: &str, options: &[String], selected: &str) -> Element {
    let selected_key = match_key(selected);
    Element::new("label")
        .attr("for", id)
        .text(label)
        .child(
            Element::new("select")
                .id(id)
                .children(options.iter().map(|option| {
                    let el = Element::new("option").attr("value", option.clone()).text(option.clone());
                    if match_key(option) == selected_key {
                        el.attr("selected", "selected")
                    } else {
                        el
                    }
                })),
        )
}

pub fn card_view(item: &CatalogItem, fmt: &CurrencyFormatter, target: &InquiryTarget) -> Element {
    let title = item.title();

    let mut meta: Vec<String> = [item.brand.clone(), item.category.clone()]
        .into_iter()
        .flatten()
        .collect();
    if let Some(year) = item.year {
        meta.push(year.to_string());
    }
    if let Some(price) = item.market_price {
        meta.push(fmt.format(price));
    }
    let meta = if meta.is_empty() {
        "Models & images coming soon.".to_string()
    } else {
        meta.join(" · ")
    };

    let inquiry = Inquiry::for_item(item, fmt, target);
    let mut card = Element::new("div")
        .class("card")
        .attr("data-inquiry", inquiry.message.clone())
        .child(Element::new("h3").text(title.clone()))
        .child(Element::new("p").text(meta))
        .child(
            Element::new("img")
                .attr("src", item.image_source.clone())
                .attr("alt", title)
                .attr("loading", "lazy")
                .attr("data-candidates", item.image_candidates.join(" ")),
        );
    if let Some(url) = inquiry.whatsapp_link() {
        card.set_attr("data-whatsapp", url);
    }
    if let Some(url) = inquiry.email_link() {
        card.set_attr("data-email", url);
    }
    card
}
