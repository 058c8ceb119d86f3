//! Assembles the whole page from a loaded bundle.

use rand::Rng;

use crate::chrome::language::{language_switcher, localized};
use crate::chrome::widgets::{
    callback_form, footer, mobile_nav, modal, promo_banner, read_more, social_links,
};
use crate::chrome::{apply_language, AppState, Disclosure};
use crate::components::grid::GridSelection;
use crate::components::slider::slider_view;
use crate::components::{fees_table, CatalogGrid, SlideItem};
use crate::config::Config;
use crate::inquiry::InquiryTarget;
use crate::models::ContentBundle;
use crate::storage::SessionMarker;
use crate::view::{render_document, Element, Node};

pub const SITE_LANGUAGES: &[(&str, &str)] = &[("en", "English"), ("ja", "日本語")];

const NAV_LINKS: &[(&str, &str)] = &[
    ("#cars", "Cars"),
    ("#catalog", "Catalog"),
    ("#deliveries", "Deliveries"),
    ("#fees", "Fees"),
    ("#callback", "Contact"),
];

pub struct PageContext<'a> {
    pub config: &'a Config,
    pub state: &'a AppState,
    pub year: i32,
}

fn section(id: &str, titles: &[(&str, &str)]) -> Element {
    Element::new("section").id(id).children(localized("h2", titles))
}

pub fn build_page<R: Rng + ?Sized>(
    bundle: &ContentBundle,
    ctx: &PageContext<'_>,
    session: &mut SessionMarker,
    rng: &mut R,
) -> Node {
    let config = ctx.config;
    let sections = &config.sections;
    let fmt = config.currency.formatter();
    let target = InquiryTarget::new(&bundle.contact, &config.contact.email);

    let mut header = Element::new("header")
        .class("site-header")
        .child(Element::new("strong").class("logo").text(config.site.name.clone()))
        .child(language_switcher(SITE_LANGUAGES))
        .child(mobile_nav(NAV_LINKS, Disclosure::closed()));
    if let Some(socials) = social_links(&bundle.contact) {
        header = header.child(socials);
    }

    let mut main = Element::new("main");

    if sections.promo_banner {
        if let Some(banner) = promo_banner("Free pre-shipment inspection on every vehicle this month.", session) {
            main = main.child(banner);
        }
    }

    if sections.cars_slider {
        let slides: Vec<SlideItem> = bundle
            .catalog_items
            .iter()
            .map(|item| SlideItem::from_catalog(item, &fmt))
            .collect();
        if let Some(slider) = slider_view("slider-cars", &slides) {
            main = main.child(
                section("cars", &[("en", "Featured vehicles"), ("ja", "おすすめ車両")]).child(slider),
            );
        }
    }

    if sections.catalog_grid {
        let grid = CatalogGrid::new(bundle, config.grid.card_count);
        main = main.child(
            section("catalog", &[("en", "Browse by brand"), ("ja", "メーカー別に探す")])
                .child(grid.render(&GridSelection::default(), rng, &fmt, &target)),
        );
    }

    if sections.deliveries_slider {
        let slides: Vec<SlideItem> = bundle
            .delivery_items
            .iter()
            .map(SlideItem::from_delivery)
            .collect();
        if let Some(slider) = slider_view("slider-deliveries", &slides) {
            main = main.child(
                section("deliveries", &[("en", "Recent deliveries"), ("ja", "納車実績")]).child(slider),
            );
        }
    }

    if sections.fees_table {
        main = main.child(
            section("fees", &[("en", "Fees"), ("ja", "料金")]).child(fees_table(&bundle.fee_rows, &fmt)),
        );
    }

    main = main.child(
        section("about", &[("en", "About us"), ("ja", "会社概要")]).child(read_more(
            "about-more",
            localized(
                "p",
                &[
                    ("en", "We export quality used vehicles and machinery from Japan."),
                    ("ja", "日本から高品質な中古車・機械を輸出しています。"),
                ],
            ),
            localized(
                "p",
                &[
                    ("en", "Every vehicle is inspected before shipping and documents are handled for you."),
                    ("ja", "すべての車両は出荷前に検査され、書類手続きも代行します。"),
                ],
            ),
            Disclosure::closed(),
        )),
    );

    if sections.callback_form {
        main = main.child(
            section("callback", &[("en", "Request a callback"), ("ja", "折り返しのご依頼")])
                .child(callback_form()),
        );
    }

    main = main.child(modal(
        "inquiry-modal",
        "Contact us",
        vec![Element::new("p")
            .text("Continue on WhatsApp? Choose cancel to send an e-mail instead.")
            .into()],
        Disclosure::closed(),
    ));

    let mut page: Node = Element::new("div")
        .class("page")
        .child(header)
        .child(main)
        .child(footer(&config.site.name, ctx.year))
        .into();

    apply_language(&mut page, &ctx.state.lang);
    page
}

pub fn render_page<R: Rng + ?Sized>(
    bundle: &ContentBundle,
    ctx: &PageContext<'_>,
    session: &mut SessionMarker,
    rng: &mut R,
) -> String {
    let body = build_page(bundle, ctx, session, rng);
    render_document(&ctx.config.site.name, ctx.state.lang.as_str(), &[], &body)
}
