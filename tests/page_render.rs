use rand::rngs::StdRng;
use rand::SeedableRng;
use scraper::{Html, Selector};
use serde_json::json;

use carju_site::chrome::{AppState, LanguageCode};
use carju_site::config::Config;
use carju_site::loader::{embedded_bundle, fee_rows_from_values};
use carju_site::models::{ContentBundle, DeliveryItem};
use carju_site::page::{render_page, PageContext};
use carju_site::storage::SessionMarker;

fn select<'a>(doc: &'a Html, css: &str) -> Vec<scraper::ElementRef<'a>> {
    let selector = Selector::parse(css).unwrap();
    doc.select(&selector).collect()
}

fn bundle() -> ContentBundle {
    let mut bundle = embedded_bundle();
    bundle.delivery_items.push(DeliveryItem {
        caption: Some("Delivered to Dar es Salaam".into()),
        image_source: "https://example.com/d.jpg".into(),
        image_candidates: vec!["https://example.com/d.jpg".into()],
    });
    bundle.fee_rows = fee_rows_from_values(vec![
        json!({"Destination": "Mombasa", "Shipping Fee": "1450"}),
        json!({"Destination": "Durban", "Shipping Fee": "call us"}),
    ]);
    bundle
}

fn render(lang: &str) -> Html {
    let config = Config::default();
    let state = AppState {
        lang: LanguageCode::parse(lang).unwrap(),
    };
    let ctx = PageContext {
        config: &config,
        state: &state,
        year: 2026,
    };
    let mut session = SessionMarker::new();
    let html = render_page(&bundle(), &ctx, &mut session, &mut StdRng::seed_from_u64(7));
    Html::parse_document(&html)
}

#[test]
fn test_rendered_page_structure() {
    let doc = render("en");

    assert_eq!(select(&doc, "title")[0].inner_html(), "CARJU Auto");
    assert_eq!(select(&doc, "#brandGrid .card").len(), 3);
    assert_eq!(select(&doc, "#slider-cars .slider-dot").len(), 3);
    assert_eq!(select(&doc, "#slider-cars .slider-dot.active").len(), 1);
    assert_eq!(select(&doc, "#slider-deliveries .slider-dot").len(), 1);

    let options: Vec<String> = select(&doc, "#brandSelect option")
        .iter()
        .map(|o| o.value().attr("value").unwrap_or_default().to_string())
        .collect();
    assert_eq!(options[0], "All");
    assert!(options.iter().any(|o| o == "Toyota"));
}

#[test]
fn test_cards_carry_inquiry_links() {
    let doc = render("en");
    for card in select(&doc, "#brandGrid .card") {
        let message = card.value().attr("data-inquiry").unwrap();
        assert!(message.starts_with("Hello CARJU, I'm interested in the "));
        let whatsapp = card.value().attr("data-whatsapp").unwrap();
        assert!(whatsapp.starts_with("https://wa.me/818047909663?text="));
        assert!(card.value().attr("data-email").unwrap().starts_with("mailto:"));
    }
}

#[test]
fn test_fee_table_formats_money_columns() {
    let doc = render("en");
    let headers: Vec<String> = select(&doc, ".fees-table th")
        .iter()
        .map(|th| th.text().collect())
        .collect();
    assert_eq!(headers, vec!["Destination", "Shipping Fee"]);

    let cells: Vec<String> = select(&doc, ".fees-table td")
        .iter()
        .map(|td| td.text().collect())
        .collect();
    assert_eq!(cells, vec!["Mombasa", "$1,450", "Durban", "call us"]);
}

#[test]
fn test_language_controls_visible_text() {
    let doc = render("ja");
    assert_eq!(
        select(&doc, "html")[0].value().attr("lang"),
        Some("ja")
    );

    let visible: Vec<String> = select(&doc, "#fees h2:not(.hidden)")
        .iter()
        .map(|h| h.text().collect())
        .collect();
    assert_eq!(visible, vec!["料金"]);
    assert_eq!(select(&doc, "button[data-lang-btn=\"ja\"].badge").len(), 0);
    assert_eq!(select(&doc, "button[data-lang-btn=\"en\"].badge").len(), 1);
}
