use crate::models::{
    CatalogItem, ConfigCar, ConfigDelivery, DeliveryItem, RawCar, RawDelivery, SheetCarRow,
    SheetDeliveryRow,
};
use crate::parsers::{clean_text, match_key, parse_price, parse_year, resolve_image};

/// Map a raw car record onto the canonical item. Total: never fails, never drops.
pub fn normalize_car(raw: &RawCar) -> CatalogItem {
    match raw {
        RawCar::Sheet(row) => from_sheet_row(row),
        RawCar::Local(car) | RawCar::Embedded(car) => from_config_car(car),
    }
}

pub fn normalize_delivery(raw: &RawDelivery) -> DeliveryItem {
    match raw {
        RawDelivery::Sheet(SheetDeliveryRow { caption, image_url }) => {
            build_delivery(caption.as_deref(), image_url.as_deref())
        }
        RawDelivery::Local(ConfigDelivery { src, caption })
        | RawDelivery::Embedded(ConfigDelivery { src, caption }) => {
            build_delivery(caption.as_deref(), src.as_deref())
        }
    }
}

fn from_sheet_row(row: &SheetCarRow) -> CatalogItem {
    build_car(CarFields {
        name: row.name.as_deref(),
        brand: row.brand.as_deref(),
        category: row.category.as_deref(),
        year: row.year.as_deref(),
        image: row.image_url.as_deref(),
        price: row.market_price.as_deref(),
    })
}

fn from_config_car(car: &ConfigCar) -> CatalogItem {
    build_car(CarFields {
        name: car.name.as_deref(),
        brand: car.brand.as_deref(),
        category: car.category.as_deref(),
        year: car.year.as_deref(),
        image: car.src.as_deref(),
        price: car.price.as_deref(),
    })
}

struct CarFields<'a> {
    name: Option<&'a str>,
    brand: Option<&'a str>,
    category: Option<&'a str>,
    year: Option<&'a str>,
    image: Option<&'a str>,
    price: Option<&'a str>,
}

fn build_car(fields: CarFields<'_>) -> CatalogItem {
    let brand = text_field(fields.brand);
    let category = text_field(fields.category);
    let image = resolve_image(fields.image.unwrap_or_default());
    let market_price_raw = text_field(fields.price);

    CatalogItem {
        name: text_field(fields.name),
        brand_key: brand.as_deref().map(match_key).unwrap_or_default(),
        category_key: category.as_deref().map(match_key).unwrap_or_default(),
        brand,
        category,
        year: fields.year.and_then(parse_year),
        image_source: image.source,
        image_candidates: image.candidates,
        market_price: market_price_raw.as_deref().and_then(parse_price),
        market_price_raw,
    }
}

fn build_delivery(caption: Option<&str>, image: Option<&str>) -> DeliveryItem {
    let image = resolve_image(image.unwrap_or_default());
    DeliveryItem {
        caption: text_field(caption),
        image_source: image.source,
        image_candidates: image.candidates,
    }
}

fn text_field(value: Option<&str>) -> Option<String> {
    value.map(clean_text).filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn sheet(value: serde_json::Value) -> RawCar {
        RawCar::Sheet(serde_json::from_value(value).unwrap())
    }

    #[test]
    fn test_land_cruiser_example() {
        let item = normalize_car(&sheet(json!({
            "Name": "Land Cruiser",
            "Brand": "Toyota",
            "Year": "2024",
            "ImageURL": "https://drive.google.com/file/d/ABCDEFGHIJKLMNOPQRSTUVWXY0123/view"
        })));

        let direct = "https://drive.google.com/uc?export=view&id=ABCDEFGHIJKLMNOPQRSTUVWXY0123";
        assert_eq!(item.name.as_deref(), Some("Land Cruiser"));
        assert_eq!(item.brand.as_deref(), Some("Toyota"));
        assert_eq!(item.year, Some(2024));
        assert_eq!(item.image_source, direct);
        assert_eq!(
            item.image_candidates,
            vec![
                direct.to_string(),
                "https://drive.google.com/thumbnail?id=ABCDEFGHIJKLMNOPQRSTUVWXY0123&sz=w2000"
                    .to_string(),
                "https://lh3.googleusercontent.com/d/ABCDEFGHIJKLMNOPQRSTUVWXY0123=w2000"
                    .to_string(),
            ]
        );
        assert_eq!(item.category, None);
        assert_eq!(item.brand_key, "toyota");
        assert_eq!(item.category_key, "");
    }

    #[test]
    fn test_match_keys_and_price() {
        let item = normalize_car(&RawCar::Local(ConfigCar {
            brand: Some("  Mitsubishi  Fuso ".into()),
            category: Some("Truck".into()),
            price: Some("$18,400".into()),
            ..Default::default()
        }));
        assert_eq!(item.brand.as_deref(), Some("Mitsubishi Fuso"));
        assert_eq!(item.brand_key, "mitsubishi fuso");
        assert_eq!(item.category_key, "truck");
        assert_eq!(item.market_price_raw.as_deref(), Some("$18,400"));
        assert_eq!(item.market_price, Some(18400.0));
    }

    #[test]
    fn test_missing_fields_are_absent() {
        let item = normalize_car(&sheet(json!({"Year": "  ", "MarketPrice": "TBA"})));
        assert_eq!(item.year, None);
        assert_eq!(item.market_price, None);
        assert_eq!(item.market_price_raw.as_deref(), Some("TBA"));
        assert_eq!(item.image_source, "");
        assert!(item.image_candidates.is_empty());
    }

    #[test]
    fn test_delivery_from_each_tier() {
        let from_sheet = normalize_delivery(&RawDelivery::Sheet(SheetDeliveryRow {
            caption: Some("Delivered — Kampala".into()),
            image_url: Some("https://example.com/k.jpg".into()),
        }));
        let from_config = normalize_delivery(&RawDelivery::Embedded(ConfigDelivery {
            caption: Some("Delivered — Kampala".into()),
            src: Some("https://example.com/k.jpg".into()),
        }));
        assert_eq!(from_sheet, from_config);
        assert_eq!(from_sheet.image_source, "https://example.com/k.jpg");
    }
}
