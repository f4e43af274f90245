//! Read-only views over slice state used by the public pages.

use chrono::{DateTime, Utc};

use crate::resources::{Event, GalleryItem, GalleryKind, News, Product, ProductCategory};
use crate::state::Slice;

/// Most recent news first, as the home page teaser shows them.
pub fn latest_news(news: &Slice<News>, count: usize) -> &[News] {
    let items = news.items();
    &items[..count.min(items.len())]
}

pub fn featured_news(news: &Slice<News>) -> Option<&News> {
    news.items().first()
}

pub fn upcoming_events(events: &Slice<Event>, now: DateTime<Utc>) -> Vec<&Event> {
    events.items().iter().filter(|e| e.is_upcoming(now)).collect()
}

pub fn past_events(events: &Slice<Event>, now: DateTime<Utc>) -> Vec<&Event> {
    events.items().iter().filter(|e| e.is_past(now)).collect()
}

/// `None` selects every category.
pub fn products_in(products: &Slice<Product>, category: Option<ProductCategory>) -> Vec<&Product> {
    products
        .items()
        .iter()
        .filter(|p| category.map_or(true, |c| p.category == c))
        .collect()
}

pub fn available_products(products: &Slice<Product>) -> Vec<&Product> {
    products.items().iter().filter(|p| p.is_available()).collect()
}

pub fn gallery_of_kind(gallery: &Slice<GalleryItem>, kind: GalleryKind) -> Vec<&GalleryItem> {
    gallery.items().iter().filter(|item| item.kind == kind).collect()
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::media::MediaResolver;
    use crate::resources::Timestamps;

    fn media() -> MediaResolver {
        MediaResolver::new("http://cdn.test")
    }

    fn news_slice(ids: &[i64]) -> Slice<News> {
        let mut slice = Slice::new();
        let t = slice.begin_fetch_all();
        let records = ids
            .iter()
            .map(|&id| News {
                id,
                title: format!("news {id}"),
                excerpt: String::new(),
                content: String::new(),
                image: None,
                external_link: None,
                date: "2025-01-01".to_string(),
                timestamps: Timestamps::default(),
            })
            .collect();
        slice.fulfill_fetch_all(t, records, &media());
        slice
    }

    fn product(id: i64, category: ProductCategory, stock: i64) -> Product {
        Product {
            id,
            name: format!("product {id}"),
            price: 100000.0,
            description: String::new(),
            category,
            stock,
            image: None,
            timestamps: Timestamps::default(),
        }
    }

    #[test]
    fn latest_news_is_capped_by_list_length() {
        let slice = news_slice(&[5, 4, 3, 2]);
        let ids: Vec<i64> = latest_news(&slice, 3).iter().map(|n| n.id).collect();
        assert_eq!(ids, vec![5, 4, 3]);
        assert_eq!(latest_news(&news_slice(&[1]), 3).len(), 1);
        assert_eq!(featured_news(&slice).map(|n| n.id), Some(5));
    }

    #[test]
    fn events_split_around_now() {
        let mut slice: Slice<Event> = Slice::new();
        let t = slice.begin_fetch_all();
        let event = |id: i64, date: &str| Event {
            id,
            title: String::new(),
            description: String::new(),
            date: date.to_string(),
            location: String::new(),
            image: None,
            timestamps: Timestamps::default(),
        };
        slice.fulfill_fetch_all(
            t,
            vec![event(1, "2025-06-01"), event(2, "2024-06-01"), event(3, "someday")],
            &media(),
        );
        let now = Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap();

        let upcoming: Vec<i64> = upcoming_events(&slice, now).iter().map(|e| e.id).collect();
        let past: Vec<i64> = past_events(&slice, now).iter().map(|e| e.id).collect();
        assert_eq!(upcoming, vec![1]);
        assert_eq!(past, vec![2]);
    }

    #[test]
    fn product_filters() {
        let mut slice: Slice<Product> = Slice::new();
        let t = slice.begin_fetch_all();
        slice.fulfill_fetch_all(
            t,
            vec![
                product(1, ProductCategory::Jersey, 0),
                product(2, ProductCategory::Jaket, 4),
                product(3, ProductCategory::Jersey, 2),
            ],
            &media(),
        );

        let jerseys: Vec<i64> = products_in(&slice, Some(ProductCategory::Jersey)).iter().map(|p| p.id).collect();
        assert_eq!(jerseys, vec![1, 3]);
        assert_eq!(products_in(&slice, None).len(), 3);
        let available: Vec<i64> = available_products(&slice).iter().map(|p| p.id).collect();
        assert_eq!(available, vec![2, 3]);
    }
}
