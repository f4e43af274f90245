use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Draft, ListFilter, Resource, Retrievable, Timestamps, lenient_f64, lenient_i64};
use crate::error::ApiError;
use crate::http::RequestBody;
use crate::media::MediaResolver;
use crate::multipart::{Attachment, MultipartForm};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductCategory {
    Jersey,
    Jaket,
    Aksesoris,
    Sparepart,
}

impl ProductCategory {
    pub const ALL: [ProductCategory; 4] = [
        ProductCategory::Jersey,
        ProductCategory::Jaket,
        ProductCategory::Aksesoris,
        ProductCategory::Sparepart,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ProductCategory::Jersey => "jersey",
            ProductCategory::Jaket => "jaket",
            ProductCategory::Aksesoris => "aksesoris",
            ProductCategory::Sparepart => "sparepart",
        }
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ProductCategory::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown product category: {s}"))
    }
}

impl ListFilter for ProductCategory {
    fn query(&self) -> Vec<(&'static str, String)> {
        vec![("category", self.as_str().to_string())]
    }
}

/// Merchandise sold through the club shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(deserialize_with = "lenient_f64")]
    pub price: f64,
    #[serde(default)]
    pub description: String,
    pub category: ProductCategory,
    #[serde(deserialize_with = "lenient_i64")]
    pub stock: i64,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(flatten)]
    pub timestamps: Timestamps,
}

impl Product {
    /// Out-of-stock products are listed but cannot be bought.
    pub fn is_available(&self) -> bool {
        self.stock > 0
    }
}

impl Resource for Product {
    type Id = i64;
    type Draft = ProductDraft;
    type Filter = ProductCategory;

    const PATH: &'static str = "/products";
    const SINGULAR: &'static str = "product";
    const PLURAL: &'static str = "products";

    fn id(&self) -> i64 {
        self.id
    }

    fn normalize_media(&mut self, media: &MediaResolver) {
        media.normalize(&mut self.image);
    }
}

impl Retrievable for Product {}

#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub category: ProductCategory,
    pub stock: i64,
    pub image: Option<Attachment>,
}

impl Draft for ProductDraft {
    fn to_body(&self) -> Result<RequestBody, ApiError> {
        let form = MultipartForm::new()
            .text("name", &self.name)
            .text("price", self.price.to_string())
            .text("description", &self.description)
            .text("category", self.category.as_str())
            .text("stock", self.stock.to_string())
            .optional_file("image", self.image.as_ref());
        Ok(RequestBody::Multipart(form))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_stock_is_unavailable() {
        let product: Product = serde_json::from_str(
            r#"{"id":5,"name":"Jersey 2025","price":"250000.00","description":"","category":"jersey","stock":0,"image":null}"#,
        )
        .unwrap();
        assert_eq!(product.price, 250000.0);
        assert!(!product.is_available());
    }

    #[test]
    fn category_round_trips_through_text() {
        for category in ProductCategory::ALL {
            assert_eq!(category.as_str().parse::<ProductCategory>().unwrap(), category);
        }
        assert!("helm".parse::<ProductCategory>().is_err());
    }

    #[test]
    fn category_filter_becomes_query_pair() {
        assert_eq!(ProductCategory::Jaket.query(), vec![("category", "jaket".to_string())]);
    }

    #[test]
    fn draft_sends_numbers_as_text() {
        let draft = ProductDraft {
            name: "Jaket Touring".to_string(),
            price: 450000.0,
            description: "Waterproof".to_string(),
            category: ProductCategory::Jaket,
            stock: 12,
            image: None,
        };
        let RequestBody::Multipart(form) = draft.to_body().unwrap() else {
            panic!("expected multipart body");
        };
        assert_eq!(form.text_value("price"), Some("450000"));
        assert_eq!(form.text_value("stock"), Some("12"));
        assert_eq!(form.text_value("category"), Some("jaket"));
    }
}
