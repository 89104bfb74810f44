// shops.rs
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::geo::{self, GeoPoint};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shop {
    pub id: i64,
    pub name: String,
    pub category: String,
    pub position: [f64; 3],
    // The backend DTO leaves these out or sends null.
    #[serde(default, deserialize_with = "null_as_default")]
    pub latitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub longitude: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub address: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub phone: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub hours: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

fn null_as_default<'de, D, T>(d: D) -> std::result::Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(d).map(Option::unwrap_or_default)
}

impl Shop {
    pub fn location(&self) -> GeoPoint {
        GeoPoint::new(self.latitude, self.longitude)
    }

    /// Human readable distance from `from` to this shop, e.g. `"1.2km"`.
    pub fn distance_label(&self, from: &GeoPoint) -> String {
        geo::format_distance(geo::distance_meters(from, &self.location()))
    }
}

pub struct ShopClient {
    base: String,
    client: reqwest::blocking::Client,
}

impl ShopClient {
    pub fn new(base: impl Into<String>) -> Self {
        let base = base.into().trim_end_matches('/').to_string();
        Self { base, client: crate::http_client() }
    }

    /// Falls back to the built-in sample shops when the backend is unreachable.
    pub fn all(&self) -> Vec<Shop> {
        self.get_json("/shops", &[]).unwrap_or_else(|e| {
            warn!("failed to fetch shop list, using built-in shops: {e}");
            default_shops()
        })
    }

    pub fn by_category(&self, category: &str) -> Vec<Shop> {
        self.get_json(&format!("/shops/category/{category}"), &[]).unwrap_or_else(|e| {
            warn!("failed to fetch shops in category {category}: {e}");
            Vec::new()
        })
    }

    pub fn search(&self, term: &str) -> Vec<Shop> {
        self.get_json("/shops/search", &[("q", term)]).unwrap_or_else(|e| {
            warn!("shop search for {term:?} failed: {e}");
            Vec::new()
        })
    }

    pub fn by_id(&self, id: i64) -> Option<Shop> {
        match self.get_json(&format!("/shops/{id}"), &[]) {
            Ok(shop) => Some(shop),
            Err(e) => {
                warn!("failed to fetch shop {id}: {e}");
                None
            }
        }
    }

    pub fn top_rated(&self) -> Vec<Shop> {
        self.get_json("/shops/top-rated", &[]).unwrap_or_else(|e| {
            warn!("failed to fetch top rated shops: {e}");
            Vec::new()
        })
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, &str)]) -> Result<T> {
        let url = format!("{}{}", self.base, path);
        debug!("GET {url}");
        let response = self.client.get(&url).query(query).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), url });
        }
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Sample shops shown when the backend cannot be reached.
pub fn default_shops() -> Vec<Shop> {
    let sample = |id, name: &str, category: &str, position, description: &str, rating, address: &str, phone: &str, hours: &str| Shop {
        id,
        name: name.to_string(),
        category: category.to_string(),
        position,
        latitude: 36.9912,
        longitude: 127.9260,
        description: description.to_string(),
        rating,
        address: address.to_string(),
        phone: phone.to_string(),
        hours: hours.to_string(),
        image: None,
    };

    vec![
        sample(
            1,
            "Chungju Apple Orchard",
            "produce",
            [-3.0, 0.0, -2.0],
            "Buy fresh Chungju apples straight from a thirty year old family orchard grown with eco-friendly methods.",
            4.8,
            "123 Sagwa-ro, Chungju, Chungcheongbuk-do",
            "043-123-4567",
            "09:00 - 18:00",
        ),
        sample(
            2,
            "Chungju Kitchen",
            "restaurant",
            [2.0, 0.0, -1.0],
            "A local favourite pairing traditional Korean dishes with a modern touch.",
            4.5,
            "456 Matjip-ro, Chungju, Chungcheongbuk-do",
            "043-234-5678",
            "11:00 - 22:00",
        ),
        sample(
            3,
            "Chungju Traditional Market",
            "market",
            [0.0, 0.0, 3.0],
            "The city's traditional market, from fresh produce to handmade crafts.",
            4.2,
            "789 Sijang-ro, Chungju, Chungcheongbuk-do",
            "043-345-6789",
            "06:00 - 20:00",
        ),
        sample(
            4,
            "Chungju Cafe",
            "cafe",
            [-1.0, 0.0, 1.0],
            "Coffee from locally roasted beans and homemade cakes.",
            4.6,
            "321 Cafe-ro, Chungju, Chungcheongbuk-do",
            "043-456-7890",
            "08:00 - 21:00",
        ),
        sample(
            5,
            "Chungju Hanok Village",
            "tourism",
            [3.0, 0.0, 2.0],
            "A well preserved village of traditional hanok houses.",
            4.7,
            "654 Hanok-ro, Chungju, Chungcheongbuk-do",
            "043-567-8901",
            "10:00 - 17:00",
        ),
        sample(
            6,
            "Chungju Pottery Studio",
            "crafts",
            [-2.0, 0.0, 3.0],
            "Try your hand at traditional pottery making.",
            4.4,
            "987 Dojagi-ro, Chungju, Chungcheongbuk-do",
            "043-678-9012",
            "10:00 - 18:00",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use crate::config;
    use crate::testutil::{serve_once, UNREACHABLE_URL};

    #[test]
    fn list_falls_back_to_built_in_shops() {
        let shops = ShopClient::new(UNREACHABLE_URL).all();
        assert_eq!(shops.len(), 6);
        assert_eq!(shops, default_shops());
    }

    #[test]
    fn other_endpoints_fall_back_to_empty() {
        let client = ShopClient::new(UNREACHABLE_URL);
        assert!(client.by_category("cafe").is_empty());
        assert!(client.search("apple").is_empty());
        assert!(client.top_rated().is_empty());
        assert_eq!(client.by_id(1), None);
    }

    #[test]
    fn built_in_shops_have_unique_ids() {
        let shops = default_shops();
        let ids: HashSet<_> = shops.iter().map(|s| s.id).collect();
        assert_eq!(ids.len(), shops.len());
        assert!(shops.iter().all(|s| geo::is_in_bounds(&s.location())));
    }

    #[test]
    fn parses_backend_dto_without_coordinates() {
        let body = r#"[{"id": 7, "name": "Bakery", "category": "food", "description": "bread",
            "position": [1.0, 0.0, 2.0], "rating": 4.1, "address": "a", "phone": "p", "hours": "h", "image": null}]"#;
        let url = serve_once("200 OK", body);
        let shops = ShopClient::new(url).all();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "Bakery");
        assert_eq!(shops[0].latitude, 0.0);
        assert_eq!(shops[0].image, None);
    }

    #[test]
    fn null_text_fields_read_as_empty() {
        let body = r#"[{"id": 8, "name": "Bakery", "category": "food", "description": null,
            "position": [0.0, 0.0, 0.0], "rating": null, "address": "a", "phone": null, "hours": null}]"#;
        let url = serve_once("200 OK", body);
        let shops = ShopClient::new(url).all();
        assert_eq!(shops.len(), 1);
        assert_eq!(shops[0].name, "Bakery");
        assert_eq!(shops[0].description, "");
        assert_eq!(shops[0].phone, "");
        assert_eq!(shops[0].rating, 0.0);
    }

    #[test]
    fn by_id_parses_single_object() {
        let body = r#"{"id": 3, "name": "Market", "category": "market", "position": [0, 0, 3],
            "latitude": 36.99, "longitude": 127.92, "description": "", "rating": 4.2,
            "address": "", "phone": "", "hours": "", "image": "market.png"}"#;
        let url = serve_once("200 OK", body);
        let shop = ShopClient::new(format!("{url}/")).by_id(3).unwrap();
        assert_eq!(shop.id, 3);
        assert_eq!(shop.image.as_deref(), Some("market.png"));
    }

    #[test]
    fn error_status_falls_back() {
        let url = serve_once("404 Not Found", "{}");
        assert_eq!(ShopClient::new(url).by_id(42), None);
        let url = serve_once("500 Internal Server Error", "[]");
        assert_eq!(ShopClient::new(url).all().len(), 6);
    }

    #[test]
    fn distance_label_from_center() {
        let shop = &default_shops()[0];
        assert_eq!(shop.distance_label(&config::CITY_CENTER), "0m");
        let label = shop.distance_label(&GeoPoint::new(37.0912, 127.9260));
        assert_eq!(label, "11.1km");
    }
}
