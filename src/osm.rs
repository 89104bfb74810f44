// osm.rs
use std::collections::HashMap;
use std::fmt;

use glam::DVec2;
use log::{debug, info};
use serde::Deserialize;

use crate::config;
use crate::error::{Error, Result};
use crate::geo::{CityBounds, GeoPoint};

// Any of these makes an element worth drawing.
const CATEGORY_TAGS: [&str; 4] = ["building", "shop", "amenity", "tourism"];

#[derive(Deserialize, Debug, Clone, Default)]
pub struct OsmPayload {
    #[serde(default)]
    pub elements: Vec<OsmElement>,
}

#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Node,
    Way,
    Relation,
}

#[derive(Deserialize, Debug, Clone)]
pub struct OsmElement {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    #[serde(default)]
    pub lat: Option<f64>,
    #[serde(default)]
    pub lon: Option<f64>,
    #[serde(default)]
    pub nodes: Vec<i64>,
    #[serde(default)]
    pub tags: Option<HashMap<String, String>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuildingRecord {
    pub id: i64,
    pub kind: ElementKind,
    pub position: GeoPoint,
    pub name: Option<String>,
    pub building: Option<String>,
    pub shop: Option<String>,
    pub amenity: Option<String>,
    pub tourism: Option<String>,
    pub height: Option<f64>,
    pub levels: Option<i32>,
    pub tags: HashMap<String, String>,
    resolved_nodes: usize,
}

impl BuildingRecord {
    /// A way none of whose nodes could be resolved. Its position is the
    /// `(0, 0)` placeholder, not a real coordinate.
    pub fn is_degenerate(&self) -> bool {
        self.kind == ElementKind::Way && self.resolved_nodes == 0
    }

    pub fn category(&self) -> Category {
        category(self)
    }

    pub fn estimated_height(&self) -> f64 {
        estimated_height(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Shop,
    Restaurant,
    Cafe,
    Tourism,
    Building,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Shop => "shop",
            Category::Restaurant => "restaurant",
            Category::Cafe => "cafe",
            Category::Tourism => "tourism",
            Category::Building => "building",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Shop => "Shop",
            Category::Restaurant => "Restaurant",
            Category::Cafe => "Cafe",
            Category::Tourism => "Tourism",
            Category::Building => "Building",
            Category::Other => "Other",
        }
    }

    pub fn rgb(&self) -> [f32; 3] {
        crate::vertex::hex_to_rgb(color_for_category(*self))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fixed priority: shop, restaurant, cafe, tourism, building.
pub fn category(record: &BuildingRecord) -> Category {
    if record.shop.is_some() {
        Category::Shop
    } else if record.amenity.as_deref() == Some("restaurant") {
        Category::Restaurant
    } else if record.amenity.as_deref() == Some("cafe") {
        Category::Cafe
    } else if record.tourism.is_some() {
        Category::Tourism
    } else if record.building.is_some() {
        Category::Building
    } else {
        Category::Other
    }
}

pub fn estimated_height(record: &BuildingRecord) -> f64 {
    record
        .height
        .or_else(|| record.levels.map(|l| l as f64 * config::METERS_PER_LEVEL))
        .unwrap_or(config::DEFAULT_BUILDING_HEIGHT)
}

pub fn color_for_category(category: Category) -> &'static str {
    match category {
        Category::Shop => "#fbbf24",
        Category::Restaurant => "#f87171",
        Category::Cafe => "#a78bfa",
        Category::Tourism => "#60a5fa",
        Category::Building => "#6b7280",
        Category::Other => "#9ca3af",
    }
}

pub fn parse_json(raw: &str) -> Result<Vec<BuildingRecord>> {
    let payload: OsmPayload = serde_json::from_str(raw)?;
    Ok(parse_payload(&payload))
}

/// Keeps the first [`config::MAX_BUILDINGS`] relevant elements in payload order.
pub fn parse_payload(payload: &OsmPayload) -> Vec<BuildingRecord> {
    let mut node_map: HashMap<i64, GeoPoint> = HashMap::new();
    for el in &payload.elements {
        if let (ElementKind::Node, Some(lat), Some(lon)) = (el.kind, el.lat, el.lon) {
            node_map.insert(el.id, GeoPoint::new(lat, lon));
        }
    }

    let mut buildings = Vec::new();
    for (i, el) in payload.elements.iter().enumerate() {
        if buildings.len() >= config::MAX_BUILDINGS {
            debug!("building limit reached, skipping {} remaining elements", payload.elements.len() - i);
            break;
        }
        if let Some(record) = parse_element(el, &node_map) {
            buildings.push(record);
        }
    }

    debug!("parsed {} buildings from {} elements ({} nodes)", buildings.len(), payload.elements.len(), node_map.len());
    buildings
}

fn parse_element(el: &OsmElement, node_map: &HashMap<i64, GeoPoint>) -> Option<BuildingRecord> {
    let tags = el.tags.as_ref()?;
    if !CATEGORY_TAGS.iter().any(|k| tag(tags, k).is_some()) {
        return None;
    }

    let (position, resolved_nodes) = match el.kind {
        ElementKind::Node => match (el.lat, el.lon) {
            (Some(lat), Some(lon)) => (GeoPoint::new(lat, lon), 1),
            _ => (GeoPoint::default(), 0),
        },
        ElementKind::Way => way_centroid(&el.nodes, node_map),
        ElementKind::Relation => return None,
    };

    Some(BuildingRecord {
        id: el.id,
        kind: el.kind,
        position,
        name: tag(tags, "name").map(str::to_string),
        building: tag(tags, "building").map(str::to_string),
        shop: tag(tags, "shop").map(str::to_string),
        amenity: tag(tags, "amenity").map(str::to_string),
        tourism: tag(tags, "tourism").map(str::to_string),
        height: tag(tags, "height").and_then(parse_height),
        levels: tag(tags, "levels").or_else(|| tag(tags, "building:levels")).and_then(parse_levels),
        tags: tags.clone(),
        resolved_nodes,
    })
}

// Mean of the resolvable node coordinates. Falls back to (0, 0).
fn way_centroid(refs: &[i64], node_map: &HashMap<i64, GeoPoint>) -> (GeoPoint, usize) {
    let mut sum = DVec2::ZERO;
    let mut count = 0;
    for p in refs.iter().filter_map(|id| node_map.get(id)) {
        sum += DVec2::new(p.latitude, p.longitude);
        count += 1;
    }
    if count == 0 {
        return (GeoPoint::default(), 0);
    }
    let center = sum / count as f64;
    (GeoPoint::new(center.x, center.y), count)
}

fn tag<'a>(tags: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    tags.get(key).map(String::as_str).filter(|v| !v.is_empty())
}

fn leading_number(raw: &str, fractional: bool) -> &str {
    let s = raw.trim_start();
    let mut seen_dot = !fractional;
    let mut end = 0;
    for (i, c) in s.char_indices() {
        let accepted = match c {
            '-' | '+' => i == 0,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            _ => c.is_ascii_digit(),
        };
        if !accepted {
            break;
        }
        end = i + c.len_utf8();
    }
    &s[..end]
}

// "12 m" -> 12.0
fn parse_height(raw: &str) -> Option<f64> {
    leading_number(raw, true).parse().ok()
}

// "4.5" -> 4
fn parse_levels(raw: &str) -> Option<i32> {
    leading_number(raw, false).parse().ok()
}

/// Overpass QL for named shops, restaurants, cafes, tourist spots and
/// buildings inside `bounds`.
pub fn overpass_query(bounds: &CityBounds) -> String {
    const SELECTORS: [&str; 5] = [
        r#"["shop"]"#,
        r#"["amenity"="restaurant"]"#,
        r#"["amenity"="cafe"]"#,
        r#"["tourism"]"#,
        r#"["building"]"#,
    ];
    let bbox = format!("({},{},{},{})", bounds.south, bounds.west, bounds.north, bounds.east);

    let mut query = format!("[out:json][timeout:{}];\n(\n", config::OVERPASS_TIMEOUT_SECS);
    for sel in SELECTORS {
        for kind in ["way", "node"] {
            query.push_str(&format!("  {kind}{sel}[\"name\"]{bbox};\n"));
        }
    }
    query.push_str(");\nout body;\n>;\nout skel qt;\n");
    query
}

pub struct OverpassClient {
    url: String,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into(), client: crate::http_client() }
    }

    pub fn fetch_buildings(&self) -> Result<Vec<BuildingRecord>> {
        let query = overpass_query(&config::CITY_BOUNDS);
        info!("requesting buildings from {}", self.url);

        let response = self.client.post(&self.url).form(&[("data", query.as_str())]).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status { status: status.as_u16(), url: self.url.clone() });
        }
        let body = response.text()?;
        let buildings = parse_json(&body)?;
        info!("received {} buildings", buildings.len());
        Ok(buildings)
    }
}
