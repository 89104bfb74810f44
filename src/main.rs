// main.rs
use std::collections::BTreeMap;

use log::{info, warn};

use chungju_map::config::{self, Endpoints};
use chungju_map::loader::{LoaderMessage, spawn_loader};
use chungju_map::location::{FixedLocation, LocationTracker};
use chungju_map::scene::Scene;
use chungju_map::MapContext;

fn main() {
    env_logger::init();
    info!("{} starting", config::APP_NAME);

    let endpoints = Endpoints::default();
    let mut ctx = MapContext::default();
    let mut scene = Scene::new(ctx);

    // No location hardware here; stand in with City Hall.
    let mut tracker = LocationTracker::new(FixedLocation::at(config::CITY_CENTER));
    let device = tracker.request(&mut ctx);
    if let Some(fix) = device {
        scene.player.place_at(fix.point, &mut ctx);
    } else if let Some(msg) = tracker.message() {
        warn!("{msg}");
    }
    scene.ctx = ctx;

    let rx = spawn_loader(endpoints, config::BUILDING_FETCH_DELAY);
    for msg in rx {
        match msg {
            LoaderMessage::Progress(p) => info!("loading {:.0}%", p * 100.0),
            LoaderMessage::Shops(shops) => scene.set_shops(shops),
            LoaderMessage::Buildings(buildings) => {
                let degenerate = buildings.iter().filter(|b| b.is_degenerate()).count();
                if degenerate > 0 {
                    warn!("{degenerate} buildings have no resolvable position");
                }
                scene.set_buildings(buildings);
            }
            LoaderMessage::BuildingsFailed(reason) => warn!("{reason}"),
            LoaderMessage::Done => break,
        }
    }

    let mut by_category: BTreeMap<&str, usize> = BTreeMap::new();
    for b in &scene.buildings {
        *by_category.entry(b.category().label()).or_default() += 1;
    }
    for (label, count) in &by_category {
        info!("{label}: {count}");
    }

    if let Some(fix) = device {
        if let Some(first) = scene.shops.first().map(|s| s.id) {
            scene.select_shop(first);
        }
        if let (Some(shop), Some(distance)) = (scene.selected_shop(), scene.distance_to_selected(&fix.point)) {
            info!("{} is {distance} away", shop.name);
        }
    }

    let mesh = scene.mesh();
    info!(
        "scene ready: {} shops, {} buildings, {} vertices, {} triangles",
        scene.shops.len(),
        scene.buildings.len(),
        mesh.vertices.len(),
        mesh.indices.len() / 3
    );
}
