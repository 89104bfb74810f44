// loader.rs
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;

use log::{info, warn};

use crate::config::Endpoints;
use crate::osm::{BuildingRecord, OverpassClient};
use crate::shops::{Shop, ShopClient};

#[derive(Debug)]
pub enum LoaderMessage {
    Progress(f32),
    Shops(Vec<Shop>),
    Buildings(Vec<BuildingRecord>),
    /// The building list is empty; the string says why.
    BuildingsFailed(String),
    Done,
}

/// Fetches shops, waits `building_delay`, then fetches buildings. Runs on
/// its own thread; results arrive on the returned channel.
pub fn spawn_loader(endpoints: Endpoints, building_delay: Duration) -> Receiver<LoaderMessage> {
    let (tx, rx) = mpsc::channel();
    thread::spawn(move || run(&endpoints, building_delay, &tx));
    rx
}

fn run(endpoints: &Endpoints, building_delay: Duration, tx: &Sender<LoaderMessage>) {
    let _ = tx.send(LoaderMessage::Progress(0.0));

    let shops = ShopClient::new(endpoints.api_base.as_str()).all();
    info!("loaded {} shops", shops.len());
    let _ = tx.send(LoaderMessage::Shops(shops));
    let _ = tx.send(LoaderMessage::Progress(0.5));

    thread::sleep(building_delay);

    match OverpassClient::new(endpoints.overpass.as_str()).fetch_buildings() {
        Ok(buildings) => {
            let _ = tx.send(LoaderMessage::Buildings(buildings));
        }
        Err(e) => {
            warn!("failed to load building data: {e}");
            let _ = tx.send(LoaderMessage::BuildingsFailed(format!("Failed to load building data: {e}")));
        }
    }

    let _ = tx.send(LoaderMessage::Progress(1.0));
    let _ = tx.send(LoaderMessage::Done);
}
