// scene.rs
use glam::Vec3;
use log::debug;

use crate::config;
use crate::geo::GeoPoint;
use crate::mapper::MapContext;
use crate::osm::BuildingRecord;
use crate::player::Player;
use crate::shops::Shop;
use crate::vertex::{Vertex, hex_to_rgb};

// (normal, u, v) with u x v == normal, so quads wind counter-clockwise.
const FACES: [(Vec3, Vec3, Vec3); 6] = [
    (Vec3::X, Vec3::NEG_Z, Vec3::Y),
    (Vec3::NEG_X, Vec3::Z, Vec3::Y),
    (Vec3::Y, Vec3::X, Vec3::NEG_Z),
    (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    (Vec3::Z, Vec3::X, Vec3::Y),
    (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneBox {
    pub center: Vec3,
    pub size: Vec3,
    pub color: [f32; 3],
}

#[derive(Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

/// Everything on screen plus the bits of UI state that change how it looks.
pub struct Scene {
    pub ctx: MapContext,
    pub buildings: Vec<BuildingRecord>,
    pub shops: Vec<Shop>,
    pub player: Player,
    pub hovered: Option<i64>,
    pub selected: Option<i64>,
    pub info_open: bool,
}

impl Scene {
    pub fn new(ctx: MapContext) -> Self {
        Self {
            ctx,
            buildings: Vec::new(),
            shops: Vec::new(),
            player: Player::new(),
            hovered: None,
            selected: None,
            info_open: false,
        }
    }

    pub fn set_shops(&mut self, shops: Vec<Shop>) {
        self.shops = shops;
        if self.selected.is_some_and(|id| !self.shops.iter().any(|s| s.id == id)) {
            self.close_info();
        }
    }

    pub fn set_buildings(&mut self, buildings: Vec<BuildingRecord>) {
        self.buildings = buildings;
        self.hovered = None;
    }

    pub fn hover(&mut self, building: Option<i64>) {
        self.hovered = building;
    }

    pub fn hovered_building(&self) -> Option<&BuildingRecord> {
        self.hovered.and_then(|id| self.buildings.iter().find(|b| b.id == id))
    }

    /// Selects a shop and opens its info panel. Unknown ids are ignored.
    pub fn select_shop(&mut self, id: i64) -> bool {
        if !self.shops.iter().any(|s| s.id == id) {
            return false;
        }
        self.selected = Some(id);
        self.info_open = true;
        true
    }

    pub fn close_info(&mut self) {
        self.selected = None;
        self.info_open = false;
    }

    pub fn selected_shop(&self) -> Option<&Shop> {
        self.selected.and_then(|id| self.shops.iter().find(|s| s.id == id))
    }

    /// Distance label from the device to the selected shop.
    pub fn distance_to_selected(&self, user: &GeoPoint) -> Option<String> {
        self.selected_shop().map(|s| s.distance_label(user))
    }

    pub fn boxes(&self) -> Vec<SceneBox> {
        let mut boxes = Vec::with_capacity(self.buildings.len() + self.shops.len() + 2);

        boxes.push(SceneBox {
            center: Vec3::new(0.0, config::GROUND_Y, 0.0),
            size: Vec3::new(config::GROUND_SIZE, config::GROUND_THICKNESS, config::GROUND_SIZE),
            color: hex_to_rgb(config::GROUND_COLOR),
        });

        // One snapshot of the center for the whole batch.
        let ctx = self.ctx;
        for b in &self.buildings {
            let local = ctx.to_local(&b.position);
            let height = b.estimated_height() as f32;
            let color = if self.hovered == Some(b.id) { hex_to_rgb(config::HOVER_COLOR) } else { b.category().rgb() };
            boxes.push(SceneBox {
                center: Vec3::new(local.x as f32, height / 2.0, local.z as f32),
                size: Vec3::new(config::BUILDING_FOOTPRINT, height, config::BUILDING_FOOTPRINT),
                color,
            });
        }

        for s in &self.shops {
            let [x, y, z] = s.position.map(|c| c as f32);
            let color = if self.selected == Some(s.id) { config::SELECTED_COLOR } else { config::SHOP_COLOR };
            boxes.push(SceneBox {
                center: Vec3::new(x, y + config::SHOP_MARKER_SIZE / 2.0, z),
                size: Vec3::splat(config::SHOP_MARKER_SIZE),
                color: hex_to_rgb(color),
            });
        }

        let p = self.player.position;
        boxes.push(SceneBox {
            center: Vec3::new(p.x as f32, 0.5, p.z as f32),
            size: Vec3::splat(config::MARKER_SIZE),
            color: hex_to_rgb(config::PLAYER_COLOR),
        });

        boxes
    }

    pub fn mesh(&self) -> Mesh {
        let boxes = self.boxes();
        let mut mesh = Mesh {
            vertices: Vec::with_capacity(boxes.len() * 24),
            indices: Vec::with_capacity(boxes.len() * 36),
        };
        for b in &boxes {
            push_box(&mut mesh, b);
        }
        debug!("scene mesh: {} boxes, {} vertices, {} indices", boxes.len(), mesh.vertices.len(), mesh.indices.len());
        mesh
    }
}

fn push_box(mesh: &mut Mesh, b: &SceneBox) {
    let half = b.size * 0.5;
    for (normal, u, v) in FACES {
        let base = mesh.vertices.len() as u32;
        let face_center = b.center + normal * half;
        for (su, sv) in [(-1.0f32, -1.0f32), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let p = face_center + u * half * su + v * half * sv;
            mesh.vertices.push(Vertex { position: p.to_array(), normal: normal.to_array(), color: b.color });
        }
        mesh.indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
