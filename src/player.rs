// player.rs
use crate::config;
use crate::geo::{GeoPoint, LocalPoint};
use crate::mapper::MapContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveKey {
    Forward,
    Back,
    Left,
    Right,
    Reset,
}

impl MoveKey {
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_lowercase() {
            'w' => Some(MoveKey::Forward),
            's' => Some(MoveKey::Back),
            'a' => Some(MoveKey::Left),
            'd' => Some(MoveKey::Right),
            'r' => Some(MoveKey::Reset),
            _ => None,
        }
    }
}

/// The player marker, in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Player {
    pub position: LocalPoint,
}

impl Player {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recenters `ctx` on `gps` and puts the player there.
    pub fn place_at(&mut self, gps: GeoPoint, ctx: &mut MapContext) {
        ctx.set_center(gps);
        self.position = ctx.to_local(&gps);
    }

    pub fn move_by(&mut self, dx: f64, dz: f64) {
        self.position.x += dx;
        self.position.z += dz;
    }

    pub fn reset(&mut self) {
        self.position = LocalPoint::default();
    }

    pub fn process_key(&mut self, key: MoveKey) {
        let step = config::MOVE_STEP;
        match key {
            MoveKey::Forward => self.move_by(0.0, -step),
            MoveKey::Back => self.move_by(0.0, step),
            MoveKey::Left => self.move_by(-step, 0.0),
            MoveKey::Right => self.move_by(step, 0.0),
            MoveKey::Reset => self.reset(),
        }
    }

    /// Returns false for keys that are not bound.
    pub fn process_char(&mut self, c: char) -> bool {
        match MoveKey::from_char(c) {
            Some(key) => {
                self.process_key(key);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wasd_moves_half_a_unit() {
        let mut p = Player::new();
        for c in "wwd".chars() {
            assert!(p.process_char(c));
        }
        assert_eq!(p.position, LocalPoint::new(0.5, -1.0));
        assert!(p.process_char('S'));
        assert!(p.process_char('A'));
        assert_eq!(p.position, LocalPoint::new(0.0, -0.5));
    }

    #[test]
    fn reset_and_unbound_keys() {
        let mut p = Player::new();
        p.move_by(3.0, 4.0);
        assert!(!p.process_char('q'));
        assert_eq!(p.position, LocalPoint::new(3.0, 4.0));
        assert!(p.process_char('r'));
        assert_eq!(p.position, LocalPoint::default());
    }

    #[test]
    fn place_at_recenters() {
        let here = GeoPoint::new(36.98, 127.94);
        let mut ctx = MapContext::default();
        let mut p = Player::new();
        p.place_at(here, &mut ctx);
        assert_eq!(ctx.center, here);
        assert_eq!(p.position, LocalPoint::new(config::LOCAL_RANGE.x_min, config::LOCAL_RANGE.z_min));
    }
}
