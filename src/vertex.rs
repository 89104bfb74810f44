// vertex.rs
use bytemuck::{Pod, Zeroable};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub color: [f32; 3],
}

/// `"#rrggbb"` to 0..1 floats. Malformed input gives mid grey.
pub fn hex_to_rgb(hex: &str) -> [f32; 3] {
    let digits = hex.trim_start_matches('#');
    if digits.len() != 6 {
        return [0.5, 0.5, 0.5];
    }
    let channel = |i: usize| {
        digits
            .get(i..i + 2)
            .and_then(|s| u8::from_str_radix(s, 16).ok())
            .map_or(0.5, |v| v as f32 / 255.0)
    };
    [channel(0), channel(2), channel(4)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(hex_to_rgb("#ffffff"), [1.0, 1.0, 1.0]);
        assert_eq!(hex_to_rgb("#000000"), [0.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb("ff0000"), [1.0, 0.0, 0.0]);
        assert_eq!(hex_to_rgb("#fff"), [0.5, 0.5, 0.5]);
    }

    #[test]
    fn vertex_is_tightly_packed() {
        assert_eq!(std::mem::size_of::<Vertex>(), 36);
        let v = Vertex { position: [1.0, 2.0, 3.0], normal: [0.0, 1.0, 0.0], color: [0.5; 3] };
        let bytes: &[u8] = bytemuck::bytes_of(&v);
        assert_eq!(bytes.len(), 36);
    }
}
