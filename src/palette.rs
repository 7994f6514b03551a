use macroquad::color::{Color, WHITE};

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PaletteColor {
    pub name: &'static str,
    pub color: Color,
}

const fn entry(name: &'static str, r: f32, g: f32, b: f32) -> PaletteColor {
    PaletteColor {
        name,
        color: Color::new(r, g, b, 1.0),
    }
}

pub static WATER_COLORS: [PaletteColor; 32] = [
    entry("red", 1.0, 0.0, 0.0),
    entry("blue", 0.0, 0.0, 1.0),
    entry("yellow", 1.0, 1.0, 0.0),
    entry("green", 0.0, 0.5, 0.0),
    entry("purple", 0.627, 0.125, 0.941),
    entry("orange", 1.0, 0.647, 0.0),
    entry("cyan", 0.0, 1.0, 1.0),
    entry("magenta", 1.0, 0.0, 1.0),
    entry("lime", 0.0, 1.0, 0.0),
    entry("pink", 1.0, 0.752, 0.796),
    entry("brown", 0.647, 0.164, 0.164),
    entry("navy", 0.0, 0.0, 0.5),
    entry("turquoise", 0.250, 0.878, 0.815),
    entry("olive", 0.5, 0.5, 0.0),
    entry("maroon", 0.5, 0.0, 0.0),
    entry("aqua", 0.498, 1.0, 0.831),
    entry("teal", 0.0, 0.5, 0.5),
    entry("gold", 1.0, 0.843, 0.0),
    entry("silver", 0.75, 0.75, 0.75),
    entry("coral", 1.0, 0.498, 0.313),
    entry("violet", 0.933, 0.509, 0.933),
    entry("mint", 0.596, 1.0, 0.596),
    entry("beige", 0.960, 0.960, 0.862),
    entry("salmon", 0.980, 0.501, 0.447),
    entry("sandybrown", 0.956, 0.643, 0.376),
    entry("indigo", 0.294, 0.0, 0.509),
    entry("crimson", 0.862, 0.078, 0.235),
    entry("khaki", 0.941, 0.901, 0.549),
    entry("plum", 0.866, 0.627, 0.866),
    entry("chocolate", 0.823, 0.411, 0.117),
    entry("darkgreen", 0.0, 0.392, 0.0),
    entry("darkorange", 1.0, 0.549, 0.0),
];

pub fn find(name: &str) -> Option<&'static PaletteColor> {
    WATER_COLORS.iter().find(|c| c.name == name)
}

pub fn contains(name: &str) -> bool {
    find(name).is_some()
}

/// Display value for a colour token. Unknown tokens draw white.
pub fn display_color(name: &str) -> Color {
    find(name).map_or(WHITE, |c| c.color)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    WATER_COLORS.iter().map(|c| c.name)
}

pub fn len() -> usize {
    WATER_COLORS.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let unique: HashSet<&str> = names().collect();
        assert_eq!(unique.len(), len());
    }

    #[test]
    fn unknown_name_falls_back_to_white() {
        assert_eq!(display_color("not-a-colour"), WHITE);
        assert_eq!(display_color("red"), Color::new(1.0, 0.0, 0.0, 1.0));
        assert!(contains("darkorange"));
    }
}
