pub mod rings;
pub mod layout;
pub mod bounds;
pub mod scene;
pub mod svg;

#[cfg(feature = "viewer")]
pub mod paint;

/// Fill category of a rendered node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStyle {
    /// The topic node
    Central,
    /// A recording node
    Child,
}

impl NodeStyle {
    /// Fill colour (sRGB)
    pub fn fill_rgb(self) -> [u8; 3] {
        match self {
            // lightblue
            NodeStyle::Central => [173, 216, 230],
            // lightgreen
            NodeStyle::Child => [144, 238, 144],
        }
    }

    /// SVG colour keyword matching [`NodeStyle::fill_rgb`]
    pub fn fill_name(self) -> &'static str {
        match self {
            NodeStyle::Central => "lightblue",
            NodeStyle::Child => "lightgreen",
        }
    }
}

/// Outline drawn around every node.
pub const STROKE_WIDTH: f32 = 2.0;
