use crate::geometry::curve::LINE_POINTS_PER_UNIT;
use crate::tessellation::TessellationParams;

/// Resolution settings shared by every builder.
///
/// The defaults reproduce the densities the cable tools have always used;
/// hosts that need lighter or finer models override individual fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuildSettings {
    /// Polyline density of straight guide curves, in points per unit length.
    pub line_points_per_unit: f64,
    /// Bezier points per quarter turn of strand and armour helices.
    pub helix_subdivisions: usize,
    /// Vertices around each cross-section ring of a mesh strand.
    pub mesh_points_per_ring: usize,
    /// Cross-section rings per revolution of a twisted mesh strand.
    pub mesh_rings_per_revolution: usize,
    /// Cross-section rings per unit length of a straight mesh strand.
    pub mesh_rings_per_unit: f64,
    /// Vertices around a zero-thickness lap tube.
    pub shell_tube_points: usize,
    /// Curve and sweep tessellation quality.
    pub tessellation: TessellationParams,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            line_points_per_unit: LINE_POINTS_PER_UNIT,
            helix_subdivisions: 1,
            mesh_points_per_ring: 8,
            mesh_rings_per_revolution: 10,
            mesh_rings_per_unit: 100.0,
            shell_tube_points: 16,
            tessellation: TessellationParams::default(),
        }
    }
}
