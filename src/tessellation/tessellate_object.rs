use crate::error::Result;
use crate::geometry::mesh::Mesh;
use crate::scene::{ObjectId, ObjectKind, Scene};

use super::{tessellate_spline, TessellateSweep, TessellationParams};

/// Tessellates an object and everything parented below it into one
/// world-space mesh.
///
/// Mesh objects contribute their data; beveled curves contribute the sweep
/// of their profile along every spline. Bare guide curves and groups have
/// no body.
pub struct TessellateObject {
    object: ObjectId,
    params: TessellationParams,
}

impl TessellateObject {
    /// Creates a new `TessellateObject` operation.
    #[must_use]
    pub fn new(object: ObjectId, params: TessellationParams) -> Self {
        Self { object, params }
    }

    /// Executes the tessellation, returning a combined mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if an object or its data is missing, or a beveled
    /// curve cannot be swept.
    pub fn execute(&self, scene: &Scene) -> Result<Mesh> {
        let mut combined = Mesh::new();
        let mut objects = vec![self.object];
        objects.extend(scene.descendants(self.object)?);

        for id in objects {
            let world = scene.world_transform(id)?;
            match &scene.object(id)?.kind {
                ObjectKind::Mesh(mesh) => {
                    combined.append(&scene.mesh(*mesh)?.transformed(&world));
                }
                ObjectKind::Curve {
                    curve,
                    bevel: Some(bevel),
                } => {
                    let profile = scene.profile(bevel.profile)?;
                    for spline in &scene.curve(*curve)?.splines {
                        let path = tessellate_spline(spline, self.params.bezier_resolution);
                        let body = TessellateSweep::new(&path, profile, self.params)
                            .with_factor_start(bevel.factor_start)
                            .with_caps(bevel.fill_caps)
                            .execute()?;
                        combined.append(&body.transformed(&world));
                    }
                }
                ObjectKind::Curve { bevel: None, .. } | ObjectKind::Group => {}
            }
        }
        Ok(combined)
    }
}
