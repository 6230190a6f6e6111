pub mod data;
pub mod object;

pub use data::{CurveData, CurveId, MeshId, ProfileId};
pub use object::{Bevel, ObjectData, ObjectId, ObjectKind};

use slotmap::SlotMap;

use crate::error::SceneError;
use crate::geometry::curve::Spline;
use crate::geometry::mesh::Mesh;
use crate::geometry::profile::Profile;
use crate::material::MaterialHandle;
use crate::math::transform::rotation_z;
use crate::math::Matrix4;
use crate::tessellation::{TessellateObject, TessellationParams};

/// In-memory arena that owns every object and the data they display.
///
/// Objects reference curve, mesh and profile data by typed IDs
/// (generational indices), so several objects can share one piece of data
/// and differ only by transform.
#[derive(Debug, Default)]
pub struct Scene {
    objects: SlotMap<ObjectId, ObjectData>,
    curves: SlotMap<CurveId, CurveData>,
    meshes: SlotMap<MeshId, Mesh>,
    profiles: SlotMap<ProfileId, Profile>,
}

impl Scene {
    /// Creates a new, empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // --- Data ---

    /// Inserts curve data and returns its ID.
    pub fn add_curve(&mut self, splines: Vec<Spline>) -> CurveId {
        self.curves.insert(CurveData { splines })
    }

    /// Removes curve data no object displays any more.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve is not found or an object still
    /// displays it.
    pub fn remove_curve(&mut self, id: CurveId) -> Result<CurveData, SceneError> {
        if self.objects.values().any(|o| o.curve() == Some(id)) {
            return Err(SceneError::InvalidHierarchy(
                "curve data is still displayed by an object".into(),
            ));
        }
        self.curves
            .remove(id)
            .ok_or_else(|| SceneError::EntityNotFound("curve".into()))
    }

    /// Number of curve data blocks in the scene.
    #[must_use]
    pub fn curve_count(&self) -> usize {
        self.curves.len()
    }

    /// Inserts mesh data and returns its ID.
    pub fn add_mesh(&mut self, mesh: Mesh) -> MeshId {
        self.meshes.insert(mesh)
    }

    /// Inserts a bevel profile and returns its ID.
    pub fn add_profile(&mut self, profile: Profile) -> ProfileId {
        self.profiles.insert(profile)
    }

    /// Returns the curve data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn curve(&self, id: CurveId) -> Result<&CurveData, SceneError> {
        self.curves
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("curve".into()))
    }

    /// Returns the mesh data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn mesh(&self, id: MeshId) -> Result<&Mesh, SceneError> {
        self.meshes
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("mesh".into()))
    }

    /// Returns a mutable reference to the mesh data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn mesh_mut(&mut self, id: MeshId) -> Result<&mut Mesh, SceneError> {
        self.meshes
            .get_mut(id)
            .ok_or_else(|| SceneError::EntityNotFound("mesh".into()))
    }

    /// Returns the profile, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn profile(&self, id: ProfileId) -> Result<&Profile, SceneError> {
        self.profiles
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("profile".into()))
    }

    // --- Objects ---

    /// Inserts an object displaying `kind` and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the data referenced by `kind` is not in the scene.
    pub fn add_object(
        &mut self,
        name: impl Into<String>,
        kind: ObjectKind,
    ) -> Result<ObjectId, SceneError> {
        match &kind {
            ObjectKind::Curve { curve, bevel } => {
                self.curve(*curve)?;
                if let Some(bevel) = bevel {
                    self.profile(bevel.profile)?;
                }
            }
            ObjectKind::Mesh(mesh) => {
                self.mesh(*mesh)?;
            }
            ObjectKind::Group => {}
        }
        Ok(self.objects.insert(ObjectData::new(name, kind)))
    }

    /// Inserts an empty grouping object and returns its ID.
    pub fn add_group(&mut self, name: impl Into<String>) -> ObjectId {
        self.objects.insert(ObjectData::new(name, ObjectKind::Group))
    }

    /// Returns the object data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn object(&self, id: ObjectId) -> Result<&ObjectData, SceneError> {
        self.objects
            .get(id)
            .ok_or_else(|| SceneError::EntityNotFound("object".into()))
    }

    /// Returns a mutable reference to the object data, or an error if not found.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not found in the scene.
    pub fn object_mut(&mut self, id: ObjectId) -> Result<&mut ObjectData, SceneError> {
        self.objects
            .get_mut(id)
            .ok_or_else(|| SceneError::EntityNotFound("object".into()))
    }

    /// Number of objects in the scene.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterates over every object.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &ObjectData)> {
        self.objects.iter()
    }

    /// Returns the first object called `name`.
    #[must_use]
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, _)| id)
    }

    /// Renames an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn rename(&mut self, id: ObjectId, name: impl Into<String>) -> Result<(), SceneError> {
        self.object_mut(id)?.name = name.into();
        Ok(())
    }

    /// Creates a new object showing the same data as `id`.
    ///
    /// The copy gets the original's name, transform, material and bevel but
    /// no parent. With `with_children` the whole subtree is copied the same
    /// way and parented under the copy.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn link_copy(&mut self, id: ObjectId, with_children: bool) -> Result<ObjectId, SceneError> {
        let source = self.object(id)?;
        let mut copy = ObjectData::new(source.name.clone(), source.kind.clone());
        copy.transform = source.transform;
        copy.material = source.material;
        let children = if with_children {
            source.children.clone()
        } else {
            Vec::new()
        };

        let copy_id = self.objects.insert(copy);
        for child in children {
            let child_copy = self.link_copy(child, true)?;
            self.set_parent(child_copy, Some(copy_id))?;
        }
        Ok(copy_id)
    }

    /// Parents `child` under `parent`, or detaches it with `None`.
    ///
    /// # Errors
    ///
    /// Returns an error if either object is missing or the new parent is
    /// the child itself or one of its descendants.
    pub fn set_parent(
        &mut self,
        child: ObjectId,
        parent: Option<ObjectId>,
    ) -> Result<(), SceneError> {
        self.object(child)?;
        if let Some(parent) = parent {
            self.object(parent)?;
            let mut cursor = Some(parent);
            while let Some(current) = cursor {
                if current == child {
                    return Err(SceneError::InvalidHierarchy(
                        "an object cannot be parented to itself or its descendants".into(),
                    ));
                }
                cursor = self.object(current)?.parent;
            }
        }

        if let Some(old) = self.object(child)?.parent {
            self.object_mut(old)?.children.retain(|&c| c != child);
        }
        self.object_mut(child)?.parent = parent;
        if let Some(parent) = parent {
            self.object_mut(parent)?.children.push(child);
        }
        Ok(())
    }

    /// Returns the children of an object in the order they were parented.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn children(&self, id: ObjectId) -> Result<&[ObjectId], SceneError> {
        Ok(self.object(id)?.children())
    }

    /// Returns every object below `id`, depth first, parents before children.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn descendants(&self, id: ObjectId) -> Result<Vec<ObjectId>, SceneError> {
        let mut out = Vec::new();
        let mut stack: Vec<ObjectId> = self.object(id)?.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.object(current)?.children.iter().rev().copied());
        }
        Ok(out)
    }

    /// Replaces the local transform of an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn set_transform(&mut self, id: ObjectId, transform: Matrix4) -> Result<(), SceneError> {
        self.object_mut(id)?.transform = transform;
        Ok(())
    }

    /// Rotates an object about the Z axis of its parent space.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn rotate_z(&mut self, id: ObjectId, angle: f64) -> Result<(), SceneError> {
        let object = self.object_mut(id)?;
        object.transform = rotation_z(angle) * object.transform;
        Ok(())
    }

    /// Returns the transform from object space to world space.
    ///
    /// # Errors
    ///
    /// Returns an error if the object or one of its ancestors is not found.
    pub fn world_transform(&self, id: ObjectId) -> Result<Matrix4, SceneError> {
        let mut object = self.object(id)?;
        let mut matrix = object.transform;
        while let Some(parent) = object.parent {
            object = self.object(parent)?;
            matrix = object.transform * matrix;
        }
        Ok(matrix)
    }

    /// Assigns a material directly to an object.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn set_material(
        &mut self,
        id: ObjectId,
        material: Option<MaterialHandle>,
    ) -> Result<(), SceneError> {
        self.object_mut(id)?.material = material;
        Ok(())
    }

    /// Returns the material an object renders with: its own, or the
    /// nearest ancestor's.
    ///
    /// # Errors
    ///
    /// Returns an error if the object or one of its ancestors is not found.
    pub fn material_of(&self, id: ObjectId) -> Result<Option<MaterialHandle>, SceneError> {
        let mut cursor = Some(id);
        while let Some(current) = cursor {
            let object = self.object(current)?;
            if object.material.is_some() {
                return Ok(object.material);
            }
            cursor = object.parent;
        }
        Ok(None)
    }

    /// Tessellates an object and its children into one world-space mesh.
    ///
    /// # Errors
    ///
    /// Returns an error if an object or its data is missing, or a beveled
    /// curve cannot be swept.
    pub fn to_mesh(&self, id: ObjectId, params: TessellationParams) -> crate::error::Result<Mesh> {
        TessellateObject::new(id, params).execute(self)
    }

    /// Removes an object from the scene. Its children become roots; shared
    /// data stays in the scene.
    ///
    /// # Errors
    ///
    /// Returns an error if the object is not found.
    pub fn remove_object(&mut self, id: ObjectId) -> Result<ObjectData, SceneError> {
        self.set_parent(id, None)?;
        let removed = self
            .objects
            .remove(id)
            .ok_or_else(|| SceneError::EntityNotFound("object".into()))?;
        for child in &removed.children {
            if let Some(object) = self.objects.get_mut(*child) {
                object.parent = None;
            }
        }
        Ok(removed)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::curve::{make_bezier_circle, make_line};
    use crate::material::MaterialHandle;
    use crate::math::transform::transform_point;
    use crate::math::Point3;
    use approx::assert_relative_eq;
    use std::f64::consts::FRAC_PI_2;

    fn line_object(scene: &mut Scene, name: &str) -> ObjectId {
        let line = make_line(Point3::origin(), Point3::new(1.0, 0.0, 0.0), 2).unwrap();
        let curve = scene.add_curve(vec![line.into()]);
        scene
            .add_object(name, ObjectKind::Curve { curve, bevel: None })
            .unwrap()
    }

    #[test]
    fn parenting_orders_children() {
        let mut scene = Scene::new();
        let root = scene.add_group("Root");
        let a = line_object(&mut scene, "a");
        let b = line_object(&mut scene, "b");
        scene.set_parent(b, Some(root)).unwrap();
        scene.set_parent(a, Some(root)).unwrap();
        assert_eq!(scene.children(root).unwrap(), &[b, a]);
        assert_eq!(scene.object(a).unwrap().parent(), Some(root));
    }

    #[test]
    fn reparenting_moves_the_child() {
        let mut scene = Scene::new();
        let first = scene.add_group("first");
        let second = scene.add_group("second");
        let child = scene.add_group("child");
        scene.set_parent(child, Some(first)).unwrap();
        scene.set_parent(child, Some(second)).unwrap();
        assert!(scene.children(first).unwrap().is_empty());
        assert_eq!(scene.children(second).unwrap(), &[child]);
    }

    #[test]
    fn cycles_are_rejected() {
        let mut scene = Scene::new();
        let a = scene.add_group("a");
        let b = scene.add_group("b");
        scene.set_parent(b, Some(a)).unwrap();
        assert!(matches!(
            scene.set_parent(a, Some(b)),
            Err(SceneError::InvalidHierarchy(_))
        ));
        assert!(scene.set_parent(a, Some(a)).is_err());
    }

    #[test]
    fn world_transform_composes_parents() {
        let mut scene = Scene::new();
        let root = scene.add_group("root");
        let child = line_object(&mut scene, "child");
        scene.rotate_z(root, FRAC_PI_2).unwrap();
        scene
            .set_transform(child, Matrix4::new_translation(&crate::math::Vector3::new(1.0, 0.0, 0.0)))
            .unwrap();
        scene.set_parent(child, Some(root)).unwrap();
        let world = scene.world_transform(child).unwrap();
        let p = transform_point(&world, &Point3::origin());
        assert_relative_eq!(p, Point3::new(0.0, 1.0, 0.0), epsilon = 1e-12);
    }

    #[test]
    fn material_is_inherited() {
        let mut scene = Scene::new();
        let root = scene.add_group("root");
        let child = scene.add_group("child");
        scene.set_parent(child, Some(root)).unwrap();
        assert_eq!(scene.material_of(child).unwrap(), None);
        scene.set_material(root, Some(MaterialHandle(3))).unwrap();
        assert_eq!(scene.material_of(child).unwrap(), Some(MaterialHandle(3)));
        scene.set_material(child, Some(MaterialHandle(1))).unwrap();
        assert_eq!(scene.material_of(child).unwrap(), Some(MaterialHandle(1)));
    }

    #[test]
    fn link_copy_shares_data() {
        let mut scene = Scene::new();
        let original = line_object(&mut scene, "strand");
        let child = scene.add_group("child");
        scene.set_parent(child, Some(original)).unwrap();

        let shallow = scene.link_copy(original, false).unwrap();
        assert_eq!(scene.object(shallow).unwrap().kind, scene.object(original).unwrap().kind);
        assert!(scene.children(shallow).unwrap().is_empty());

        let deep = scene.link_copy(original, true).unwrap();
        assert_eq!(scene.children(deep).unwrap().len(), 1);
        assert_ne!(scene.children(deep).unwrap()[0], child);
        assert_eq!(scene.object_count(), 5);
    }

    #[test]
    fn objects_need_their_data() {
        let mut scene = Scene::new();
        let profile = scene.add_profile(
            crate::geometry::profile::Profile::new(vec![make_bezier_circle(1.0).unwrap()]).unwrap(),
        );
        let mut other = Scene::new();
        let curve = other.add_curve(Vec::new());
        let err = scene.add_object(
            "orphan",
            ObjectKind::Curve {
                curve,
                bevel: Some(Bevel::new(profile)),
            },
        );
        assert!(matches!(err, Err(SceneError::EntityNotFound(_))));
    }

    #[test]
    fn remove_detaches_children() {
        let mut scene = Scene::new();
        let root = scene.add_group("root");
        let mid = scene.add_group("mid");
        let leaf = scene.add_group("leaf");
        scene.set_parent(mid, Some(root)).unwrap();
        scene.set_parent(leaf, Some(mid)).unwrap();
        scene.remove_object(mid).unwrap();
        assert!(scene.children(root).unwrap().is_empty());
        assert_eq!(scene.object(leaf).unwrap().parent(), None);
        assert_eq!(scene.find_by_name("mid"), None);
        assert_eq!(scene.find_by_name("leaf"), Some(leaf));
    }

    #[test]
    fn descendants_are_depth_first() {
        let mut scene = Scene::new();
        let root = scene.add_group("root");
        let a = scene.add_group("a");
        let a1 = scene.add_group("a1");
        let b = scene.add_group("b");
        scene.set_parent(a, Some(root)).unwrap();
        scene.set_parent(a1, Some(a)).unwrap();
        scene.set_parent(b, Some(root)).unwrap();
        assert_eq!(scene.descendants(root).unwrap(), vec![a, a1, b]);
    }
}
