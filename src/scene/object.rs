use crate::material::MaterialHandle;
use crate::math::Matrix4;

use super::data::{CurveId, MeshId, ProfileId};

slotmap::new_key_type! {
    /// Unique identifier for an object in the scene.
    pub struct ObjectId;
}

/// A bevel: the profile swept along a curve object to give it a body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bevel {
    /// Cross-section swept along the curve.
    pub profile: ProfileId,
    /// Fraction of the curve, from its start, left without a body.
    pub factor_start: f64,
    /// Whether the open ends of the sweep are closed.
    pub fill_caps: bool,
}

impl Bevel {
    /// A capped bevel over the whole curve.
    #[must_use]
    pub fn new(profile: ProfileId) -> Self {
        Self {
            profile,
            factor_start: 0.0,
            fill_caps: true,
        }
    }

    /// Sets the fraction of the curve left bare at its start.
    #[must_use]
    pub fn with_factor_start(mut self, factor_start: f64) -> Self {
        self.factor_start = factor_start;
        self
    }
}

/// What an object displays.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectKind {
    /// Curve data, optionally given a body by a bevel profile.
    Curve {
        curve: CurveId,
        bevel: Option<Bevel>,
    },
    /// Polygon mesh data.
    Mesh(MeshId),
    /// An empty that only groups its children.
    Group,
}

/// Data associated with a scene object.
///
/// Objects form a tree through `parent`/`children`. The transform is local:
/// an object's world transform is its parent's world transform times its
/// own.
#[derive(Debug, Clone)]
pub struct ObjectData {
    /// Display name; not necessarily unique.
    pub name: String,
    /// The data the object displays.
    pub kind: ObjectKind,
    /// Transform relative to the parent.
    pub transform: Matrix4,
    /// Material assigned directly to this object.
    pub material: Option<MaterialHandle>,
    pub(crate) parent: Option<ObjectId>,
    pub(crate) children: Vec<ObjectId>,
}

impl ObjectData {
    /// Creates an unparented object with an identity transform.
    #[must_use]
    pub fn new(name: impl Into<String>, kind: ObjectKind) -> Self {
        Self {
            name: name.into(),
            kind,
            transform: Matrix4::identity(),
            material: None,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Returns the parent object, if any.
    #[must_use]
    pub fn parent(&self) -> Option<ObjectId> {
        self.parent
    }

    /// Returns the children in the order they were parented.
    #[must_use]
    pub fn children(&self) -> &[ObjectId] {
        &self.children
    }

    /// Returns the bevel of a curve object.
    #[must_use]
    pub fn bevel(&self) -> Option<&Bevel> {
        match &self.kind {
            ObjectKind::Curve { bevel, .. } => bevel.as_ref(),
            _ => None,
        }
    }

    /// Returns the curve data of a curve object.
    #[must_use]
    pub fn curve(&self) -> Option<CurveId> {
        match self.kind {
            ObjectKind::Curve { curve, .. } => Some(curve),
            _ => None,
        }
    }

    /// Returns the mesh data of a mesh object.
    #[must_use]
    pub fn mesh(&self) -> Option<MeshId> {
        match self.kind {
            ObjectKind::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
