use crate::config::BuildSettings;
use crate::error::Result;
use crate::material::{MaterialHandle, MaterialRequest, MaterialResolver};
use crate::progress::Progress;
use crate::scene::{ObjectId, Scene};

/// Everything a builder needs besides its own parameters: the scene it
/// writes into, the host's material resolver, an optional progress sink and
/// the resolution settings.
pub struct BuildContext<'a> {
    pub scene: &'a mut Scene,
    pub materials: &'a mut dyn MaterialResolver,
    pub progress: Option<&'a mut dyn Progress>,
    pub settings: BuildSettings,
}

impl<'a> BuildContext<'a> {
    /// Creates a context with default settings and no progress reporting.
    pub fn new(scene: &'a mut Scene, materials: &'a mut dyn MaterialResolver) -> Self {
        Self {
            scene,
            materials,
            progress: None,
            settings: BuildSettings::default(),
        }
    }

    /// Reports progress of long-running builders to `progress`.
    #[must_use]
    pub fn with_progress(mut self, progress: &'a mut dyn Progress) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Replaces the resolution settings.
    #[must_use]
    pub fn with_settings(mut self, settings: BuildSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Resolves `request` and assigns the material to `object`.
    pub(crate) fn assign_material(
        &mut self,
        object: ObjectId,
        request: &MaterialRequest,
    ) -> Result<MaterialHandle> {
        let handle = self.materials.resolve(request)?;
        self.scene.set_material(object, Some(handle))?;
        Ok(handle)
    }

    pub(crate) fn progress_begin(&mut self, total: usize) {
        if let Some(progress) = self.progress.as_deref_mut() {
            progress.begin(total);
        }
    }

    pub(crate) fn progress_update(&mut self, done: usize) {
        if let Some(progress) = self.progress.as_deref_mut() {
            progress.update(done);
        }
    }

    pub(crate) fn progress_end(&mut self) {
        if let Some(progress) = self.progress.as_deref_mut() {
            progress.end();
        }
    }
}
