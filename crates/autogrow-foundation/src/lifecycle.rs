/// Activation state of the scene hosting the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SceneActivity {
    #[default]
    Active,
    Inactive,
    Background,
}

impl SceneActivity {
    /// Editing ends whenever the scene stops being frontmost.
    pub fn ends_editing(&self) -> bool {
        !matches!(self, SceneActivity::Active)
    }
}
