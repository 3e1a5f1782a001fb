use serde::{Deserialize, Serialize};

/// Input of a plain image generation.
///
/// Defaults are filled by the operation, not the caller: a project is
/// created when `project_id` is absent, `seed` falls back to 0 (an
/// explicit `Some(0)` is a valid seed, distinct from absent), and the
/// model/aspect identifiers fall back to the fixed defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prompt {
    pub text: String,
    pub project_id: Option<String>,
    pub seed: Option<i64>,
    pub image_model: Option<String>,
    pub aspect_ratio: Option<String>,
}

impl Prompt {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            project_id: None,
            seed: None,
            image_model: None,
            aspect_ratio: None,
        }
    }

    pub fn with_project_id(mut self, project_id: impl Into<String>) -> Self {
        self.project_id = Some(project_id.into());
        self
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_image_model(mut self, model: impl Into<String>) -> Self {
        self.image_model = Some(model.into());
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: impl Into<String>) -> Self {
        self.aspect_ratio = Some(ratio.into());
        self
    }
}

/// Input of the two-phase refinement protocol: rewrite the prompt of an
/// existing image from a new instruction, then regenerate from the
/// rewritten prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefinementRequest {
    /// Prompt description the existing image was generated from.
    pub existing_prompt: String,
    /// Free-text instruction describing the desired edit.
    pub instruction: String,
    /// Media key of the image being refined.
    pub image_id: String,
    /// Base64-encoded bytes of the image being refined.
    pub image_base64: String,
    pub project_id: String,
    pub seed: Option<i64>,
    pub aspect_ratio: Option<String>,
    pub image_model: Option<String>,
    pub candidate_count: Option<u32>,
}

impl RefinementRequest {
    pub fn new(
        existing_prompt: impl Into<String>,
        instruction: impl Into<String>,
        image_id: impl Into<String>,
        image_base64: impl Into<String>,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            existing_prompt: existing_prompt.into(),
            instruction: instruction.into(),
            image_id: image_id.into(),
            image_base64: image_base64.into(),
            project_id: project_id.into(),
            seed: None,
            aspect_ratio: None,
            image_model: None,
            candidate_count: None,
        }
    }

    pub fn with_seed(mut self, seed: i64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_candidate_count(mut self, count: u32) -> Self {
        self.candidate_count = Some(count);
        self
    }
}
