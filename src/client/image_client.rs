use crate::{
    client::{decode_response, decode_trpc, Backend, ProjectClient},
    error::{Result, WhiskError},
    models::{GenerationResult, Prompt, RefinementRequest},
};
use reqwest::Method;
use serde_json::json;
use std::sync::Arc;

/// Default model identifier used when a request leaves it unset.
pub const DEFAULT_IMAGE_MODEL: &str = "IMAGEN_3_5";

/// Default aspect ratio identifier used when a request leaves it unset.
pub const DEFAULT_ASPECT_RATIO: &str = "IMAGE_ASPECT_RATIO_LANDSCAPE";

pub const DEFAULT_SEED: i64 = 0;

pub const DEFAULT_CANDIDATE_COUNT: u32 = 1;

const GENERATE_OPERATION: &str = "whisk:generateImage";
const REFINE_OPERATION: &str = "whisk:refineImage";
const REWRITE_PROCEDURE: &str = "backbone.editPrompt";

/// Image generation operations, including the two-phase refinement
/// protocol.
#[derive(Clone)]
pub struct ImageClient {
    backend: Arc<Backend>,
    projects: ProjectClient,
}

impl ImageClient {
    pub(crate) fn new(backend: Arc<Backend>) -> Self {
        Self {
            projects: ProjectClient::new(backend.clone()),
            backend,
        }
    }

    /// Generate images from a text prompt.
    ///
    /// A project is created on the fly when the prompt names none; seed,
    /// model and aspect ratio fall back to the fixed defaults. An explicit
    /// seed of 0 is kept as 0.
    pub async fn generate(&self, request: Prompt) -> Result<GenerationResult> {
        if request.text.trim().is_empty() {
            return Err(WhiskError::Precondition("prompt text is empty".into()));
        }

        let project_id = match request.project_id {
            Some(id) => id,
            None => self.projects.create("").await?,
        };

        let token = self.backend.access_token().await?.to_string();

        let seed = request.seed.unwrap_or(DEFAULT_SEED);
        let model = request
            .image_model
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());
        let aspect_ratio = request
            .aspect_ratio
            .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string());

        log::info!("Generating image with model: {}", model);

        let body = json!({
            "clientContext": {
                "workflowId": project_id,
                "tool": "BACKBONE"
            },
            "imageModelSettings": {
                "imageModel": model,
                "aspectRatio": aspect_ratio
            },
            "seed": seed,
            "prompt": request.text,
            "mediaCategory": "MEDIA_CATEGORY_BOARD"
        });

        let raw = self
            .backend
            .transport
            .execute(
                Method::POST,
                &self.backend.sandbox_url(GENERATE_OPERATION),
                &self.backend.bearer_headers(&token),
                Some(body.to_string()),
            )
            .await?;

        let value = decode_response(GENERATE_OPERATION, &raw)?;
        Ok(GenerationResult::new(value))
    }

    /// Refine an existing image from a free-text instruction.
    ///
    /// The service cannot regenerate an edited image directly: phase A
    /// asks the prompt-rewriting endpoint (cookie auth) to merge the
    /// existing prompt with the instruction, phase B generates from the
    /// rewritten prompt alone (bearer auth). Phase B is never attempted
    /// once phase A has failed, and the first failure is the one returned.
    pub async fn refine(&self, request: RefinementRequest) -> Result<GenerationResult> {
        if request.instruction.trim().is_empty() {
            return Err(WhiskError::Precondition(
                "refinement instruction is empty".into(),
            ));
        }
        if request.image_id.trim().is_empty() {
            return Err(WhiskError::Precondition("image id is empty".into()));
        }
        if request.image_base64.trim().is_empty() {
            return Err(WhiskError::Precondition("image data is empty".into()));
        }
        if request.project_id.trim().is_empty() {
            return Err(WhiskError::Precondition("project id is empty".into()));
        }

        let seed = request.seed.unwrap_or(DEFAULT_SEED);
        let model = request
            .image_model
            .unwrap_or_else(|| DEFAULT_IMAGE_MODEL.to_string());
        let aspect_ratio = request
            .aspect_ratio
            .unwrap_or_else(|| DEFAULT_ASPECT_RATIO.to_string());
        let candidate_count = request.candidate_count.unwrap_or(DEFAULT_CANDIDATE_COUNT);

        // Phase A: prompt rewrite.
        log::info!("Rewriting prompt for media: {}", request.image_id);

        let rewrite_body = json!({
            "json": {
                "action": "EDIT",
                "existingPrompt": request.existing_prompt,
                "instruction": request.instruction,
                "mediaKey": request.image_id,
                "encodedImage": request.image_base64,
                "seed": seed
            }
        });

        let raw = self
            .backend
            .transport
            .execute(
                Method::POST,
                &self.backend.trpc_url(REWRITE_PROCEDURE),
                &self.backend.cookie_headers(),
                Some(rewrite_body.to_string()),
            )
            .await?;

        let rewritten = decode_trpc(REWRITE_PROCEDURE, &raw)?;
        let rewritten = rewritten.as_str().map(String::from).ok_or_else(|| {
            WhiskError::Decode(format!(
                "{}: response has no rewritten prompt: {}",
                REWRITE_PROCEDURE, raw
            ))
        })?;

        log::debug!("Rewritten prompt: {}", rewritten);

        // Phase B: generate from the rewritten prompt only.
        let token = self.backend.access_token().await?.to_string();

        let generate_body = json!({
            "clientContext": {
                "workflowId": request.project_id,
                "tool": "BACKBONE"
            },
            "imageModelSettings": {
                "imageModel": model,
                "aspectRatio": aspect_ratio
            },
            "seed": seed,
            "prompt": rewritten,
            "candidatesCount": candidate_count,
            "mediaCategory": "MEDIA_CATEGORY_BOARD"
        });

        let raw = self
            .backend
            .transport
            .execute(
                Method::POST,
                &self.backend.sandbox_url(REFINE_OPERATION),
                &self.backend.bearer_headers(&token),
                Some(generate_body.to_string()),
            )
            .await?;

        let value = decode_response(REFINE_OPERATION, &raw)?;
        Ok(GenerationResult::new(value))
    }
}
