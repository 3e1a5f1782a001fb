use serde_json::Value;

/// Generated image payload, passed through as the service returned it.
///
/// The remote contract is undocumented and shifts between envelope shapes,
/// so the payload is not decomposed beyond the top-level error check done
/// during decoding. `first_image_base64` covers the shapes observed so far
/// for callers that just want the picture.
#[derive(Debug, Clone)]
pub struct GenerationResult {
    raw: Value,
}

impl GenerationResult {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    pub fn first_image_base64(&self) -> Option<&str> {
        if let Some(images) = self.raw.get("images").and_then(|v| v.as_array()) {
            for image in images {
                if let Some(encoded) = image.as_str() {
                    return Some(encoded);
                }
                if let Some(encoded) = image.get("encodedImage").and_then(|v| v.as_str()) {
                    return Some(encoded);
                }
            }
        }

        self.raw
            .get("imagePanels")
            .and_then(|v| v.as_array())
            .and_then(|panels| {
                panels.iter().find_map(|panel| {
                    panel
                        .get("generatedImages")
                        .and_then(|v| v.as_array())
                        .and_then(|images| {
                            images
                                .iter()
                                .find_map(|image| image.get("encodedImage").and_then(|v| v.as_str()))
                        })
                })
            })
    }
}
