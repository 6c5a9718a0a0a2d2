use serde::{Deserialize, Serialize};

/* ----- generateContent request ----- */

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerateRequest<'a> {
    pub(crate) contents: [ContentOut<'a>; 1],
    pub(crate) generation_config: GenerationConfig,
}

#[derive(Serialize)]
pub(crate) struct ContentOut<'a> {
    pub(crate) role: &'static str,
    pub(crate) parts: [PartOut<'a>; 1],
}

#[derive(Serialize)]
pub(crate) struct PartOut<'a> {
    pub(crate) text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GenerationConfig {
    pub(crate) temperature: f32,
    pub(crate) top_p: f32,
}

impl<'a> GenerateRequest<'a> {
    pub(crate) fn user_prompt(text: &'a str, temperature: f32, top_p: f32) -> Self {
        Self {
            contents: [ContentOut {
                role: "user",
                parts: [PartOut { text }],
            }],
            generation_config: GenerationConfig { temperature, top_p },
        }
    }
}

/* ----- generateContent response ----- */

#[derive(Deserialize)]
pub(crate) struct GenerateResponse {
    #[serde(default)]
    pub(crate) candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
pub(crate) struct Candidate {
    pub(crate) content: Option<ContentIn>,
}

#[derive(Deserialize)]
pub(crate) struct ContentIn {
    #[serde(default)]
    pub(crate) parts: Vec<PartIn>,
}

#[derive(Deserialize)]
pub(crate) struct PartIn {
    pub(crate) text: Option<String>,
}

impl GenerateResponse {
    /// Concatenated text parts of the first candidate.
    pub(crate) fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|c| {
                c.parts
                    .iter()
                    .filter_map(|p| p.text.as_deref())
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}
