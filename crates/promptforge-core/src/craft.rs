//! C.R.A.F.T. prompt assembly
//!
//! Turns the loosely structured form fields submitted by the frontend into a
//! single prompt for the model. Every section is always emitted so the model
//! sees a stable layout, even when some fields are blank.

use serde::Deserialize;

const ROLE_CONSTRAINTS: &str = "Your tone and constraints: be concise, factual, and explain assumptions.";

const GOAL: &str = "Compose a high-quality and perfect prompt that, when given to a chatbot or an coding agent bot, \
will produce extremely useful and accurate outputs for the target audience. Always think and plan before you \
generate answer. If possible run the answer through your review process and see if it fits the requirements.";

/// User-supplied fields of the C.R.A.F.T. template
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CraftFields {
    pub title: String,
    pub context: String,
    pub ai_role: String,
    pub additional_info: String,
    pub output_format: String,
    pub target_audience: String,
}

impl CraftFields {
    /// Whether every field is blank after trimming
    pub fn is_blank(&self) -> bool {
        [
            &self.title,
            &self.context,
            &self.ai_role,
            &self.additional_info,
            &self.output_format,
            &self.target_audience,
        ]
        .iter()
        .all(|field| field.trim().is_empty())
    }

    /// Assemble the crafted prompt
    ///
    /// Returns `None` when there is nothing to craft from.
    pub fn assemble(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }

        let sections = [
            format!("Title:\n  {}\n", self.title.trim()),
            format!("Context:\n  {}\n", self.context.trim()),
            format!("Role (AI):\n  You are {}. {ROLE_CONSTRAINTS}\n", self.ai_role.trim()),
            format!("Additional Information:\n  {}\n", self.additional_info.trim()),
            format!("Format:\n  {}\n", self.output_format.trim()),
            format!("Target Audience:\n  {}\n", self.target_audience.trim()),
            format!("Goal:\n {GOAL}\n"),
        ];

        Some(sections.join("\n"))
    }
}
