use serde::{Deserialize, Serialize};

/// The structured output contract the model must satisfy.
///
/// Deserialization is strict on required fields: anything missing makes the
/// parse fail and routes the raw text through the fallback wrapper instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResult {
    pub cover_letter: String,
    pub subject_line: String,
    pub keywords_used: Vec<String>,
    pub notes_for_user: NotesForUser,
    pub meta: GenerationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NotesForUser {
    #[serde(rename = "personalizationHook")]
    pub personalization_hook: String,
    #[serde(rename = "optionalPS")]
    pub optional_ps: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GenerationMeta {
    pub language: String,
    pub target_role: String,
    pub approx_word_count: u32,
}

impl GenerationResult {
    /// Wraps raw, unparseable model text so every generation attempt still
    /// yields a consistently shaped result.
    pub fn fallback_from_raw(raw: &str) -> Self {
        GenerationResult {
            cover_letter: raw.to_string(),
            subject_line: String::new(),
            keywords_used: Vec::new(),
            notes_for_user: NotesForUser {
                personalization_hook: String::new(),
                optional_ps: String::new(),
            },
            meta: GenerationMeta {
                language: "unknown".to_string(),
                target_role: String::new(),
                approx_word_count: raw.split_whitespace().count() as u32,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_counts_whitespace_tokens() {
        let result = GenerationResult::fallback_from_raw("Dear hiring manager,\nI am  great.");
        assert_eq!(result.cover_letter, "Dear hiring manager,\nI am  great.");
        assert_eq!(result.meta.approx_word_count, 6);
        assert_eq!(result.meta.language, "unknown");
        assert!(result.keywords_used.is_empty());
        assert!(result.subject_line.is_empty());
    }

    #[test]
    fn wire_names_are_camel_case() {
        let result = GenerationResult::fallback_from_raw("hi");
        let value = serde_json::to_value(&result).expect("serialize");
        assert!(value.get("coverLetter").is_some());
        assert!(value.get("notesForUser").unwrap().get("optionalPS").is_some());
        assert!(value.get("meta").unwrap().get("approxWordCount").is_some());
    }
}
