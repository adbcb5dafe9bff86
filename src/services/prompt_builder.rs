//! Deterministic prompt construction for cover-letter generation.
//!
//! Turns `{job description, profile fields, tone, length, language}` into a
//! fixed-order instruction set plus a machine-readable payload. The same
//! inputs always produce the same prompt; everything nondeterministic lives
//! behind the generation client.

use serde_json::json;

/// How long the generated letter should be. Each variant carries an explicit
/// sentence/word target so the model has no room to negotiate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Length {
    Minimal,
    Short,
    Standard,
    Elaborate,
}

impl Length {
    /// Missing value -> `Short` (the documented request default).
    /// Unrecognized value -> `Standard` rather than an error.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Length::Short;
        };

        match value.to_ascii_lowercase().as_str() {
            "minimal" => Length::Minimal,
            "short" => Length::Short,
            "standard" => Length::Standard,
            "elaborate" => Length::Elaborate,
            _ => Length::Standard,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Length::Minimal => "minimal",
            Length::Short => "short",
            Length::Standard => "standard",
            Length::Elaborate => "elaborate",
        }
    }

    fn directive(&self) -> &'static str {
        match self {
            Length::Minimal => {
                "Length: write 2 to 3 sentences in total. Do not include a greeting or a sign-off."
            }
            Length::Short => {
                "Length: write 3 to 4 sentences, kept to a single short paragraph."
            }
            Length::Standard => {
                "Length: write 2 to 3 paragraphs, roughly 150 to 200 words in total."
            }
            Length::Elaborate => {
                "Length: write 3 to 4 paragraphs, roughly 250 to 350 words in total."
            }
        }
    }
}

/// The stylistic register of the letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Startup,
    Executive,
    Creative,
    Technical,
    Funny,
    Professional,
}

impl Tone {
    /// Missing or unrecognized values fall back to `Professional`.
    pub fn parse(value: Option<&str>) -> Self {
        let Some(value) = value.map(str::trim).filter(|v| !v.is_empty()) else {
            return Tone::Professional;
        };

        match value.to_ascii_lowercase().as_str() {
            "startup" => Tone::Startup,
            "executive" => Tone::Executive,
            "creative" => Tone::Creative,
            "technical" => Tone::Technical,
            "funny" => Tone::Funny,
            _ => Tone::Professional,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Startup => "startup",
            Tone::Executive => "executive",
            Tone::Creative => "creative",
            Tone::Technical => "technical",
            Tone::Funny => "funny",
            Tone::Professional => "professional",
        }
    }

    fn directive(&self) -> &'static str {
        match self {
            Tone::Startup => {
                "Tone: energetic and direct, like writing to a small mission-driven team; \
                 short sentences, active verbs, no corporate boilerplate."
            }
            Tone::Executive => {
                "Tone: polished and confident senior voice; lead with outcomes and scope of \
                 responsibility, avoid exclamation marks."
            }
            Tone::Creative => {
                "Tone: vivid and original; one striking image or turn of phrase is welcome, \
                 clichés are not."
            }
            Tone::Technical => {
                "Tone: precise and plain-spoken; name concrete technologies and measurable \
                 results, avoid marketing adjectives."
            }
            Tone::Funny => {
                "Tone: warm with light humor; at most one joke, and never at the employer's \
                 expense or at the cost of credibility."
            }
            Tone::Professional => {
                "Tone: neutral, courteous and professional throughout."
            }
        }
    }
}

/// Options as resolved from the request (after default/tie-break handling).
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    pub length: Length,
    pub tone: Tone,
    pub language: String,
}

impl GenerationOptions {
    pub fn resolve(length: Option<&str>, tone: Option<&str>, language: Option<&str>) -> Self {
        GenerationOptions {
            length: Length::parse(length),
            tone: Tone::parse(tone),
            language: language
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .unwrap_or("en")
                .to_string(),
        }
    }
}

/// The profile fields that personalize a letter. All optional; the
/// instruction set adapts to what is present.
#[derive(Debug, Clone, Default)]
pub struct ProfileSnapshot {
    pub strengths: Option<String>,
    pub experience: Option<String>,
    pub education: Option<String>,
}

impl ProfileSnapshot {
    fn field(value: &Option<String>) -> Option<&str> {
        value.as_deref().map(str::trim).filter(|v| !v.is_empty())
    }

    pub fn strengths(&self) -> Option<&str> {
        Self::field(&self.strengths)
    }

    pub fn experience(&self) -> Option<&str> {
        Self::field(&self.experience)
    }

    pub fn education(&self) -> Option<&str> {
        Self::field(&self.education)
    }
}

/// A fully assembled prompt: human-language instructions for the system
/// message and a JSON payload for the user message.
#[derive(Debug, Clone)]
pub struct Prompt {
    pub instructions: String,
    pub payload: String,
}

const STRUCTURE_FRAGMENT: &str = "Structure the letter in three parts: an opening hook that ties \
the candidate to this specific role, a middle that connects their background to the job's \
requirements, and a brief closing that states interest and invites a conversation. Do not invent \
facts. Do not add a signature line. Do not leave placeholders such as [Company] or [Your Name].";

const OUTPUT_SHAPE: &str = r#"{"coverLetter": string, "subjectLine": string, "keywordsUsed": string[], "notesForUser": {"personalizationHook": string, "optionalPS": string}, "meta": {"language": string, "targetRole": string, "approxWordCount": number}}"#;

/// Composes the instruction set in fixed order: length, tone, structure,
/// grounding rules, output contract.
pub fn build_prompt(
    job_description: &str,
    profile: &ProfileSnapshot,
    options: &GenerationOptions,
) -> Prompt {
    let mut sections: Vec<String> = Vec::new();

    sections.push(
        "You are an assistant that writes cover letters for job applications.".to_string(),
    );
    sections.push(options.length.directive().to_string());
    sections.push(options.tone.directive().to_string());
    sections.push(STRUCTURE_FRAGMENT.to_string());

    let mut rules: Vec<String> = vec![
        "Use only the information supplied in the payload; never fabricate employers, degrees, \
         skills, or dates."
            .to_string(),
        format!("Write the letter in the language '{}'.", options.language),
    ];
    if profile.experience().is_some() {
        rules.push(
            "Include at least one concrete example drawn from the candidate's supplied \
             experience."
                .to_string(),
        );
    }
    if profile.strengths().is_some() {
        rules.push("Weave the candidate's strengths in naturally; do not list them.".to_string());
    }
    sections.push(format!("Rules:\n- {}", rules.join("\n- ")));

    sections.push(format!(
        "Respond with ONLY a JSON object, no prose before or after and no markdown fencing, \
         shaped exactly as:\n{}",
        OUTPUT_SHAPE
    ));

    let payload = json!({
        "jobDescription": job_description,
        "profile": {
            "strengths": profile.strengths(),
            "experience": profile.experience(),
            "education": profile.education(),
        },
        "options": {
            "tone": options.tone.as_str(),
            "length": options.length.as_str(),
            "language": options.language,
        },
    });

    Prompt {
        instructions: sections.join("\n\n"),
        payload: payload.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(length: Option<&str>, tone: Option<&str>) -> GenerationOptions {
        GenerationOptions::resolve(length, tone, None)
    }

    #[test]
    fn missing_length_defaults_to_short() {
        assert_eq!(Length::parse(None), Length::Short);
        assert_eq!(Length::parse(Some("")), Length::Short);
    }

    #[test]
    fn unknown_length_falls_back_to_standard() {
        assert_eq!(Length::parse(Some("novel")), Length::Standard);
    }

    #[test]
    fn length_parsing_is_case_insensitive() {
        assert_eq!(Length::parse(Some("Elaborate")), Length::Elaborate);
        assert_eq!(Length::parse(Some("MINIMAL")), Length::Minimal);
    }

    #[test]
    fn unknown_or_missing_tone_falls_back_to_professional() {
        assert_eq!(Tone::parse(None), Tone::Professional);
        assert_eq!(Tone::parse(Some("sarcastic")), Tone::Professional);
        assert_eq!(Tone::parse(Some("Technical")), Tone::Technical);
    }

    #[test]
    fn minimal_prompt_carries_only_the_minimal_directive() {
        let prompt = build_prompt(
            "Backend engineer",
            &ProfileSnapshot::default(),
            &options(Some("minimal"), None),
        );

        assert!(prompt.instructions.contains("2 to 3 sentences"));
        assert!(!prompt.instructions.contains("150 to 200 words"));
        assert!(!prompt.instructions.contains("250 to 350 words"));
        assert!(!prompt.instructions.contains("3 to 4 sentences"));
    }

    #[test]
    fn structure_fragment_is_always_present() {
        let prompt = build_prompt(
            "Any role",
            &ProfileSnapshot::default(),
            &options(None, None),
        );
        assert!(prompt.instructions.contains("opening hook"));
        assert!(prompt.instructions.contains("Do not invent facts"));
        assert!(prompt.instructions.contains("signature line"));
    }

    #[test]
    fn experience_rule_only_appears_when_experience_is_supplied() {
        let without = build_prompt(
            "Role",
            &ProfileSnapshot::default(),
            &options(None, None),
        );
        assert!(!without.instructions.contains("concrete example"));

        let with = build_prompt(
            "Role",
            &ProfileSnapshot {
                experience: Some("3 years at Acme, built a billing pipeline".to_string()),
                ..Default::default()
            },
            &options(None, None),
        );
        assert!(with.instructions.contains("concrete example"));
    }

    #[test]
    fn blank_profile_fields_are_treated_as_absent() {
        let prompt = build_prompt(
            "Role",
            &ProfileSnapshot {
                experience: Some("   ".to_string()),
                ..Default::default()
            },
            &options(None, None),
        );
        assert!(!prompt.instructions.contains("concrete example"));
    }

    #[test]
    fn fragments_appear_in_fixed_order() {
        let prompt = build_prompt(
            "Role",
            &ProfileSnapshot::default(),
            &options(Some("standard"), Some("technical")),
        );

        let length_pos = prompt
            .instructions
            .find("150 to 200 words")
            .expect("length fragment");
        let tone_pos = prompt
            .instructions
            .find("precise and plain-spoken")
            .expect("tone fragment");
        let structure_pos = prompt
            .instructions
            .find("opening hook")
            .expect("structure fragment");
        let contract_pos = prompt
            .instructions
            .find("ONLY a JSON object")
            .expect("output contract");

        assert!(length_pos < tone_pos);
        assert!(tone_pos < structure_pos);
        assert!(structure_pos < contract_pos);
    }

    #[test]
    fn payload_is_machine_readable_json() {
        let prompt = build_prompt(
            "Senior backend engineer, Go, distributed systems",
            &ProfileSnapshot {
                strengths: Some("Leadership,Problem Solving".to_string()),
                experience: Some("3 years at Acme".to_string()),
                education: None,
            },
            &options(Some("short"), Some("technical")),
        );

        let payload: serde_json::Value =
            serde_json::from_str(&prompt.payload).expect("payload parses");
        assert_eq!(
            payload["jobDescription"],
            "Senior backend engineer, Go, distributed systems"
        );
        assert_eq!(payload["profile"]["strengths"], "Leadership,Problem Solving");
        assert_eq!(payload["profile"]["education"], serde_json::Value::Null);
        assert_eq!(payload["options"]["tone"], "technical");
        assert_eq!(payload["options"]["length"], "short");
        assert_eq!(payload["options"]["language"], "en");
    }

    #[test]
    fn same_inputs_produce_the_same_prompt() {
        let profile = ProfileSnapshot {
            strengths: Some("Grit".to_string()),
            ..Default::default()
        };
        let opts = options(Some("elaborate"), Some("funny"));

        let a = build_prompt("Role", &profile, &opts);
        let b = build_prompt("Role", &profile, &opts);
        assert_eq!(a.instructions, b.instructions);
        assert_eq!(a.payload, b.payload);
    }
}
