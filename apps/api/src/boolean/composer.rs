//! Prompt Composer — builds the single instruction sent to the text backend.
//!
//! Pure and deterministic: identical inputs always produce an identical string.
//! Section order is fixed:
//!   role → extraction rule → synonym rule → Boolean rule → output template
//!   → [USER CONTEXT block] → NOT filters → separator → JD label + JD text
//!
//! Two modes:
//! - `JdOnly`: buckets come from the JD itself.
//! - `StrictContext`: buckets come only from the user's context; the JD is relabelled
//!   as a synonym-only reference.

use serde::Serialize;

use crate::boolean::prompts::{
    BOOLEAN_RULE, CONTEXT_LABEL, EXTRACT_FROM_CONTEXT, EXTRACT_FROM_JD, JD_LABEL, JD_SEPARATOR,
    JD_SYNONYM_ONLY_LABEL, NOT_FILTERS_LABEL, OUTPUT_TEMPLATE, ROLE, SYNONYMS,
};

/// Which extraction rule the instruction carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PromptMode {
    /// First pass: derive buckets from the JD.
    JdOnly,
    /// Refinement: derive buckets from the user context, JD for synonyms only.
    StrictContext,
}

impl PromptMode {
    /// Whitespace-only context counts as absent.
    pub fn from_context(context: Option<&str>) -> Self {
        match normalize_context(context) {
            Some(_) => PromptMode::StrictContext,
            None => PromptMode::JdOnly,
        }
    }

    fn extraction_rule(&self) -> &'static str {
        match self {
            PromptMode::JdOnly => EXTRACT_FROM_JD,
            PromptMode::StrictContext => EXTRACT_FROM_CONTEXT,
        }
    }

    fn jd_label(&self) -> &'static str {
        match self {
            PromptMode::JdOnly => JD_LABEL,
            PromptMode::StrictContext => JD_SYNONYM_ONLY_LABEL,
        }
    }
}

/// A fully composed instruction together with the mode it was built in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerationRequest {
    pub mode: PromptMode,
    pub instruction: String,
}

impl GenerationRequest {
    pub fn compose(jd: &str, not_filters: &str, context: Option<&str>) -> Self {
        GenerationRequest {
            mode: PromptMode::from_context(context),
            instruction: compose(jd, not_filters, context),
        }
    }
}

/// Composes the instruction string for `(jd, not_filters, context)`.
pub fn compose(jd: &str, not_filters: &str, context: Option<&str>) -> String {
    let context = normalize_context(context);
    let mode = PromptMode::from_context(context);

    let mut instruction = String::with_capacity(
        OUTPUT_TEMPLATE.len() + 512 + jd.len() + not_filters.len() + context.map_or(0, str::len),
    );

    for line in [
        ROLE,
        mode.extraction_rule(),
        SYNONYMS,
        BOOLEAN_RULE,
        OUTPUT_TEMPLATE,
    ] {
        instruction.push_str(line);
        instruction.push('\n');
    }

    if let Some(context) = context {
        instruction.push('\n');
        instruction.push_str(CONTEXT_LABEL);
        instruction.push('\n');
        instruction.push_str(context);
        instruction.push('\n');
    }

    // Empty NOT filters still get their line.
    instruction.push('\n');
    instruction.push_str(NOT_FILTERS_LABEL);
    instruction.push(' ');
    instruction.push_str(not_filters);
    instruction.push('\n');

    instruction.push('\n');
    instruction.push_str(JD_SEPARATOR);
    instruction.push('\n');
    instruction.push_str(mode.jd_label());
    instruction.push('\n');
    instruction.push_str(jd);

    instruction
}

fn normalize_context(context: Option<&str>) -> Option<&str> {
    context.filter(|c| !c.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    const JAVA_JD: &str =
        "Looking for a Java backend engineer with Spring Boot and Kafka experience";
    const KAFKA_CONTEXT: &str =
        "Must have Kafka and distributed systems experience; ignore Java version specifics";

    #[test]
    fn test_jd_only_contains_jd_and_filters_once() {
        let jd = "Senior SAP FICO consultant, S/4HANA migration, GST compliance";
        let not_filters = "\"trainee\", \"SD consultant\"";
        let instruction = compose(jd, not_filters, None);

        assert_eq!(instruction.matches(jd).count(), 1);
        assert_eq!(instruction.matches(not_filters).count(), 1);
        assert!(!instruction.contains("strict"));
        assert!(!instruction.contains(CONTEXT_LABEL));
        assert!(!instruction.contains("MUST-HAVE"));
    }

    #[test]
    fn test_scenario_java_jd_without_context() {
        let instruction = compose(JAVA_JD, "\"intern\"", None);

        assert!(instruction.contains("Looking for a Java backend engineer"));
        assert!(instruction.contains("intern"));
        assert!(instruction.contains(EXTRACT_FROM_JD));
        assert!(!instruction.contains(EXTRACT_FROM_CONTEXT));
        assert!(instruction.contains(&format!("{JD_LABEL}\n{JAVA_JD}")));
    }

    #[test]
    fn test_scenario_java_jd_with_strict_context() {
        let instruction = compose(JAVA_JD, "\"intern\"", Some(KAFKA_CONTEXT));

        assert!(instruction.contains(EXTRACT_FROM_CONTEXT));
        assert!(instruction.contains("strictly from USER CONTEXT"));
        assert!(!instruction.contains(EXTRACT_FROM_JD));
        assert!(instruction.contains(&format!("{CONTEXT_LABEL}\n{KAFKA_CONTEXT}")));
        assert_eq!(instruction.matches("Kafka").count(), 2);
    }

    #[test]
    fn test_strict_context_relabels_jd_as_synonym_source() {
        let instruction = compose(JAVA_JD, "", Some(KAFKA_CONTEXT));

        assert!(instruction.contains(&format!("{JD_SYNONYM_ONLY_LABEL}\n{JAVA_JD}")));
        assert!(instruction.contains("do NOT create new buckets"));
        assert!(instruction.ends_with(JAVA_JD));
        // The JD label is only ever the synonym-only variant in this mode.
        assert!(!instruction.contains(&format!("\n{JD_LABEL}\n")));
    }

    #[test]
    fn test_sections_appear_in_fixed_order() {
        let instruction = compose(JAVA_JD, "\"intern\"", Some(KAFKA_CONTEXT));
        let positions: Vec<usize> = [
            ROLE,
            EXTRACT_FROM_CONTEXT,
            SYNONYMS,
            BOOLEAN_RULE,
            "### Buckets",
            "### Boolean",
            CONTEXT_LABEL,
            NOT_FILTERS_LABEL,
            JD_SEPARATOR,
            JD_SYNONYM_ONLY_LABEL,
        ]
        .iter()
        .map(|needle| instruction.find(needle).unwrap())
        .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]), "{positions:?}");
        assert!(instruction.starts_with(ROLE));
    }

    #[test]
    fn test_empty_not_filters_keeps_the_line() {
        let instruction = compose(JAVA_JD, "", None);
        assert!(instruction.contains(&format!("\n{NOT_FILTERS_LABEL} \n")));
    }

    #[test]
    fn test_empty_jd_still_composes() {
        let instruction = compose("", "\"intern\"", None);
        assert!(instruction.ends_with(&format!("{JD_LABEL}\n")));
        assert!(instruction.contains(OUTPUT_TEMPLATE));
    }

    #[test]
    fn test_whitespace_context_is_treated_as_absent() {
        assert_eq!(PromptMode::from_context(Some("  \n\t")), PromptMode::JdOnly);
        assert_eq!(PromptMode::from_context(None), PromptMode::JdOnly);
        assert_eq!(
            PromptMode::from_context(Some("Hands-on RBAC")),
            PromptMode::StrictContext
        );
        assert_eq!(compose(JAVA_JD, "", Some("   ")), compose(JAVA_JD, "", None));
    }

    #[test]
    fn test_compose_is_deterministic() {
        let first = GenerationRequest::compose(JAVA_JD, "\"intern\"", Some(KAFKA_CONTEXT));
        let second = GenerationRequest::compose(JAVA_JD, "\"intern\"", Some(KAFKA_CONTEXT));
        assert_eq!(first, second);
        assert_eq!(first.mode, PromptMode::StrictContext);
    }

    #[test]
    fn test_boolean_rule_is_mode_independent() {
        let plain = compose(JAVA_JD, "\"intern\"", None);
        let strict = compose(JAVA_JD, "\"intern\"", Some(KAFKA_CONTEXT));
        for instruction in [&plain, &strict] {
            assert!(instruction.contains("OR within buckets, AND between buckets"));
            assert!(instruction.contains("append NOT-filters"));
            assert!(instruction.contains(SYNONYMS));
        }
    }

    #[test]
    fn test_jd_only_properties_hold_across_varied_inputs() {
        let cases = [
            ("", ""),
            ("\n\n", "\"intern\""),
            ("Ingénieur logiciel à Zürich: Rust, gRPC, Tokio", "\"stagiaire\""),
            ("数据工程师\nSpark\nHive", "\"实习生\""),
            ("Line one\r\nLine two\n\n    indented", ""),
            ("Growth hacker 🚀 with SEO/SEM", "\"junior\", \"trainee\""),
        ];

        for (jd, not_filters) in cases {
            for context in [None, Some(""), Some(" \n\t")] {
                let request = GenerationRequest::compose(jd, not_filters, context);
                let instruction = &request.instruction;

                assert_eq!(request.mode, PromptMode::JdOnly, "{jd:?}");
                assert!(!instruction.contains(CONTEXT_LABEL), "{jd:?}");
                assert!(!instruction.contains("strict"), "{jd:?}");
                assert!(!instruction.contains(EXTRACT_FROM_CONTEXT), "{jd:?}");
                assert!(instruction.ends_with(&format!("{JD_LABEL}\n{jd}")), "{jd:?}");
                assert!(
                    instruction.contains(&format!("\n{NOT_FILTERS_LABEL} {not_filters}\n")),
                    "{not_filters:?}"
                );

                if !jd.trim().is_empty() {
                    assert_eq!(instruction.matches(jd).count(), 1, "{jd:?}");
                }
                if !not_filters.is_empty() {
                    assert_eq!(instruction.matches(not_filters).count(), 1, "{not_filters:?}");
                }
            }
        }
    }
}
