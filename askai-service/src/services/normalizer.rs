//! Candidate response normalization.
//!
//! Providers return a heterogeneous candidate shape: structured content
//! parts, a legacy flat text field on older models, or no usable output at
//! all. Normalization flattens whatever came back into an ordered list of
//! trimmed answer strings.

use crate::services::providers::Candidate;
use thiserror::Error;

/// Finish reason reported for a normally-completed candidate.
const FINISH_REASON_STOP: &str = "STOP";

/// Error type for response normalization.
#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("AI model did not generate any text answers.")]
    NoAnswersGenerated,
}

/// Flatten candidates into one trimmed answer per extractable candidate.
///
/// Candidates with a non-STOP finish reason and no output are logged and
/// skipped; an empty final list is an error.
pub fn normalize_candidates(candidates: &[Candidate]) -> Result<Vec<String>, NormalizeError> {
    let mut answers = Vec::new();

    for candidate in candidates {
        let parts = candidate
            .content
            .as_ref()
            .map(|content| content.parts.as_slice())
            .unwrap_or_default();

        if !parts.is_empty() {
            let text: String = parts
                .iter()
                .filter_map(|part| part.text.as_deref())
                .collect();
            // structured content is appended even when it trims to empty;
            // the legacy branch below is not
            answers.push(text.trim().to_string());
        } else if let Some(text) = candidate.text.as_deref().filter(|t| !t.is_empty()) {
            answers.push(text.trim().to_string());
        } else if candidate.finish_reason != FINISH_REASON_STOP {
            tracing::warn!(
                finish_reason = %candidate.finish_reason,
                "Candidate finished without generating content"
            );
        }
    }

    if answers.is_empty() {
        return Err(NormalizeError::NoAnswersGenerated);
    }

    Ok(answers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::{CandidateContent, CandidatePart};

    fn parts_candidate(parts: &[&str]) -> Candidate {
        Candidate {
            content: Some(CandidateContent {
                parts: parts
                    .iter()
                    .map(|text| CandidatePart {
                        text: Some(text.to_string()),
                    })
                    .collect(),
            }),
            finish_reason: "STOP".to_string(),
            ..Default::default()
        }
    }

    fn legacy_candidate(text: &str) -> Candidate {
        Candidate {
            text: Some(text.to_string()),
            finish_reason: "STOP".to_string(),
            ..Default::default()
        }
    }

    fn empty_candidate(finish_reason: &str) -> Candidate {
        Candidate {
            finish_reason: finish_reason.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn concatenates_and_trims_content_parts() {
        let answers = normalize_candidates(&[parts_candidate(&["Hello, ", "world!"])])
            .expect("parts should normalize");
        assert_eq!(answers, vec!["Hello, world!"]);
    }

    #[test]
    fn trims_legacy_direct_text() {
        let answers =
            normalize_candidates(&[legacy_candidate("  answer  ")]).expect("legacy text counts");
        assert_eq!(answers, vec!["answer"]);
    }

    #[test]
    fn preserves_candidate_order() {
        let answers =
            normalize_candidates(&[parts_candidate(&["first"]), legacy_candidate("second")])
                .expect("both candidates count");
        assert_eq!(answers, vec!["first", "second"]);
    }

    #[test]
    fn parts_without_text_contribute_nothing() {
        let candidate = Candidate {
            content: Some(CandidateContent {
                parts: vec![
                    CandidatePart { text: None },
                    CandidatePart {
                        text: Some("kept".to_string()),
                    },
                ],
            }),
            finish_reason: "STOP".to_string(),
            ..Default::default()
        };

        let answers = normalize_candidates(&[candidate]).expect("textless parts are skipped");
        assert_eq!(answers, vec!["kept"]);
    }

    #[test]
    fn content_wins_over_legacy_text() {
        let candidate = Candidate {
            content: Some(CandidateContent {
                parts: vec![CandidatePart {
                    text: Some("structured".to_string()),
                }],
            }),
            text: Some("legacy".to_string()),
            finish_reason: "STOP".to_string(),
        };

        let answers = normalize_candidates(&[candidate]).expect("structured content wins");
        assert_eq!(answers, vec!["structured"]);
    }

    // Content parts that trim to nothing still append an (empty) answer,
    // unlike the legacy branch, which requires non-empty text. Pinned so a
    // change here is deliberate.
    #[test]
    fn whitespace_only_parts_still_append_an_empty_answer() {
        let answers = normalize_candidates(&[parts_candidate(&["   "])])
            .expect("whitespace parts still count");
        assert_eq!(answers, vec![""]);
    }

    #[test]
    fn empty_legacy_text_yields_no_answers() {
        let err = normalize_candidates(&[legacy_candidate("")])
            .expect_err("empty legacy text is not an answer");
        assert!(matches!(err, NormalizeError::NoAnswersGenerated));
    }

    #[test]
    fn stop_candidates_without_output_yield_no_answers() {
        let err = normalize_candidates(&[empty_candidate("STOP"), empty_candidate("STOP")])
            .expect_err("nothing extractable");
        assert!(matches!(err, NormalizeError::NoAnswersGenerated));
    }

    #[test]
    fn non_stop_candidates_yield_no_answers() {
        let err = normalize_candidates(&[empty_candidate("SAFETY"), empty_candidate("MAX_TOKENS")])
            .expect_err("blocked candidates produce nothing");
        assert!(matches!(err, NormalizeError::NoAnswersGenerated));
    }

    #[test]
    fn empty_candidate_list_yields_no_answers() {
        let err = normalize_candidates(&[]).expect_err("no candidates at all");
        assert!(matches!(err, NormalizeError::NoAnswersGenerated));
    }
}
