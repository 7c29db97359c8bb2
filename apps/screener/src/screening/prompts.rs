// LLM prompt constants and the response schema for the ranking call.
// Reuses cross-cutting fragments from llm_client::prompts.

use serde_json::{json, Value};

/// System prompt for resume ranking.
pub const RANKING_SYSTEM: &str = "You are an experienced technical recruiter screening \
    resumes against a job description. Rank every resume you are given from best to \
    worst match and justify each position briefly and concretely.";

/// Ranking prompt template.
/// Replace: {fairness_instruction}, {resume_count}, {job_description}, {resumes}
pub const RANKING_PROMPT_TEMPLATE: &str = r#"{fairness_instruction}

Rank the candidates below against the job description.

Return a JSON object with this EXACT shape:
{
  "rankings": [
    {
      "candidate_name": "Jane Doe",
      "rank": 1,
      "score": 87,
      "rationale": "Six years of production Rust and led a distributed storage migration.",
      "strengths": ["Rust", "distributed systems"],
      "gaps": ["no Kubernetes experience"]
    }
  ]
}

RULES:
1. Order `rankings` best match first; `rank` starts at 1 and increases by one per entry
2. `score` is an integer from 0 to 100 describing fit for THIS job only
3. Use the candidate's name as written in the resume; if none is given use "Candidate N" by position
4. Include every resume exactly once
5. Resumes are separated by lines of dashes (---). The block appears to contain {resume_count} resume(s)

JOB DESCRIPTION:
{job_description}

RESUMES:
{resumes}"#;

/// Builds the user prompt for a ranking call.
pub fn build_ranking_prompt(job_description: &str, resumes: &str, resume_count: usize) -> String {
    let template = RANKING_PROMPT_TEMPLATE
        .replace(
            "{fairness_instruction}",
            crate::llm_client::prompts::FAIRNESS_INSTRUCTION,
        )
        .replace("{resume_count}", &resume_count.to_string());
    fill_placeholders(
        &template,
        &[
            ("{job_description}", job_description.trim()),
            ("{resumes}", resumes.trim()),
        ],
    )
}

/// Substitutes every placeholder in one left-to-right pass. Inserted text is
/// never rescanned, so user text containing a placeholder stays literal.
fn fill_placeholders(template: &str, values: &[(&str, &str)]) -> String {
    let mut filled = String::with_capacity(template.len());
    let mut rest = template;
    loop {
        let next = values
            .iter()
            .filter_map(|(key, value)| rest.find(*key).map(|at| (at, *key, *value)))
            .min_by_key(|(at, _, _)| *at);
        match next {
            Some((at, key, value)) => {
                filled.push_str(&rest[..at]);
                filled.push_str(value);
                rest = &rest[at + key.len()..];
            }
            None => {
                filled.push_str(rest);
                return filled;
            }
        }
    }
}

/// System instruction sent with every ranking call.
pub fn ranking_system() -> String {
    format!(
        "{RANKING_SYSTEM} {}",
        crate::llm_client::prompts::JSON_ONLY_SYSTEM
    )
}

/// Gemini `responseSchema` (OpenAPI subset) describing the ranking payload.
pub fn ranking_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "rankings": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "candidate_name": {"type": "STRING"},
                        "rank": {"type": "INTEGER"},
                        "score": {"type": "INTEGER"},
                        "rationale": {"type": "STRING"},
                        "strengths": {"type": "ARRAY", "items": {"type": "STRING"}},
                        "gaps": {"type": "ARRAY", "items": {"type": "STRING"}}
                    },
                    "required": ["candidate_name", "rank", "score", "rationale"],
                    "propertyOrdering": ["rank", "candidate_name", "score", "rationale", "strengths", "gaps"]
                }
            }
        },
        "required": ["rankings"]
    })
}
