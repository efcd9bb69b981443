//! Validates the model's JSON reply against the screening schema before any
//! field is read, then applies defaults for the optional fields.

use serde_json::{Map, Value};

use crate::errors::ScreenError;
use crate::llm_client::strip_json_fences;
use crate::screening::models::{
    AnalysisResult, CriteriaAnalysis, Criterion, CriterionScore, UNKNOWN_CANDIDATE,
};

const MAX_SCORE: u64 = 100;

pub fn parse_analysis(text: &str) -> Result<AnalysisResult, ScreenError> {
    let value: Value = serde_json::from_str(strip_json_fences(text))
        .map_err(|e| ScreenError::MalformedResponse(e.to_string()))?;
    let root = value
        .as_object()
        .ok_or_else(|| ScreenError::MalformedResponse("expected a JSON object".to_string()))?;

    let candidate_name = optional_str(root, "candidate_name")?
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .unwrap_or(UNKNOWN_CANDIDATE)
        .to_string();

    let total_score = match root.get("total_score") {
        None | Some(Value::Null) => 0,
        Some(v) => parse_score(v, "total_score")?,
    };

    let analysis = root
        .get("analysis")
        .ok_or_else(|| ScreenError::schema("analysis", "missing"))?
        .as_object()
        .ok_or_else(|| ScreenError::schema("analysis", "expected an object"))?;

    let analysis = CriteriaAnalysis {
        experience_education: parse_criterion(analysis, Criterion::ExperienceEducation)?,
        skills: parse_criterion(analysis, Criterion::Skills)?,
        knowledge: parse_criterion(analysis, Criterion::Knowledge)?,
        tools: parse_criterion(analysis, Criterion::Tools)?,
    };

    let summary = optional_str(root, "summary")?.unwrap_or_default().to_string();

    Ok(AnalysisResult {
        candidate_name,
        total_score,
        analysis,
        summary,
    })
}

fn parse_criterion(
    analysis: &Map<String, Value>,
    criterion: Criterion,
) -> Result<CriterionScore, ScreenError> {
    let field = format!("analysis.{}", criterion.json_key());
    let entry = analysis
        .get(criterion.json_key())
        .ok_or_else(|| ScreenError::schema(&field, "missing"))?
        .as_object()
        .ok_or_else(|| ScreenError::schema(&field, "expected an object"))?;

    let score_field = format!("{field}.score");
    let score = entry
        .get("score")
        .ok_or_else(|| ScreenError::schema(&score_field, "missing"))?;

    Ok(CriterionScore {
        score: parse_score(score, &score_field)?,
        reasoning: optional_str(entry, "reasoning")?
            .unwrap_or_default()
            .to_string(),
    })
}

/// Accepts integers, and floats with no fractional part, in 0..=100.
fn parse_score(value: &Value, field: &str) -> Result<u8, ScreenError> {
    let score = match value {
        Value::Number(n) => n.as_u64().or_else(|| {
            n.as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                .map(|f| f as u64)
        }),
        _ => None,
    };
    match score {
        Some(s) if s <= MAX_SCORE => Ok(s as u8),
        _ => Err(ScreenError::schema(
            field,
            format!("expected an integer 0-100, got {value}"),
        )),
    }
}

fn optional_str<'a>(
    object: &'a Map<String, Value>,
    key: &str,
) -> Result<Option<&'a str>, ScreenError> {
    match object.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ScreenError::schema(key, "expected a string")),
    }
}
