use serde::{Deserialize, Serialize};

pub const UNKNOWN_CANDIDATE: &str = "Unknown";

/// The four fixed evaluation dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    ExperienceEducation,
    Skills,
    Knowledge,
    Tools,
}

impl Criterion {
    pub const ALL: [Criterion; 4] = [
        Criterion::ExperienceEducation,
        Criterion::Skills,
        Criterion::Knowledge,
        Criterion::Tools,
    ];

    /// Key used in the model's JSON reply.
    pub fn json_key(self) -> &'static str {
        match self {
            Criterion::ExperienceEducation => "experience_education",
            Criterion::Skills => "skills",
            Criterion::Knowledge => "knowledge",
            Criterion::Tools => "tools",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Criterion::ExperienceEducation => "Experience",
            Criterion::Skills => "Skills",
            Criterion::Knowledge => "Knowledge",
            Criterion::Tools => "Tools",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriterionScore {
    pub score: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriteriaAnalysis {
    pub experience_education: CriterionScore,
    pub skills: CriterionScore,
    pub knowledge: CriterionScore,
    pub tools: CriterionScore,
}

impl CriteriaAnalysis {
    pub fn get(&self, criterion: Criterion) -> &CriterionScore {
        match criterion {
            Criterion::ExperienceEducation => &self.experience_education,
            Criterion::Skills => &self.skills,
            Criterion::Knowledge => &self.knowledge,
            Criterion::Tools => &self.tools,
        }
    }
}

/// One candidate's scored evaluation, as returned by the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub candidate_name: String,
    /// Reported by the model; never recomputed from the criteria.
    pub total_score: u8,
    pub analysis: CriteriaAnalysis,
    pub summary: String,
}

impl AnalysisResult {
    /// Rounded mean of the four criterion scores. Display-only.
    pub fn criteria_average(&self) -> u8 {
        let sum: u32 = Criterion::ALL
            .iter()
            .map(|c| self.analysis.get(*c).score as u32)
            .sum();
        ((sum as f64) / (Criterion::ALL.len() as f64)).round() as u8
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.total_score)
    }
}

/// Colour band for a 0–100 score. Thresholds are inclusive on the lower edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBand {
    High,
    Medium,
    Low,
}

impl ScoreBand {
    pub const HIGH_THRESHOLD: u8 = 80;
    pub const MEDIUM_THRESHOLD: u8 = 50;

    pub fn from_score(score: u8) -> Self {
        if score >= Self::HIGH_THRESHOLD {
            ScoreBand::High
        } else if score >= Self::MEDIUM_THRESHOLD {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn criterion(score: u8) -> CriterionScore {
        CriterionScore {
            score,
            reasoning: format!("scored {score}"),
        }
    }

    pub fn result(name: &str, total: u8) -> AnalysisResult {
        AnalysisResult {
            candidate_name: name.to_string(),
            total_score: total,
            analysis: CriteriaAnalysis {
                experience_education: criterion(total),
                skills: criterion(total),
                knowledge: criterion(total),
                tools: criterion(total),
            },
            summary: format!("{name} summary"),
        }
    }
}
