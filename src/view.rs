//! View model for the analysis display.
//!
//! [`AnalysisView`] holds every display region the handler writes to: the
//! status line, the trigger control, and the result panel. It is built once
//! at startup and handed to the handler, so nothing looks regions up ad hoc.
//! [`ResultPanel::render`] is the pure mapping from a service result to
//! display text.

use crate::models::AnalysisResult;
use serde::Serialize;

pub const NO_MAIN_IDEA: &str = "No main idea detected.";
pub const UNKNOWN_EMOTION: &str = "unknown";
pub const UNTITLED_SUB_IDEA: &str = "Untitled sub-idea";
pub const NO_SUB_IDEAS: &str = "No sub-ideas detected.";
pub const NO_LOGIC_GAPS: &str = "No major logic gaps detected. 🎉";
pub const NO_IMPROVEMENTS: &str = "No suggestions – your thinking is already very clear.";

/// All display regions of the analysis screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisView {
    /// Single-line status message.
    pub status: String,
    /// Whether the submit control accepts input.
    pub trigger_enabled: bool,
    /// Whether the result region is shown.
    pub result_visible: bool,
    /// Last rendered result. Kept while hidden, replaced on the next render.
    pub result: Option<ResultPanel>,
}

impl Default for AnalysisView {
    fn default() -> Self {
        Self {
            status: String::new(),
            trigger_enabled: true,
            result_visible: false,
            result: None,
        }
    }
}

impl AnalysisView {
    /// Render a result into the panel and reveal it.
    pub fn render(&mut self, result: &AnalysisResult) {
        self.result = Some(ResultPanel::render(result));
        self.result_visible = true;
    }

    /// The panel, if it is currently shown.
    pub fn visible_result(&self) -> Option<&ResultPanel> {
        if self.result_visible {
            self.result.as_ref()
        } else {
            None
        }
    }
}

/// Clarity score text plus the proportion of the bar to fill.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClarityGauge {
    /// Score as displayed, `"0"` when the service sent none.
    pub score_text: String,
    /// Fill proportion, always within `[0, 100]`.
    pub fill_percent: f64,
}

impl ClarityGauge {
    pub fn new(score: Option<f64>) -> Self {
        let value = score.filter(|v| v.is_finite()).unwrap_or(0.0);
        Self {
            score_text: format_number(value),
            fill_percent: value.clamp(0.0, 100.0),
        }
    }

    /// Width of the bar fill, e.g. `"80%"`.
    pub fn bar_width(&self) -> String {
        format!("{}%", format_number(self.fill_percent))
    }
}

/// Integral values print without a fractional part (`80`, not `80.0`).
fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubIdeaView {
    pub title: String,
    pub summary: String,
}

/// Either the extracted sub-ideas or a single placeholder line.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubIdeasPanel {
    Entries(Vec<SubIdeaView>),
    Placeholder(String),
}

/// Display text for every result region.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultPanel {
    pub main_idea: String,
    pub clarity: ClarityGauge,
    pub emotion: String,
    pub sub_ideas: SubIdeasPanel,
    pub logic_gaps: Vec<String>,
    pub improvements: Vec<String>,
}

impl ResultPanel {
    /// Map a service result to display text. No IO, no side effects.
    pub fn render(result: &AnalysisResult) -> Self {
        let sub_ideas = if result.sub_ideas.is_empty() {
            SubIdeasPanel::Placeholder(NO_SUB_IDEAS.to_string())
        } else {
            SubIdeasPanel::Entries(
                result
                    .sub_ideas
                    .iter()
                    .map(|idea| SubIdeaView {
                        title: non_empty_or(idea.title.as_deref(), UNTITLED_SUB_IDEA),
                        summary: idea.summary.clone().unwrap_or_default(),
                    })
                    .collect(),
            )
        };

        Self {
            main_idea: non_empty_or(result.main_idea.as_deref(), NO_MAIN_IDEA),
            clarity: ClarityGauge::new(result.clarity_score),
            emotion: non_empty_or(result.emotion.as_deref(), UNKNOWN_EMOTION),
            sub_ideas,
            logic_gaps: list_or(&result.logic_gaps, NO_LOGIC_GAPS),
            improvements: list_or(&result.improvements, NO_IMPROVEMENTS),
        }
    }
}

fn non_empty_or(value: Option<&str>, placeholder: &str) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => placeholder.to_string(),
    }
}

fn list_or(items: &[String], placeholder: &str) -> Vec<String> {
    if items.is_empty() {
        vec![placeholder.to_string()]
    } else {
        items.to_vec()
    }
}
