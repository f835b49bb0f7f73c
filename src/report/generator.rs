//! Terminal, Markdown and JSON output.
//!
//! All three formats render the same [`ResultPanel`], so placeholders and
//! clarity clamping match what the view shows.

use crate::models::{AnalysisReport, ReportMetadata};
use crate::view::{ResultPanel, SubIdeasPanel};
use anyhow::Result;

/// Cells in the terminal clarity bar.
const BAR_CELLS: usize = 20;

/// Emoji for the emotion words the service is prompted to use.
pub fn emotion_emoji(emotion: &str) -> &'static str {
    match emotion.to_lowercase().as_str() {
        "neutral" => "😐",
        "confident" => "😎",
        "anxious" => "😰",
        "excited" => "🤩",
        "sad" => "😢",
        "angry" => "😠",
        "mixed" => "🎭",
        _ => "💭",
    }
}

/// ASCII bar for a fill proportion in `[0, 100]`.
pub fn clarity_bar(fill_percent: f64) -> String {
    let filled = ((fill_percent / 100.0) * BAR_CELLS as f64).round() as usize;
    let filled = filled.min(BAR_CELLS);
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_CELLS - filled))
}

/// Generate the plain-text terminal view of a result.
pub fn generate_terminal_report(panel: &ResultPanel) -> String {
    let mut output = String::new();

    output.push_str("🧠 Main idea\n");
    output.push_str(&format!("   {}\n\n", panel.main_idea));

    output.push_str(&format!("📊 Clarity: {}/100\n", panel.clarity.score_text));
    output.push_str(&format!(
        "   {} {}\n\n",
        clarity_bar(panel.clarity.fill_percent),
        panel.clarity.bar_width()
    ));

    output.push_str(&format!(
        "{} Emotion: {}\n\n",
        emotion_emoji(&panel.emotion),
        panel.emotion
    ));

    output.push_str("🧩 Sub-ideas\n");
    match &panel.sub_ideas {
        SubIdeasPanel::Entries(entries) => {
            for idea in entries {
                output.push_str(&format!("   • {}\n", idea.title));
                if !idea.summary.is_empty() {
                    output.push_str(&format!("     {}\n", idea.summary));
                }
            }
        }
        SubIdeasPanel::Placeholder(text) => output.push_str(&format!("   {}\n", text)),
    }
    output.push('\n');

    output.push_str("🔍 Logic gaps\n");
    for gap in &panel.logic_gaps {
        output.push_str(&format!("   • {}\n", gap));
    }
    output.push('\n');

    output.push_str("💡 Improvements\n");
    for improvement in &panel.improvements {
        output.push_str(&format!("   • {}\n", improvement));
    }

    output
}

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &AnalysisReport) -> String {
    let panel = ResultPanel::render(&report.result);
    let mut output = String::new();

    output.push_str("# MindWeave Analysis\n\n");
    output.push_str(&generate_metadata_section(&report.metadata));

    output.push_str("## Main Idea\n\n");
    output.push_str(&format!("{}\n\n", panel.main_idea));

    output.push_str("## Clarity & Emotion\n\n");
    output.push_str("| Clarity | Emotion |\n");
    output.push_str("|:---:|:---:|\n");
    output.push_str(&format!(
        "| {} `{}` {} | {} {} |\n\n",
        panel.clarity.score_text,
        clarity_bar(panel.clarity.fill_percent),
        panel.clarity.bar_width(),
        emotion_emoji(&panel.emotion),
        escape_table_cell(&panel.emotion)
    ));

    output.push_str(&generate_sub_ideas_section(&panel.sub_ideas));
    output.push_str(&generate_list_section("Logic Gaps", &panel.logic_gaps));
    output.push_str(&generate_list_section("Improvements", &panel.improvements));

    output.push_str("---\n\n");
    output.push_str("*Report generated by MindWeave*\n");

    output
}

/// Keep service text inside a single Markdown table cell.
fn escape_table_cell(text: &str) -> String {
    text.replace("\r\n", " ")
        .replace(['\n', '\r'], " ")
        .replace('|', "\\|")
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Service:** {}\n", metadata.server_url));
    section.push_str(&format!(
        "- **Analysis Date:** {}\n",
        metadata.analysis_date.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Input Length:** {} chars\n", metadata.input_chars));
    section.push_str(&format!(
        "- **Duration:** {:.1}s\n\n",
        metadata.duration_seconds
    ));

    section
}

fn generate_sub_ideas_section(sub_ideas: &SubIdeasPanel) -> String {
    let mut section = String::from("## Sub-ideas\n\n");

    match sub_ideas {
        SubIdeasPanel::Entries(entries) => {
            for idea in entries {
                section.push_str(&format!("### {}\n\n", idea.title));
                if !idea.summary.is_empty() {
                    section.push_str(&format!("{}\n\n", idea.summary));
                }
            }
        }
        SubIdeasPanel::Placeholder(text) => section.push_str(&format!("{}\n\n", text)),
    }

    section
}

fn generate_list_section(title: &str, items: &[String]) -> String {
    let mut section = format!("## {}\n\n", title);
    for item in items {
        section.push_str(&format!("- {}\n", item));
    }
    section.push('\n');
    section
}

/// Generate a JSON report.
pub fn generate_json_report(report: &AnalysisReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}
