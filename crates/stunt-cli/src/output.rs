use std::fmt::Write as _;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use stunt_core::{Plan, Problem};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// Total on the first line, then `count idx...` per stage.
    #[default]
    Text,
    /// Pretty-printed JSON document.
    Json,
    /// Text output followed by a per-stage score breakdown.
    Explain,
}

#[derive(Debug, Serialize)]
struct PlanDocument {
    total: i64,
    stages: Vec<StageDocument>,
}

#[derive(Debug, Serialize)]
struct StageDocument {
    tricks: Vec<usize>,
    points: i64,
}

pub fn render(plan: &Plan, problem: &Problem, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(plan)),
        OutputFormat::Json => render_json(plan, problem),
        OutputFormat::Explain => Ok(render_explain(plan, problem)),
    }
}

pub fn render_text(plan: &Plan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", plan.total);
    for selection in &plan.selections {
        let _ = write!(out, "{}", selection.len());
        for number in selection.one_based() {
            let _ = write!(out, " {number}");
        }
        out.push('\n');
    }
    out
}

pub fn render_json(plan: &Plan, problem: &Problem) -> serde_json::Result<String> {
    let stages = plan
        .selections
        .iter()
        .zip(plan.stage_scores(problem))
        .map(|(selection, parts)| StageDocument {
            tricks: selection.one_based(),
            points: parts.total,
        })
        .collect();
    let document = PlanDocument {
        total: plan.total,
        stages,
    };
    let mut json = serde_json::to_string_pretty(&document)?;
    json.push('\n');
    Ok(json)
}

pub fn render_explain(plan: &Plan, problem: &Problem) -> String {
    let mut out = render_text(plan);
    for (index, parts) in plan.stage_scores(problem).iter().enumerate() {
        let _ = writeln!(
            out,
            "# stage {}: fresh {} repeated {} -> {} x{} x{} = {}",
            index + 1,
            parts.fresh,
            parts.repeated,
            parts.raw_points,
            parts.multiplier,
            parts.volume,
            parts.total
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stunt_core::{Stage, Trick, TrickSet};

    fn problem() -> Problem {
        Problem::new(
            vec![Stage::new(2, 5), Stage::new(1, 3)],
            vec![Trick::new(10, 3), Trick::new(6, 2)],
        )
        .unwrap()
    }

    fn plan() -> Plan {
        Plan {
            total: 64 + 10,
            selections: vec![TrickSet::from_bits(0b11), TrickSet::from_bits(0b01)],
        }
    }

    #[test]
    fn text_lists_counts_and_one_based_indices() {
        assert_eq!(render_text(&plan()), "74\n2 1 2\n1 1\n");
    }

    #[test]
    fn empty_selection_prints_a_bare_zero() {
        let plan = Plan {
            total: 0,
            selections: vec![TrickSet::EMPTY],
        };
        assert_eq!(render_text(&plan), "0\n0\n");
    }

    #[test]
    fn json_carries_per_stage_points() {
        let json = render(&plan(), &problem(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["total"], 74);
        assert_eq!(value["stages"][0]["tricks"], serde_json::json!([1, 2]));
        assert_eq!(value["stages"][0]["points"], 64);
        assert_eq!(value["stages"][1]["points"], 5);
    }

    #[test]
    fn explain_appends_breakdown_lines() {
        let text = render(&plan(), &problem(), OutputFormat::Explain).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(&lines[..3], &["74", "2 1 2", "1 1"]);
        assert_eq!(lines[3], "# stage 1: fresh {1,2} repeated {} -> 16 x2 x2 = 64");
        assert_eq!(lines[4], "# stage 2: fresh {} repeated {1} -> 5 x1 x1 = 5");
    }
}
