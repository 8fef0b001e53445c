use crate::flow::{FlowDetectionResult, FlowStructure};
use crate::patterns::PatternAnalysis;
use crate::pipeline::KnowledgeReport;
use itertools::Itertools;
use std::fmt::Write;

/// Formats engine output into human-readable text.
pub struct ReportFormatter;

impl ReportFormatter {
    /// Format a detection result: one block per flow, then orphans and recommendations.
    pub fn format_result(result: &FlowDetectionResult) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Flows: {}", result.flows.len());
        for flow in &result.flows {
            out.push_str(&Self::format_flow(flow));
        }

        if !result.orphaned_screens.is_empty() {
            let _ = writeln!(
                out,
                "Orphaned screens ({}): {}",
                result.orphaned_screens.len(),
                result.orphaned_screens.iter().map(|s| &s.name).join(", ")
            );
        }

        let q = &result.quality;
        let _ = writeln!(
            out,
            "Quality: coverage {}, average length {:.1}, average confidence {}, confident roles {}",
            Self::format_percent(q.coverage),
            q.average_flow_length,
            Self::format_percent(q.average_confidence),
            Self::format_percent(q.role_confidence_ratio),
        );

        for advice in &result.recommendations {
            let _ = writeln!(out, "  - {}", advice);
        }
        out
    }

    /// Format a single flow with its screens in order.
    pub fn format_flow(flow: &FlowStructure) -> String {
        let mut out = String::new();
        let _ = writeln!(
            out,
            "#{} {} [{}, {} navigation, {}]{}",
            flow.sequence,
            flow.name,
            flow.method,
            flow.navigation,
            Self::format_percent(flow.confidence),
            if flow.is_critical_path { " critical" } else { "" }
        );
        let _ = writeln!(
            out,
            "   screens: {}",
            flow.screens.iter().map(|s| &s.name).join(" -> ")
        );
        let _ = writeln!(
            out,
            "   devices: {}; about {}",
            flow.devices.iter().join(", "),
            Self::format_duration(flow.estimated_duration_secs)
        );
        out
    }

    pub fn format_patterns(analysis: &PatternAnalysis) -> String {
        let patterns = if analysis.patterns.is_empty() {
            "none".to_string()
        } else {
            analysis
                .patterns
                .iter()
                .map(|p| format!("{} ({:.0})", p.kind, p.confidence))
                .join(", ")
        };
        format!(
            "patterns: {}; complexity {:?}; consistency {}",
            patterns,
            analysis.complexity,
            Self::format_percent(analysis.consistency.overall)
        )
    }

    /// Format a full pipeline report.
    pub fn format_report(report: &KnowledgeReport) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Screens: {}", report.screens.len());
        for (screen, analysis) in report.screens.iter().zip(&report.screen_patterns) {
            let _ = writeln!(
                out,
                "  {} ({}, {:?}): {}",
                screen.name,
                screen.device_type,
                screen.layout_type,
                Self::format_patterns(analysis)
            );
        }

        if report.roles.is_empty() {
            let _ = writeln!(out, "Roles: none detected");
        } else {
            let _ = writeln!(
                out,
                "Roles: {}",
                report
                    .roles
                    .iter()
                    .map(|r| format!("{} ({})", r.name, Self::format_percent(r.confidence)))
                    .join(", ")
            );
        }

        out.push_str(&Self::format_result(&report.flows));
        out
    }

    fn format_percent(value: f64) -> String {
        format!("{:.0}%", value * 100.0)
    }

    fn format_duration(seconds: u32) -> String {
        if seconds >= 60 {
            format!("{}m {}s", seconds / 60, seconds % 60)
        } else {
            format!("{}s", seconds)
        }
    }
}
