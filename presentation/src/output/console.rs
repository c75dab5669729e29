//! Console output formatter for slates and vote replays

use crate::output::formatter::OutputFormatter;
use crate::simulation::{SimulationReport, SlateView, StepOutcome};
use colored::{ColoredString, Colorize};
use groupgo_application::{ConsensusError, ProviderError};
use groupgo_domain::{
    ConfigIssue, DomainError, ItineraryOption, OptionId, OptionLetter, OptionStatus, Resolution,
    Severity,
};

/// Formats results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the slate of a new round
    pub fn format_slate(slate: &SlateView) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Trip Options"));
        output.push('\n');
        output.push_str(&format!(
            "{} {}  {} {}\n",
            "Group:".cyan().bold(),
            slate.consensus.group_id,
            "Source:".cyan().bold(),
            slate.source
        ));
        if let Some(reason) = &slate.fallback_reason {
            output.push_str(&format!(
                "{} {}\n",
                "Recommendations skipped:".yellow(),
                reason
            ));
        }
        if slate.dropped_inventory > 0 {
            output.push_str(&format!(
                "{}\n",
                format!(
                    "Ignored {} inventory records without a destination or valid price",
                    slate.dropped_inventory
                )
                .dimmed()
            ));
        }

        for option in &slate.options {
            output.push('\n');
            output.push_str(&Self::option_block(option));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a finished simulation
    pub fn format_report(report: &SimulationReport) -> String {
        let mut output = Self::format_slate(&report.slate);

        output.push_str(&Self::section_header("Votes"));
        for (i, record) in report.steps.iter().enumerate() {
            let line = match &record.outcome {
                StepOutcome::Voted { letter, outcome } => {
                    let mut line = format!("[{}] {}", letter, record.step);
                    if !outcome.changed {
                        line.push_str(&format!(" {}", "(unchanged)".dimmed()));
                    }
                    format!(
                        "{} -> {}",
                        line,
                        Self::resolution(report, &outcome.resolution)
                    )
                }
                StepOutcome::Resolved { letter, resolution } => format!(
                    "[{}] {} -> {}",
                    letter,
                    record.step,
                    Self::resolution(report, resolution)
                ),
                StepOutcome::Failed { error, .. } => {
                    format!("{} {}", record.step, format!("failed: {}", error).red())
                }
            };
            output.push_str(&format!("{:>3}. {}\n", i + 1, line));
        }

        output.push_str(&Self::section_header("Final State"));
        for option in &report.options {
            output.push_str(&format!(
                "[{}] {:<40} {}",
                option.letter,
                option.title,
                Self::status(option.status)
            ));
            if let Some(tally) = option.final_tally {
                output.push_str(&format!("  {}", tally.to_string().dimmed()));
            }
            output.push('\n');
        }

        output.push('\n');
        match &report.winner {
            Some(winner) => output.push_str(&format!(
                "{} [{}] {} for {} per person\n",
                "Winner:".green().bold(),
                winner.letter,
                winner.title,
                Self::money(winner.cost_per_person)
            )),
            None => output.push_str(&format!(
                "{} {} of {} members voted on the open option\n",
                "No winner yet:".yellow().bold(),
                report.status.votes_cast,
                report.status.total_members
            )),
        }

        output.push_str(&Self::footer());
        output
    }

    /// User-facing error with a hint on what to change
    pub fn format_error(error: &ConsensusError) -> String {
        let mut output = format!("{} {}\n", "Error:".red().bold(), error);
        if let Some(hint) = Self::hint(error) {
            output.push_str(&format!("{} {}\n", "Hint:".yellow(), hint));
        }
        output
    }

    /// Configuration warnings and errors, one per line
    pub fn format_issues(issues: &[ConfigIssue]) -> String {
        issues
            .iter()
            .map(|issue| match issue.severity {
                Severity::Error => format!("{} {}", "config error:".red().bold(), issue.message),
                Severity::Warning => format!("{} {}", "config warning:".yellow(), issue.message),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn hint(error: &ConsensusError) -> Option<&'static str> {
        match error {
            ConsensusError::Domain(DomainError::InsufficientPreferences { .. }) => {
                Some("Ask the remaining members to finish their trip preferences.")
            }
            ConsensusError::Domain(DomainError::NoCandidatesGenerated { .. }) => Some(
                "Add flights and hotels for the requested destinations, or use generation.match_strategy = \"fuzzy\".",
            ),
            ConsensusError::Domain(DomainError::ExhaustedOptions { .. }) => {
                Some("Every pairing was turned down. Update preferences or inventory and start a new round.")
            }
            ConsensusError::Domain(DomainError::NotAMember(_)) => {
                Some("Only members on the group roster can vote.")
            }
            ConsensusError::Provider(ProviderError::GroupNotFound(_)) => {
                Some("Check the group_id in the scenario file.")
            }
            _ => None,
        }
    }

    fn option_block(option: &ItineraryOption) -> String {
        let mut block = format!(
            "{} {}  {}\n",
            format!("[{}]", option.letter).bold(),
            option.title.bold(),
            Self::status(option.status)
        );

        let nights = if option.nights.estimated {
            format!("{} nights (estimated)", option.nights.nights)
        } else {
            format!("{} nights", option.nights.nights)
        };
        let mut costs = format!(
            "{} total, {} per person, {}",
            Self::money(option.total_cost),
            Self::money(option.cost_per_person),
            nights
        );
        if option.activity_cost > 0.0 {
            costs.push_str(&format!(
                ", activities {}",
                Self::money(option.activity_cost)
            ));
        }
        block.push_str(&format!("    {}\n", costs));

        match option.within_budget {
            Some(true) => block.push_str(&format!("    {}\n", "fits the median budget".green())),
            Some(false) => block.push_str(&format!("    {}\n", "above the median budget".yellow())),
            None => {}
        }

        block.push_str(&Self::indent(&option.description, "    "));
        block.push('\n');
        block
    }

    fn resolution(report: &SimulationReport, resolution: &Resolution) -> String {
        let letter = |id: OptionId| {
            report
                .letter_of(id)
                .map(|l: OptionLetter| l.to_string())
                .unwrap_or_else(|| "?".to_string())
        };
        match resolution {
            Resolution::Incomplete {
                votes_cast,
                total_members,
            } => format!("{} of {} voted", votes_cast, total_members),
            Resolution::Accepted { option } => {
                format!("{} accepted", letter(*option)).green().to_string()
            }
            Resolution::Rotated {
                rejected,
                next,
                synthesized,
            } => {
                let next = if *synthesized {
                    format!("{} synthesized and up next", letter(*next))
                } else {
                    format!("{} up next", letter(*next))
                };
                format!("{} rejected, {}", letter(*rejected), next)
                    .yellow()
                    .to_string()
            }
            Resolution::Exhausted { rejected } => format!(
                "{} rejected, no options left",
                letter(*rejected)
            )
            .red()
            .to_string(),
            Resolution::AlreadyResolved { option, status } => {
                format!("{} was already {}", letter(*option), status)
            }
        }
    }

    fn status(status: OptionStatus) -> ColoredString {
        let label = status.to_string().to_uppercase();
        match status {
            OptionStatus::Pending => label.dimmed(),
            OptionStatus::Active => label.cyan().bold(),
            OptionStatus::Accepted => label.green().bold(),
            OptionStatus::Rejected => label.red(),
        }
    }

    fn money(amount: f64) -> String {
        format!("${:.2}", amount)
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_slate(&self, slate: &SlateView) -> String {
        Self::format_slate(slate)
    }

    fn format_report(&self, report: &SimulationReport) -> String {
        Self::format_report(report)
    }

    fn format_error(&self, error: &ConsensusError) -> String {
        Self::format_error(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use groupgo_domain::ConfigIssueCode;

    #[test]
    fn test_error_hint_for_missing_preferences() {
        colored::control::set_override(false);
        let error = ConsensusError::from(DomainError::InsufficientPreferences {
            found: 1,
            required: 2,
        });

        let text = ConsoleFormatter::format_error(&error);
        assert!(text.starts_with("Error: Need at least 2 completed preferences"));
        assert!(text.contains("Hint: Ask the remaining members"));
    }

    #[test]
    fn test_error_without_hint() {
        colored::control::set_override(false);
        let error = ConsensusError::from(DomainError::NoActiveConsensus);

        let text = ConsoleFormatter::format_error(&error);
        assert!(!text.contains("Hint:"));
    }

    #[test]
    fn test_format_issues() {
        colored::control::set_override(false);
        let issues = vec![ConfigIssue {
            severity: Severity::Warning,
            code: ConfigIssueCode::LongStay,
            message: "generation.default_nights = 90 prices a very long stay".to_string(),
        }];

        assert_eq!(
            ConsoleFormatter::format_issues(&issues),
            "config warning: generation.default_nights = 90 prices a very long stay"
        );
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
