//! Console output formatting for wizard prompts and command results

use askedith_application::ConnectionStatus;
use askedith_domain::delivery::{BatchStatus, DeliveryReport};
use askedith_domain::outreach::OutreachEmail;
use askedith_domain::questionnaire::{QuestionKind, QuestionSpec, SELECT_ALL};
use askedith_domain::resource::{Category, Resource};
use colored::Colorize;
use serde::Serialize;

/// Formats wizard prompts and command results for terminal display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a question header with its prompt and input hints.
    pub fn format_question(spec: &QuestionSpec, total: usize) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "\n{}\n",
            format!("Question {} of {}", spec.position, total).dimmed()
        ));
        output.push_str(&format!("{}\n", spec.prompt.bold()));

        if !spec.required {
            output.push_str(&format!(
                "{}\n",
                "(optional - /skip to leave it blank)".dimmed()
            ));
        }
        if spec.kind == QuestionKind::MultiSelect {
            output.push_str(&format!(
                "{}\n",
                "Toggle by number or name; press Enter when you're done.".dimmed()
            ));
        }

        output
    }

    /// Format the numbered option list for a select question.
    ///
    /// Multi-select options carry a checkbox; the Select All entry shows
    /// checked once every concrete option is in the selection.
    pub fn format_options(spec: &QuestionSpec, selected: &[String]) -> String {
        let mut output = String::new();

        let all_selected = !selected.is_empty()
            && spec
                .concrete_options()
                .all(|option| selected.iter().any(|s| s == option));

        for (i, option) in spec.options.iter().enumerate() {
            let marker = if spec.kind == QuestionKind::MultiSelect {
                let checked = if option == SELECT_ALL {
                    all_selected
                } else {
                    selected.iter().any(|s| s == option)
                };
                if checked { "[x] " } else { "[ ] " }
            } else {
                ""
            };
            output.push_str(&format!("  {}. {}{}\n", i + 1, marker, option));
        }

        output
    }

    /// Format matched resources grouped by category, in catalog order.
    pub fn format_resource_list(resources: &[Resource]) -> String {
        if resources.is_empty() {
            return format!("{}\n", "No resources matched.".yellow());
        }

        let mut output = String::new();

        let mut categories: Vec<&Category> = Vec::new();
        for resource in resources {
            if !categories.contains(&&resource.category) {
                categories.push(&resource.category);
            }
        }

        for category in categories {
            output.push_str(&Self::section_header(category.as_str()));
            for resource in resources.iter().filter(|r| &r.category == category) {
                output.push_str(&format!(
                    "  {}\n",
                    format!("[{}] {}", resource.id, resource.display_name()).bold()
                ));
                if let Some(address) = Self::address_line(resource) {
                    output.push_str(&format!("      {}\n", address));
                }
                if let Some(phone) = &resource.phone {
                    output.push_str(&format!("      {}\n", phone));
                }
                output.push_str(&format!("      {}\n", resource.email.dimmed()));
                if let Some(description) = &resource.description {
                    output.push_str(&format!("      {}\n", description.dimmed()));
                }
            }
        }

        output
    }

    /// Format one outreach draft for review before sending.
    pub fn format_email_preview(email: &OutreachEmail, index: usize, total: usize) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header(&format!(
            "Email {} of {} - {}",
            index + 1,
            total,
            email.resource_name
        )));
        output.push_str(&format!("{} {}\n", "To:".cyan().bold(), email.to));
        output.push_str(&format!("{} {}\n\n", "Subject:".cyan().bold(), email.subject));
        output.push_str(&email.body);
        output.push('\n');

        output
    }

    /// Format a delivery report: a colored headline plus one line per message.
    pub fn format_report(report: &DeliveryReport) -> String {
        let mut output = String::new();

        let headline = format!("{} of {} sent", report.sent, report.total);
        let headline = match report.status() {
            BatchStatus::AllSent => headline.green().bold(),
            BatchStatus::PartialFailure => headline.yellow().bold(),
            BatchStatus::AllFailed => headline.red().bold(),
        };
        output.push_str(&format!("\n{}\n", headline));

        for outcome in &report.results {
            if outcome.success {
                let transport = outcome.transport.map(|t| t.as_str()).unwrap_or("unknown");
                output.push_str(&format!(
                    "  {} {} via {}\n",
                    "v".green(),
                    outcome.to,
                    transport
                ));
            } else {
                output.push_str(&format!(
                    "  {} {}: {}\n",
                    "x".red(),
                    outcome.to,
                    outcome.error.as_deref().unwrap_or("unknown error")
                ));
            }
        }

        output
    }

    /// Format the mailbox connection status.
    pub fn format_status(status: &ConnectionStatus) -> String {
        match (&status.address, status.connected) {
            (Some(address), true) => {
                format!("{} {}\n", "Connected:".green().bold(), address)
            }
            (Some(address), false) => format!(
                "{} stored credential for {} no longer grants access\n{}\n",
                "Not connected:".yellow().bold(),
                address,
                format!("Run 'askedith connect {}' to reconnect.", address).dimmed()
            ),
            (None, _) => format!(
                "{} no mailbox has been connected\n{}\n",
                "Not connected:".yellow().bold(),
                "Run 'askedith connect <email>' to connect one.".dimmed()
            ),
        }
    }

    /// Format any serializable value as pretty JSON.
    pub fn format_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn address_line(resource: &Resource) -> Option<String> {
        let mut parts: Vec<&str> = Vec::new();
        if let Some(street) = &resource.street {
            parts.push(street);
        }
        if let Some(city) = &resource.city {
            parts.push(city);
        }
        if let Some(state) = &resource.state {
            parts.push(state);
        }
        if let Some(postal_code) = &resource.postal_code {
            parts.push(postal_code);
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}
