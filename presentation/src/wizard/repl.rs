//! REPL (Read-Eval-Print Loop) for the questionnaire wizard

use super::input::{self, SlashCommand};
use crate::{ConsoleFormatter, ProgressReporter, SimpleProgress};
use askedith_application::{
    FetchResourcesUseCase, MailGateway, ResourceCatalog, SendOutreachInput, SendOutreachUseCase,
    WizardController, WizardControllerError, WizardStateStore,
};
use askedith_domain::delivery::DeliveryReport;
use askedith_domain::outreach::{self, OutreachEmail};
use askedith_domain::questionnaire::validation::is_valid_email;
use askedith_domain::questionnaire::{
    AnswerValue, ContactFieldKind, QuestionKind, QuestionSpec, Stage, WizardAction,
};
use askedith_domain::resource::{CatalogFilter, Resource};
use colored::Colorize;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Control flow after one stage interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

/// What one line read produced
enum Readline {
    Line(String),
    Cancelled,
    Eof,
}

/// How the selection prompt ended
enum SelectOutcome {
    Drafted,
    StageChanged,
    Quit,
}

/// How the preview loop ended
enum PreviewChoice {
    Send,
    Reselect,
    StageChanged,
    Quit,
}

fn read_line(rl: &mut DefaultEditor, prompt: &str) -> RlResult<Readline> {
    match rl.readline(prompt) {
        Ok(line) => Ok(Readline::Line(line.trim().to_string())),
        Err(ReadlineError::Interrupted) => {
            println!("^C");
            Ok(Readline::Cancelled)
        }
        Err(ReadlineError::Eof) => Ok(Readline::Eof),
        Err(err) => Err(err),
    }
}

/// Interactive questionnaire wizard
///
/// Steps the caregiver through the intake questions, shows the matched
/// resources, previews the composed outreach drafts, and hands the
/// approved batch to the send use case.
pub struct WizardRepl<S, C, G>
where
    S: WizardStateStore + 'static,
    C: ResourceCatalog + 'static,
    G: MailGateway + 'static,
{
    controller: WizardController<S>,
    catalog: FetchResourcesUseCase<C>,
    outreach: SendOutreachUseCase<G>,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl<S, C, G> WizardRepl<S, C, G>
where
    S: WizardStateStore + 'static,
    C: ResourceCatalog + 'static,
    G: MailGateway + 'static,
{
    pub fn new(
        controller: WizardController<S>,
        catalog: FetchResourcesUseCase<C>,
        outreach: SendOutreachUseCase<G>,
    ) -> Self {
        Self {
            controller,
            catalog,
            outreach,
            show_progress: true,
            history_file: None,
        }
    }

    /// Set whether to show progress bars during sends
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// Override the readline history location
    pub fn with_history_file(mut self, path: Option<PathBuf>) -> Self {
        self.history_file = path;
        self
    }

    /// Run the interactive wizard
    pub async fn run(&mut self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        let history_path = self
            .history_file
            .clone()
            .or_else(|| dirs::data_dir().map(|p| p.join("askedith").join("history.txt")));

        if let Some(ref path) = history_path {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        loop {
            let flow = match self.controller.stage() {
                Stage::Question(_) => self.question_stage(&mut rl)?,
                Stage::Results => self.results_stage(&mut rl).await?,
            };
            if flow == Flow::Quit {
                break;
            }
        }

        if let Some(ref path) = history_path {
            let _ = rl.save_history(path);
        }

        self.print_goodbye();
        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│       AskEdith - Care Resource Wizard       │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        println!("Answer a few questions about your family's situation and");
        println!("AskEdith will find local care resources and email them for you.");
        if self.controller.has_progress() {
            println!();
            println!("{}", "Resuming your saved session.".yellow());
        }
        println!();
        println!("Commands:");
        println!("  /back     - Go back one question");
        println!("  /skip     - Skip an optional question");
        println!("  /restart  - Clear answers and start over");
        println!("  /help     - Show this help");
        println!("  /quit     - Exit (progress is saved)");
    }

    fn print_goodbye(&self) {
        if self.controller.has_progress() {
            println!("Bye! Run 'askedith --resume' to pick up where you left off.");
        } else {
            println!("Bye!");
        }
    }

    fn print_help(&self) {
        println!();
        println!("Commands:");
        println!("  /back, /b       - Go back one question");
        println!("  /skip, /s       - Skip an optional question");
        println!("  /restart        - Clear answers and start over");
        println!("  /help, /h, /?   - Show this help");
        println!("  /quit, /exit, /q - Exit (progress is saved)");
        println!();
    }

    /// Apply one action, printing any validation error.
    ///
    /// Returns true when the action took effect. A failed state save is
    /// reported as a warning; the in-memory change stands.
    fn apply(&mut self, action: WizardAction) -> bool {
        match self.controller.apply(action) {
            Ok(_) => true,
            Err(WizardControllerError::Wizard(e)) => {
                println!("  {}", e.to_string().red());
                false
            }
            Err(WizardControllerError::Store(e)) => {
                eprintln!(
                    "{}",
                    format!("Warning: could not save progress: {}", e).yellow()
                );
                true
            }
        }
    }

    /// Run a slash command. The caller re-renders from the current stage.
    fn run_command(&mut self, command: SlashCommand) -> Flow {
        match command {
            SlashCommand::Back => {
                self.apply(WizardAction::GoBack);
                Flow::Continue
            }
            SlashCommand::Skip => {
                self.apply(WizardAction::SkipQuestion);
                Flow::Continue
            }
            SlashCommand::Restart => {
                if self.apply(WizardAction::Reset) {
                    println!("{}", "Answers cleared; starting over.".yellow());
                }
                Flow::Continue
            }
            SlashCommand::Help => {
                self.print_help();
                Flow::Continue
            }
            SlashCommand::Quit => Flow::Quit,
        }
    }

    fn question_stage(&mut self, rl: &mut DefaultEditor) -> RlResult<Flow> {
        let Some(spec) = self.controller.current_question().cloned() else {
            return Ok(Flow::Continue);
        };
        let total = self.controller.questionnaire().len();
        print!("{}", ConsoleFormatter::format_question(&spec, total));

        match spec.kind {
            QuestionKind::SingleSelect => self.prompt_single_select(rl, &spec),
            QuestionKind::MultiSelect => self.prompt_multi_select(rl, &spec),
            QuestionKind::ContactFields => self.prompt_contact_fields(rl, &spec),
            _ => self.prompt_text(rl, &spec),
        }
    }

    fn prompt_text(&mut self, rl: &mut DefaultEditor, _spec: &QuestionSpec) -> RlResult<Flow> {
        loop {
            let line = match read_line(rl, "> ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => continue,
                Readline::Eof => return Ok(Flow::Quit),
            };
            if let Some(command) = SlashCommand::parse(&line) {
                return Ok(self.run_command(command));
            }
            if line.is_empty() {
                continue;
            }
            let _ = rl.add_history_entry(&line);
            if self.apply(WizardAction::SubmitAnswer(AnswerValue::text(line))) {
                return Ok(Flow::Continue);
            }
        }
    }

    fn prompt_single_select(
        &mut self,
        rl: &mut DefaultEditor,
        spec: &QuestionSpec,
    ) -> RlResult<Flow> {
        print!("{}", ConsoleFormatter::format_options(spec, &[]));
        loop {
            let line = match read_line(rl, "> ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => continue,
                Readline::Eof => return Ok(Flow::Quit),
            };
            if let Some(command) = SlashCommand::parse(&line) {
                return Ok(self.run_command(command));
            }
            if line.is_empty() {
                continue;
            }
            let Some(choice) = input::parse_option_choice(&line, &spec.options) else {
                println!("  {}", "Pick an option by number or name.".red());
                continue;
            };
            let _ = rl.add_history_entry(&line);
            if self.apply(WizardAction::SubmitAnswer(AnswerValue::text(choice))) {
                return Ok(Flow::Continue);
            }
        }
    }

    fn prompt_multi_select(
        &mut self,
        rl: &mut DefaultEditor,
        spec: &QuestionSpec,
    ) -> RlResult<Flow> {
        // Start from any previously stored selection so going back edits
        // instead of starting from scratch.
        let mut selected = self
            .controller
            .state()
            .answers
            .selections(&spec.key)
            .unwrap_or_default();

        loop {
            print!("{}", ConsoleFormatter::format_options(spec, &selected));
            let line = match read_line(rl, "> ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => continue,
                Readline::Eof => return Ok(Flow::Quit),
            };
            if let Some(command) = SlashCommand::parse(&line) {
                return Ok(self.run_command(command));
            }
            if line.is_empty() {
                let answer = AnswerValue::Selections(selected.clone());
                if self.apply(WizardAction::SubmitAnswer(answer)) {
                    return Ok(Flow::Continue);
                }
                continue;
            }
            let Some(choice) = input::parse_option_choice(&line, &spec.options) else {
                println!("  {}", "Toggle an option by number or name.".red());
                continue;
            };
            let _ = rl.add_history_entry(&line);
            selected = spec.toggle_option(&selected, &choice);
        }
    }

    fn prompt_contact_fields(
        &mut self,
        rl: &mut DefaultEditor,
        spec: &QuestionSpec,
    ) -> RlResult<Flow> {
        loop {
            let mut fields = BTreeMap::new();
            for field in &spec.contact_fields {
                loop {
                    let line = match read_line(rl, &format!("{}: ", field.label))? {
                        Readline::Line(line) => line,
                        Readline::Cancelled => continue,
                        Readline::Eof => return Ok(Flow::Quit),
                    };
                    if let Some(command) = SlashCommand::parse(&line) {
                        return Ok(self.run_command(command));
                    }
                    if line.is_empty() {
                        println!("  {}", format!("{} is required.", field.label).red());
                        continue;
                    }
                    if field.kind == ContactFieldKind::Email && !is_valid_email(&line) {
                        println!("  {}", "That doesn't look like an email address.".red());
                        continue;
                    }
                    fields.insert(field.key.clone(), line);
                    break;
                }
            }
            if self.apply(WizardAction::SubmitAnswer(AnswerValue::Contact(fields))) {
                return Ok(Flow::Continue);
            }
        }
    }

    async fn results_stage(&mut self, rl: &mut DefaultEditor) -> RlResult<Flow> {
        if self.controller.state().resources.is_empty() {
            println!();
            println!("{}", "Matching resources...".dimmed());
            let resources = match self.catalog.execute(&CatalogFilter::all()).await {
                Ok(resources) => resources,
                Err(e) => {
                    eprintln!("{}", format!("Could not load resources: {}", e).red());
                    return Ok(Flow::Quit);
                }
            };
            if resources.is_empty() {
                println!("{}", "No resources are available right now.".yellow());
                return Ok(Flow::Quit);
            }
            self.apply(WizardAction::SetResources(resources));
        }

        println!();
        println!("{}", "Here's who AskEdith found for your family:".bold());
        print!(
            "{}",
            ConsoleFormatter::format_resource_list(&self.controller.state().resources)
        );
        println!();

        let mut need_selection = self.controller.state().emails_to_send.is_empty();
        loop {
            if need_selection {
                match self.select_and_compose(rl)? {
                    SelectOutcome::Drafted => {}
                    SelectOutcome::StageChanged => return Ok(Flow::Continue),
                    SelectOutcome::Quit => return Ok(Flow::Quit),
                }
                need_selection = false;
            }
            match self.preview_emails(rl)? {
                PreviewChoice::Send => return self.send_stage(rl).await,
                PreviewChoice::Reselect => need_selection = true,
                PreviewChoice::StageChanged => return Ok(Flow::Continue),
                PreviewChoice::Quit => return Ok(Flow::Quit),
            }
        }
    }

    fn select_and_compose(&mut self, rl: &mut DefaultEditor) -> RlResult<SelectOutcome> {
        loop {
            let line = match read_line(rl, "Contact which resources? (ids, e.g. 1,3) > ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => continue,
                Readline::Eof => return Ok(SelectOutcome::Quit),
            };
            if let Some(command) = SlashCommand::parse(&line) {
                match self.run_command(command) {
                    Flow::Quit => return Ok(SelectOutcome::Quit),
                    Flow::Continue => {
                        if self.controller.stage() != Stage::Results {
                            return Ok(SelectOutcome::StageChanged);
                        }
                        continue;
                    }
                }
            }
            let Some(ids) = input::parse_id_list(&line) else {
                println!("  {}", "List resource ids separated by commas.".red());
                continue;
            };
            if ids.is_empty() {
                println!("  {}", "Pick at least one resource.".red());
                continue;
            }
            let _ = rl.add_history_entry(&line);
            if !self.apply(WizardAction::SelectResources(ids)) {
                continue;
            }

            let drafts = {
                let state = self.controller.state();
                let selected: Vec<Resource> =
                    state.selected_resources().into_iter().cloned().collect();
                outreach::compose_batch(&selected, &state.answers)
            };
            let noun = if drafts.len() == 1 { "email" } else { "emails" };
            println!();
            println!("Drafted {} {} for your review.", drafts.len(), noun);
            self.apply(WizardAction::SetEmails(drafts));
            return Ok(SelectOutcome::Drafted);
        }
    }

    fn preview_emails(&mut self, rl: &mut DefaultEditor) -> RlResult<PreviewChoice> {
        loop {
            let total = self.controller.state().emails_to_send.len();
            let index = self.controller.state().current_email_index;
            let preview = match self.controller.state().current_email() {
                Some(email) => ConsoleFormatter::format_email_preview(email, index, total),
                None => return Ok(PreviewChoice::Reselect),
            };
            print!("{}", preview);
            println!();

            let line = match read_line(rl, "[n]ext / [p]rev / [s]end all / [r]eselect > ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => continue,
                Readline::Eof => return Ok(PreviewChoice::Quit),
            };
            if let Some(command) = SlashCommand::parse(&line) {
                match self.run_command(command) {
                    Flow::Quit => return Ok(PreviewChoice::Quit),
                    Flow::Continue => {
                        if self.controller.stage() != Stage::Results {
                            return Ok(PreviewChoice::StageChanged);
                        }
                        continue;
                    }
                }
            }
            match line.to_lowercase().as_str() {
                "n" | "next" => {
                    self.apply(WizardAction::AdvanceEmail);
                }
                "p" | "prev" | "previous" => {
                    self.apply(WizardAction::RewindEmail);
                }
                "s" | "send" => return Ok(PreviewChoice::Send),
                "r" | "reselect" => return Ok(PreviewChoice::Reselect),
                _ => println!(
                    "  {}",
                    "n = next, p = previous, s = send all, r = reselect".dimmed()
                ),
            }
        }
    }

    async fn send_stage(&mut self, rl: &mut DefaultEditor) -> RlResult<Flow> {
        let drafts = self.controller.state().emails_to_send.clone();
        let mut report = self.send_drafts(&drafts).await;
        print!("{}", ConsoleFormatter::format_report(&report));

        while report.failed > 0 {
            let line = match read_line(rl, "Retry the failed sends? [y/N] > ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => break,
                Readline::Eof => return Ok(Flow::Quit),
            };
            if !input::is_yes(&line) {
                break;
            }
            let failed: Vec<String> = report.failures().map(|o| o.to.clone()).collect();
            let retry: Vec<OutreachEmail> = drafts
                .iter()
                .filter(|d| failed.iter().any(|to| to == &d.to))
                .cloned()
                .collect();
            report = self.send_drafts(&retry).await;
            print!("{}", ConsoleFormatter::format_report(&report));
        }

        loop {
            let line = match read_line(rl, "Start a new session? [y/N] > ")? {
                Readline::Line(line) => line,
                Readline::Cancelled => continue,
                Readline::Eof => return Ok(Flow::Quit),
            };
            if input::is_yes(&line) {
                self.apply(WizardAction::Reset);
                return Ok(Flow::Continue);
            }
            if report.failed == 0 {
                // A fully delivered batch has nothing left to resume.
                self.apply(WizardAction::Reset);
            }
            return Ok(Flow::Quit);
        }
    }

    async fn send_drafts(&self, drafts: &[OutreachEmail]) -> DeliveryReport {
        let reply_to = self
            .controller
            .state()
            .answers
            .contact_field("contact", "email");
        let input = SendOutreachInput::from_drafts(drafts, reply_to.as_deref());

        println!();
        if self.show_progress {
            let progress = ProgressReporter::new();
            self.outreach.execute_with_progress(input, &progress).await
        } else {
            self.outreach
                .execute_with_progress(input, &SimpleProgress)
                .await
        }
    }
}
