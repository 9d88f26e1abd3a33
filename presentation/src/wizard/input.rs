//! Line-input parsing for the wizard
//!
//! The wizard reads free-form lines from the terminal; this module turns
//! them into slash commands, option choices, and id lists so the REPL
//! loop stays readable.

/// Commands available at any wizard prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlashCommand {
    Back,
    Skip,
    Restart,
    Quit,
    Help,
}

impl SlashCommand {
    /// Parse a trimmed input line into a command, if it is one.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim() {
            "/back" | "/b" => Some(Self::Back),
            "/skip" | "/s" => Some(Self::Skip),
            "/restart" => Some(Self::Restart),
            "/quit" | "/exit" | "/q" => Some(Self::Quit),
            "/help" | "/h" | "/?" => Some(Self::Help),
            _ => None,
        }
    }
}

/// Resolve a choice against a list of options.
///
/// Accepts a 1-based number or the option text itself (case-insensitive);
/// returns the canonical option string.
pub fn parse_option_choice(input: &str, options: &[String]) -> Option<String> {
    let input = input.trim();
    if let Ok(number) = input.parse::<usize>() {
        return number
            .checked_sub(1)
            .and_then(|i| options.get(i))
            .cloned();
    }
    options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(input))
        .cloned()
}

/// Parse a list of numeric ids separated by commas and/or whitespace.
///
/// Returns `None` if any token fails to parse; an empty input yields an
/// empty list.
pub fn parse_id_list(input: &str) -> Option<Vec<u32>> {
    input
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| token.parse::<u32>().ok())
        .collect()
}

/// Whether the input is an affirmative answer to a yes/no prompt.
pub fn is_yes(input: &str) -> bool {
    let input = input.trim();
    input.eq_ignore_ascii_case("y") || input.eq_ignore_ascii_case("yes")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_commands_parse_with_aliases() {
        assert_eq!(SlashCommand::parse("/back"), Some(SlashCommand::Back));
        assert_eq!(SlashCommand::parse("/b"), Some(SlashCommand::Back));
        assert_eq!(SlashCommand::parse("/skip"), Some(SlashCommand::Skip));
        assert_eq!(SlashCommand::parse("/restart"), Some(SlashCommand::Restart));
        assert_eq!(SlashCommand::parse("/exit"), Some(SlashCommand::Quit));
        assert_eq!(SlashCommand::parse("/?"), Some(SlashCommand::Help));
        assert_eq!(SlashCommand::parse("hello"), None);
        assert_eq!(SlashCommand::parse("/unknown"), None);
    }

    #[test]
    fn option_choice_by_number() {
        let options = vec!["Myself".to_string(), "A parent".to_string()];
        assert_eq!(parse_option_choice("2", &options).as_deref(), Some("A parent"));
        assert_eq!(parse_option_choice("0", &options), None);
        assert_eq!(parse_option_choice("3", &options), None);
    }

    #[test]
    fn option_choice_by_name_is_case_insensitive() {
        let options = vec!["Myself".to_string(), "A parent".to_string()];
        assert_eq!(
            parse_option_choice("a PARENT", &options).as_deref(),
            Some("A parent")
        );
        assert_eq!(parse_option_choice("a sibling", &options), None);
    }

    #[test]
    fn id_lists_accept_commas_and_spaces() {
        assert_eq!(parse_id_list("1,3"), Some(vec![1, 3]));
        assert_eq!(parse_id_list("1, 3 5"), Some(vec![1, 3, 5]));
        assert_eq!(parse_id_list(""), Some(vec![]));
        assert_eq!(parse_id_list("1,x"), None);
    }

    #[test]
    fn yes_answers() {
        assert!(is_yes("y"));
        assert!(is_yes("YES"));
        assert!(!is_yes("n"));
        assert!(!is_yes(""));
    }
}
