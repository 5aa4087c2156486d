//! Interactive commands.

/// An action requested by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Reveal the next page.
    More,
    /// Filter by text.
    Search(String),
    /// Drop the filter.
    Clear,
    /// Switch language.
    Lang(String),
    /// Show usage.
    Help,
    /// End the session.
    Quit,
    /// Anything else.
    Unknown(String),
}

/// Usage text listing the accepted commands.
pub const HELP: &str = "\
Commands:
  more | m            show more projects
  search <text> | /t  filter by name or description
  clear | c           clear the search
  lang <tag>          switch language (e.g. en, pt-br)
  help | ?            show this help
  quit | q            exit";

impl Command {
    /// Parses one input line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        if let Some(query) = line.strip_prefix('/') {
            return Some(Self::Search(query.trim().to_string()));
        }

        let (head, rest) = line
            .split_once(char::is_whitespace)
            .map_or((line, ""), |(h, r)| (h, r.trim()));

        let command = match head.to_lowercase().as_str() {
            "more" | "m" => Self::More,
            "search" | "s" => Self::Search(rest.to_string()),
            "clear" | "c" => Self::Clear,
            "lang" | "l" if !rest.is_empty() => Self::Lang(rest.to_lowercase()),
            "help" | "?" => Self::Help,
            "quit" | "q" | "exit" => Self::Quit,
            _ => Self::Unknown(line.to_string()),
        };
        Some(command)
    }
}
