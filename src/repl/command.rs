//! Reserved words understood by the interactive loop.

/// What a line of input asks the session to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Blank input.
    Empty,
    Exit,
    Help,
    Clear,
    Status,
    /// `provider <name>`; `None` when the name is missing.
    Provider(Option<String>),
    /// Anything that is not a reserved word.
    Chat(String),
}

impl Command {
    /// Parse one line of user input.
    ///
    /// Input is trimmed and reserved words are matched case-insensitively.
    /// `provider` is matched as a prefix followed by whitespace, so a chat
    /// message such as `providers of cloud GPUs?` stays a chat message.
    pub fn parse(line: &str) -> Self {
        let input = line.trim();
        if input.is_empty() {
            return Command::Empty;
        }

        let lower = input.to_lowercase();
        match lower.as_str() {
            "exit" | "quit" => return Command::Exit,
            "help" => return Command::Help,
            "clear" => return Command::Clear,
            "status" => return Command::Status,
            "provider" => return Command::Provider(None),
            _ => {}
        }

        let mut words = input.splitn(2, char::is_whitespace);
        if let (Some(head), Some(rest)) = (words.next(), words.next()) {
            if head.eq_ignore_ascii_case("provider") {
                let name = rest.trim();
                return Command::Provider((!name.is_empty()).then(|| name.to_string()));
            }
        }

        Command::Chat(input.to_string())
    }
}

/// Lines printed by `help`.
pub const HELP_LINES: &[&str] = &[
    "Available commands:",
    "- exit: Quit the program",
    "- help: Show this help message",
    "- clear: Clear the screen",
    "- status: Show the current and available providers",
    "- provider <name>: Switch provider (openai, gemini)",
    "- Just type your message to chat with AI",
];
