use std::fmt;

/// Command words understood by the text front-end, all with distinct initials.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CommandWord {
    Quit,
    Mark,
    Step,
    New,
}

impl CommandWord {
    const ALL: [Self; 4] = [Self::Quit, Self::Mark, Self::Step, Self::New];

    pub const fn word(self) -> &'static str {
        match self {
            Self::Quit => "quit",
            Self::Mark => "mark",
            Self::Step => "step",
            Self::New => "new",
        }
    }

    /// Case-insensitive prefix match, `s`, `ST` and `step` all mean [`CommandWord::Step`].
    pub fn from_prefix(input: &str) -> Option<Self> {
        let input = input.to_lowercase();
        Self::ALL
            .into_iter()
            .find(|command| command.word().starts_with(&input))
    }
}

impl fmt::Display for CommandWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}

/// A decoded line of user input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    New {
        rows: i64,
        columns: i64,
        mines: Option<i64>,
    },
    Step {
        row: i64,
        column: i64,
    },
    Mark {
        row: i64,
        column: i64,
    },
    Quit,
    /// Input that could not be decoded, with feedback for the user.
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();

        let Some(first) = words.next() else {
            return Self::Unknown("Please tell me what to do".to_string());
        };
        let Some(command_word) = CommandWord::from_prefix(first) else {
            return Self::Unknown(format!("Unknown command: {first}"));
        };
        if command_word == CommandWord::Quit {
            return Self::Quit;
        }

        let mut numbers = words.map_while(|word| word.parse::<i64>().ok());
        let (Some(a), Some(b)) = (numbers.next(), numbers.next()) else {
            return Self::Unknown(format!("{command_word} needs two integer arguments"));
        };

        match command_word {
            CommandWord::Quit => Self::Quit,
            CommandWord::Mark => Self::Mark {
                row: a,
                column: b,
            },
            CommandWord::Step => Self::Step {
                row: a,
                column: b,
            },
            CommandWord::New => Self::New {
                rows: a,
                columns: b,
                mines: numbers.next(),
            },
        }
    }
}
