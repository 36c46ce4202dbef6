/// One line of user input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Raw search text, validated by the search box
    Search(String),
    Select(String),
    Back,
    Remove(String),
    Favorite(String),
    List,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
Commands:
  search <city>   add a city to the dashboard
  select <city>   open the forecast for a loaded city
  back            return to the city grid
  fav <city>      add or remove a favorite
  remove <city>   take a city off the dashboard
  list            redraw
  help            show this help
  quit            exit";

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word.to_ascii_lowercase().as_str() {
            "search" | "s" => Command::Search(rest.to_string()),
            "select" | "open" => Command::Select(rest.to_string()),
            "back" | "b" => Command::Back,
            "remove" | "rm" => Command::Remove(rest.to_string()),
            "fav" | "favorite" | "favourite" => Command::Favorite(rest.to_string()),
            "list" | "ls" | "" => Command::List,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => Command::Unknown(line.to_string()),
        }
    }
}
