//! Console command parsing: one line of input becomes one [`Command`].

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Re-render the current view.
    Show,
    Page(u32),
    Next,
    Prev,
    /// Toggle the Nth row on the current page (1-based).
    Select(usize),
    SelectAll,
    Submit,
    Upload(Vec<String>),
    Detail(String),
    Connect,
    Disconnect,
    Help,
    Quit,
}

/// Parses one input line; `None` for blank lines, `Err` with a usage hint
/// for anything unrecognized.
pub fn parse(line: &str) -> Option<Result<Command, String>> {
    let mut words = line.split_whitespace();
    let head = words.next()?;
    let rest: Vec<&str> = words.collect();

    let command = match head {
        "show" | "ls" => Ok(Command::Show),
        "page" | "p" => match rest.first().and_then(|raw| raw.parse::<u32>().ok()) {
            Some(number) => Ok(Command::Page(number)),
            None => Err("usage: page <number>".to_string()),
        },
        "next" | "n" => Ok(Command::Next),
        "prev" | "b" => Ok(Command::Prev),
        "select" | "s" => match rest.first().and_then(|raw| raw.parse::<usize>().ok()) {
            Some(index) if index >= 1 => Ok(Command::Select(index)),
            _ => Err("usage: select <row number>".to_string()),
        },
        "all" | "a" => Ok(Command::SelectAll),
        "submit" | "process" => Ok(Command::Submit),
        "upload" | "u" => {
            if rest.is_empty() {
                Err("usage: upload <path> [..]".to_string())
            } else {
                Ok(Command::Upload(
                    rest.iter().map(ToString::to_string).collect(),
                ))
            }
        }
        "detail" | "d" => match rest.first() {
            Some(name) => Ok(Command::Detail(name.to_string())),
            None => Err("usage: detail <file name>".to_string()),
        },
        "connect" => Ok(Command::Connect),
        "disconnect" => Ok(Command::Disconnect),
        "help" | "h" | "?" => Ok(Command::Help),
        "quit" | "q" | "exit" => Ok(Command::Quit),
        other => Err(format!("unknown command '{other}', try 'help'")),
    };
    Some(command)
}

pub const HELP_TEXT: &str = "\
commands:
  show                re-render the file list
  page <n>            jump to page n
  next / prev         page navigation
  select <row>        toggle selection of a row on this page
  all                 toggle select-all for this page
  submit              send the selection for processing
  upload <path> [..]  upload local files
  detail <name>       show the stored result for a file
  connect             reopen the progress channel
  disconnect          close the progress channel
  quit                exit";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_parse_to_nothing() {
        assert_eq!(parse(""), None);
        assert_eq!(parse("   "), None);
    }

    #[test]
    fn navigation_and_aliases() {
        assert_eq!(parse("page 3"), Some(Ok(Command::Page(3))));
        assert_eq!(parse("p 3"), Some(Ok(Command::Page(3))));
        assert_eq!(parse("n"), Some(Ok(Command::Next)));
        assert_eq!(parse("prev"), Some(Ok(Command::Prev)));
    }

    #[test]
    fn selection_rows_are_one_based() {
        assert_eq!(parse("select 1"), Some(Ok(Command::Select(1))));
        assert!(matches!(parse("select 0"), Some(Err(_))));
        assert!(matches!(parse("select x"), Some(Err(_))));
    }

    #[test]
    fn upload_needs_at_least_one_path() {
        assert!(matches!(parse("upload"), Some(Err(_))));
        assert_eq!(
            parse("upload a.txt b.txt"),
            Some(Ok(Command::Upload(vec![
                "a.txt".to_string(),
                "b.txt".to_string()
            ])))
        );
    }

    #[test]
    fn unknown_commands_get_a_hint() {
        let parsed = parse("frobnicate").unwrap();
        assert!(parsed.unwrap_err().contains("unknown command"));
    }
}
