//! Parsing of lines typed at the assistant prompt.
//!
//! Lines starting with `/` are commands; anything else is a chat message.

use finance_core::research::parse_tags;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text sent to the assistant.
    Say(String),
    Navigate(String),
    /// Zero-based quick prompt index.
    QuickPrompt(usize),
    ListPrompts,
    ClearChat,
    SetUserType(String),
    SetField { name: String, value: String },
    ShowForm,
    /// Applies `name=value` pairs to the form, then submits it.
    Submit(Vec<(String, String)>),
    /// Zero-based FAQ item, or the whole list when `None`.
    Faq(Option<usize>),
    Summary,
    Insight,
    Research(ResearchCommand),
    LogLevel(String),
    /// Shows or hides log records on stderr.
    LogConsole(bool),
    Help,
    Quit,
}

/// `/research` sub-commands. Text parts are separated by `|`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResearchCommand {
    List,
    Add {
        title: String,
        content: String,
        tags: Vec<String>,
    },
    /// Blank parts leave the field unchanged; a tags part replaces all tags.
    Edit {
        id: u32,
        title: String,
        content: String,
        tags: Option<Vec<String>>,
    },
    Find(String),
    Tag(String),
    Delete(u32),
    Samples,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '/{0}'; type /help for a list")]
    Unknown(String),

    #[error("/{command} needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },

    #[error("'{0}' is not a positive item number")]
    InvalidNumber(String),

    #[error("expected field=value, got '{0}'")]
    InvalidAssignment(String),

    #[error("unknown research action '{0}'; expected add, edit, find, tag, delete or samples")]
    UnknownResearchAction(String),
}

pub const HELP: &str = "\
Type a message to chat, or one of:
  /nav <home|chat|analytics|research|faq>
                                   switch page
  /prompts                         list quick prompts
  /prompt <n>                      send quick prompt n
  /clear                           clear the conversation
  /user <student|professional>     switch user mode
  /form                            show the financial data form
  /set <field> <value>             edit one form field
  /submit [field=value ...]        update the financial data
  /summary                         key metrics and budget advice
  /insight                         housing cost insight
  /faq [n]                         list questions or toggle answer n
  /research                        list saved research topics
  /research add <title> | <notes> [| tags]
                                   save a topic; tags are comma-separated
  /research edit <id> [title] | [notes] [| tags]
                                   change a topic; blank parts are kept
  /research find <keyword>         search titles and notes
  /research tag <tag>              topics with a tag
  /research delete <id>            remove a topic
  /research samples                add sample topics to an empty hub
  /log <level>                     change log verbosity
  /log <on|off>                    show or hide logs on stderr
  /help                            this text
  /quit                            exit";

/// Parses one input line. Blank lines yield `Ok(None)`.
pub fn parse(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let Some(rest) = line.strip_prefix('/') else {
        return Ok(Some(Command::Say(line.to_string())));
    };

    let (name, args) = match rest.split_once(char::is_whitespace) {
        Some((name, args)) => (name, args.trim()),
        None => (rest, ""),
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "nav" | "go" => Command::Navigate(required(args, "nav", "a page name")?.to_string()),
        "prompts" => Command::ListPrompts,
        "prompt" => {
            let number = required(args, "prompt", "a prompt number")?;
            Command::QuickPrompt(item_number(number)?)
        }
        "clear" => Command::ClearChat,
        "user" => Command::SetUserType(required(args, "user", "a user type")?.to_string()),
        "form" => Command::ShowForm,
        "set" => {
            let args = required(args, "set", "a field name and value")?;
            let (name, value) = args
                .split_once(char::is_whitespace)
                .ok_or(CommandError::MissingArgument {
                    command: "set",
                    argument: "a value",
                })?;
            Command::SetField {
                name: name.to_string(),
                value: value.trim().to_string(),
            }
        }
        "submit" => Command::Submit(
            args.split_whitespace()
                .map(assignment)
                .collect::<Result<_, _>>()?,
        ),
        "faq" if args.is_empty() => Command::Faq(None),
        "faq" => Command::Faq(Some(item_number(args)?)),
        "summary" => Command::Summary,
        "insight" => Command::Insight,
        "research" => Command::Research(research(args)?),
        "log" => match required(args, "log", "a level")? {
            on if on.eq_ignore_ascii_case("on") => Command::LogConsole(true),
            off if off.eq_ignore_ascii_case("off") => Command::LogConsole(false),
            level => Command::LogLevel(level.to_string()),
        },
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => return Err(CommandError::Unknown(other.to_string())),
    };

    Ok(Some(command))
}

fn required<'a>(
    args: &'a str,
    command: &'static str,
    argument: &'static str,
) -> Result<&'a str, CommandError> {
    if args.is_empty() {
        Err(CommandError::MissingArgument { command, argument })
    } else {
        Ok(args)
    }
}

/// Converts a 1-based item number to an index.
fn item_number(s: &str) -> Result<usize, CommandError> {
    match s.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n - 1),
        _ => Err(CommandError::InvalidNumber(s.to_string())),
    }
}

fn research(args: &str) -> Result<ResearchCommand, CommandError> {
    let (action, rest) = match args.split_once(char::is_whitespace) {
        Some((action, rest)) => (action, rest.trim()),
        None => (args, ""),
    };

    let command = match action.to_ascii_lowercase().as_str() {
        "" | "list" => ResearchCommand::List,
        "add" => {
            let mut parts = required(rest, "research add", "a title and notes")?.split('|');
            ResearchCommand::Add {
                title: parts.next().unwrap_or_default().trim().to_string(),
                content: parts.next().unwrap_or_default().trim().to_string(),
                tags: parts.next().map(parse_tags).unwrap_or_default(),
            }
        }
        "edit" => {
            let rest = required(rest, "research edit", "a topic number")?;
            let (id, text) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
            let mut parts = text.split('|');
            ResearchCommand::Edit {
                id: topic_number(id)?,
                title: parts.next().unwrap_or_default().trim().to_string(),
                content: parts.next().unwrap_or_default().trim().to_string(),
                tags: parts.next().map(parse_tags),
            }
        }
        "find" => {
            let keyword = required(rest, "research find", "a keyword")?;
            ResearchCommand::Find(keyword.to_string())
        }
        "tag" => ResearchCommand::Tag(required(rest, "research tag", "a tag")?.to_string()),
        "delete" => {
            let id = required(rest, "research delete", "a topic number")?;
            ResearchCommand::Delete(topic_number(id)?)
        }
        "samples" => ResearchCommand::Samples,
        other => return Err(CommandError::UnknownResearchAction(other.to_string())),
    };
    Ok(command)
}

fn topic_number(s: &str) -> Result<u32, CommandError> {
    match s.parse::<u32>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(CommandError::InvalidNumber(s.to_string())),
    }
}

fn assignment(pair: &str) -> Result<(String, String), CommandError> {
    match pair.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(CommandError::InvalidAssignment(pair.to_string())),
    }
}
