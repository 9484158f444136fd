use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use finance_core::research::TopicUpdate;
use finance_core::{NewResearchTopic, TopicId, UserType};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, info};

use finance_ui::app::{AppEvent, FinanceApp};
use finance_ui::charts::TerminalSink;
use finance_ui::commands::{self, Command, HELP, ResearchCommand};
use finance_ui::config::Settings;
use finance_ui::{AppError, console, logging};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Personal finance assistant for the terminal.
///
/// Chat with a rule-based assistant, enter your monthly numbers and see
/// them charted.
#[derive(Debug, Parser)]
struct Cli {
    /// Settings file (TOML). Built-in defaults are used when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Starting user mode: student or professional.
    #[arg(long, value_parser = parse_user_type)]
    user_type: Option<UserType>,

    /// Log filter, e.g. `debug` or `info,finance_ui=trace`. Also echoes
    /// log records on stderr.
    #[arg(long)]
    log_level: Option<String>,
}

fn parse_user_type(s: &str) -> Result<UserType, String> {
    UserType::parse(s).ok_or_else(|| format!("'{s}' is not student or professional"))
}

type App = FinanceApp<TerminalSink<io::Stdout>>;

enum Flow {
    Continue,
    Quit,
}

/// Runs one parsed command against the app and prints the result.
fn run_command(
    app: &mut App,
    command: Command,
) -> Result<Flow, AppError> {
    match command {
        Command::Say(text) => {
            if let Some(id) = app.send_message(&text) {
                debug!(%id, "awaiting reply");
                println!("...");
            }
        }
        Command::Navigate(name) => {
            app.navigate_to(&name)?;
            print!("{}", console::page_view(app.state(), app.faq()));
        }
        Command::QuickPrompt(index) => {
            app.send_quick_prompt(index)?;
            if let Some(message) = app.state().messages().last() {
                println!("{}", console::message_line(message));
            }
        }
        Command::ListPrompts => print!("{}", console::quick_prompts()),
        Command::ClearChat => {
            app.clear_chat();
            print!("{}", console::page_view(app.state(), app.faq()));
        }
        Command::SetUserType(name) => {
            let user_type = app.set_user_type_named(&name)?;
            println!("{}", user_type.mode_label());
        }
        Command::SetField { name, value } => {
            app.set_form_field(&name, &value)?;
        }
        Command::ShowForm => println!("{}", app.form()),
        Command::Submit(assignments) => {
            for (name, value) in &assignments {
                app.set_form_field(name, value)?;
            }
            app.submit_form()?;
            print!("{}", console::metric_summary(app.financial_data()));
        }
        Command::Faq(None) => print!("{}", console::faq_list(app.faq())),
        Command::Faq(Some(index)) => {
            app.toggle_faq(index)?;
            print!("{}", console::faq_list(app.faq()));
        }
        Command::Summary => {
            print!("{}", console::metric_summary(app.financial_data()));
            print!("{}", console::advice_view(&app.budget_advice()));
        }
        Command::Insight => print!("{}", console::insight_view(&app.housing_insight())),
        Command::Research(action) => run_research(app, action)?,
        Command::LogLevel(level) => match logging::set_log_level(&level) {
            Ok(()) => println!("log level set to {level}"),
            Err(error) => println!("error: {error}"),
        },
        Command::LogConsole(enabled) => match logging::set_console_enabled(enabled) {
            Ok(()) => println!("console logging {}", if enabled { "on" } else { "off" }),
            Err(error) => println!("error: {error}"),
        },
        Command::Help => println!("{HELP}"),
        Command::Quit => return Ok(Flow::Quit),
    }
    Ok(Flow::Continue)
}

fn show_event(event: &AppEvent) {
    match event {
        AppEvent::AssistantReplied(message) => println!("{}", console::message_line(message)),
        AppEvent::ChartsRendered(report) => {
            for (kind, error) in &report.skipped {
                println!("{kind} not shown: {error}");
            }
        }
        AppEvent::Stale(_) => {}
    }
}

fn run_research(
    app: &mut App,
    action: ResearchCommand,
) -> Result<(), AppError> {
    match action {
        ResearchCommand::List => print!("{}", console::research_list(app.research())),
        ResearchCommand::Add { title, content, tags } => {
            let topic = app.add_research_topic(NewResearchTopic::new(title, content, tags))?;
            println!("saved topic #{}", topic.id);
        }
        ResearchCommand::Edit { id, title, content, tags } => {
            let update = TopicUpdate {
                title: Some(title),
                content: Some(content),
                tags,
            };
            println!("{}", app.update_research_topic(TopicId(id), update)?);
        }
        ResearchCommand::Find(keyword) => {
            let matches = app.research().search(&keyword);
            print!("{}", console::topic_matches(&keyword, &matches));
        }
        ResearchCommand::Tag(tag) => {
            let matches = app.research().with_tag(&tag);
            print!("{}", console::topic_matches(&tag, &matches));
        }
        ResearchCommand::Delete(id) => {
            let topic = app.delete_research_topic(TopicId(id))?;
            println!("deleted topic #{} {}", topic.id, topic.title);
        }
        ResearchCommand::Samples => match app.add_sample_topics() {
            0 => println!("sample topics are only added to an empty hub"),
            n => println!("added {n} sample topics"),
        },
    }
    Ok(())
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    if let Some(level) = cli.log_level {
        settings.logging.level = level;
        settings.logging.console = true;
    }
    if let Some(user_type) = cli.user_type {
        settings.chat.default_user_type = user_type;
    }

    logging::init_from_settings(&settings.logging);
    info!(user_type = %settings.chat.default_user_type, "starting assistant");

    let mut app = FinanceApp::new(&settings, TerminalSink::new(io::stdout()));
    print!("{}", console::page_view(app.state(), app.faq()));
    println!("Type /help for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("reading input")? else {
                    break;
                };
                match commands::parse(&line) {
                    Ok(Some(command)) => {
                        match run_command(&mut app, command) {
                            Ok(Flow::Quit) => break,
                            Ok(Flow::Continue) => {}
                            Err(error) => println!("error: {error}"),
                        }
                    }
                    Ok(None) => {}
                    Err(error) => println!("error: {error}"),
                }
            }
            Some(event) = app.next_event() => show_event(&event),
        }
    }

    info!("assistant closed");
    Ok(())
}
