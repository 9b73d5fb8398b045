//! Interactive mode for GenQ
//!
//! A single-session loop: load a PDF on the Home page, generate study
//! material, browse it across the four pages. Every command is one
//! synchronous unit of work; the current page is re-rendered after each.

use anyhow::Result;
use colored::*;
use crossterm::{
    cursor::{MoveLeft, RestorePosition, SavePosition},
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, Clear, ClearType},
};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use crate::extract;
use crate::generate::Generator;
use crate::llm::TextProvider;
use crate::render::{render_page, ViewState};
use crate::session::{Page, Session};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Command definition with name and description
struct Command {
    name: &'static str,
    description: &'static str,
}

const COMMANDS: &[Command] = &[
    Command { name: "/home", description: "Go to the Home page" },
    Command { name: "/mcqs", description: "Multiple choice questions" },
    Command { name: "/descriptive", description: "Descriptive questions" },
    Command { name: "/tips", description: "Learning tips" },
    Command { name: "/open", description: "Extract text from a PDF" },
    Command { name: "/generate", description: "Generate study material" },
    Command { name: "/pick", description: "Choose an MCQ option" },
    Command { name: "/toggle", description: "Reveal or hide an answer" },
    Command { name: "/clear", description: "Clear screen" },
    Command { name: "/help", description: "Show this help" },
    Command { name: "/exit", description: "Exit" },
];

/// One parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Navigate(Page),
    Open(PathBuf),
    Generate,
    /// Zero-based question and option indices.
    Pick { question: usize, option: usize },
    /// Zero-based descriptive item index.
    Toggle(usize),
    Help,
    Clear,
    Exit,
    /// Recognized command with unusable arguments; carries the usage hint.
    Invalid(&'static str),
    /// Anything else the user typed.
    Unknown(String),
}

/// What the loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Continue,
    Exit,
}

/// Parse one line of input into an [`Action`].
pub fn parse_command(input: &str) -> Action {
    let parts: Vec<&str> = input.splitn(2, ' ').collect();
    let cmd = parts[0].to_lowercase();
    let args = parts.get(1).map(|s| s.trim()).unwrap_or("");

    match cmd.as_str() {
        "/home" => Action::Navigate(Page::Home),
        "/mcqs" => Action::Navigate(Page::Mcqs),
        "/descriptive" | "/desc" => Action::Navigate(Page::Descriptive),
        "/tips" => Action::Navigate(Page::Tips),
        "/open" | "/o" => {
            if args.is_empty() {
                Action::Invalid("Usage: /open <path-to-pdf>")
            } else {
                Action::Open(PathBuf::from(args))
            }
        }
        "/generate" | "/g" => Action::Generate,
        "/pick" => parse_pick(args),
        "/toggle" => match args.parse::<usize>() {
            Ok(n) if n >= 1 => Action::Toggle(n - 1),
            _ => Action::Invalid("Usage: /toggle <question-number>"),
        },
        "/help" | "/h" | "/?" => Action::Help,
        "/clear" => Action::Clear,
        "/exit" | "/quit" | "/q" => Action::Exit,
        _ => Action::Unknown(input.to_string()),
    }
}

fn parse_pick(args: &str) -> Action {
    const USAGE: &str = "Usage: /pick <question-number> <a-d>";

    let mut words = args.split_whitespace();
    let (Some(number), Some(letter), None) = (words.next(), words.next(), words.next()) else {
        return Action::Invalid(USAGE);
    };
    let Ok(question) = number.parse::<usize>() else {
        return Action::Invalid(USAGE);
    };
    if question < 1 {
        return Action::Invalid(USAGE);
    }
    let option = match letter.to_lowercase().as_str() {
        "a" => 0,
        "b" => 1,
        "c" => 2,
        "d" => 3,
        _ => return Action::Invalid(USAGE),
    };
    Action::Pick {
        question: question - 1,
        option,
    }
}

/// Apply one action to the session and transient view state, writing any
/// feedback to `out`. Extraction and generation errors are converted to
/// inline messages here; they never propagate.
pub async fn handle_action<W: Write>(
    action: Action,
    session: &mut Session,
    view: &mut ViewState,
    generator: &Generator,
    out: &mut W,
) -> io::Result<Outcome> {
    match action {
        Action::Navigate(page) => {
            session.page = page;
            view.clear();
        }
        Action::Open(path) => {
            if session.page != Page::Home {
                writeln!(out, "  {}", "Switch to /home to load a document.".yellow())?;
            } else {
                match extract::extract_text(&path) {
                    Ok(text) => {
                        writeln!(
                            out,
                            "  {} {} characters from {}",
                            "Extracted".green().bold(),
                            text.chars().count(),
                            path.display()
                        )?;
                        session.source_text = text;
                    }
                    Err(e) => {
                        session.source_text.clear();
                        writeln!(out, "  {} {}", "Error extracting PDF text:".red().bold(), e)?;
                    }
                }
            }
        }
        Action::Generate => {
            if session.page != Page::Home {
                writeln!(out, "  {}", "Switch to /home to generate.".yellow())?;
            } else if session.source_text.is_empty() {
                writeln!(out, "  {}", "Load a PDF with /open before generating.".yellow())?;
            } else {
                match generator.generate(&session.source_text).await {
                    Ok(set) => {
                        session.store_results(set);
                        writeln!(out, "  {}", "Questions generated successfully!".green().bold())?;
                    }
                    Err(e) => {
                        session.reset_results();
                        writeln!(out, "  {} {}", "Error generating content:".red().bold(), e)?;
                    }
                }
            }
        }
        Action::Pick { question, option } => {
            if session.page != Page::Mcqs {
                writeln!(out, "  {}", "Selections happen on the /mcqs page.".yellow())?;
            } else if question >= session.mcqs.len() {
                writeln!(out, "  {}", format!("No question {}.", question + 1).yellow())?;
            } else {
                view.select(question, option);
            }
        }
        Action::Toggle(item) => {
            if session.page != Page::Descriptive {
                writeln!(out, "  {}", "Answers are revealed on the /descriptive page.".yellow())?;
            } else if item >= session.descriptive.len() {
                writeln!(out, "  {}", format!("No question {}.", item + 1).yellow())?;
            } else {
                view.toggle(item);
            }
        }
        Action::Help => {
            writeln!(out, "  {}", "Commands:".green().bold())?;
            writeln!(out)?;
            for cmd in COMMANDS {
                writeln!(
                    out,
                    "  {}  {}",
                    format!("{:<14}", cmd.name).dimmed(),
                    cmd.description.white()
                )?;
            }
        }
        Action::Clear => {
            write!(out, "\x1B[2J\x1B[1;1H")?;
            out.flush()?;
        }
        Action::Exit => return Ok(Outcome::Exit),
        Action::Invalid(usage) => {
            writeln!(out, "  {}", usage.yellow())?;
        }
        Action::Unknown(input) => {
            writeln!(out, "  {} Unknown command: {}", "Error:".red().bold(), input)?;
            writeln!(out, "  Type {} for available commands.", "/help".yellow())?;
        }
    }

    Ok(Outcome::Continue)
}

/// Print the welcome banner
fn print_banner(model: &str) {
    println!();
    println!(
        "     {}     {} v{}",
        "╭───────╮".cyan(),
        "GenQ".green().bold(),
        VERSION
    );
    println!(
        "     {}     Study material from your PDFs",
        "│  ? !  │".cyan()
    );
    println!("     {}     model: {}", "╰───────╯".cyan(), model.white());
    println!();
    println!("  {}", "Try:".dimmed());
    println!(
        "    {} {}  {}",
        ">".green(),
        "/open notes.pdf".white(),
        "(extract a PDF)".dimmed()
    );
    println!(
        "    {} {}  {}",
        ">".green(),
        "/generate".white(),
        "(create questions and tips)".dimmed()
    );
    println!();
}

/// Filter commands based on input
fn filter_commands(input: &str) -> Vec<usize> {
    if !input.starts_with('/') {
        return vec![];
    }
    let filter = input.to_lowercase();
    COMMANDS
        .iter()
        .enumerate()
        .filter(|(_, cmd)| cmd.name.to_lowercase().starts_with(&filter))
        .map(|(i, _)| i)
        .collect()
}

fn save_position(stdout: &mut io::Stdout) -> Result<()> {
    execute!(stdout, SavePosition)?;
    Ok(())
}

/// Clear from saved position down (restore + clear)
fn clear_from_saved(stdout: &mut io::Stdout) -> Result<()> {
    execute!(stdout, RestorePosition, Clear(ClearType::FromCursorDown))?;
    Ok(())
}

/// Redraw the input line and position the cursor
fn redraw_input(stdout: &mut io::Stdout, input: &str, cursor_pos: usize) -> Result<()> {
    print!("{} {}", ">".green().bold(), input);
    stdout.flush()?;
    let chars_from_end = input.chars().count() - cursor_pos;
    if chars_from_end > 0 {
        execute!(stdout, MoveLeft(chars_from_end as u16))?;
    }
    Ok(())
}

/// Read one line in raw mode, with basic editing and Tab completion for
/// /commands.
fn read_line(stdout: &mut io::Stdout) -> Result<String> {
    let mut input = String::new();
    let mut cursor_pos: usize = 0;

    save_position(stdout)?;
    redraw_input(stdout, &input, cursor_pos)?;

    enable_raw_mode()?;

    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            match key.code {
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    clear_from_saved(stdout)?;
                    disable_raw_mode()?;
                    println!();
                    return Ok("/exit".to_string());
                }
                // Ctrl+D: exit on empty line
                KeyCode::Char('d')
                    if key.modifiers.contains(KeyModifiers::CONTROL) && input.is_empty() =>
                {
                    clear_from_saved(stdout)?;
                    disable_raw_mode()?;
                    println!();
                    return Ok("/exit".to_string());
                }
                KeyCode::Enter => {
                    clear_from_saved(stdout)?;
                    redraw_input(stdout, &input, input.chars().count())?;
                    disable_raw_mode()?;
                    println!();
                    return Ok(input);
                }
                KeyCode::Tab => {
                    let filtered = filter_commands(&input);
                    if let Some(&first) = filtered.first() {
                        input = COMMANDS[first].name.to_string();
                        cursor_pos = input.chars().count();
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                // Ctrl+A: go to start of line
                KeyCode::Char('a') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    cursor_pos = 0;
                    clear_from_saved(stdout)?;
                    redraw_input(stdout, &input, cursor_pos)?;
                }
                // Ctrl+E: go to end of line
                KeyCode::Char('e') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    cursor_pos = input.chars().count();
                    clear_from_saved(stdout)?;
                    redraw_input(stdout, &input, cursor_pos)?;
                }
                // Ctrl+U: delete from cursor to start of line
                KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    if cursor_pos > 0 {
                        let chars: Vec<char> = input.chars().collect();
                        input = chars[cursor_pos..].iter().collect();
                        cursor_pos = 0;
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                // Ctrl+K: delete from cursor to end of line
                KeyCode::Char('k') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    let len = input.chars().count();
                    if cursor_pos < len {
                        let chars: Vec<char> = input.chars().collect();
                        input = chars[..cursor_pos].iter().collect();
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                KeyCode::Left => {
                    if cursor_pos > 0 {
                        cursor_pos -= 1;
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                KeyCode::Right => {
                    if cursor_pos < input.chars().count() {
                        cursor_pos += 1;
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                KeyCode::Home => {
                    cursor_pos = 0;
                    clear_from_saved(stdout)?;
                    redraw_input(stdout, &input, cursor_pos)?;
                }
                KeyCode::End => {
                    cursor_pos = input.chars().count();
                    clear_from_saved(stdout)?;
                    redraw_input(stdout, &input, cursor_pos)?;
                }
                KeyCode::Backspace => {
                    if cursor_pos > 0 {
                        let chars: Vec<char> = input.chars().collect();
                        input = chars[..cursor_pos - 1]
                            .iter()
                            .chain(chars[cursor_pos..].iter())
                            .collect();
                        cursor_pos -= 1;
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                KeyCode::Delete => {
                    let len = input.chars().count();
                    if cursor_pos < len {
                        let chars: Vec<char> = input.chars().collect();
                        input = chars[..cursor_pos]
                            .iter()
                            .chain(chars[cursor_pos + 1..].iter())
                            .collect();
                        clear_from_saved(stdout)?;
                        redraw_input(stdout, &input, cursor_pos)?;
                    }
                }
                KeyCode::Char(c) => {
                    let chars: Vec<char> = input.chars().collect();
                    input = chars[..cursor_pos]
                        .iter()
                        .chain(std::iter::once(&c))
                        .chain(chars[cursor_pos..].iter())
                        .collect();
                    cursor_pos += 1;
                    clear_from_saved(stdout)?;
                    redraw_input(stdout, &input, cursor_pos)?;
                }
                _ => {}
            }
        }
    }
}

/// Run the interactive loop until the user exits.
pub async fn run(provider: Arc<dyn TextProvider>, initial_pdf: Option<PathBuf>) -> Result<()> {
    let model = provider.model_id().to_string();
    let generator = Generator::new(provider);
    let mut session = Session::new();
    let mut view = ViewState::new();

    print_banner(&model);

    let mut stdout = io::stdout();

    if let Some(path) = initial_pdf {
        handle_action(
            Action::Open(path),
            &mut session,
            &mut view,
            &generator,
            &mut stdout,
        )
        .await?;
    }
    render_page(&session, &view, &mut stdout)?;
    println!();

    loop {
        let input = read_line(&mut stdout)?;
        let input = input.trim();
        if input.is_empty() {
            continue;
        }

        let action = parse_command(input);
        let outcome =
            handle_action(action, &mut session, &mut view, &generator, &mut stdout).await?;
        if outcome == Outcome::Exit {
            println!("{}", "Goodbye!".cyan());
            break;
        }

        render_page(&session, &view, &mut stdout)?;
        println!();
    }

    Ok(())
}
