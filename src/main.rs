use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pandacalc::calculator::copy_to_clipboard;
use pandacalc::{
    CalcError, Config, ExpressionController, FastevalEvaluator, Key, KeyOutcome, LogNotifier,
    Notification, Notifier, Presentation, Theme,
};

#[derive(Parser, Debug)]
#[command(name = "pandacalc", version, about = "Keypad calculator with history")]
struct Args {
    /// Path to a config file (defaults to the user config directory)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum number of characters in the input buffer
    #[arg(long)]
    max_len: Option<usize>,

    /// Color theme
    #[arg(long, value_enum)]
    theme: Option<Theme>,

    /// Type these keys, evaluate, print the result and exit
    #[arg(long, value_name = "KEYS")]
    eval: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long)]
    verbose: bool,
}

/// Front-end commands typed as whole words.
enum Command {
    History,
    ClearHistory,
    Theme,
    Copy,
    Export,
    Help,
    Quit,
}

impl Command {
    fn parse(word: &str) -> Option<Self> {
        match word {
            "history" | "h" => Some(Self::History),
            "clear-history" => Some(Self::ClearHistory),
            "theme" => Some(Self::Theme),
            "copy" => Some(Self::Copy),
            "export" => Some(Self::Export),
            "help" | "?" => Some(Self::Help),
            "quit" | "exit" | "q" => Some(Self::Quit),
            _ => None,
        }
    }
}

const HELP: &str = "\
keys:     0-9 . + - × ÷ (* / x) ( ) √ % C = <  (or: sqrt, back)
commands: history, clear-history, theme, copy, export, help, quit";

/// Prints notifications to stderr, styled by presentation.
struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn notify(&mut self, notification: Notification) {
        match notification.presentation {
            Presentation::Toast => eprintln!("  ({})", notification.message),
            Presentation::Modal => {
                eprintln!("┌ {}", notification.title);
                eprintln!("└ {}", notification.message);
            }
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if let Some(max_len) = args.max_len {
        config.max_input_len = max_len;
    }
    if let Some(theme) = args.theme {
        config.theme = theme;
    }
    config.validate().context("invalid configuration")
}

/// Wrap the display text in the theme's terminal colors.
fn paint(theme: Theme, text: &str) -> String {
    let (fg, bg) = match theme {
        Theme::Dark => (255, 235),
        Theme::Light => (16, 254),
    };
    format!("\x1b[38;5;{fg};48;5;{bg}m {text:>20} \x1b[0m")
}

/// Evaluate `keys` without a terminal session. Failures are logged and then
/// returned so the process exits non-zero.
fn run_eval(
    controller: &mut ExpressionController,
    notifier: &mut impl Notifier,
    keys: &str,
) -> Result<()> {
    let outcome = Key::parse_sequence(keys)?
        .into_iter()
        .take_while(|key| *key != Key::Equals)
        .try_for_each(|key| controller.admit_key(key).map(drop))
        .and_then(|()| controller.commit());

    match outcome {
        Ok(value) => {
            println!("{}", pandacalc::calculator::format_result(value));
            Ok(())
        }
        Err(err) => {
            notifier.notify(Notification::from(&err));
            Err(err).context("evaluation failed")
        }
    }
}

struct Session {
    controller: ExpressionController,
    notifier: TerminalNotifier,
    theme: Theme,
}

impl Session {
    fn report(&mut self, err: &CalcError) {
        self.notifier.notify(Notification::from(err));
    }

    fn press(&mut self, key: Key) {
        match self.controller.admit_key(key) {
            Ok(KeyOutcome::Evaluated(value)) => tracing::debug!(value, "result shown"),
            Ok(KeyOutcome::Edited(_)) => {}
            Err(err) => self.report(&err),
        }
    }

    /// Handle one input line. Returns `false` when the user quits.
    fn handle_line(&mut self, line: &str) -> Result<bool> {
        for word in line.split_whitespace() {
            if let Some(command) = Command::parse(word) {
                if !self.run_command(command)? {
                    return Ok(false);
                }
                continue;
            }

            match word.parse::<Key>() {
                Ok(key) => self.press(key),
                Err(_) => match Key::parse_sequence(word) {
                    Ok(keys) => keys.into_iter().for_each(|key| self.press(key)),
                    Err(err) => eprintln!("  {err}"),
                },
            }
        }
        Ok(true)
    }

    fn run_command(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::History => {
                for line in self.controller.history().display_lines() {
                    println!("  {line}");
                }
            }
            Command::ClearHistory => self.controller.clear_history(),
            Command::Theme => {
                self.theme = self.theme.toggle();
                println!("  theme: {}", self.theme.name());
            }
            Command::Copy => {
                let text = self.controller.display().to_string();
                match copy_to_clipboard(&text) {
                    Ok(()) => println!("  copied {text}"),
                    Err(err) => eprintln!("  {err}"),
                }
            }
            Command::Export => {
                let json = self
                    .controller
                    .history()
                    .to_json()
                    .context("failed to serialize history")?;
                println!("{json}");
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn render(&self) -> Result<()> {
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", paint(self.theme, self.controller.display()))?;
        stdout.flush()?;
        Ok(())
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = load_config(&args)?;
    let mut controller = ExpressionController::from_config(FastevalEvaluator, &config);

    if let Some(keys) = &args.eval {
        return run_eval(&mut controller, &mut LogNotifier, keys);
    }

    let mut session = Session {
        controller,
        notifier: TerminalNotifier,
        theme: config.theme,
    };

    println!("{HELP}");
    session.render()?;

    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read input")?;
        if !session.handle_line(&line)? {
            break;
        }
        session.render()?;
    }

    Ok(())
}
