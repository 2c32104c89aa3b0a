use std::fmt;

use course_core::model::ModuleId;
use course_core::routes::{GuardDecision, Route};
use course_core::{AppConfig, AppConfigDraft, Clock};
use services::overview::{DashboardSummary, ModuleCard, ModuleOverview, module_cards};
use services::{AppServices, Credentials, LearningCommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingArgument { command: &'static str, name: &'static str },
    UnknownArg(String),
    InvalidModuleId { raw: String },
    InvalidDelay { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingArgument { command, name } => {
                write!(f, "{command} requires <{name}>")
            }
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidModuleId { raw } => write!(f, "invalid module id: {raw}"),
            ArgsError::InvalidDelay { raw } => write!(f, "invalid --reply-delay-ms value: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- modules              [options]");
    eprintln!("  cargo run -p app -- module <id>          [options]");
    eprintln!("  cargo run -p app -- route <path>         [options]");
    eprintln!("  cargo run -p app -- ask <message>        [options]");
    eprintln!("  cargo run -p app -- login                --email <address> [options]");
    eprintln!("  cargo run -p app -- logout | whoami      [options]");
    eprintln!("  cargo run -p app -- demo                 [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>          default sqlite:senior-learn.sqlite3");
    eprintln!("  --email <address>          sign in (stub) before running the command");
    eprintln!("  --reply-delay-ms <ms>      assistant reply delay, default 1000");
    eprintln!();
    eprintln!("Environment (.env is loaded if present):");
    eprintln!("  SENIOR_LEARN_DB_URL, SENIOR_LEARN_API_URL, SENIOR_LEARN_API_KEY,");
    eprintln!("  SENIOR_LEARN_REPLY_DELAY_MS, SENIOR_LEARN_PROGRESS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Modules,
    Module(ModuleId),
    Route(String),
    Ask(String),
    Login,
    Logout,
    Whoami,
    Demo,
}

struct Args {
    command: Command,
    db_url: String,
    email: Option<String>,
    reply_delay_ms: Option<u64>,
}

impl Args {
    fn parse(args: impl IntoIterator<Item = String>) -> Result<Option<Self>, ArgsError> {
        let mut db_url = std::env::var("SENIOR_LEARN_DB_URL")
            .ok()
            .map_or_else(|| "sqlite://senior-learn.sqlite3".into(), normalize_sqlite_url);
        let mut email = None;
        let mut reply_delay_ms = None;
        let mut positional = Vec::new();

        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = normalize_sqlite_url(value);
                }
                "--email" => email = Some(require_value(&mut args, "--email")?),
                "--reply-delay-ms" => {
                    let value = require_value(&mut args, "--reply-delay-ms")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidDelay { raw: value.clone() })?;
                    reply_delay_ms = Some(parsed);
                }
                "--help" | "-h" => return Ok(None),
                flag if flag.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => positional.push(arg),
            }
        }

        let command = Self::parse_command(positional)?;
        Ok(Some(Self {
            command,
            db_url,
            email,
            reply_delay_ms,
        }))
    }

    fn parse_command(positional: Vec<String>) -> Result<Command, ArgsError> {
        let mut words = positional.into_iter();
        let Some(name) = words.next() else {
            return Ok(Command::Modules);
        };

        let command = match name.as_str() {
            "modules" => Command::Modules,
            "module" => {
                let raw = words.next().ok_or(ArgsError::MissingArgument {
                    command: "module",
                    name: "id",
                })?;
                let id = raw
                    .parse::<ModuleId>()
                    .map_err(|_| ArgsError::InvalidModuleId { raw: raw.clone() })?;
                Command::Module(id)
            }
            "route" => Command::Route(words.next().ok_or(ArgsError::MissingArgument {
                command: "route",
                name: "path",
            })?),
            "ask" => {
                let message = words.by_ref().collect::<Vec<_>>().join(" ");
                if message.trim().is_empty() {
                    return Err(ArgsError::MissingArgument {
                        command: "ask",
                        name: "message",
                    });
                }
                Command::Ask(message)
            }
            "login" => Command::Login,
            "logout" => Command::Logout,
            "whoami" => Command::Whoami,
            "demo" => Command::Demo,
            _ => return Err(ArgsError::UnknownArg(name)),
        };

        match words.next() {
            Some(extra) => Err(ArgsError::UnknownArg(extra)),
            None => Ok(command),
        }
    }
}

fn load_config(reply_delay_ms: Option<u64>) -> Result<AppConfig, course_core::Error> {
    let env_delay = std::env::var("SENIOR_LEARN_REPLY_DELAY_MS").ok();
    let env_delay = match env_delay {
        Some(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<u64>().map_err(|_| {
            course_core::ConfigError::InvalidReplyDelay(raw.clone())
        })?),
        _ => None,
    };

    let draft = AppConfigDraft {
        api_base_url: std::env::var("SENIOR_LEARN_API_URL").ok(),
        api_key: std::env::var("SENIOR_LEARN_API_KEY").ok(),
        reply_delay_ms: reply_delay_ms.or(env_delay),
        progress_policy: std::env::var("SENIOR_LEARN_PROGRESS").ok(),
    };
    Ok(draft.validate()?)
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

// ─── Views ──────────────────────────────────────────────────────────────────────

/// Runs the route guard and reports a redirect. Returns whether the view may render.
fn enter(app: &AppServices, route: Route) -> bool {
    match app.session().guard(route) {
        GuardDecision::Allow => true,
        GuardDecision::Redirect(to) => {
            println!("{route} requires sign-in; redirected to {to}");
            false
        }
    }
}

fn print_cards(cards: &[ModuleCard]) {
    for card in cards {
        let action = card.action.label().unwrap_or(match card.action {
            course_core::navigation::ModuleAction::Completed => "Module completed",
            _ => "No lessons available",
        });
        println!(
            "{:>3}  {:<18} {:>4}  {:<12} {}/{} lessons  {}",
            card.id,
            card.title,
            card.progress.to_string(),
            card.badge.label(),
            card.completed_count,
            card.lesson_count,
            action,
        );
    }
}

fn print_overview(overview: &ModuleOverview) {
    let card = &overview.card;
    println!("{} ({}, {})", card.title, card.difficulty, card.estimated_time);
    println!("{}", overview.detailed_description);
    println!("Progress: {} ({})", card.progress, card.badge.label());
    for objective in &overview.objectives {
        println!("  - {objective}");
    }
    for row in &overview.lessons {
        let marker = if row.focusable { ' ' } else { '#' };
        println!("{marker} {}", row.label);
    }
    println!(
        "{} completed, {} to start, {} locked",
        overview.counts.completed, overview.counts.start, overview.counts.locked
    );
    match (card.action.label(), card.target) {
        (Some(label), Some(target)) => println!("[{label}] -> {target}"),
        _ if card.progress.is_full() => println!("You have completed this module."),
        _ => {}
    }
}

fn print_dashboard(summary: &DashboardSummary) {
    println!(
        "Overall progress {} | {}/{} lessons | {} min | {} in progress, {} completed, {} not started",
        summary.total_progress,
        summary.completed_lessons,
        summary.total_lessons,
        summary.time_spent_minutes,
        summary.modules_in_progress,
        summary.modules_completed,
        summary.modules_not_started,
    );
    if let Some(resume) = summary.resume {
        println!("Continue learning: {resume}");
    }
}

/// Makes `id` the current module if it exists. Unknown ids leave the store alone.
fn open_module(app: &AppServices, id: ModuleId) -> Option<ModuleOverview> {
    let learning = app.learning();
    let overview = learning.select(|state| state.module(id).map(ModuleOverview::from_module))?;
    learning.dispatch(LearningCommand::SetCurrentModule(Some(id)));
    Some(overview)
}

async fn ask(app: &AppServices, message: &str) -> Result<(), Box<dyn std::error::Error>> {
    let assistant = app.assistant();
    let reply = assistant.send(message)?;
    if reply.join().await {
        let history = assistant.store().select(|state| state.chat_history().to_vec());
        for entry in history {
            println!("[{:?}] {}", entry.role, entry.content);
        }
    }
    Ok(())
}

async fn run_command(app: &AppServices, command: Command) -> Result<(), Box<dyn std::error::Error>> {
    match command {
        Command::Modules => {
            if enter(app, Route::Modules) {
                print_cards(&module_cards(&app.learning().snapshot()));
            }
        }
        Command::Module(id) => {
            if enter(app, Route::ModuleDetail(id)) {
                match open_module(app, id) {
                    Some(overview) => print_overview(&overview),
                    None => println!("Module {id} not found."),
                }
            }
        }
        Command::Route(path) => match Route::parse(&path) {
            Some(route) => {
                if enter(app, route) {
                    println!("{route} allowed");
                }
            }
            None => println!("no view at {path}"),
        },
        Command::Ask(message) => {
            if enter(app, Route::AiAssistant) {
                ask(app, &message).await?;
            }
        }
        Command::Login => {
            // --email has already signed in.
            if !app.session().is_authenticated() {
                return Err(ArgsError::MissingValue { flag: "--email" }.into());
            }
        }
        Command::Logout => {
            app.session().logout().await?;
            println!("Signed out.");
        }
        Command::Whoami => {
            let auth = app.session().store().snapshot();
            match (auth.user(), auth.token()) {
                (Some(user), _) => println!("{} <{}>", user.display_name(), user.email),
                (None, Some(_)) => println!("A saved session exists; sign in again to continue."),
                (None, None) => println!("Not signed in."),
            }
        }
        Command::Demo => run_demo(app).await?,
    }
    Ok(())
}

async fn run_demo(app: &AppServices) -> Result<(), Box<dyn std::error::Error>> {
    let session = app.session();
    if !session.is_authenticated() {
        enter(app, Route::Dashboard);
        session
            .login(&Credentials {
                email: "demo@example.com".into(),
                password: String::new(),
            })
            .await?;
    }

    let learning = app.learning();
    if enter(app, Route::Dashboard) {
        print_dashboard(&DashboardSummary::from_state(&learning.snapshot()));
    }

    let email = ModuleId::new(1);
    let next = learning.select(|state| {
        state
            .module(email)
            .and_then(course_core::navigation::action_target)
    });
    if let Some(Route::Lesson(lesson)) = next {
        let title = app.catalog().require_lesson(lesson)?.title().to_owned();
        println!("Opening {} ({title})", Route::Lesson(lesson));
        learning.dispatch(LearningCommand::SetCurrentModule(Some(email)));
        learning.dispatch(LearningCommand::SetCurrentLesson(Some(lesson)));
        learning.dispatch(LearningCommand::UpdateLessonProgress { lesson, percent: 50 });
        learning.dispatch(LearningCommand::CompleteLesson(lesson));
        learning.dispatch(LearningCommand::AddTimeSpent(15));
    }
    print_dashboard(&DashboardSummary::from_state(&learning.snapshot()));

    if enter(app, Route::AiAssistant) {
        ask(app, "How do I organize my inbox?").await?;
    }
    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let parsed = match Args::parse(std::env::args().skip(1)) {
        Ok(Some(parsed)) => parsed,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err.into());
        }
    };
    let config = load_config(parsed.reply_delay_ms)?;
    tracing::debug!(?config, db = %parsed.db_url, "configuration loaded");

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&parsed.db_url)?;
    let app = AppServices::new_sqlite(&parsed.db_url, Clock::system(), config).await?;

    if let Some(email) = parsed.email {
        let user = app
            .session()
            .login(&Credentials {
                email,
                password: String::new(),
            })
            .await?;
        println!("Signed in as {} <{}>", user.display_name(), user.email);
    }

    run_command(&app, parsed.command).await
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(words: &[&str]) -> Vec<String> {
        words.iter().map(|word| (*word).to_owned()).collect()
    }

    #[test]
    fn defaults_to_module_listing() {
        let parsed = Args::parse(args(&[])).unwrap().unwrap();
        assert_eq!(parsed.command, Command::Modules);
        assert!(parsed.email.is_none());
    }

    #[test]
    fn flags_may_follow_the_command() {
        let parsed = Args::parse(args(&["module", "3", "--email", "a@example.com", "--reply-delay-ms", "5"]))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.command, Command::Module(ModuleId::new(3)));
        assert_eq!(parsed.email.as_deref(), Some("a@example.com"));
        assert_eq!(parsed.reply_delay_ms, Some(5));
    }

    #[test]
    fn ask_joins_remaining_words() {
        let parsed = Args::parse(args(&["ask", "where", "is", "my", "inbox?"]))
            .unwrap()
            .unwrap();
        assert_eq!(parsed.command, Command::Ask("where is my inbox?".into()));
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(
            Args::parse(args(&["module", "abc"])),
            Err(ArgsError::InvalidModuleId { .. })
        ));
        assert!(matches!(
            Args::parse(args(&["--db"])),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
        assert!(matches!(
            Args::parse(args(&["dance"])),
            Err(ArgsError::UnknownArg(_))
        ));
        assert!(matches!(
            Args::parse(args(&["logout", "now"])),
            Err(ArgsError::UnknownArg(_))
        ));
    }

    #[test]
    fn help_short_circuits() {
        assert!(Args::parse(args(&["modules", "--help"])).unwrap().is_none());
    }

    async fn services() -> AppServices {
        AppServices::in_memory(course_core::time::fixed_clock(), AppConfig::default())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn opening_unknown_module_keeps_current_module() {
        let app = services().await;
        assert!(open_module(&app, ModuleId::new(999)).is_none());
        assert_eq!(app.learning().select(|state| state.current_module()), None);
    }

    #[tokio::test]
    async fn opening_module_sets_current_module() {
        let app = services().await;
        let overview = open_module(&app, ModuleId::new(1)).unwrap();
        assert_eq!(overview.card.id, ModuleId::new(1));
        assert_eq!(
            app.learning().select(|state| state.current_module()),
            Some(ModuleId::new(1))
        );

        assert!(open_module(&app, ModuleId::new(999)).is_none());
        assert_eq!(
            app.learning().select(|state| state.current_module()),
            Some(ModuleId::new(1))
        );
    }

    #[test]
    fn relative_sqlite_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/app.sqlite3".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("data/app.sqlite3"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }
}
