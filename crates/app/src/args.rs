use std::fmt;
use std::path::PathBuf;

use drive_core::model::LessonId;

pub const DEFAULT_DB_URL: &str = "sqlite://drivesafe.sqlite3";
pub const DEFAULT_HOLDER: &str = "Alex Driver";

#[derive(Debug)]
pub enum ArgsError {
    MissingValue { flag: &'static str },
    MissingLessonId,
    UnknownArg(String),
    UnknownCommand(String),
    InvalidLessonId { raw: String },
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingLessonId => write!(f, "lesson requires a lesson id"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::InvalidLessonId { raw } => write!(f, "invalid lesson id: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status { json: bool },
    Lessons,
    Lesson(LessonId),
    Quiz,
    Exam { force: bool },
    License,
    Reset { yes: bool },
    Help,
}

/// Runtime settings, from `DRIVESAFE_*` env vars overridden by flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub db_url: String,
    pub content_dir: Option<PathBuf>,
    pub holder: String,
}

impl Config {
    fn from_env() -> Self {
        Self {
            db_url: std::env::var("DRIVESAFE_DB_URL")
                .ok()
                .map_or_else(|| DEFAULT_DB_URL.into(), normalize_sqlite_url),
            content_dir: std::env::var_os("DRIVESAFE_CONTENT_DIR").map(PathBuf::from),
            holder: std::env::var("DRIVESAFE_HOLDER").unwrap_or_else(|_| DEFAULT_HOLDER.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Args {
    pub command: Command,
    pub config: Config,
}

pub const BIN_NAME: &str = "drivesafe";

pub fn usage() -> String {
    let commands = [
        ("status   [--json]", "progress overview"),
        ("lessons", "list lessons"),
        ("lesson <id>", "read a lesson and take its quiz"),
        ("quiz", "practice quiz over the question bank"),
        ("exam     [--force]", "final exam (locked until all lessons are done)"),
        ("license", "show the issued license"),
        ("reset    [--yes]", "discard all progress"),
    ];
    let mut out = String::from("Usage:\n");
    for (command, about) in commands {
        out.push_str(&format!("  {BIN_NAME} {command:<20} {about}\n"));
    }
    out.push_str("\nGlobal flags:\n");
    out.push_str(&format!("  --db <sqlite_url>    default {DEFAULT_DB_URL}\n"));
    out.push_str("  --content <dir>      directory with lessons.json and questions.json\n");
    out.push_str("  --holder <name>      name printed on the license\n");
    out.push_str("\nEnvironment:\n");
    out.push_str("  DRIVESAFE_DB_URL, DRIVESAFE_CONTENT_DIR, DRIVESAFE_HOLDER, RUST_LOG\n");
    out
}

pub fn print_usage() {
    eprint!("{}", usage());
}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

impl Args {
    pub fn parse() -> Result<Self, ArgsError> {
        Self::parse_from(std::env::args().skip(1), Config::from_env())
    }

    pub fn parse_from(
        args: impl IntoIterator<Item = String>,
        mut config: Config,
    ) -> Result<Self, ArgsError> {
        let mut args = args.into_iter();
        let mut command_name: Option<String> = None;
        let mut positional: Vec<String> = Vec::new();
        let mut json = false;
        let mut force = false;
        let mut yes = false;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(&mut args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    config.db_url = normalize_sqlite_url(value);
                }
                "--content" => {
                    config.content_dir = Some(PathBuf::from(require_value(&mut args, "--content")?));
                }
                "--holder" => config.holder = require_value(&mut args, "--holder")?,
                "--json" => json = true,
                "--force" => force = true,
                "--yes" | "-y" => yes = true,
                "--help" | "-h" => command_name = Some("help".into()),
                _ if arg.starts_with('-') => return Err(ArgsError::UnknownArg(arg)),
                _ if command_name.is_none() => command_name = Some(arg),
                _ => positional.push(arg),
            }
        }

        let command = match command_name.as_deref().unwrap_or("status") {
            "status" => Command::Status { json },
            "lessons" => Command::Lessons,
            "lesson" => {
                let raw = positional.pop().ok_or(ArgsError::MissingLessonId)?;
                let id = raw
                    .parse::<LessonId>()
                    .map_err(|_| ArgsError::InvalidLessonId { raw: raw.clone() })?;
                Command::Lesson(id)
            }
            "quiz" => Command::Quiz,
            "exam" => Command::Exam { force },
            "license" => Command::License,
            "reset" => Command::Reset { yes },
            "help" => Command::Help,
            other => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        Ok(Self { command, config })
    }
}

pub fn normalize_sqlite_url(raw: String) -> String {
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
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            db_url: DEFAULT_DB_URL.into(),
            content_dir: None,
            holder: DEFAULT_HOLDER.into(),
        }
    }

    fn parse(args: &[&str]) -> Result<Args, ArgsError> {
        Args::parse_from(args.iter().map(|s| (*s).to_string()), config())
    }

    #[test]
    fn defaults_to_status() {
        let args = parse(&[]).unwrap();
        assert_eq!(args.command, Command::Status { json: false });
        assert_eq!(args.config, config());
    }

    #[test]
    fn parses_lesson_id_and_flags_in_any_order() {
        let args = parse(&["--holder", "Sam", "lesson", "3", "--db", "sqlite::memory:"]).unwrap();
        assert_eq!(args.command, Command::Lesson(LessonId::new(3)));
        assert_eq!(args.config.holder, "Sam");
        assert_eq!(args.config.db_url, "sqlite::memory:");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(matches!(parse(&["lesson"]), Err(ArgsError::MissingLessonId)));
        assert!(matches!(
            parse(&["lesson", "abc"]),
            Err(ArgsError::InvalidLessonId { .. })
        ));
        assert!(matches!(parse(&["fly"]), Err(ArgsError::UnknownCommand(_))));
        assert!(matches!(parse(&["--verbose"]), Err(ArgsError::UnknownArg(_))));
        assert!(matches!(
            parse(&["--db"]),
            Err(ArgsError::MissingValue { flag: "--db" })
        ));
    }

    #[test]
    fn command_flags() {
        assert_eq!(parse(&["exam", "--force"]).unwrap().command, Command::Exam { force: true });
        assert_eq!(parse(&["reset", "-y"]).unwrap().command, Command::Reset { yes: true });
        assert_eq!(
            parse(&["status", "--json"]).unwrap().command,
            Command::Status { json: true }
        );
    }

    #[test]
    fn normalizes_relative_sqlite_paths() {
        let url = normalize_sqlite_url("sqlite:progress.db".into());
        assert!(url.starts_with("sqlite:///"));
        assert!(url.ends_with("progress.db"));
        assert_eq!(
            normalize_sqlite_url("sqlite://already.db".into()),
            "sqlite://already.db"
        );
    }

    #[test]
    fn usage_names_the_binary() {
        let text = usage();
        for line in text.lines().skip(1).take_while(|line| !line.is_empty()) {
            assert!(line.trim_start().starts_with("drivesafe "), "{line}");
        }
        assert!(text.contains("drivesafe exam"));
        assert!(!text.contains("  app "));
    }
}
