use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GlobalArgs {
    /// Explicit `--config`; `None` means the optional default `quizdb.toml`.
    pub config: Option<PathBuf>,
    pub database: Option<String>,
}

/// Where a JSON request body comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Inline(String),
    File(PathBuf),
}

impl Body {
    pub fn read(&self) -> anyhow::Result<String> {
        match self {
            Self::Inline(s) => Ok(s.clone()),
            Self::File(path) => std::fs::read_to_string(path)
                .map_err(|e| anyhow::anyhow!("failed to read {}: {e}", path.display())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Migrate,
    List,
    Show { id: i32 },
    Create { body: Body },
    Update { id: i32, body: Body },
    Delete { id: i32 },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub global: GlobalArgs,
    pub command: Command,
}

pub fn parse_args(args: &[String]) -> anyhow::Result<Invocation> {
    let mut it = args.iter().skip(1).map(|s| s.as_str());

    let mut global = GlobalArgs::default();
    let mut subcmd: Option<&str> = None;
    let mut positional: Vec<&str> = Vec::new();
    let mut body: Option<Body> = None;

    while let Some(token) = it.next() {
        match token {
            "-h" | "--help" => {
                return Ok(Invocation {
                    global,
                    command: Command::Help,
                });
            }
            "--config" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--config requires a value");
                };
                global.config = Some(PathBuf::from(v));
            }
            _ if token.starts_with("--config=") => {
                global.config = Some(PathBuf::from(token.trim_start_matches("--config=")));
            }
            "--database" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--database requires a value");
                };
                global.database = Some(v.to_string());
            }
            _ if token.starts_with("--database=") => {
                global.database = Some(token.trim_start_matches("--database=").to_string());
            }
            "--json" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--json requires a value");
                };
                set_body(&mut body, Body::Inline(v.to_string()))?;
            }
            _ if token.starts_with("--json=") => {
                set_body(&mut body, Body::Inline(token.trim_start_matches("--json=").to_string()))?;
            }
            "--file" => {
                let Some(v) = it.next() else {
                    anyhow::bail!("--file requires a value");
                };
                set_body(&mut body, Body::File(PathBuf::from(v)))?;
            }
            _ if token.starts_with("--file=") => {
                set_body(&mut body, Body::File(PathBuf::from(token.trim_start_matches("--file="))))?;
            }
            _ if token.starts_with('-') => anyhow::bail!("unknown argument: {token}"),
            _ if subcmd.is_none() => subcmd = Some(token),
            _ => positional.push(token),
        }
    }

    let Some(subcmd) = subcmd else {
        return Ok(Invocation {
            global,
            command: Command::Help,
        });
    };

    let command = match subcmd {
        "migrate" => {
            expect_positionals(subcmd, &positional, 0)?;
            Command::Migrate
        }
        "list" => {
            expect_positionals(subcmd, &positional, 0)?;
            Command::List
        }
        "show" => Command::Show {
            id: parse_id(subcmd, &positional)?,
        },
        "delete" => Command::Delete {
            id: parse_id(subcmd, &positional)?,
        },
        "create" => {
            expect_positionals(subcmd, &positional, 0)?;
            Command::Create {
                body: require_body(subcmd, body.take())?,
            }
        }
        "update" => Command::Update {
            id: parse_id(subcmd, &positional)?,
            body: require_body(subcmd, body.take())?,
        },
        other => anyhow::bail!("unknown command: {other}"),
    };

    if body.is_some() {
        anyhow::bail!("{subcmd} does not take a request body");
    }

    Ok(Invocation { global, command })
}

fn set_body(slot: &mut Option<Body>, body: Body) -> anyhow::Result<()> {
    if slot.is_some() {
        anyhow::bail!("pass the request body once, with either --json or --file");
    }
    *slot = Some(body);
    Ok(())
}

fn require_body(subcmd: &str, body: Option<Body>) -> anyhow::Result<Body> {
    body.ok_or_else(|| anyhow::anyhow!("{subcmd} requires --json <DOC> or --file <PATH>"))
}

fn expect_positionals(subcmd: &str, positional: &[&str], n: usize) -> anyhow::Result<()> {
    if positional.len() != n {
        anyhow::bail!(
            "{subcmd} takes {n} positional argument(s), got {}",
            positional.len()
        );
    }
    Ok(())
}

fn parse_id(subcmd: &str, positional: &[&str]) -> anyhow::Result<i32> {
    expect_positionals(subcmd, positional, 1)?;
    positional[0]
        .parse::<i32>()
        .map_err(|_| anyhow::anyhow!("invalid quiz id: {}", positional[0]))
}

pub fn print_help() {
    println!(
        "\
quizdb - quiz storage for PostgreSQL

USAGE:
  quizdb [OPTIONS] <COMMAND>

COMMANDS:
  migrate               Apply embedded schema migrations
  list                  Print all quizzes
  show <ID>             Print one quiz
  create                Insert a quiz (question, options, answers required)
  update <ID>           Partially update a quiz (question, options, answers)
  delete <ID>           Delete a quiz

OPTIONS:
  --config <FILE>       Config file path (default: quizdb.toml, optional)
  --database <URL>      Override database.url from config
  --json <DOC>          Request body for create/update
  --file <PATH>         Read the request body from a file
  -h, --help            Print help

Set RUST_LOG=quizdb.sql=debug to log executed statements."
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("quizdb")
            .chain(list.iter().copied())
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn no_command_prints_help() {
        assert_eq!(parse_args(&args(&[])).unwrap().command, Command::Help);
        assert_eq!(
            parse_args(&args(&["update", "--help"])).unwrap().command,
            Command::Help
        );
    }

    #[test]
    fn parse_update_with_inline_json() {
        let inv = parse_args(&args(&[
            "--database",
            "postgres://localhost/test_db",
            "update",
            "12",
            "--json",
            r#"{"question": "New Q?"}"#,
        ]))
        .unwrap();

        assert_eq!(
            inv.global.database.as_deref(),
            Some("postgres://localhost/test_db")
        );
        assert_eq!(
            inv.command,
            Command::Update {
                id: 12,
                body: Body::Inline(r#"{"question": "New Q?"}"#.to_string()),
            }
        );
    }

    #[test]
    fn parse_create_from_file() {
        let inv = parse_args(&args(&["create", "--file=quiz.json", "--config=local.toml"])).unwrap();
        assert_eq!(inv.global.config, Some(PathBuf::from("local.toml")));
        assert_eq!(
            inv.command,
            Command::Create {
                body: Body::File(PathBuf::from("quiz.json")),
            }
        );
    }

    #[test]
    fn body_is_required_and_exclusive() {
        assert!(parse_args(&args(&["update", "1"])).is_err());
        assert!(parse_args(&args(&["create", "--json", "{}", "--file", "a.json"])).is_err());
        assert!(parse_args(&args(&["delete", "1", "--json", "{}"])).is_err());
    }

    #[test]
    fn ids_are_validated() {
        assert!(parse_args(&args(&["show"])).is_err());
        assert!(parse_args(&args(&["show", "abc"])).is_err());
        assert!(parse_args(&args(&["delete", "1", "2"])).is_err());
        assert_eq!(
            parse_args(&args(&["delete", "3"])).unwrap().command,
            Command::Delete { id: 3 }
        );
    }

    #[test]
    fn unknown_input_is_rejected() {
        assert!(parse_args(&args(&["frobnicate"])).is_err());
        assert!(parse_args(&args(&["list", "--verbose"])).is_err());
        assert!(parse_args(&args(&["list", "extra"])).is_err());
    }
}
