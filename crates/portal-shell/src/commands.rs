//! Parsing of REPL input.
//!
//! Lines starting with `/` are top-level commands. Anything else is a form
//! command and only means something while a form is open.

use std::path::PathBuf;

use portal_core::certificate::{CertificateCategory, RecognitionKind};
use portal_core::error::{PortalError, Result};
use portal_core::id::EntityId;

/// Top-level commands, available everywhere.
pub const COMMANDS: [&str; 9] = [
    "/login",
    "/logout",
    "/whoami",
    "/dashboard",
    "/project",
    "/certificate",
    "/help",
    "/quit",
    "/exit",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Login { username: String, password: String },
    Logout,
    WhoAmI,
    Dashboard,
    ProjectNew,
    ProjectEdit(EntityId),
    ProjectDelete(EntityId),
    CertificateNew(Option<CertificateCategory>),
    CertificateDelete(EntityId),
    Help,
    Quit,
}

/// Which reference field of the open form a command targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldTarget {
    Technologies,
    Contributors,
}

/// Commands understood while a form is open. Positions are 1-based as
/// displayed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormCommand {
    Set { field: String, value: String },
    Query { target: FieldTarget, text: String },
    Enter,
    Pick(usize),
    Add(String),
    Remove(usize),
    Close,
    Recognition(RecognitionKind),
    File(PathBuf),
    Show,
    Submit,
    Cancel,
    Dismiss,
}

fn split_verb(line: &str) -> (&str, &str) {
    match line.trim().split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line.trim(), ""),
    }
}

fn required<'a>(rest: &'a str, usage: &str) -> Result<&'a str> {
    if rest.is_empty() {
        Err(PortalError::validation(format!("Usage: {usage}")))
    } else {
        Ok(rest)
    }
}

fn position(rest: &str, usage: &str) -> Result<usize> {
    required(rest, usage)?
        .parse::<usize>()
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| PortalError::validation(format!("Usage: {usage}")))
}

pub fn parse_command(line: &str) -> Result<Command> {
    let (verb, rest) = split_verb(line);
    match verb {
        "/login" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next(), parts.next()) {
                (Some(username), Some(password), None) => Ok(Command::Login {
                    username: username.to_string(),
                    password: password.to_string(),
                }),
                _ => Err(PortalError::validation("Usage: /login <username> <password>")),
            }
        }
        "/logout" => Ok(Command::Logout),
        "/whoami" => Ok(Command::WhoAmI),
        "/dashboard" => Ok(Command::Dashboard),
        "/project" => {
            let (action, arg) = split_verb(rest);
            match action {
                "new" => Ok(Command::ProjectNew),
                "edit" => Ok(Command::ProjectEdit(EntityId::new(required(arg, "/project edit <id>")?))),
                "delete" => Ok(Command::ProjectDelete(EntityId::new(required(
                    arg,
                    "/project delete <id>",
                )?))),
                _ => Err(PortalError::validation("Usage: /project new | edit <id> | delete <id>")),
            }
        }
        "/certificate" => {
            let (action, arg) = split_verb(rest);
            match action {
                "new" if arg.is_empty() => Ok(Command::CertificateNew(None)),
                "new" => arg
                    .parse::<CertificateCategory>()
                    .map(|category| Command::CertificateNew(Some(category)))
                    .map_err(|_| PortalError::validation(format!("Unknown certificate category: '{arg}'"))),
                "delete" => Ok(Command::CertificateDelete(EntityId::new(required(
                    arg,
                    "/certificate delete <id>",
                )?))),
                _ => Err(PortalError::validation(
                    "Usage: /certificate new [category] | delete <id>",
                )),
            }
        }
        "/help" => Ok(Command::Help),
        "/quit" | "/exit" => Ok(Command::Quit),
        other => Err(PortalError::validation(format!("Unknown command: {other}"))),
    }
}

pub fn parse_form_command(line: &str) -> Result<FormCommand> {
    let (verb, rest) = split_verb(line);
    match verb {
        "set" => {
            let (field, value) = split_verb(required(rest, "set <field> <value>")?);
            Ok(FormCommand::Set {
                field: field.to_string(),
                value: value.to_string(),
            })
        }
        "tech" => Ok(FormCommand::Query {
            target: FieldTarget::Technologies,
            text: rest.to_string(),
        }),
        "contrib" => Ok(FormCommand::Query {
            target: FieldTarget::Contributors,
            text: rest.to_string(),
        }),
        "enter" => Ok(FormCommand::Enter),
        "pick" => Ok(FormCommand::Pick(position(rest, "pick <n>")?)),
        "add" => Ok(FormCommand::Add(required(rest, "add <label>")?.to_string())),
        "remove" => Ok(FormCommand::Remove(position(rest, "remove <n>")?)),
        "close" => Ok(FormCommand::Close),
        "recognition" => rest
            .parse::<RecognitionKind>()
            .map(FormCommand::Recognition)
            .map_err(|_| PortalError::validation("Usage: recognition rank | other | none")),
        "file" => Ok(FormCommand::File(PathBuf::from(required(rest, "file <path>")?))),
        "show" => Ok(FormCommand::Show),
        "submit" => Ok(FormCommand::Submit),
        "cancel" => Ok(FormCommand::Cancel),
        "dismiss" => Ok(FormCommand::Dismiss),
        other => Err(PortalError::validation(format!(
            "Unknown form command: {other} (try 'show' or /help)"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("/login alice s3cret").unwrap(),
            Command::Login {
                username: "alice".to_string(),
                password: "s3cret".to_string()
            }
        );
        assert!(parse_command("/login alice").is_err());
        assert_eq!(
            parse_command("/project edit 12").unwrap(),
            Command::ProjectEdit(EntityId::from("12"))
        );
        assert_eq!(parse_command("/certificate new").unwrap(), Command::CertificateNew(None));
        assert_eq!(
            parse_command("/certificate new foreign").unwrap(),
            Command::CertificateNew(Some(CertificateCategory::ForeignLanguage))
        );
        assert!(parse_command("/certificate new sports").is_err());
        assert_eq!(parse_command("  /exit ").unwrap(), Command::Quit);
        assert!(parse_command("/frobnicate").is_err());
    }

    #[test]
    fn test_parse_form_commands() {
        assert_eq!(
            parse_form_command("set title My Portal").unwrap(),
            FormCommand::Set {
                field: "title".to_string(),
                value: "My Portal".to_string()
            }
        );
        assert_eq!(
            parse_form_command("tech ru").unwrap(),
            FormCommand::Query {
                target: FieldTarget::Technologies,
                text: "ru".to_string()
            }
        );
        assert_eq!(parse_form_command("pick 2").unwrap(), FormCommand::Pick(2));
        assert!(parse_form_command("pick 0").is_err());
        assert!(parse_form_command("add   ").is_err());
        assert_eq!(
            parse_form_command("recognition other").unwrap(),
            FormCommand::Recognition(RecognitionKind::OtherRecognition)
        );
        assert_eq!(
            parse_form_command("file ./scan.pdf").unwrap(),
            FormCommand::File(PathBuf::from("./scan.pdf"))
        );
    }
}
