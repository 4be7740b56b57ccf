//! Argument parsing for the `coursedesk-validate` binary.

use std::path::PathBuf;

use coursedesk_core::error::CoreError;
use coursedesk_core::forms::FormKind;

pub const USAGE: &str = "\
Usage:
  coursedesk-validate <form> <snapshot.json>
  coursedesk-validate --rules <rules.json> <snapshot.json>
  coursedesk-validate --print-rules <form>
  coursedesk-validate --list

Forms: course, video, pdf, quiz, contact_info";

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    /// Validate a snapshot against a built-in form rule set.
    ValidateForm { form: FormKind, snapshot: PathBuf },
    /// Validate a snapshot against a rule set loaded from JSON.
    ValidateRules { rules: PathBuf, snapshot: PathBuf },
    /// Dump a built-in rule set as JSON.
    PrintRules { form: FormKind },
    /// List the built-in forms.
    List,
    Help,
}

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("Missing argument: {0}")]
    MissingArgument(&'static str),

    #[error("Unexpected argument '{0}'")]
    UnexpectedArgument(String),

    #[error(transparent)]
    Form(#[from] CoreError),
}

/// Parse the arguments that follow the program name.
pub fn parse_args<S: AsRef<str>>(args: &[S]) -> Result<Invocation, CliError> {
    let args: Vec<&str> = args.iter().map(|s| s.as_ref()).collect();
    let mut it = args.into_iter();

    let invocation = match it.next() {
        None | Some("-h") | Some("--help") => Invocation::Help,
        Some("--list") => Invocation::List,
        Some("--print-rules") => {
            let form = it.next().ok_or(CliError::MissingArgument("<form>"))?;
            Invocation::PrintRules {
                form: FormKind::parse(form)?,
            }
        }
        Some("--rules") => {
            let rules = it.next().ok_or(CliError::MissingArgument("<rules.json>"))?;
            let snapshot = it
                .next()
                .ok_or(CliError::MissingArgument("<snapshot.json>"))?;
            Invocation::ValidateRules {
                rules: PathBuf::from(rules),
                snapshot: PathBuf::from(snapshot),
            }
        }
        Some(flag) if flag.starts_with('-') => {
            return Err(CliError::UnexpectedArgument(flag.to_string()));
        }
        Some(form) => {
            let form = FormKind::parse(form)?;
            let snapshot = it
                .next()
                .ok_or(CliError::MissingArgument("<snapshot.json>"))?;
            Invocation::ValidateForm {
                form,
                snapshot: PathBuf::from(snapshot),
            }
        }
    };

    match it.next() {
        Some(extra) => Err(CliError::UnexpectedArgument(extra.to_string())),
        None => Ok(invocation),
    }
}
