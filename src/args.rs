//! Command-line argument parsing.

use std::path::PathBuf;

/// One parsed CLI invocation.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    /// Force a full rebuild of the selector index.
    Reindex { root: Option<PathBuf> },
    /// Import the component registered for `selector` into `target`.
    Import {
        selector: String,
        target: Option<PathBuf>,
    },
    /// Like `Import`, but the selector is read from stdin.
    PromptImport { target: Option<PathBuf> },
    /// List selectors containing a tag-opening fragment.
    Complete { fragment: String },
    /// Print the full record for one selector.
    Lookup { selector: String },
    /// Long-running mode: timer and file-creation rebuilds.
    Watch { root: Option<PathBuf> },
    Help,
    Version,
}

pub fn parse_args(args: &[String]) -> Result<Command, String> {
    let mut iter = args.iter();
    let Some(first) = iter.next() else {
        return Ok(Command::Help);
    };
    match first.as_str() {
        "-h" | "--help" | "help" => Ok(Command::Help),
        "-V" | "--version" | "version" => Ok(Command::Version),
        "reindex" => Ok(Command::Reindex {
            root: iter.next().map(PathBuf::from),
        }),
        "import" => {
            let selector = iter
                .next()
                .cloned()
                .ok_or_else(|| "import requires a selector".to_string())?;
            Ok(Command::Import {
                selector,
                target: iter.next().map(PathBuf::from),
            })
        }
        "prompt-import" => Ok(Command::PromptImport {
            target: iter.next().map(PathBuf::from),
        }),
        "complete" => {
            let fragment = iter
                .next()
                .cloned()
                .ok_or_else(|| "complete requires a fragment".to_string())?;
            Ok(Command::Complete { fragment })
        }
        "lookup" => {
            let selector = iter
                .next()
                .cloned()
                .ok_or_else(|| "lookup requires a selector".to_string())?;
            Ok(Command::Lookup { selector })
        }
        "watch" => Ok(Command::Watch {
            root: iter.next().map(PathBuf::from),
        }),
        other => Err(format!("unknown command '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command, String> {
        let owned: Vec<String> = args.iter().map(|s| s.to_string()).collect();
        parse_args(&owned)
    }

    #[test]
    fn no_args_shows_help() {
        assert_eq!(parse(&[]), Ok(Command::Help));
    }

    #[test]
    fn reindex_takes_optional_root() {
        assert_eq!(parse(&["reindex"]), Ok(Command::Reindex { root: None }));
        assert_eq!(
            parse(&["reindex", "frontend"]),
            Ok(Command::Reindex {
                root: Some(PathBuf::from("frontend"))
            })
        );
    }

    #[test]
    fn import_requires_a_selector() {
        assert!(parse(&["import"]).is_err());
        assert_eq!(
            parse(&["import", "app-foo", "src/bar.component.ts"]),
            Ok(Command::Import {
                selector: "app-foo".to_string(),
                target: Some(PathBuf::from("src/bar.component.ts")),
            })
        );
    }

    #[test]
    fn import_without_target_parses_with_none() {
        assert_eq!(
            parse(&["import", "app-foo"]),
            Ok(Command::Import {
                selector: "app-foo".to_string(),
                target: None,
            })
        );
    }

    #[test]
    fn unknown_command_is_an_error() {
        assert!(parse(&["frobnicate"]).is_err());
    }
}
