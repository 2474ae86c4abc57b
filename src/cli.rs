//! Command-line arguments

/// What the launcher should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Run the HTTP server
    Serve { port: Option<u16> },

    /// Run one pipeline and print the timeline
    Run {
        prompt: String,
        workflow: Option<String>,
    },

    /// Print the sample configuration file
    SampleConfig,

    /// Print usage
    Help,
}

/// Parse command-line arguments (without the program name)
pub fn parse<I>(args: I) -> Result<Mode, String>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();

    match args.next().as_deref() {
        None | Some("serve") => parse_serve(args),
        Some("run") => parse_run(args),
        Some("--sample-config") => Ok(Mode::SampleConfig),
        Some("--help") | Some("-h") | Some("help") => Ok(Mode::Help),
        Some(other) => Err(format!("Unknown command: {}", other)),
    }
}

fn parse_serve(mut args: impl Iterator<Item = String>) -> Result<Mode, String> {
    let mut port = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--port" | "-p" => {
                let value = args.next().ok_or("--port needs a value")?;
                port = Some(
                    value
                        .parse()
                        .map_err(|_| format!("Invalid port: {}", value))?,
                );
            }
            _ => return Err(format!("Unexpected argument: {}", arg)),
        }
    }

    Ok(Mode::Serve { port })
}

fn parse_run(mut args: impl Iterator<Item = String>) -> Result<Mode, String> {
    let mut words = Vec::new();
    let mut workflow = None;

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--workflow" | "-w" => {
                workflow = Some(args.next().ok_or("--workflow needs a value")?);
            }
            _ => words.push(arg),
        }
    }

    if words.is_empty() {
        return Err("run needs a prompt".to_string());
    }

    Ok(Mode::Run {
        prompt: words.join(" "),
        workflow,
    })
}

pub const USAGE: &str = "\
Usage:
  relay [serve] [--port N]                 Run the HTTP server
  relay run <prompt...> [--workflow W]     Run one agent pipeline (W: editorial, dev, auto)
  relay --sample-config                    Print a sample .relay.toml
";

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(s: &[&str]) -> Vec<String> {
        s.iter().map(|a| a.to_string()).collect()
    }

    #[test]
    fn test_default_is_serve() {
        assert_eq!(parse(args(&[])), Ok(Mode::Serve { port: None }));
        assert_eq!(
            parse(args(&["serve", "--port", "9000"])),
            Ok(Mode::Serve { port: Some(9000) })
        );
    }

    #[test]
    fn test_run_joins_prompt_words() {
        assert_eq!(
            parse(args(&["run", "write", "a", "haiku", "-w", "editorial"])),
            Ok(Mode::Run {
                prompt: "write a haiku".to_string(),
                workflow: Some("editorial".to_string()),
            })
        );
    }

    #[test]
    fn test_errors() {
        assert!(parse(args(&["run"])).is_err());
        assert!(parse(args(&["serve", "--port", "x"])).is_err());
        assert!(parse(args(&["deploy"])).is_err());
    }
}
