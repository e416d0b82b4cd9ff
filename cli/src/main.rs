use std::process::ExitCode;

use clap::{Parser, Subcommand};
use lib::{
    Checks, Frame, FrameInfo, Value,
    descriptor::Descriptor,
    error::{Error, Result},
    format,
    value::Call,
};
use std_lib::{PRELUDE, init_registry};
use tracing::debug;

mod literal;
mod std_lib;

/// Check literal call arguments against type descriptors.
#[derive(Parser, Debug)]
#[command(name = "argcheck")]
struct Args {
    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show what a descriptor accepts
    Explain { descriptor: String },
    /// Validate arguments against one descriptor per position
    Check {
        #[command(flatten)]
        frame: FrameArgs,
        /// Level the error is attributed to
        #[arg(short, long, default_value_t = 1)]
        level: usize,
        /// Argument values, in order
        #[arg(short = 'a', long = "arg", value_name = "VALUE", allow_hyphen_values = true)]
        args: Vec<String>,
        #[arg(required = true)]
        descriptors: Vec<String>,
    },
    /// Validate a single argument against literal options
    #[command(name = "option")]
    CheckOption {
        #[command(flatten)]
        frame: FrameArgs,
        descriptor: String,
        #[arg(allow_hyphen_values = true)]
        value: String,
    },
    /// Call a native function of the demo prelude
    Call {
        name: String,
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(clap::Args, Debug)]
struct FrameArgs {
    /// Name of the function being called
    #[arg(short, long, default_value = "main")]
    function: String,
    /// Declared parameter count; extra arguments become variadic
    #[arg(short, long)]
    params: Option<usize>,
    /// Source location prefixed to errors
    #[arg(long)]
    location: Option<String>,
    /// Treat the first argument as the method receiver
    #[arg(long)]
    method: bool,
}

impl FrameArgs {
    fn build(self, args: Vec<Value>) -> Frame {
        let info = FrameInfo {
            name: Some(self.function),
            location: self.location,
            method: self.method,
        };
        let parameters = self.params.unwrap_or(args.len());
        Frame::with_info(info, parameters, args)
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing(args.verbose);

    if let Err(e) = init_registry() {
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }
    match run(args.command) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<String> {
    match command {
        Command::Explain { descriptor } => {
            let descriptor = Descriptor::parse_trailing(&descriptor)?;
            Ok(format!(
                "mode: {:?}\nexpects: {}",
                descriptor.mode(),
                format::expected(&descriptor)
            ))
        }
        Command::Check {
            frame,
            level,
            args,
            descriptors,
        } => {
            let frame = frame.build(args.iter().map(|arg| literal::parse(arg)).collect());
            debug!(?frame, "checking call");
            let descriptors: Vec<&str> = descriptors.iter().map(String::as_str).collect();
            Checks::new(&frame).at_level(level).check_types(&descriptors)?;
            Ok(String::from("ok"))
        }
        Command::CheckOption {
            frame,
            descriptor,
            value,
        } => {
            let frame = frame.build(vec![literal::parse(&value)]);
            Checks::new(&frame).check_option(1, &descriptor)?;
            Ok(String::from("ok"))
        }
        Command::Call { name, args } => {
            let function = PRELUDE.with(|prelude| prelude.get(&name));
            let Some(Value::Function(function)) = function else {
                return Err(Error::new(format!("no native function '{name}'")));
            };
            let result = function.call(args.iter().map(|arg| literal::parse(arg)).collect())?;
            Ok(literal::render(&result))
        }
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check(descriptors: &[&str], args: &[&str]) -> Result<String> {
        run(Command::Check {
            frame: FrameArgs {
                function: String::from("demo"),
                params: None,
                location: None,
                method: false,
            },
            level: 1,
            args: args.iter().map(|arg| arg.to_string()).collect(),
            descriptors: descriptors.iter().map(|d| d.to_string()).collect(),
        })
    }

    #[test]
    fn explain() {
        let output = run(Command::Explain {
            descriptor: String::from("?table|string"),
        })
        .unwrap();
        assert_eq!(output, "mode: Optional\nexpects: nil, table, or string");
        assert!(run(Command::Explain { descriptor: String::new() }).is_err());
    }

    #[test]
    fn check_command() {
        assert_eq!(check(&["table"], &["{}"]).unwrap(), "ok");
        assert_eq!(check(&["table", "*string"], &["{}", "x", "y"]).unwrap(), "ok");
        assert_eq!(
            check(&["table", "*string"], &["{}", "x", "5"]).unwrap_err().to_string(),
            "bad argument #3 to 'demo' (string expected, got number)"
        );
    }

    #[test]
    fn option_command() {
        let args = Args::try_parse_from(["argcheck", "option", "-f", "open", "read|write", "exec"])
            .unwrap();
        let Command::CheckOption { frame, descriptor, value } = &args.command else {
            panic!("expected the option subcommand");
        };
        assert_eq!(frame.function, "open");
        assert_eq!((descriptor.as_str(), value.as_str()), ("read|write", "exec"));
        assert_eq!(
            run(args.command).unwrap_err().to_string(),
            "bad argument #1 to 'open' ('read' or 'write' expected, got 'exec')"
        );
        assert!(Args::try_parse_from(["argcheck", "check-option", "a", "a"]).is_err());
    }

    #[test]
    fn call_command() {
        let call = |name: &str, args: &[&str]| {
            run(Command::Call {
                name: name.to_string(),
                args: args.iter().map(|arg| arg.to_string()).collect(),
            })
        };
        assert_eq!(call("repeat", &["ab", "3"]).unwrap(), "ababab");
        assert_eq!(call("type_of", &["{Point}"]).unwrap(), "Point");
        assert_eq!(
            call("clamp", &["x", "1", "2"]).unwrap_err().to_string(),
            "bad argument #1 to 'clamp' (number expected, got string)"
        );
        assert!(call("missing", &[]).is_err());
    }
}
