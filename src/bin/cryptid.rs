use std::io;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rand::rngs::OsRng;
use tracing::Level;

use cryptid::{Error, Registry};

#[derive(Debug, Parser)]
#[command(name = "cryptid", version)]
#[command(about = "Identify, verify and generate Unix crypt-style password hashes")]
#[command(infer_subcommands = true)]
struct Cli {
    /// Set the logging level
    #[arg(long, value_enum, global = true, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Level {
        match level {
            LogLevel::Trace => Level::TRACE,
            LogLevel::Debug => Level::DEBUG,
            LogLevel::Info => Level::INFO,
            LogLevel::Warn => Level::WARN,
            LogLevel::Error => Level::ERROR,
        }
    }
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Identify the format of an encoded hash
    Id(IdArgs),
    /// Check a password against an encoded hash
    Check(CheckArgs),
    /// Generate an encoded hash from a password
    Generate(GenerateArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Args)]
struct IdArgs {
    /// Password hash in encoded format
    encoded_hash: String,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Password hash in encoded format
    encoded_hash: String,
    /// Password to test against the hash; prompted for when omitted
    password: Option<String>,
}

#[derive(Debug, Args)]
struct GenerateArgs {
    /// Hash function used to generate the password hash
    #[arg(long, short)]
    function: String,
    /// CPU time cost; zero selects the function's default
    #[arg(long, short, default_value_t = 0)]
    cost: u64,
    /// Password to hash; prompted for when omitted
    password: Option<String>,
}

type CmdResult = Result<(), Box<dyn std::error::Error>>;

fn id(registry: &Registry, args: IdArgs) -> CmdResult {
    let matches = registry.identify(&args.encoded_hash);
    if matches.is_empty() {
        return Err(Error::NoFormatMatch.into());
    }
    print_list("Matching hash formats:", &matches);
    Ok(())
}

fn check(registry: &Registry, args: CheckArgs) -> CmdResult {
    let password = prompt_password(args.password, false)?;
    match registry.verify(&args.encoded_hash, password.as_bytes()) {
        Ok(v) => {
            print_list("Matching hash formats:", &v.format_matches);
            print_list("Password matches hash for:", &v.password_matches);
            Ok(())
        }
        Err(Error::NoPasswordMatch { formats }) => {
            print_list("Matching hash formats:", &formats);
            Err(Error::NoPasswordMatch { formats }.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn generate(registry: &Registry, args: GenerateArgs) -> CmdResult {
    let password = prompt_password(args.password, true)?;
    let encoded =
        registry.generate(&args.function, password.as_bytes(), args.cost, &mut OsRng)?;
    println!("{encoded}");
    Ok(())
}

fn print_list(heading: &str, ids: &[&str]) {
    println!("{heading}");
    for id in ids {
        println!("* {id}");
    }
}

fn prompt_password(password: Option<String>, confirm: bool) -> io::Result<String> {
    match password {
        Some(pw) => Ok(pw),
        None if !confirm => rpassword::prompt_password("Password: "),
        None => loop {
            let pw = rpassword::prompt_password("Enter new password: ")?;
            let confirmed = rpassword::prompt_password("Retype new password: ")?;
            if pw == confirmed {
                return Ok(pw);
            }
            println!("Error: Passwords don't match!");
        },
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(Level::from(cli.log_level))
        .with_target(false)
        .init();

    let registry = Registry::new();
    let result = match cli.command {
        Commands::Id(args) => id(&registry, args),
        Commands::Check(args) => check(&registry, args),
        Commands::Generate(args) => generate(&registry, args),
        Commands::Version => {
            println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
