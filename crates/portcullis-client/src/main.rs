//! ```sh
//! PORTCULLIS_PASSWORD=x cargo r -p portcullis-client -F binary -- --page-url 'https://auth.richmond.gg/?redirectTo=%2Fhome' login george
//! ```

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use portcullis_client::form::{redirect_target_from_url, Action, Form, Outcome};
use portcullis_client::{Client, DEFAULT_API_BASE};
use std::io::{BufRead, Write};
use std::process::ExitCode;
use tracing::Level;

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Auth API base URL
    #[arg(long, env = "PORTCULLIS_API_BASE", default_value = DEFAULT_API_BASE)]
    api_base: String,
    /// Page the form was opened from; its `redirectTo` query parameter is followed on success
    #[arg(long, conflicts_with = "redirect_to")]
    page_url: Option<String>,
    /// Where to go after a successful submission
    #[arg(long)]
    redirect_to: Option<String>,
    /// Log more (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Login(CredentialArgs),
    Signup(CredentialArgs),
}

#[derive(Debug, clap::Args)]
struct CredentialArgs {
    username: String,
    /// Read from stdin when not given
    #[arg(long, env = "PORTCULLIS_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let args = Args::parse();

    let level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        _ => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let (action, credentials) = match args.command {
        Commands::Login(credentials) => (Action::Login, credentials),
        Commands::Signup(credentials) => (Action::Signup, credentials),
    };

    let password = match credentials.password {
        Some(password) => password,
        None => prompt_password().context("Failed to read password from stdin")?,
    };

    let redirect_to = args
        .redirect_to
        .or_else(|| args.page_url.as_deref().and_then(redirect_target_from_url));

    let client = Client::new(&args.api_base);
    let mut form = Form::new(credentials.username, password).with_redirect(redirect_to);

    let outcome = form.submit(&client, action).await;

    println!("{}", form.render());

    Ok(match outcome {
        Outcome::Redirect(target) => {
            println!("Redirecting to {target}");
            ExitCode::SUCCESS
        },
        Outcome::Displayed => ExitCode::SUCCESS,
        Outcome::Failed => ExitCode::FAILURE,
    })
}

fn prompt_password() -> std::io::Result<String> {
    let mut stderr = std::io::stderr();
    write!(stderr, "Password: ")?;
    stderr.flush()?;

    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_owned())
}
