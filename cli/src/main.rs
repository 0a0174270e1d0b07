use std::io::IsTerminal;

use fileclient::{config, run_once, Action, Client, Config, Session, UreqTransport};
use fileclient_core::Dispatcher;
use tokio::io::BufReader;
use tracing_subscriber::FmtSubscriber;

type BoxedError = Box<dyn std::error::Error + Send + Sync + 'static>;

#[tokio::main]
async fn main() -> std::result::Result<(), BoxedError> {
    let matches = config::command().get_matches();
    let config = Config::from_matches(&matches)?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    tracing::info!(server = %config.server, policy = %config.policy, "starting fileclient");

    let client = Client::new(
        Dispatcher::new(&config.server),
        UreqTransport::new(config.timeout),
        config.policy,
    );
    let mut stdout = std::io::stdout();

    let (action, arguments) = match matches.subcommand() {
        Some(("get", arguments)) => (Action::Get, arguments),
        Some(("put", arguments)) => (Action::Put, arguments),
        Some(("post", arguments)) => (Action::Post, arguments),
        Some(("delete", arguments)) => (Action::Delete, arguments),
        _ => {
            let interactive = std::io::stdin().is_terminal();
            let mut session = Session::new(client).with_prompt(interactive);
            session.run(BufReader::new(tokio::io::stdin()), &mut stdout).await?;
            return Ok(());
        }
    };

    let path = argument(arguments, "path");
    let body = argument(arguments, "body");
    if let Err(err) = run_once(&client, action, path, body, &mut stdout).await {
        tracing::debug!(error = ?err, "one-shot request did not complete");
        eprintln!("{}", err.user_message());
        std::process::exit(1);
    }
    Ok(())
}

/// `post` has no path and `get`/`delete` have no body; missing ones read as empty.
fn argument<'a>(arguments: &'a clap::ArgMatches, id: &str) -> &'a str {
    arguments
        .try_get_one::<String>(id)
        .ok()
        .flatten()
        .map(String::as_str)
        .unwrap_or_default()
}
