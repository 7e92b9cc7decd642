use clap::Parser;
use healer_daemon::{cli::Command, Cli, DaemonError};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.log_json);

    let exit_code = match run(cli.command).await {
        Ok(()) => 0,
        Err(error) => {
            tracing::error!(%error, "daemon exiting");
            error.exit_code()
        }
    };
    std::process::exit(exit_code);
}

async fn run(command: Command) -> Result<(), DaemonError> {
    match command {
        Command::Heal { rabbit_url, rabbit_vhost } => {
            let rabbit_url = healer_daemon::daemon::resolve_rabbit_url(rabbit_url)?;
            let rabbit_vhost = healer_daemon::daemon::resolve_rabbit_vhost(rabbit_vhost)?;
            healer_daemon::daemon::run(rabbit_url, rabbit_vhost).await
        }
    }
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let subscriber = tracing_subscriber::fmt().with_env_filter(filter);
    if json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }
}
