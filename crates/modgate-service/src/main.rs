use clap::Parser;
use modgate_policy::{Leniency, PolicyEngine};
use modgate_service::blacklist::Blacklist;
use modgate_service::cli::{Cli, Commands};
use modgate_service::gatekeeper::Gatekeeper;
use modgate_service::models::ServiceConfig;
use modgate_service::server::run_server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            port,
            address,
            policy,
            strict,
            verbose,
        } => {
            init_logging(verbose);

            let config = ServiceConfig {
                policy_path: Some(policy),
                leniency: leniency_for(strict),
            };

            let addr: SocketAddr = format!("{}:{}", address, port).parse()?;
            run_server(config, addr).await?;
        }

        Commands::Check {
            policy,
            user,
            text,
            strict,
            verbose,
        } => {
            init_logging(verbose);

            let engine = PolicyEngine::disabled().with_leniency(leniency_for(strict));
            engine.load_from_file(&policy)?;

            let gatekeeper = Gatekeeper::new(Arc::new(engine), Arc::new(Blacklist::with_defaults()));
            let decision = gatekeeper.decide(&user, &text);

            println!("{}", decision.status);
            println!("{}", decision.reason);
        }
    }

    Ok(())
}

fn leniency_for(strict: bool) -> Leniency {
    if strict {
        Leniency::Strict
    } else {
        Leniency::DropPolicy
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        "modgate=debug,modgate_policy=debug,modgate_service=debug,tower_http=debug"
    } else {
        "modgate=info,modgate_policy=info,modgate_service=info,tower_http=warn"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
