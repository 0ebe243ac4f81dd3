//! Client for the CoW Protocol orderbook: quotes a swap, signs the resulting
//! order with EIP-712, places it and cancels orders that are still live.

pub mod arguments;
pub mod client;
pub mod error;
pub mod http_client;
pub mod server;
pub mod signing;

pub use {
    client::CowClient,
    error::{Error, Result},
    server::CowServer,
};
use {
    anyhow::Context as _,
    arguments::{Arguments, Command},
    clap::Parser,
};

pub fn start(args: impl Iterator<Item = String>) {
    let args = Arguments::parse_from(args);
    let obs_config = observe::Config::new(
        args.logging.log_filter.as_str(),
        Some(args.logging.log_stderr_threshold),
        args.logging.use_json_logs,
    );
    observe::tracing::initialize(&obs_config);
    tracing::info!("running cow-client with validated arguments:\n{}", args);

    if let Err(err) = run(args) {
        tracing::error!(?err, "command failed");
        std::process::exit(1);
    }
}

/// Assumes tracing has already been set up.
pub fn run(args: Arguments) -> anyhow::Result<()> {
    let http = http_client::HttpClientFactory::new(&args.http_client)
        .create()
        .context("failed to build http client")?;
    let client = CowClient::new(http, args.server, args.private_key)?;
    tracing::debug!(address = %client.address(), chain_id = client.chain_id(), "created client");

    match args.command {
        Command::Version => println!("{}", client.get_version()?),
        Command::Quote(swap) => {
            let request =
                client.build_swap_params(swap.sell_token, swap.buy_token, swap.sell_amount)?;
            let quote = client.post_quote(&request).context("quote")?;
            println!("{}", serde_json::to_string_pretty(&quote)?);
        }
        Command::Order(swap) => {
            let request =
                client.build_swap_params(swap.sell_token, swap.buy_token, swap.sell_amount)?;
            let mut quote = client.post_quote(&request).context("quote")?;
            let uid = client.post_order(&mut quote).context("order")?;
            println!("{uid}");
        }
        Command::Status { uid } => println!("{}", client.get_order_status(&uid)?),
        Command::OrderDetails { uid } => {
            let order = client.get_order(&uid)?;
            println!("{}", serde_json::to_string_pretty(&order)?);
        }
        Command::Cancel { uids } => {
            client
                .cancel_order_if_not_already_cancelled(&uids)
                .context("cancel")?;
        }
    }
    Ok(())
}
