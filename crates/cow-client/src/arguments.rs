use {
    crate::{http_client, server::CowServer},
    alloy::{
        primitives::{Address, U256},
        signers::local::PrivateKeySigner,
    },
    model::order::OrderUid,
    std::fmt::{self, Display, Formatter},
    tracing::Level,
};

#[derive(clap::Parser)]
#[clap(name = "cow-client", about = "Quotes, places and cancels CoW Protocol orders")]
pub struct Arguments {
    #[clap(flatten)]
    pub logging: LoggingArguments,

    #[clap(flatten)]
    pub http_client: http_client::Arguments,

    /// The orderbook deployment to talk to.
    #[clap(long, env, value_enum, default_value = "gnosis-staging")]
    pub server: CowServer,

    /// Hex encoded private key of the account that signs orders.
    #[clap(long, env, hide_env_values = true)]
    pub private_key: PrivateKeySigner,

    #[clap(subcommand)]
    pub command: Command,
}

#[derive(clap::Parser)]
#[group(skip)]
pub struct LoggingArguments {
    #[clap(long, env, default_value = "warn,cow_client=debug")]
    pub log_filter: String,

    /// At which log level logs should be printed to stderr instead of stdout.
    #[clap(long, env, default_value = "error")]
    pub log_stderr_threshold: Level,

    /// Whether to use JSON format for the logs.
    #[clap(long, env, default_value = "false")]
    pub use_json_logs: bool,
}

#[derive(Debug, clap::Subcommand)]
pub enum Command {
    /// Print the orderbook version.
    Version,
    /// Request a quote for selling a token.
    Quote(SwapArguments),
    /// Quote, sign and place a sell order.
    Order(SwapArguments),
    /// Print the status of an order.
    Status { uid: OrderUid },
    /// Print an order as stored by the orderbook.
    OrderDetails { uid: OrderUid },
    /// Cancel orders unless the first one is already cancelled.
    Cancel {
        #[clap(required = true)]
        uids: Vec<OrderUid>,
    },
}

#[derive(Debug, clap::Args)]
pub struct SwapArguments {
    #[clap(long)]
    pub sell_token: Address,

    #[clap(long)]
    pub buy_token: Address,

    /// Amount in the sell token's smallest unit, before fees.
    #[clap(long)]
    pub sell_amount: U256,
}

impl Display for LoggingArguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            log_filter,
            log_stderr_threshold,
            use_json_logs,
        } = self;

        writeln!(f, "log_filter: {log_filter}")?;
        writeln!(f, "log_stderr_threshold: {log_stderr_threshold}")?;
        writeln!(f, "use_json_logs: {use_json_logs}")?;
        Ok(())
    }
}

impl Display for Arguments {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let Self {
            logging,
            http_client,
            server,
            private_key: _,
            command,
        } = self;

        write!(f, "{logging}")?;
        write!(f, "{http_client}")?;
        writeln!(f, "server: {server:?}")?;
        writeln!(f, "private_key: SECRET")?;
        writeln!(f, "command: {command:?}")?;
        Ok(())
    }
}
