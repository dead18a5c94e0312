use clap::{Args, Parser, Subcommand};
use nitro_types::SwapRequest;

/// Quote and execute cross-chain swaps through Router Nitro.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Print the outcome as JSON instead of plain text
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List registry chains
    Chains {
        /// Include chains that are not live
        #[arg(long)]
        all: bool,
    },
    /// Resolve and quote a swap without executing it
    Quote(SwapArgs),
    /// Propose a swap, ask for confirmation and execute it
    Swap {
        #[command(flatten)]
        swap: SwapArgs,

        /// Recipient on the destination chain (defaults to ROUTER_NITRO_EVM_ADDRESS)
        #[arg(long)]
        to_address: Option<String>,

        /// Confirm without prompting
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Args, Debug, Clone)]
pub struct SwapArgs {
    #[arg(long)]
    pub from_chain: String,
    #[arg(long)]
    pub to_chain: String,
    #[arg(long)]
    pub from_token: String,
    #[arg(long)]
    pub to_token: String,
    /// Human-readable amount of the source token, e.g. 1.5
    #[arg(long)]
    pub amount: String,
}

impl SwapArgs {
    pub fn into_request(self, to_address: Option<String>) -> SwapRequest {
        SwapRequest {
            from_chain: self.from_chain,
            to_chain: self.to_chain,
            from_token: self.from_token,
            to_token: self.to_token,
            amount: self.amount,
            to_address,
        }
    }
}
