use clap::Parser;
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "route-policy-check",
    version,
    about = "Evaluate a route against BGP routing policies"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config: PathBuf,

    /// Path to the policy file (overrides config file setting)
    #[arg(short, long)]
    pub policy: Option<PathBuf>,

    /// Policies to apply, in order (overrides config file setting)
    #[arg(long = "apply", value_delimiter = ',')]
    pub apply: Vec<String>,

    /// Reject routes no policy decides on (overrides config file setting)
    #[arg(long)]
    pub default_reject: bool,

    /// Route prefix, e.g. 10.0.0.0/24 or 2001:db8::/32
    #[arg(long)]
    pub prefix: String,

    /// Address of the peer the route was received from
    #[arg(long)]
    pub neighbor: IpAddr,

    /// Print the decision as JSON
    #[arg(long)]
    pub json: bool,
}
