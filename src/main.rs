use cash_address::{Address, AddressError, AddressFactory, Networks};
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Convert Bitcoin Cash addresses between CashAddr and legacy formats
#[derive(Parser, Debug)]
#[command(name = "cash_address")]
struct Args {
    /// Network id (main, test, regtest); detected from the address when omitted
    #[arg(short, long)]
    network: Option<String>,

    /// Addresses in CashAddr or legacy form
    #[arg(required = true)]
    addresses: Vec<String>,
}

fn describe(addr: &Address) -> Result<(), AddressError> {
    println!("Network       : {}", addr.network().id());
    println!("Type          : {}", addr.address_type());
    println!("Hash (hex)    : {}", addr.hash_hex());
    println!("CashAddr      : {}", addr.to_cash_address()?);
    match addr.to_legacy() {
        Ok(legacy) => println!("Legacy        : {legacy}"),
        Err(AddressError::LegacyHashSize(_)) => println!("Legacy        : -"),
        Err(e) => return Err(e),
    }
    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let networks = Networks::default();
    let factory = AddressFactory::new(&networks);

    let network = match args.network.as_deref() {
        Some(id) => match networks.by_id(id) {
            Some(params) => Some(params),
            None => {
                eprintln!("Unknown network “{id}”");
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut status = ExitCode::SUCCESS;
    for (i, input) in args.addresses.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("Input         : {input}");
        let result = factory.parse(network, input).and_then(|addr| describe(&addr));
        if let Err(e) = result {
            eprintln!("Error: {e}");
            status = ExitCode::FAILURE;
        }
    }
    status
}
