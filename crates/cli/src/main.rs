//! Command Line Interface for the Monte Carlo price-risk engine.
use anyhow::Result;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use mc_var_api::{ApiServer, ServerConfig};
use mc_var_domain::{SimulationParameters, SimulationResult};
use mc_var_simulation::{EngineConfig, MonteCarloEngine};
use tracing::info;

#[derive(Parser)]
#[command(name = "mc-var")]
#[command(about = "GBM Monte Carlo price simulation and Value-at-Risk", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a simulation locally and print the risk summary
    Simulate {
        /// Initial asset price
        #[arg(short, long, default_value_t = 100.0)]
        price: f64,

        /// Annual volatility in percent (0-200)
        #[arg(short, long, default_value_t = 20.0)]
        volatility: f64,

        /// Horizon in trading days (1-365)
        #[arg(short, long, default_value_t = 30)]
        days: u32,

        /// Number of simulated paths (100-10000)
        #[arg(short, long, default_value_t = 1000)]
        iterations: u32,

        /// Seed for a reproducible run
        #[arg(long)]
        seed: Option<u64>,

        /// Print the full result as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Start the HTTP API server
    Serve {
        /// Host to bind (overrides MC_VAR_HOST)
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides MC_VAR_PORT)
        #[arg(long)]
        port: Option<u16>,

        /// Fixed simulation seed (overrides MC_VAR_SEED)
        #[arg(long)]
        seed: Option<u64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Simulate {
            price,
            volatility,
            days,
            iterations,
            seed,
            json,
        } => {
            let params = SimulationParameters::new(price, volatility, days, iterations);
            let config = EngineConfig {
                seed,
                ..EngineConfig::default()
            };
            let engine = MonteCarloEngine::new(config);

            let result = tokio::task::spawn_blocking(move || engine.simulate(&params)).await??;

            if json {
                println!("{}", serde_json::to_string_pretty(&result)?);
            } else {
                print_summary(&params, &result);
            }
        }
        Commands::Serve { host, port, seed } => {
            let mut config = ServerConfig::from_env()?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            if seed.is_some() {
                config.seed = seed;
            }

            info!(address = %config.bind_address(), "Starting API server");
            ApiServer::new(config).run().await?;
        }
    }

    Ok(())
}

fn print_summary(params: &SimulationParameters, result: &SimulationResult) {
    let last = result.mean_path.len() - 1;

    println!("\n📊 Monte Carlo Results");
    println!("════════════════════════════════════");
    println!("Initial Price:   ${:.2}", params.initial_price);
    println!("Volatility:      {:.1}%", params.annual_volatility);
    println!("Horizon:         {} days", params.horizon_days);
    println!("Paths:           {}", result.iteration_count());
    println!("────────────────────────────────────");
    println!("Final Average:   ${:.2}", result.terminal_mean);
    println!("Final Minimum:   ${:.2}", result.terminal_min);
    println!("Final Maximum:   ${:.2}", result.terminal_max);
    println!("5th Percentile:  ${:.2}", result.p5_path[last]);
    println!("95th Percentile: ${:.2}", result.p95_path[last]);
    println!(
        "VaR 95%:         ${:.2} ({:.2}%)",
        result.var_95_amount, result.var_95_percent
    );
    println!("════════════════════════════════════");
}
