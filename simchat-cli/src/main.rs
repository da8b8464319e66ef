//! Terminal binary for the conversation funnel.

use anyhow::Result;
use clap::Parser;
use simchat_cli::{run_direct_checkout, run_surface, Cli, Commands, FunnelConfig};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = FunnelConfig::load()?;
    simchat_core::init_tracing(&config.log_file)?;

    match cli.command {
        Commands::Run {
            persona,
            variant,
            escalation_secs,
        } => {
            if let Some(secs) = escalation_secs {
                config.escalation_delay_secs = secs;
            }
            let persona = match persona {
                Some(id) => script::find(&id)
                    .ok_or_else(|| anyhow::anyhow!("unknown persona '{id}'; run `simchat personas`"))?,
                None => script::roster().remove(0),
            };
            let variant_id = variant.as_deref().unwrap_or("preview-funnel");
            let script = script::variants::by_id(variant_id, &persona).ok_or_else(|| {
                anyhow::anyhow!(
                    "unknown variant '{variant_id}'; available: {}",
                    script::variants::VARIANT_IDS.join(", ")
                )
            })?;
            run_surface(&config, persona, script).await
        }
        Commands::Personas => {
            for p in script::roster() {
                println!("{:16} {:16} {}", p.id, p.name, p.presence());
            }
            Ok(())
        }
        Commands::Checkout { email } => run_direct_checkout(&config, &email).await,
    }
}
