use anyhow::Context;
use clap::Parser;
use claims_client::config::Command;
use claims_client::core::{ConfigProvider, MutationOutcome};
use claims_client::utils::{logger, validation::Validate};
use claims_client::{
    CannedInput, ClaimMutations, CliConfig, ConsoleNotifier, ExportEngine, ExportPipeline,
    HttpClaimsApi, LocalDownloads, ScheduledReload, SearchFilters, StdinInput,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    let config = cli.resolve().context("failed to load configuration")?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        std::process::exit(1);
    }
    tracing::debug!("Client config: {:?}", config);

    tracing::info!(
        theme = %config.app.theme,
        version = %config.app.version,
        "Claims client initialized"
    );
    if config.app.robustness {
        tracing::info!("🍔 Burger mode activated for enhanced robustness!");
    }

    let api = HttpClaimsApi::from_config(&config).context("failed to build HTTP client")?;
    let notifier = ConsoleNotifier::new(config.toast_duration());

    match cli.command {
        Command::Export { .. } => {
            let sink = LocalDownloads::new(config.export.output_dir.clone());
            let pipeline = ExportPipeline::new(api, sink)
                .with_filename(config.export_filename())
                .with_mode(config.csv_mode());
            let engine = ExportEngine::new(pipeline, notifier);

            match engine.run().await {
                Some(location) => println!("📁 Export saved to: {}", location),
                None => std::process::exit(2),
            }
        }
        Command::Flag { claim_id, reason } => {
            let page = Arc::new(ScheduledReload::new());
            let mutations = ClaimMutations::new(api, notifier, page.clone(), config.user_id())
                .with_reload_delay(config.reload_delay());

            let outcome = match reason {
                Some(reason) => {
                    mutations
                        .flag_claim(&claim_id, &CannedInput::new([reason]))
                        .await
                }
                None => mutations.flag_claim(&claim_id, &StdinInput).await,
            };
            page.wait().await;
            exit_for(&outcome);
        }
        Command::Note { claim_id, content } => {
            let page = Arc::new(ScheduledReload::new());
            let mutations = ClaimMutations::new(api, notifier, page.clone(), config.user_id())
                .with_reload_delay(config.reload_delay());

            let outcome = mutations.add_note(&claim_id, &content).await;
            page.wait().await;
            exit_for(&outcome);
        }
        Command::Search {
            query,
            status,
            insurer,
        } => {
            let filters = SearchFilters {
                search: query,
                status,
                insurer,
            };
            println!("{}", filters.location());
        }
    }

    Ok(())
}

fn exit_for(outcome: &MutationOutcome) {
    match outcome {
        MutationOutcome::Applied | MutationOutcome::Skipped => {}
        MutationOutcome::Rejected { .. } => std::process::exit(1),
        MutationOutcome::Failed { .. } => std::process::exit(2),
    }
}
