use anyhow::Context;
use clap::Parser;
use keelung_sights::config::cli::{Command, LogFormat};
use keelung_sights::utils::{logger, validation::Validate};
use keelung_sights::{
    Cli, HttpSightFetcher, JsonFileSightStore, LocalStorage, NewSight, SightError, SightId,
    SightService, SightsConfig,
};
use serde::Serialize;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }
    tracing::info!("Starting keelung-sights");

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };
    if cli.verbose {
        tracing::debug!("Effective config: {:?}", config);
    }

    if let Err(e) = run(&cli, &config).await {
        if let Some(sight_error) = e.downcast_ref::<SightError>() {
            fail(sight_error);
        }
        return Err(e);
    }
    Ok(())
}

fn load_config(cli: &Cli) -> keelung_sights::Result<SightsConfig> {
    let config = cli.load_config()?;
    config.validate()?;
    Ok(config)
}

async fn run(cli: &Cli, config: &SightsConfig) -> anyhow::Result<()> {
    // store-only commands never reach the source, so the endpoint is optional for them
    let endpoint = match cli.command {
        Command::Refresh | Command::Live { .. } => config.endpoint()?.to_string(),
        _ => config.source.endpoint.clone().unwrap_or_default(),
    };
    let fetcher = HttpSightFetcher::new(endpoint, config.source.zone_param.clone(), config.timeout())?;

    let (store_dir, document) = config.store_location();
    let store = JsonFileSightStore::new(LocalStorage::new(store_dir), document);
    let service = SightService::new(fetcher, store, config.service_options());

    match &cli.command {
        Command::Refresh => {
            let report = service.refresh_all().await?;
            tracing::info!("✅ {}", report.summary());
            print_json(&report)?;
        }
        Command::Zone { zone } => print_json(&service.sights_by_zone(zone).await?)?,
        Command::Live { zone } => print_json(&service.sights_from_source(zone).await?)?,
        Command::Get { id } => print_json(&service.get(&SightId::from(id.as_str())).await?)?,
        Command::Ids { ids } => {
            let ids: Vec<SightId> = ids.iter().map(|id| SightId::from(id.as_str())).collect();
            print_json(&service.get_many(&ids).await?)?;
        }
        Command::Create { file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let sight: NewSight = serde_json::from_str(&raw)
                .with_context(|| format!("{} is not a valid sight document", file.display()))?;
            let created = service.create(sight).await?;
            tracing::info!("📁 Created sight {}", created.id);
            print_json(&created)?;
        }
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn fail(e: &SightError) -> ! {
    tracing::error!(
        "❌ {} (status: {}, severity: {:?})",
        e,
        e.status_code(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 建議: {}", e.recovery_suggestion());

    let exit_code = match e.status_code() {
        400 => 2,
        404 => 4,
        _ => 1,
    };
    std::process::exit(exit_code);
}
