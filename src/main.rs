use anyhow::Context;
use clap::Parser;
use hitcalc::core::{ConfigProvider, Renderer};
use hitcalc::utils::error::ErrorSeverity;
use hitcalc::utils::{logger, validation::Validate};
use hitcalc::{
    CharacterLoader, CliConfig, CsvRenderer, DataSource, HitConfig, HitEngine, HitError,
    JsonRenderer, OutputFormat, TextRenderer, TracingDiagnostics,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinSet;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 初始化日誌
    if cli.log_json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting hitcalc");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    let config = match cli.resolve().and_then(|config| {
        config.validate()?;
        Ok(config)
    }) {
        Ok(config) => config,
        Err(e) => fail(&e),
    };

    tracing::info!(
        "📁 Source: {} | default damage: {} | format: {:?}",
        config.source_location(),
        config.default_damage(),
        config.format
    );

    let loader = CharacterLoader::new(
        DataSource::from_location(config.source_location()),
        TracingDiagnostics,
    );
    let stdout = std::io::stdout();
    let stderr = std::io::stderr();

    let result = match config.format {
        OutputFormat::Text => {
            let renderer = TextRenderer::new(stdout, stderr, config.icon_base());
            run(loader, renderer, &config, cli.interactive).await
        }
        OutputFormat::Json => {
            let renderer = JsonRenderer::new(stdout, stderr, config.icon_base(), config.pretty);
            run(loader, renderer, &config, cli.interactive).await
        }
        OutputFormat::Csv => {
            let renderer = CsvRenderer::new(stdout, stderr, config.icon_base());
            run(loader, renderer, &config, cli.interactive).await
        }
    };

    if let Err(e) = result {
        if let Some(err) = e.downcast_ref::<HitError>() {
            fail(err);
        }
        return Err(e);
    }

    Ok(())
}

async fn run<R>(
    loader: CharacterLoader<DataSource, TracingDiagnostics>,
    renderer: R,
    config: &HitConfig,
    interactive: bool,
) -> anyhow::Result<()>
where
    R: Renderer + 'static,
{
    let engine = Arc::new(HitEngine::new(loader, renderer));

    engine.startup(config).await?;

    if !interactive {
        return Ok(());
    }

    tracing::info!("⌨️ Enter a damage value per line (Ctrl-D to quit)");

    // 每個輸入各自跑一次 fetch + compute，舊的結果由 engine 丟棄
    let mut tasks = JoinSet::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("failed to read damage input")?
    {
        if line.trim().is_empty() {
            continue;
        }
        // 序號在讀到這一行時就發出，與 task 的排程順序無關
        let submission = engine.accept(&line);
        let engine = Arc::clone(&engine);
        tasks.spawn(async move { engine.complete(submission).await });
    }

    while let Some(joined) = tasks.join_next().await {
        joined.context("calculation task panicked")??;
    }

    Ok(())
}

fn fail(e: &HitError) -> ! {
    tracing::error!(
        "❌ {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
