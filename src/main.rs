use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use luhn_summarizer::config::AppConfig;
use luhn_summarizer::errors::SummarizeError;
use luhn_summarizer::logging;
use luhn_summarizer::mcp::StdioMcpServer;
use luhn_summarizer::summarize::{
    build_summarizer, SentencesCount, Summarizer, SummarizerSettings,
};

fn read_input(path: &Path) -> Result<String, SummarizeError> {
    if path == Path::new("-") {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        return Ok(text);
    }
    std::fs::read_to_string(path)
        .map_err(|e| SummarizeError::Io(format!("read {}: {e}", path.display())))
}

fn summarize_file(
    summarizer: &dyn Summarizer,
    path: &Path,
    count: SentencesCount,
) -> Result<(), SummarizeError> {
    let text = read_input(path)?;
    let res = summarizer.summarize(&text, count)?;
    tracing::info!(
        input=%path.display(),
        backend=%res.backend,
        selected=res.sentences.len(),
        sentences_total=res.sentences_total,
        "summary complete"
    );
    for sentence in &res.sentences {
        println!("{sentence}");
    }
    Ok(())
}

fn prepare(
    cfg: &AppConfig,
) -> Result<(SummarizerSettings, SentencesCount, Arc<dyn Summarizer>), SummarizeError> {
    let settings = cfg.settings()?;
    let count = cfg.sentences_count()?;
    let summarizer = build_summarizer(&settings)?;
    Ok((settings, count, summarizer))
}

#[tokio::main]
async fn main() {
    logging::init_logging();

    let cfg = AppConfig::from_env_and_args();
    if let Err(e) = cfg.validate() {
        tracing::warn!(config_error=%e, "invalid config");
    }

    let (settings, count, summarizer) = match prepare(&cfg) {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error=%e, "cannot build summarizer");
            std::process::exit(2);
        }
    };
    tracing::info!(
        backend = summarizer.backend(),
        sentences_count=%count,
        max_gap_size = settings.luhn.max_gap_size,
        significant_percentage = settings.luhn.significant_percentage,
        stopwords = settings.luhn.stopwords.len(),
        stemmer=%settings.stemmer,
        "summarizer ready"
    );

    if let Some(input) = cfg.input.as_deref() {
        if let Err(e) = summarize_file(summarizer.as_ref(), input, count) {
            tracing::error!(error=%e, "summarization failed");
            std::process::exit(1);
        }
        return;
    }

    let server = StdioMcpServer::new(settings, summarizer, count);
    // Graceful shutdown without spawning (run future is not Send due to stdio locks)
    tokio::select! {
        res = server.run() => {
            if let Err(e) = res { tracing::error!(error=?e, "server terminated with error") }
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Received shutdown signal, stopping server");
        }
    }
}
