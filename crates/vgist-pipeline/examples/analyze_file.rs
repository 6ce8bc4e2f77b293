//! Analyze a video file from the command line.
//!
//! Usage: `GEMINI_API_KEY=... cargo run --example analyze_file -- clip.mp4`

use vgist_pipeline::{analyze, AnalyzeOptions, GeminiClient, MediaSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| anyhow::anyhow!("usage: analyze_file <video>"))?;

    let client = GeminiClient::from_env()?;
    let result = analyze(
        MediaSource::path(path),
        &client,
        &AnalyzeOptions::default(),
    )
    .await;

    match result {
        Ok(record) => {
            println!("Assunto principal: {}", record.assunto_principal);
            println!("\nResumo:\n{}", record.resumo);
            println!("\nTranscrição visual:\n{}", record.transcricao_visual);
            println!("\nTópicos-chave:");
            for topic in &record.topicos_chave {
                println!("  - {topic}");
            }
            Ok(())
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            Err(err.into())
        }
    }
}
