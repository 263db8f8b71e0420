//! Example: Analyze an Exercise Video
//!
//! Uploads a clip, prints the extracted analysis, then optionally asks one
//! follow-up question with the analysis as chat context.
//!
//! Run: `GEMINI_API_KEY=... cargo run -p formcheck --example analyze -- --video squat.mp4 --exercise Squat`
//!
//! Set `RUST_LOG=formcheck=debug` to see attempts, waits and the raw reply.

use clap::Parser;
use formcheck::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the video file
    #[arg(long)]
    video: std::path::PathBuf,

    /// Exercise name, used in the prompt and the chat context
    #[arg(long, default_value = "Squat")]
    exercise: String,

    /// Response language tag (tr or en)
    #[arg(long, env = "FORMCHECK_LANGUAGE", default_value = "tr")]
    language: String,

    /// Follow-up question to ask about the analysis
    #[arg(long)]
    ask: Option<String>,
}

fn analysis_prompt(exercise: &str, language: Language) -> String {
    match language {
        Language::Turkish => format!(
            "Bu videodaki {exercise} hareketinin formunu analiz et. Şu formatta yanıt ver:\n\
             **SKOR:** 0-100\n**GENEL DEĞERLENDİRME:** ...\n**DOĞRU YAPILAN:**\n- ...\n\
             **HATALAR:**\n- ...\n**ÖNERİLER:**\n- ..."
        ),
        Language::English => format!(
            "Analyze the form of the {exercise} in this video. Answer in this format:\n\
             **SCORE:** 0-100\n**GENERAL ASSESSMENT:** ...\n**CORRECT POINTS:**\n- ...\n\
             **ERRORS:**\n- ...\n**SUGGESTIONS:**\n- ..."
        ),
    }
}

fn print_list(heading: &str, items: &[String]) {
    println!("\n{heading}");
    for item in items {
        println!("  - {item}");
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("formcheck=info")),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let language = Language::from_tag(&cli.language);

    let config = ClientConfig::from_env().with_language(language);
    let client = Client::new(config)?;

    let video = tokio::fs::read(&cli.video).await?;
    let prompt = analysis_prompt(&cli.exercise, language);

    let analysis = match client.analyze_video(video, &prompt, &cli.language).await {
        Ok(analysis) => analysis,
        Err(Error::RateLimited) => {
            eprintln!("Rate limited twice in a row; wait a minute and try again.");
            return Ok(());
        }
        Err(e) => return Err(e.into()),
    };

    println!(
        "{}: {}/100 ({})",
        cli.exercise,
        analysis.score,
        analysis.level().label(language)
    );
    println!("\n{}", analysis.feedback);
    print_list("Correct points:", &analysis.correct_points);
    print_list("Errors:", &analysis.errors);
    print_list("Suggestions:", &analysis.suggestions);

    if let Some(question) = cli.ask {
        let context = analysis.context_summary(&cli.exercise, language);
        let reply = client.send_chat_message(&question, &[], &context).await?;
        println!("\n> {question}\n{reply}");
    }

    Ok(())
}
