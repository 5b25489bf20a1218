//! Application entry point — Sprachheld terminal session.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Parse the mode and session arguments.
//! 4. Run the session loop until EOF or `:quit` (each mode builds its
//!    completion client ([`ApiClient`]) from config).
//!
//! # Usage
//!
//! ```text
//! sprachheld [chat|voice] [LEVEL] [TOPIC…]
//! ```
//!
//! * `chat` (default) — every line goes through the text-feedback flow; the
//!   correction panel and the tutor's follow-up question are printed.
//! * `voice` — every line stands in for a speech transcript and goes through
//!   the conversational flow; the common-mistake detector fires the
//!   error-correction flow opportunistically.
//!
//! One request is in flight per entered line; further input is simply not
//! read until the turn resolves.

use anyhow::{bail, Result};
use std::io::{self, BufRead, Write};

use sprachheld::config::AppConfig;
use sprachheld::llm::ApiClient;
use sprachheld::tutor::{
    CefrLevel, CommonMistakeDetector, ConversationFlow, ConversationSession, CorrectionFlow,
    FeedbackFlow, MistakeDetector,
};
use sprachheld::voice::VoiceSession;

// ---------------------------------------------------------------------------
// CLI arguments
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Chat,
    Voice,
}

struct SessionArgs {
    mode: Mode,
    level: CefrLevel,
    topic: String,
}

fn parse_args(config: &AppConfig) -> Result<SessionArgs> {
    let mut args = std::env::args().skip(1).peekable();

    let mode = match args.peek().map(String::as_str) {
        Some("chat") => {
            args.next();
            Mode::Chat
        }
        Some("voice") => {
            args.next();
            Mode::Voice
        }
        _ => Mode::Chat,
    };

    let level = match args.next() {
        Some(raw) => match raw.parse::<CefrLevel>() {
            Ok(level) => level,
            Err(e) => bail!("{e}"),
        },
        None => config.tutor.default_level,
    };

    let rest: Vec<String> = args.collect();
    let topic = if rest.is_empty() {
        config.tutor.default_topic.clone()
    } else {
        rest.join(" ")
    };

    Ok(SessionArgs { mode, level, topic })
}

// ---------------------------------------------------------------------------
// Session loops
// ---------------------------------------------------------------------------

fn print_greeting(level: CefrLevel) {
    let (de, en) = level.greeting();
    println!("Tutor [{level}]: {de}");
    println!("       ({en})");
}

fn prompt_for_input() -> Option<String> {
    print!("> ");
    let _ = io::stdout().flush();
    let mut line = String::new();
    match io::stdin().lock().read_line(&mut line) {
        Ok(0) => None, // EOF
        Ok(_) => Some(line),
        Err(e) => {
            log::error!("failed to read input: {e}");
            None
        }
    }
}

/// Text mode: feedback flow per line, like the chat screen.
async fn run_chat(args: &SessionArgs, config: &AppConfig) {
    let flow = FeedbackFlow::new(ApiClient::from_config(&config.llm));
    let mut session = ConversationSession::new();

    print_greeting(args.level);

    while let Some(line) = prompt_for_input() {
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == ":quit" || input == ":q" {
            break;
        }
        if input == ":reset" {
            session.reset();
            print_greeting(args.level);
            continue;
        }

        let transcript = session.transcript();
        let Some(feedback) = flow
            .review(args.level, input, transcript.as_deref())
            .await
        else {
            continue;
        };

        if feedback.corrected_text != input {
            println!("  ✎ {}", feedback.corrected_text);
        }
        println!("  {}", feedback.explanation);
        println!("Tutor: {}", feedback.follow_up_question);
        if let Some(en) = &feedback.english_translation {
            println!("       ({en})");
        }

        session.push_learner(input);
        session.push_tutor(feedback.follow_up_question.clone());
    }
}

/// Voice mode: each line stands in for a finished speech transcript and is
/// sequenced through the [`VoiceSession`] state machine.
async fn run_voice(args: &SessionArgs, config: &AppConfig) {
    let conversation = ConversationFlow::new(ApiClient::from_config(&config.llm));
    let correction = CorrectionFlow::new(ApiClient::from_config(&config.llm));
    let detector = CommonMistakeDetector::new();
    let mut session = ConversationSession::new();
    let mut voice = VoiceSession::new();

    print_greeting(args.level);

    while let Some(line) = prompt_for_input() {
        let entered = line.trim();
        if entered == ":quit" || entered == ":q" {
            break;
        }

        // Reading a line is the terminal stand-in for one capture cycle.
        if let Err(e) = voice.start_listening() {
            log::warn!("dropping input: {e}");
            continue;
        }
        voice.update_transcript(entered);
        let Some(spoken) = voice.stop_listening() else {
            // Whitespace-only capture; no request goes out.
            continue;
        };

        let Some(reply) = conversation
            .reply(args.level, &args.topic, &spoken, session.turns())
            .await
        else {
            voice.fail("empty submission");
            continue;
        };

        voice.reply_ready(reply.tutor_message.clone());
        println!("Tutor: {}", reply.tutor_message);
        if let Some(en) = &reply.english_translation {
            println!("       ({en})");
        }
        if reply.introduce_new_concept {
            log::debug!("model chose to introduce a new concept this turn");
        }

        session.push_learner(spoken.as_str());
        session.push_tutor(reply.tutor_message.clone());

        // Opportunistic correction when a known common mistake fires.
        if let Some(mistake) = detector.detect(&spoken) {
            let report = mistake.into_report(&spoken, args.level);
            let result = correction.correct(&report).await;
            voice.set_correction(result.clone());
            println!("  ✎ {}", result.english_explanation);
            println!("Tutor: {}", result.german_follow_up);
        }

        voice.finish_speaking();
    }
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Sprachheld starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Arguments
    let args = parse_args(&config)?;
    log::info!(
        "session: mode={:?} level={} topic={:?}",
        args.mode,
        args.level,
        args.topic
    );

    if config.llm.resolve_api_key().is_none() {
        log::warn!(
            "no API key configured ({} unset and settings.toml has none); requests will fail \
             and every turn will fall back to the built-in apology messages",
            sprachheld::config::API_KEY_ENV
        );
    }

    // 4. Session loop (each flow builds its client from config)
    match args.mode {
        Mode::Chat => run_chat(&args, &config).await,
        Mode::Voice => run_voice(&args, &config).await,
    }

    println!("Tschüss!");
    Ok(())
}
