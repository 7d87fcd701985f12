//! Maintenance Strategy Advisor CLI
//!
//! Run with: cargo run -- <command>
//! Or as a local JSON-RPC endpoint: cargo run -- --serve

use anyhow::{bail, Context, Result};
use maintenance_advisor::{
    cli, content, kpi, mcp,
    quiz::{self, QuestionBank, QuizAttempt, QuizReport, QuizSession},
    recommend, server, AdvisorConfig, Explanation, KpiReport, Recommendation, Topic, TopicPage,
};
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();

    // A broken config file must not block --help or the calculators
    let (mut config, config_error) = AdvisorConfig::load_or_default();
    if cli::has_flag(&raw_args, "json") {
        config.json_output = true;
    }
    if let Some(port) = cli::flag_value(&raw_args, "port") {
        config.server.port = port
            .parse()
            .with_context(|| format!("Invalid --port: '{}'", port))?;
    }

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(config.tracing_level())
        .init();

    if let Some(e) = config_error {
        tracing::warn!("Ignoring configuration, using defaults: {:#}", e);
    }

    // Built once, read-only from here on
    let bank = QuestionBank::standard();

    let args = cli::strip_global_flags(&raw_args);
    let command = args.get(1).map(|s| s.as_str());
    tracing::debug!(?command, "starting");
    let rest = args.get(2..).unwrap_or(&[]);

    match command {
        Some("recommend") => run_recommend(rest, config.json_output),
        Some("kpi") => run_kpi(rest, config.json_output),
        Some("quiz") => run_quiz(&bank, rest, config.json_output),
        Some("topics") => run_topics(cli::topic_arg(rest), config.json_output),
        Some("--tools") => {
            // Output tool definitions as JSON
            let tools = mcp::get_tools();
            println!("{}", serde_json::to_string_pretty(&tools)?);
            Ok(())
        }
        Some("--serve") => {
            tracing::info!("Maintenance Advisor server starting on {}", config.bind_addr());
            server::run_http_server(&config.bind_addr(), Arc::new(bank)).await
        }
        None | Some("--help") | Some("-h") | Some("help") => {
            print_usage();
            Ok(())
        }
        Some(other) => bail!("Unknown command: {}. Try --help", other),
    }
}

fn print_usage() {
    println!("Maintenance Strategy Advisor");
    println!("============================\n");
    println!("USAGE:");
    println!("  maintenance-advisor recommend --criticality=<High|Medium|Low>");
    println!("                                --environment=<Harsh|Normal|Clean>");
    println!("                                --failure-history=<Frequent|Occasional|Rare>");
    println!("                                --maintenance-cost=<High|Medium|Low>");
    println!("                                --downtime-cost=<High|Medium|Low> [--explain]");
    println!("  maintenance-advisor kpi [--uptime=N] [--failures=N] [--downtime=N] [--repairs=N]");
    println!("                          [--cost=N] [--output=N] [--scheduled=N] [--completed=N]");
    println!("                          [--budget=N] [--actual=N]");
    println!("  maintenance-advisor quiz [--answers=a,b,-,...] [--submit] | --interactive");
    println!("  maintenance-advisor topics [overview|comparison|monitoring|dipf|bathtub|about]");
    println!("  maintenance-advisor --tools");
    println!("  maintenance-advisor --serve [--port=N]");
    println!();
    println!("Add --json to any command for machine-readable output.");
}

// ============================================================================
// STRATEGY SELECTOR
// ============================================================================

fn run_recommend(args: &[String], json_output: bool) -> Result<()> {
    let input = cli::recommendation_input(args)?;

    if cli::has_flag(args, "explain") {
        let explanation = recommend::explain(&input);
        tracing::debug!(rule = %explanation.winning_rule, "recommendation explained");
        if json_output {
            println!("{}", serde_json::to_string_pretty(&explanation)?);
        } else {
            print_explanation(&explanation);
        }
        return Ok(());
    }

    let rec = recommend::recommend(&input);
    if json_output {
        println!("{}", serde_json::to_string_pretty(&rec)?);
    } else {
        print_recommendation(&rec);
    }
    Ok(())
}

fn print_recommendation(rec: &Recommendation) {
    println!("\n{} Recommended Strategy: {}", rec.strategy.emoji(), rec.label);
    println!("   Why:      {}", rec.rationale);
    println!("   Examples: {}", rec.examples);
    println!();
}

fn print_explanation(explanation: &Explanation) {
    print_recommendation(&explanation.recommendation);
    println!("Rule evaluation (first match wins):");
    for t in &explanation.trace {
        let mark = match (t.matched, t.shadowed) {
            (true, false) => "✅ WINS    ",
            (true, true) => "⏭  SHADOWED",
            _ => "·  no match",
        };
        println!("  {}. {} {:<22} {}", t.priority, mark, t.rule, t.condition);
    }
    println!();
}

// ============================================================================
// KPI CALCULATOR
// ============================================================================

fn run_kpi(args: &[String], json_output: bool) -> Result<()> {
    let inputs = cli::kpi_inputs(args)?;
    let report = kpi::evaluate(&inputs);

    if json_output {
        let out = serde_json::json!({
            "inputs": inputs,
            "kpis": report,
            "omitted": report.omitted(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        print_kpis(&report);
    }
    Ok(())
}

fn print_kpis(report: &KpiReport) {
    println!("\n📈 Maintenance KPIs");
    println!("───────────────────");
    for line in report.lines() {
        println!("  {}", line);
    }
    println!();
}

// ============================================================================
// QUIZ
// ============================================================================

fn run_quiz(bank: &QuestionBank, args: &[String], json_output: bool) -> Result<()> {
    if cli::has_flag(args, "interactive") {
        return run_quiz_interactive(bank);
    }

    let answers = cli::flag_value(args, "answers")
        .map(cli::split_answers)
        .unwrap_or_default();
    let attempt = QuizAttempt::from_answers(bank, &answers)?;

    if !cli::has_flag(args, "submit") {
        // No submit, no feedback
        if answers.is_empty() {
            print_questions(bank, json_output)?;
        } else {
            println!(
                "{} of {} answers recorded. Add --submit to see your score.",
                attempt.answered(),
                bank.len()
            );
        }
        return Ok(());
    }

    let report = quiz::score(bank, &attempt);
    tracing::debug!(score = report.score, total = report.total, "quiz submitted");
    if json_output {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_quiz_report(&report);
    }
    Ok(())
}

fn print_questions(bank: &QuestionBank, json_output: bool) -> Result<()> {
    if json_output {
        let list = mcp::handle_tool_call("list_quiz_questions", &serde_json::json!({}), bank)?;
        println!("{}", serde_json::to_string_pretty(&list)?);
        return Ok(());
    }

    println!("\n🧠 Maintenance Knowledge Quiz ({} questions)\n", bank.len());
    for (i, q) in bank.questions().iter().enumerate() {
        print_question(i, q);
    }
    println!("Answer with: quiz --answers=b,c,a,... --submit");
    Ok(())
}

fn print_question(index: usize, q: &quiz::QuizQuestion) {
    println!("Q{}: {}", index + 1, q.text);
    for (letter, option) in ['a', 'b', 'c', 'd'].iter().zip(q.options.iter()) {
        println!("   {}) {}", letter, option);
    }
    println!();
}

fn print_quiz_report(report: &QuizReport) {
    println!();
    for r in &report.results {
        println!("Q{}: {}", r.number, r.question);
        if r.correct {
            println!("   ✅ Correct: {}", wrap_text(&r.explanation, 70, "      "));
        } else {
            let chosen = r.selected.as_deref().unwrap_or("(no answer)");
            println!("   ❌ Incorrect ({}). Correct answer: {}", chosen, r.correct_answer);
            println!("      {}", wrap_text(&r.explanation, 70, "      "));
        }
    }
    println!(
        "\n🏁 Final Score: {} out of {} ({:.0}%)\n",
        report.score,
        report.total,
        report.percent()
    );
}

fn run_quiz_interactive(bank: &QuestionBank) -> Result<()> {
    use std::io::{self, BufRead, Write};

    let mut session = QuizSession::new(bank);
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    println!("🧠 Maintenance Knowledge Quiz");
    println!("==============================");
    println!("Answer with a letter (a-d), a number (1-4) or the option text.");
    println!("Blank skips a question. /submit scores, /help for commands, quit exits.\n");

    let mut index = 0;
    loop {
        if let Some(q) = bank.get(index) {
            print_question(index, q);
        }
        print!("> ");
        stdout.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => break,
        };
        let line = line.trim();

        if line == "quit" || line == "exit" {
            break;
        }

        if line.starts_with('/') {
            let parts: Vec<&str> = line.splitn(3, ' ').collect();
            match parts[0] {
                "/submit" => print_quiz_report(&session.submit()),
                "/answer" => {
                    // /answer <number> <choice>
                    let number = parts.get(1).and_then(|n| n.parse::<usize>().ok());
                    match (number, parts.get(2)) {
                        (Some(n), Some(choice)) if n >= 1 => {
                            match session.select(n - 1, choice) {
                                Ok(option) => println!("Q{} -> {}", n, option),
                                Err(e) => eprintln!("Error: {}", e),
                            }
                        }
                        _ => println!("Usage: /answer <question number> <choice>"),
                    }
                }
                "/goto" => match parts.get(1).and_then(|n| n.parse::<usize>().ok()) {
                    Some(n) if n >= 1 && n <= bank.len() => index = n - 1,
                    _ => println!("Usage: /goto <1-{}>", bank.len()),
                },
                "/status" => println!(
                    "{} of {} answered{}",
                    session.attempt().answered(),
                    bank.len(),
                    if session.is_submitted() { ", submitted" } else { "" }
                ),
                "/help" => {
                    println!("Commands:");
                    println!("  <choice>             Answer the current question");
                    println!("  (blank)              Skip the current question");
                    println!("  /answer <n> <choice> Change the answer to question n");
                    println!("  /goto <n>            Jump to question n");
                    println!("  /status              Show progress");
                    println!("  /submit              Score all answers");
                    println!("  quit                 Exit");
                }
                cmd => println!("Unknown command: {}. Try /help", cmd),
            }
            continue;
        }

        if index >= bank.len() {
            if !line.is_empty() {
                println!("All questions shown. /submit to score or /goto <n> to revisit.");
            }
            continue;
        }

        if line.is_empty() {
            session.clear(index);
            index += 1;
            continue;
        }

        match session.select(index, line) {
            Ok(_) => index += 1,
            Err(e) => eprintln!("Error: {}", e),
        }

        if index == bank.len() {
            println!("All {} questions shown. Type /submit to see your score.", bank.len());
        }
    }

    Ok(())
}

// ============================================================================
// REFERENCE GUIDE
// ============================================================================

fn run_topics(topic: Option<&str>, json_output: bool) -> Result<()> {
    let pages: Vec<TopicPage> = match topic {
        Some(name) => vec![content::page(name.parse::<Topic>()?)],
        None => Topic::ALL.iter().map(|t| content::page(*t)).collect(),
    };

    if json_output {
        println!("{}", serde_json::to_string_pretty(&pages)?);
        return Ok(());
    }

    for page in &pages {
        println!("\n📘 {}", page.title);
        println!("{}", "─".repeat(page.title.chars().count() + 3));
        for line in &page.body {
            println!("{}", line);
        }
        if let Some(image) = &page.image {
            println!("[illustration: {}]", image);
        }
    }
    println!();
    Ok(())
}

fn wrap_text(s: &str, width: usize, prefix: &str) -> String {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in s.split_whitespace() {
        if current.len() + word.len() + 1 > width && !current.is_empty() {
            lines.push(current);
            current = String::new();
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        lines.push(current);
    }

    lines.join(&format!("\n{}", prefix))
}
