use anyhow::{bail, Context, Result};
use charot_checker_lib::init_logging;
use charot_checker_lib::models::AnalysisResult;
use charot_checker_lib::services::config_store::{AppConfig, ConfigStore};
use charot_checker_lib::services::detection::{ArgumentProfile, Detector};
use charot_checker_lib::services::text_processor::normalize_punctuation;
use std::io::Read;
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "Usage:\n  charot <path|-> [--profile strict|lenient] [--rules <json_path>] [--sequential] [--out <json_path>] [--save-config] [--quiet]\n\nNotes:\n  - `-` reads the text from stdin.\n  - Settings not given on the command line come from the saved config.\n  - `--save-config` stores the effective profile/rules/parallel settings.";

fn preview(s: &str, max_chars: usize) -> String {
    let mut out: String = s.chars().take(max_chars).collect();
    if s.chars().count() > max_chars {
        out.push_str("...");
    }
    out.replace('\n', " ")
}

fn parse_arg_value(args: &[String], key: &str) -> Option<String> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .cloned()
}

fn has_flag(args: &[String], key: &str) -> bool {
    args.iter().any(|a| a == key)
}

const VALUE_FLAGS: &[&str] = &["--profile", "--rules", "--out"];

/// First argument that is neither a flag nor a flag's value. `-` is stdin.
fn input_path(args: &[String]) -> Option<String> {
    let mut rest = args.iter().skip(1);
    while let Some(arg) = rest.next() {
        if VALUE_FLAGS.contains(&arg.as_str()) {
            rest.next();
        } else if arg == "-" || !arg.starts_with('-') {
            return Some(arg.clone());
        }
    }
    None
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path))
}

fn print_report(result: &AnalysisResult) {
    for line in result.summary_lines() {
        println!("{}", line);
    }
    for entry in &result.sentence_analysis {
        println!();
        println!(
            "[{}] {}{}",
            entry.sentence_number,
            preview(&entry.sentence, 100),
            if entry.is_argumentative { "" } else { "  (non-argumentative)" }
        );
        for event in &entry.fallacies {
            println!(
                "  - {} [{}/{}] \"{}\": {}",
                event.category, event.method, event.confidence, event.phrase, event.explanation
            );
        }
    }
}

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 || has_flag(&args, "--help") || has_flag(&args, "-h") {
        eprintln!("{}", USAGE);
        return Ok(());
    }
    let Some(path) = input_path(&args) else {
        eprintln!("{}", USAGE);
        bail!("no input path given");
    };

    init_logging();

    let store = ConfigStore::default_config_dir().map(ConfigStore::new);
    let mut config = store
        .as_ref()
        .map(|s| s.load_or_default())
        .unwrap_or_else(AppConfig::default);

    if let Some(profile) = parse_arg_value(&args, "--profile") {
        config.detection.argument_profile = ArgumentProfile::from_str(&profile).as_str().to_string();
    }
    if let Some(rules) = parse_arg_value(&args, "--rules") {
        config.detection.rules_path = Some(PathBuf::from(rules));
    }
    if has_flag(&args, "--sequential") {
        config.detection.parallel = false;
    }

    let detector = Detector::from_config(&config).context("failed to load rule file")?;

    if has_flag(&args, "--save-config") {
        let Some(store) = store.as_ref() else {
            bail!("no config directory available on this platform");
        };
        store.save(&config).context("failed to save config")?;
        info!("Config saved to {}", store.config_file().display());
    }

    let text = normalize_punctuation(&read_input(&path)?);
    let result = detector.analyze(&text);

    if !has_flag(&args, "--quiet") {
        println!("Input: {}", if path == "-" { "(stdin)" } else { path.as_str() });
        println!(
            "Rules: {} ({} rules), profile: {}",
            detector.rules().version(),
            detector.rules().len(),
            detector.options().profile.as_str()
        );
        println!();
        print_report(&result);
    }

    if let Some(out) = parse_arg_value(&args, "--out") {
        let json = serde_json::to_string_pretty(&result).context("failed to serialize result")?;
        std::fs::write(&out, json).with_context(|| format!("failed to write {}", out))?;
        info!("Result written to {}", out);
    }

    Ok(())
}
