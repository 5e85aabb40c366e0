use std::path::Path;

use anyhow::Context;
use colored::Colorize;
use memstore::{InMemoryStore, Store};
use memstore_ads::{ingest, parse_ads, Ad, AdPolicy, IngestReport};
use serde_json::json;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Demo(_) => cmd_demo(cli.format),
        Command::Load(args) => cmd_load(args, cli.format),
        Command::Policy(args) => cmd_policy(args, cli.format),
    }
}

/// What the demo observed, shared by both output formats.
struct DemoOutcome {
    found_ad: Ad,
    found_str: Option<String>,
    rejected_id: String,
    error: Option<String>,
    found_after: bool,
}

impl DemoOutcome {
    fn to_json(&self) -> serde_json::Value {
        json!({
            "ad_store": { "find": &self.found_ad },
            "string_store": { "find": &self.found_str },
            "validating_store": {
                "error": &self.error,
                "found_after_rejection": self.found_after,
            },
        })
    }
}

fn run_demo() -> anyhow::Result<DemoOutcome> {
    // Plain ad store.
    let ads = InMemoryStore::<String, Ad>::new();
    let ad = ads.store(
        "ad-id".into(),
        Ad::new("my ad title", "my ad description", 32).with_id("ad-id"),
    )?;
    let found_ad = ads.find(&ad.id).context("stored ad should be found")?;

    // Same store type, different value type.
    let strings = InMemoryStore::<String, String>::new();
    strings.store("string-id".into(), "string-value".into())?;
    let found_str = strings.find(&"string-id".into());

    // Validating store rejects the over-long description.
    let validated = AdPolicy::default().build_store();
    let rejected = Ad::new("ad title", "more than twenty character long!", 32).with_id("ad-id");
    let error = validated
        .store(rejected.id.clone(), rejected.clone())
        .err()
        .map(|e| e.to_string());
    let (_, found_after) = validated.find_or_default(&rejected.id);

    Ok(DemoOutcome {
        found_ad,
        found_str,
        rejected_id: rejected.id,
        error,
        found_after,
    })
}

fn cmd_demo(format: OutputFormat) -> anyhow::Result<()> {
    let outcome = run_demo()?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&outcome.to_json())?);
        }
        OutputFormat::Text => {
            let found_ad = &outcome.found_ad;
            println!("{}", "Ad store".bold());
            println!(
                "  find({}) = {} \"{}\" ({})",
                found_ad.id.yellow(),
                found_ad.title,
                found_ad.description,
                found_ad.price
            );

            println!("{}", "String store".bold());
            match &outcome.found_str {
                Some(value) => println!("  find({}) = {}", "string-id".yellow(), value),
                None => println!("  find({}) = {}", "string-id".yellow(), "not found".red()),
            }

            println!("{}", "Validating ad store".bold());
            match &outcome.error {
                None => println!("  {} stored {}", "✓".green(), outcome.rejected_id.yellow()),
                Some(e) => println!("  {} {}", "✗".red(), e),
            }
            println!(
                "  find({}) after rejection: {}",
                outcome.rejected_id.yellow(),
                if outcome.found_after { "found".red() } else { "not found".green() }
            );
        }
    }
    Ok(())
}

fn cmd_load(args: LoadArgs, format: OutputFormat) -> anyhow::Result<()> {
    let (policy, report) = load_ads(&args.file, args.policy.as_deref())?;

    match format {
        OutputFormat::Json => {
            let out = json!({ "policy": policy, "report": report });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        OutputFormat::Text => {
            for id in &report.accepted {
                println!("  {} {}", "stored:".green(), id);
            }
            for id in &report.replaced {
                println!("  {} {}", "replaced:".yellow(), id);
            }
            for rejection in &report.rejected {
                println!(
                    "  {} {} ({})",
                    "rejected:".red(),
                    rejection.id,
                    rejection.reason
                );
            }
            let summary = format!(
                "{} processed, {} stored, {} replaced, {} rejected",
                report.total(),
                report.accepted.len(),
                report.replaced.len(),
                report.rejected.len()
            );
            if report.is_clean() {
                println!("{} {}", "✓".green().bold(), summary);
            } else {
                println!("{} {}", "!".yellow().bold(), summary);
            }
        }
    }
    Ok(())
}

fn cmd_policy(args: PolicyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let policy = resolve_policy(args.policy.as_deref())?;
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&policy)?),
        OutputFormat::Text => {
            println!("max_description_len = {}", policy.max_description_len.to_string().cyan());
            println!("require_title = {}", policy.require_title.to_string().cyan());
            match policy.min_price {
                Some(min) => println!("min_price = {}", min.to_string().cyan()),
                None => println!("min_price = {}", "none".dimmed()),
            }
            println!("rules: {}", policy.validator().names().join(" -> "));
        }
    }
    Ok(())
}

fn resolve_policy(path: Option<&Path>) -> anyhow::Result<AdPolicy> {
    match path {
        Some(path) => AdPolicy::load(path)
            .with_context(|| format!("failed to load policy from {}", path.display())),
        None => Ok(AdPolicy::default()),
    }
}

fn load_ads(file: &Path, policy: Option<&Path>) -> anyhow::Result<(AdPolicy, IngestReport)> {
    let policy = resolve_policy(policy)?;
    let text = std::fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    let ads = parse_ads(&text).with_context(|| format!("failed to parse {}", file.display()))?;

    let store = policy.build_store();
    let report = ingest(&store, ads);
    Ok((policy, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn load_applies_default_policy() {
        let ads = write_temp(
            r#"[
                {"id": "ok", "title": "bike", "description": "barely used", "price": 40},
                {"id": "long", "title": "car", "description": "more than twenty character long", "price": 900}
            ]"#,
        );

        let (policy, report) = load_ads(ads.path(), None).unwrap();
        assert_eq!(policy, AdPolicy::default());
        assert_eq!(report.accepted, vec!["ok"]);
        assert_eq!(report.rejected[0].id, "long");
    }

    #[test]
    fn load_honours_policy_file() {
        let ads = write_temp(r#"[{"id": "long", "description": "more than twenty character long"}]"#);
        let policy = write_temp("max_description_len = 64\n");

        let (policy, report) = load_ads(ads.path(), Some(policy.path())).unwrap();
        assert_eq!(policy.max_description_len, 64);
        assert!(report.is_clean());
    }

    #[test]
    fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_ads(&dir.path().join("none.json"), None).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn load_reports_duplicate_ids_once() {
        let ads = write_temp(
            r#"[
                {"id": "dup", "description": "first"},
                {"id": "dup", "description": "second"}
            ]"#,
        );

        let (_, report) = load_ads(ads.path(), None).unwrap();
        assert_eq!(report.total(), 2);
        assert_eq!(report.accepted, vec!["dup"]);
        assert_eq!(report.replaced, vec!["dup"]);
    }

    #[test]
    fn demo_rejects_long_description_and_stores_nothing() {
        let json = run_demo().unwrap().to_json();

        assert_eq!(json["ad_store"]["find"]["id"], "ad-id");
        assert_eq!(json["ad_store"]["find"]["description"], "my ad description");
        assert_eq!(json["string_store"]["find"], "string-value");
        assert_eq!(
            json["validating_store"]["error"],
            "value is invalid: description must be 20 characters or less"
        );
        assert_eq!(json["validating_store"]["found_after_rejection"], false);
    }

    #[test]
    fn demo_runs_in_both_formats() {
        cmd_demo(OutputFormat::Text).unwrap();
        cmd_demo(OutputFormat::Json).unwrap();
    }
}
