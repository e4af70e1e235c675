use anyhow::Result;
use clap::Parser;
use std::fs;
use std::io::Read;

use relver::analyzer::{ReleaseAnalyzer, RunContext};
use relver::config;
use relver::domain::{ReleaseChannel, TagPattern, Version};
use relver::policy::Phase;
use relver::ui;

#[derive(clap::Parser)]
#[command(
    name = "relver",
    about = "Compute the next semantic version and changelog from conventional commits"
)]
struct Args {
    #[arg(
        short = 'C',
        long,
        help = "Current released version or tag (e.g. 1.2.3 or v1.2.3)"
    )]
    current: String,

    #[arg(
        short = 'n',
        long,
        default_value = "release",
        help = "Release channel: alpha, beta, rc or release"
    )]
    channel: String,

    #[arg(
        short,
        long,
        default_value = "feature",
        help = "Branch phase: feature, bugfix, release, hotfix or main"
    )]
    phase: String,

    #[arg(
        long,
        help = "Most recent pre-release published for the upcoming version (e.g. 1.2.0-beta.1)"
    )]
    prior_prerelease: Option<String>,

    #[arg(short, long, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(long, help = "Print the changelog as Markdown")]
    changelog: bool,

    #[arg(long, help = "Fail when the batch contains no commit messages")]
    require_commits: bool,

    #[arg(long, help = "Exit non-zero when any commit is rejected")]
    strict: bool,

    #[arg(help = "File of NUL-separated commit messages ('-' or omitted reads stdin)")]
    file: Option<String>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let config = match config::load_config(args.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::display_error(&format!("loading config: {}", e));
            std::process::exit(1);
        }
    };

    let pattern = config.tag_pattern();
    let current = parse_version_arg(&args.current, &pattern)?;
    let channel: ReleaseChannel = args.channel.parse()?;
    let phase: Phase = args.phase.parse()?;
    let prior_prerelease = match &args.prior_prerelease {
        Some(prior) => Some(Version::parse(prior)?),
        None => None,
    };

    if current.is_prerelease() {
        ui::display_warning(&format!(
            "current version {} is a pre-release; the increment applies to its core",
            current
        ));
    }

    let messages = read_messages(args.file.as_deref())?;
    ui::display_status(&format!(
        "Analyzing {} commit message(s) on a {} branch for the {} channel",
        messages.len(),
        phase,
        channel
    ));

    let analyzer = ReleaseAnalyzer::new(&config)?;
    let context = RunContext {
        current,
        channel,
        phase,
        prior_prerelease,
        require_commits: args.require_commits,
    };
    let report = analyzer.analyze(&messages, &context)?;

    ui::display_parse_errors(&report.parse_errors);
    ui::display_gate_violations(&report.gate_violations);
    ui::display_ignored(&report.ignored);
    ui::display_decision(&report.decision, &pattern);
    if args.changelog {
        ui::display_changelog(&report.changelog);
    }

    if report.has_rejections() {
        let rejected = report.parse_errors.len() + report.gate_violations.len();
        if args.strict {
            ui::display_error(&format!("{} commit(s) rejected", rejected));
            std::process::exit(1);
        }
        ui::display_warning(&format!("{} commit(s) rejected (non-fatal)", rejected));
    } else {
        ui::display_success("All commit messages passed validation and branch policy");
    }

    Ok(())
}

/// Accept either a bare version ("1.2.3") or a tag in the configured
/// pattern ("v1.2.3").
fn parse_version_arg(input: &str, pattern: &TagPattern) -> Result<Version> {
    if let Ok(Some(version)) = pattern.extract(input) {
        return Ok(version);
    }
    Ok(Version::parse(input)?)
}

/// Read NUL-separated commit messages, the shape `git log -z --format=%B`
/// emits.
fn read_messages(file: Option<&str>) -> Result<Vec<String>> {
    let buffer = match file {
        Some("-") | None => {
            let mut buffer = String::new();
            std::io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read_to_string(path)?,
    };

    Ok(buffer
        .split('\0')
        .map(str::trim)
        .filter(|message| !message.is_empty())
        .map(|message| message.to_string())
        .collect())
}
