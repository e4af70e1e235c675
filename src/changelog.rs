//! Changelog aggregation - groups classified commits into a renderable,
//! deterministic document.

use crate::classifier::{issue_refs, IssueRef};
use crate::domain::{CommitRecord, CommitType};
use std::fmt::Write;

/// Fixed changelog sections, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Breaking,
    Features,
    Fixes,
    Performance,
    Other,
}

impl Section {
    pub const ORDER: [Section; 5] = [
        Section::Breaking,
        Section::Features,
        Section::Fixes,
        Section::Performance,
        Section::Other,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Section::Breaking => "Breaking Changes",
            Section::Features => "Features",
            Section::Fixes => "Bug Fixes",
            Section::Performance => "Performance",
            Section::Other => "Other",
        }
    }

    /// Natural section for a commit type. Breaking placement is handled
    /// separately since breaking commits appear twice.
    fn for_type(commit_type: CommitType) -> Section {
        match commit_type {
            CommitType::Feat => Section::Features,
            CommitType::Fix => Section::Fixes,
            CommitType::Perf => Section::Performance,
            _ => Section::Other,
        }
    }
}

/// One changelog line: subject with optional scope prefix and issue links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangelogEntry {
    pub scope: Option<String>,
    pub subject: String,
    pub refs: Vec<IssueRef>,
}

impl ChangelogEntry {
    fn from_record(record: &CommitRecord) -> Self {
        ChangelogEntry {
            scope: record.scope.clone(),
            subject: record.subject.clone(),
            refs: issue_refs(record),
        }
    }

    pub fn render(&self) -> String {
        let mut line = String::from("- ");
        if let Some(scope) = &self.scope {
            let _ = write!(line, "[{}] ", scope);
        }
        line.push_str(&self.subject);
        if !self.refs.is_empty() {
            let links: Vec<String> = self.refs.iter().map(|r| r.to_string()).collect();
            let _ = write!(line, " ({})", links.join(", "));
        }
        line
    }
}

/// Grouped changelog for one release. Section order is fixed, entries keep
/// input (chronological) order, duplicates within a section collapse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChangelogDocument {
    sections: Vec<(Section, Vec<ChangelogEntry>)>,
}

impl ChangelogDocument {
    pub fn sections(&self) -> &[(Section, Vec<ChangelogEntry>)] {
        &self.sections
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn to_markdown(&self) -> String {
        let mut output = String::new();
        for (section, entries) in &self.sections {
            if !output.is_empty() {
                output.push('\n');
            }
            let _ = writeln!(output, "## {}", section.title());
            output.push('\n');
            for entry in entries {
                let _ = writeln!(output, "{}", entry.render());
            }
        }
        output
    }
}

/// Group a classified commit batch into a changelog document.
pub fn render(commits: &[CommitRecord]) -> ChangelogDocument {
    let mut breaking = Vec::new();
    let mut features = Vec::new();
    let mut fixes = Vec::new();
    let mut performance = Vec::new();
    let mut other = Vec::new();

    for commit in commits {
        let entry = ChangelogEntry::from_record(commit);
        if commit.breaking {
            push_unique(&mut breaking, entry.clone());
        }
        let bucket = match Section::for_type(commit.commit_type) {
            Section::Features => &mut features,
            Section::Fixes => &mut fixes,
            Section::Performance => &mut performance,
            _ => &mut other,
        };
        push_unique(bucket, entry);
    }

    let mut sections = Vec::new();
    for (section, bucket) in [
        (Section::Breaking, breaking),
        (Section::Features, features),
        (Section::Fixes, fixes),
        (Section::Performance, performance),
        (Section::Other, other),
    ] {
        if !bucket.is_empty() {
            sections.push((section, bucket));
        }
    }
    ChangelogDocument { sections }
}

fn push_unique(bucket: &mut Vec<ChangelogEntry>, entry: ChangelogEntry) {
    if !bucket.contains(&entry) {
        bucket.push(entry);
    }
}
