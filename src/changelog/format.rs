//! Changelog rendering
//!
//! The reStructuredText form ends up in the package metadata and links every
//! commit and issue back to the hosting service. The Markdown form is the
//! body of the hosted release.

use crate::domain::{ChangelogEntry, Project};
use regex::Regex;
use std::collections::HashSet;

const CHANGELOG_TITLE: &str = "Changes since last version";

const ISSUE_PATTERN: &str = r"#([0-9]+)";

fn header() -> Vec<String> {
    vec![
        String::new(),
        CHANGELOG_TITLE.to_string(),
        "-".repeat(CHANGELOG_TITLE.len()),
        String::new(),
    ]
}

/// Render the changelog as a Markdown list
pub fn markdown(entries: &[ChangelogEntry]) -> String {
    let mut output = header();
    output.extend(
        entries
            .iter()
            .map(|entry| format!("* {}: {}", entry.short_id, entry.summary)),
    );
    output.push(String::new());
    output.join("\n")
}

/// Render the changelog as reStructuredText with hyperlink targets
///
/// `#123` references in summaries become links to the project's issues.
/// Link targets follow the list, each once, in order of first appearance.
pub fn rst(entries: &[ChangelogEntry], project: &Project) -> String {
    let issue = Regex::new(ISSUE_PATTERN).ok();
    let mut output = header();
    let mut links = Links::default();

    for entry in entries {
        links.add(
            &entry.short_id,
            format!(".. _{}: {}", entry.short_id, project.commit_url(&entry.short_id)),
        );

        let summary = match &issue {
            Some(re) => {
                for captures in re.captures_iter(&entry.summary) {
                    let number = &captures[1];
                    links.add(
                        &format!("#{}", number),
                        format!(".. _#{}: {}", number, project.issue_url(number)),
                    );
                }
                re.replace_all(&entry.summary, "`#${1}`_").into_owned()
            }
            None => entry.summary.clone(),
        };

        output.push(format!("* `{}`_: {}", entry.short_id, summary));
    }

    output.push(String::new());
    output.extend(links.lines);
    output.join("\n")
}

#[derive(Default)]
struct Links {
    seen: HashSet<String>,
    lines: Vec<String>,
}

impl Links {
    fn add(&mut self, key: &str, line: String) {
        if self.seen.insert(key.to_string()) {
            self.lines.push(line);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries() -> Vec<ChangelogEntry> {
        vec![
            ChangelogEntry::new("b2c3d4e", "Fix #12 and #15"),
            ChangelogEntry::new("a1b2c3d", "Follow-up for #12"),
        ]
    }

    #[test]
    fn test_markdown() {
        let expected = "\n\
            Changes since last version\n\
            --------------------------\n\
            \n\
            * b2c3d4e: Fix #12 and #15\n\
            * a1b2c3d: Follow-up for #12\n";
        assert_eq!(markdown(&entries()), expected);
    }

    #[test]
    fn test_markdown_empty() {
        assert_eq!(
            markdown(&[]),
            "\nChanges since last version\n--------------------------\n\n"
        );
    }

    #[test]
    fn test_rst_links_commits_and_issues() {
        let project = Project::new("acme", "widget");
        let output = rst(&entries(), &project);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[4], "* `b2c3d4e`_: Fix `#12`_ and `#15`_");
        assert_eq!(lines[5], "* `a1b2c3d`_: Follow-up for `#12`_");
        assert_eq!(lines[6], "");
        assert_eq!(
            &lines[7..],
            &[
                ".. _b2c3d4e: https://github.com/acme/widget/commit/b2c3d4e",
                ".. _#12: https://github.com/acme/widget/issues/12",
                ".. _#15: https://github.com/acme/widget/issues/15",
                ".. _a1b2c3d: https://github.com/acme/widget/commit/a1b2c3d",
            ]
        );
    }

    #[test]
    fn test_rst_without_issue_references() {
        let project = Project::new("acme", "widget");
        let output = rst(&[ChangelogEntry::new("abc1234", "Tidy up")], &project);
        assert!(output.contains("* `abc1234`_: Tidy up\n"));
        assert!(output.ends_with(".. _abc1234: https://github.com/acme/widget/commit/abc1234"));
    }
}
