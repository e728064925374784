use std::path::PathBuf;

use publish::boundary::BoundaryWarning;
use publish::cli::{Collaborators, Orchestrator, PublishWorkflowArgs, ReleaseState, WorkflowResult};
use publish::domain::{ChangelogEntry, Project, ReleaseDecision, Version};
use publish::git::MockRepository;
use publish::publish::{ArtifactBuilder, BuildRequest, HostedRelease, PackageIndex, ReleaseHost};
use publish::{ui, Result};

struct Accepting;

impl ArtifactBuilder for Accepting {
    fn build(&self, _request: &BuildRequest<'_>) -> Result<Vec<PathBuf>> {
        Ok(vec![PathBuf::from("/work/dist/widget.tar.gz")])
    }
}

impl ReleaseHost for Accepting {
    fn create_release(&self, _release: &HostedRelease<'_>) -> Result<()> {
        Ok(())
    }
}

impl PackageIndex for Accepting {
    fn upload(&self, _artifacts: &[PathBuf]) -> Result<()> {
        Ok(())
    }
}

fn release(repo: &MockRepository, include_merge_commits: bool) -> WorkflowResult {
    let collaborators = Collaborators {
        builder: &Accepting,
        host: &Accepting,
        index: &Accepting,
    };
    let args = PublishWorkflowArgs {
        project: Project::new("acme", "widget"),
        force: false,
        include_merge_commits,
    };
    Orchestrator::new(repo, collaborators, args).run()
}

// ============================================================================
// Changelog Boundary Tests
// ============================================================================

#[test]
fn test_merge_only_range_warns_empty_changelog() {
    let mut repo = MockRepository::new();
    repo.commit("feature0000", "Add feature")
        .commit("release1000", "Prepare 1.0.0")
        .tag_annotated("v1.0.0", "release1000")
        .merge("merge000000", "Merge branch 'feature'", "feature0000")
        .tag_annotated("v1.0.1", "merge000000");

    let result = release(&repo, false);

    assert_eq!(result.final_state(), ReleaseState::Done);
    assert!(result.changelog.is_empty());
    assert!(result.warnings.contains(&BoundaryWarning::EmptyChangelog {
        tag: "v1.0.1".to_string(),
        previous_tag: "v1.0.0".to_string(),
    }));
}

#[test]
fn test_merge_commits_listed_when_configured() {
    let mut repo = MockRepository::new();
    repo.commit("feature0000", "Add feature")
        .commit("release1000", "Prepare 1.0.0")
        .tag_annotated("v1.0.0", "release1000")
        .merge("merge000000", "Merge branch 'feature'", "feature0000")
        .tag_annotated("v1.0.1", "merge000000");

    let result = release(&repo, true);

    assert_eq!(result.changelog.len(), 1);
    assert_eq!(result.changelog[0].summary, "Merge branch 'feature'");
    assert!(result.warnings.is_empty());
}

#[test]
fn test_higher_version_ancestor_is_not_previous_release() {
    // A maintenance release cut from an old commit that already carries a newer tag
    let mut repo = MockRepository::new();
    repo.commit("base0000000", "Initial import")
        .tag_annotated("v1.0.0", "base0000000")
        .commit("mistake0000", "Tagged too high")
        .tag_annotated("v3.0.0", "mistake0000")
        .commit("fix00000000", "Fix crash")
        .tag_annotated("v1.0.1", "fix00000000");

    let result = release(&repo, false);

    assert_eq!(result.previous_tag.as_deref(), Some("v1.0.0"));
    let summaries: Vec<&str> = result.changelog.iter().map(|e| e.summary.as_str()).collect();
    assert_eq!(summaries, vec!["Fix crash", "Tagged too high"]);
}

#[test]
fn test_non_release_tags_are_not_boundaries() {
    let mut repo = MockRepository::new();
    repo.commit("base0000000", "Initial import")
        .tag_annotated("v0.9.0", "base0000000")
        .commit("middle00000", "Add parser")
        .tag_annotated("nightly", "middle00000")
        .tag_lightweight("v0.9.5", "middle00000")
        .commit("head0000000", "Add docs")
        .tag_annotated("v1.0.0", "head0000000");

    let result = release(&repo, false);

    // Lightweight release-named tags still mark an earlier release
    assert_eq!(result.previous_tag.as_deref(), Some("v0.9.5"));
    assert_eq!(result.changelog.len(), 1);
}

#[test]
fn test_nearest_release_wins_over_higher_distant_one() {
    let mut repo = MockRepository::new();
    repo.commit("c1000000000", "One")
        .tag_annotated("v1.1.0", "c1000000000")
        .commit("c2000000000", "Two")
        .tag_annotated("v1.0.5", "c2000000000")
        .commit("c3000000000", "Three")
        .tag_annotated("v1.2.0", "c3000000000");

    let result = release(&repo, false);

    assert_eq!(result.previous_tag.as_deref(), Some("v1.0.5"));
}

// ============================================================================
// UI Output Tests
// ============================================================================

#[cfg(test)]
mod ui_output_tests {
    use super::*;

    #[test]
    fn test_display_functions_accept_every_warning() {
        let warnings = [
            BoundaryWarning::ForcedPastFinding {
                finding: "Repository has untracked files:\n\tnotes.txt".to_string(),
            },
            BoundaryWarning::MultipleTagsAtHead {
                chosen: "v1.0.0".to_string(),
                ignored: vec!["latest".to_string()],
            },
            BoundaryWarning::NoPreviousRelease {
                tag: "v1.0.0".to_string(),
            },
            BoundaryWarning::EmptyChangelog {
                tag: "v1.0.1".to_string(),
                previous_tag: "v1.0.0".to_string(),
            },
        ];
        for warning in &warnings {
            ui::display_boundary_warning(warning);
        }
    }

    #[test]
    fn test_display_changelog_truncates_long_lists() {
        let entries: Vec<ChangelogEntry> = (0..15)
            .map(|i| ChangelogEntry::new(format!("{:07x}", i), &format!("Change {}", i)))
            .collect();
        ui::display_changelog(Version::new(2, 0, 0), &entries);
        ui::display_changelog(Version::new(2, 0, 0), &[]);
    }

    #[test]
    fn test_display_blocking_reasons() {
        let decision = ReleaseDecision::blocked(vec![
            "Repository has untracked files:\n\tnotes.txt".to_string(),
            "No tag".to_string(),
        ]);
        assert!(!decision.proceed);
        ui::display_blocking_reasons(&decision);
    }
}
