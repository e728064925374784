//! Main release workflow orchestration logic
//!
//! The workflow is a fixed sequence of states. Every state must succeed
//! before the next one starts; any failure moves straight to
//! [ReleaseState::Aborted] and nothing after it runs. Building and uploading
//! are delegated to the collaborators in [crate::publish] and never retried.

use std::fmt;
use std::path::PathBuf;

use crate::boundary::BoundaryWarning;
use crate::changelog::{self, format};
use crate::domain::{version, ChangelogEntry, Project, ReleaseDecision, Version};
use crate::error::PublishError;
use crate::git::Repository;
use crate::inspector;
use crate::publish::{ArtifactBuilder, BuildRequest, HostedRelease, PackageIndex, ReleaseHost};
use crate::ui;
use crate::validator;

/// States of a release run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReleaseState {
    Start,
    CheckingCleanliness,
    CheckingTag,
    ResolvingVersion,
    GeneratingChangelog,
    Building,
    Uploading,
    Done,
    Aborted,
}

impl ReleaseState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ReleaseState::Done | ReleaseState::Aborted)
    }
}

impl fmt::Display for ReleaseState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ReleaseState::Start => "START",
            ReleaseState::CheckingCleanliness => "CHECKING_CLEANLINESS",
            ReleaseState::CheckingTag => "CHECKING_TAG",
            ReleaseState::ResolvingVersion => "RESOLVING_VERSION",
            ReleaseState::GeneratingChangelog => "GENERATING_CHANGELOG",
            ReleaseState::Building => "BUILDING",
            ReleaseState::Uploading => "UPLOADING",
            ReleaseState::Done => "DONE",
            ReleaseState::Aborted => "ABORTED",
        };
        f.write_str(name)
    }
}

/// Arguments for the release workflow
///
/// Mirrors the CLI arguments in a form that does not depend on clap.
#[derive(Debug, Clone, PartialEq)]
pub struct PublishWorkflowArgs {
    pub project: Project,

    /// Release even if the working copy has findings
    pub force: bool,

    /// List merge commits in the changelog
    pub include_merge_commits: bool,
}

/// The external collaborators a release delegates to
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub builder: &'a dyn ArtifactBuilder,
    pub host: &'a dyn ReleaseHost,
    pub index: &'a dyn PackageIndex,
}

/// Everything a release run produced, successful or not
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowResult {
    /// States entered, in order, ending in a terminal state
    pub states: Vec<ReleaseState>,
    pub decision: ReleaseDecision,
    /// The state that failed, when the run aborted
    pub aborted_in: Option<ReleaseState>,
    /// The validated release tag
    pub tag: Option<String>,
    pub version: Option<Version>,
    pub previous_tag: Option<String>,
    pub changelog: Vec<ChangelogEntry>,
    pub artifacts: Vec<PathBuf>,
    pub warnings: Vec<BoundaryWarning>,
}

impl WorkflowResult {
    fn new() -> Self {
        WorkflowResult {
            states: vec![ReleaseState::Start],
            decision: ReleaseDecision::default(),
            aborted_in: None,
            tag: None,
            version: None,
            previous_tag: None,
            changelog: Vec::new(),
            artifacts: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn final_state(&self) -> ReleaseState {
        self.states.last().copied().unwrap_or(ReleaseState::Start)
    }

    pub fn reached(&self, state: ReleaseState) -> bool {
        self.states.contains(&state)
    }

    /// Process exit code: 0 when done, otherwise by the phase that failed
    ///
    /// 1 for validation and history problems, 2 for the build, 3 for uploads.
    pub fn exit_code(&self) -> i32 {
        match self.aborted_in {
            None if self.final_state() == ReleaseState::Done => 0,
            Some(ReleaseState::Building) => 2,
            Some(ReleaseState::Uploading) => 3,
            _ => 1,
        }
    }
}

/// Reasons the run stopped; converting an error keeps its message verbatim
struct Abort(Vec<String>);

impl From<PublishError> for Abort {
    fn from(e: PublishError) -> Self {
        Abort(vec![e.to_string()])
    }
}

/// Drives one release run through [ReleaseState]
pub struct Orchestrator<'a, R: Repository + ?Sized> {
    repo: &'a R,
    collaborators: Collaborators<'a>,
    args: PublishWorkflowArgs,
    result: WorkflowResult,
}

impl<'a, R: Repository + ?Sized> Orchestrator<'a, R> {
    pub fn new(repo: &'a R, collaborators: Collaborators<'a>, args: PublishWorkflowArgs) -> Self {
        Orchestrator {
            repo,
            collaborators,
            args,
            result: WorkflowResult::new(),
        }
    }

    /// Run the release to completion or to the first failure
    pub fn run(mut self) -> WorkflowResult {
        match self.execute() {
            Ok(()) => self.enter(ReleaseState::Done),
            Err(Abort(reasons)) => {
                let failed = self.result.final_state();
                log::warn!("Release aborted in {}", failed);
                self.result.aborted_in = Some(failed);
                self.result.decision = ReleaseDecision::blocked(reasons);
                self.enter(ReleaseState::Aborted);
            }
        }
        self.result
    }

    fn enter(&mut self, state: ReleaseState) {
        log::debug!("{} -> {}", self.result.final_state(), state);
        self.result.states.push(state);
    }

    fn warn(&mut self, warning: BoundaryWarning) {
        ui::display_boundary_warning(&warning);
        self.result.warnings.push(warning);
    }

    fn execute(&mut self) -> Result<(), Abort> {
        self.enter(ReleaseState::CheckingCleanliness);
        let status = inspector::inspect(self.repo)?;

        // Findings are gathered across both checks so they can be fixed in one go
        let mut findings = Vec::new();
        for finding in status.findings() {
            if self.args.force {
                self.warn(BoundaryWarning::ForcedPastFinding { finding });
            } else {
                findings.push(finding);
            }
        }

        self.enter(ReleaseState::CheckingTag);
        let tags = match self.repo.tags_at_head() {
            Ok(tags) => tags,
            Err(e) => {
                findings.push(e.to_string());
                return Err(Abort(findings));
            }
        };
        let tag = match validator::validate_tags(&tags) {
            Ok(tag) => Some(tag.clone()),
            Err(e) => {
                findings.push(e.to_string());
                None
            }
        };
        let tag = match tag {
            Some(tag) if findings.is_empty() => tag,
            _ => return Err(Abort(findings)),
        };
        if tags.len() > 1 {
            let ignored = tags
                .iter()
                .filter(|t| t.name != tag.name)
                .map(|t| t.name.clone())
                .collect();
            self.warn(BoundaryWarning::MultipleTagsAtHead {
                chosen: tag.name.clone(),
                ignored,
            });
        }
        self.result.decision = ReleaseDecision::proceed();
        self.result.tag = Some(tag.name.clone());

        self.enter(ReleaseState::ResolvingVersion);
        let version = version::resolve(&tag)?;
        self.result.version = Some(version);
        ui::display_status(&format!("Releasing version {}", version));

        self.enter(ReleaseState::GeneratingChangelog);
        let previous_tag = changelog::previous_release_tag(self.repo, &tag.name, version)?;
        let entries = changelog::generate(
            self.repo,
            &tag.name,
            previous_tag.as_deref(),
            self.args.include_merge_commits,
        )?;
        match &previous_tag {
            None => self.warn(BoundaryWarning::NoPreviousRelease {
                tag: tag.name.clone(),
            }),
            Some(previous) if entries.is_empty() => self.warn(BoundaryWarning::EmptyChangelog {
                tag: tag.name.clone(),
                previous_tag: previous.clone(),
            }),
            Some(_) => {}
        }
        ui::display_changelog(version, &entries);
        self.result.previous_tag = previous_tag;
        self.result.changelog = entries;

        self.enter(ReleaseState::Building);
        ui::display_status("Building artifacts...");
        let rst = format::rst(&self.result.changelog, &self.args.project);
        let artifacts = self.collaborators.builder.build(&BuildRequest {
            version,
            changelog: &rst,
        })?;
        self.result.artifacts = artifacts;

        self.enter(ReleaseState::Uploading);
        let notes = format::markdown(&self.result.changelog);
        ui::display_status(&format!("Creating release on {}", self.args.project));
        self.collaborators.host.create_release(&HostedRelease {
            project: &self.args.project,
            tag: &tag.name,
            version,
            notes: &notes,
            artifacts: &self.result.artifacts,
        })?;
        ui::display_status("Uploading to package index...");
        self.collaborators.index.upload(&self.result.artifacts)?;

        Ok(())
    }
}
