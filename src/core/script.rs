//! # Replay Scripts
//!
//! Drive a `Router<String>` through a fixed sequence of app actions and host
//! events, and record what both paths looked like after each step.
//!
//! Scripts are TOML:
//!
//! ```toml
//! pages = ["home", "inbox"]          # optional; pushes must use these names
//!
//! [[steps]]
//! kind = "push"
//! page = "home"
//!
//! [[steps]]
//! kind = "host_push"                 # a swipe or system push the app didn't ask for
//!
//! [[steps]]
//! kind = "remove_last"
//! count = 5
//! ```
//!
//! Step kinds: `push`, `set`, `remove_last`, `restore` go through
//! `Router::reduce`/`restore`; `host_push`, `host_pop`, `host_replace` write
//! to the opaque path directly, like a host would.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::action::{NavigationAction, Reduced};
use crate::core::page::AnyPage;
use crate::core::path::ProjectedEntry;
use crate::core::router::Router;

/// How external entries are shown in traces.
pub const EXTERNAL_MARKER: &str = "*";

fn one() -> usize {
    1
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Step {
    Push {
        page: String,
        /// Falls back to the configured default when omitted.
        allow_duplicates: Option<bool>,
    },
    Set {
        #[serde(default)]
        pages: Vec<String>,
    },
    RemoveLast {
        #[serde(default = "one")]
        count: usize,
    },
    Restore,
    HostPush {
        label: Option<String>,
    },
    HostPop {
        #[serde(default = "one")]
        count: usize,
    },
    /// Replace the opaque path with `count` host-owned elements.
    HostReplace {
        count: usize,
    },
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Push {
                page,
                allow_duplicates: Some(false),
            } => write!(f, "push {page} (unique)"),
            Step::Push { page, .. } => write!(f, "push {page}"),
            Step::Set { pages } => write!(f, "set [{}]", pages.join(", ")),
            Step::RemoveLast { count } => write!(f, "remove_last {count}"),
            Step::Restore => write!(f, "restore"),
            Step::HostPush { label: Some(label) } => write!(f, "host push {label}"),
            Step::HostPush { label: None } => write!(f, "host push"),
            Step::HostPop { count } => write!(f, "host pop {count}"),
            Step::HostReplace { count } => write!(f, "host replace {count}"),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Script {
    /// Page catalogue. When present, pushes and sets must stay inside it.
    #[serde(default)]
    pub pages: Option<Vec<String>>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ScriptError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// The script has no steps.
    EmptyScript,
    /// A step names a page outside the script's catalogue.
    UnknownPage { step: usize, name: String },
}

impl fmt::Display for ScriptError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScriptError::Io(e) => write!(f, "script I/O error: {e}"),
            ScriptError::Parse(e) => write!(f, "script parse error: {e}"),
            ScriptError::EmptyScript => write!(f, "script has no steps"),
            ScriptError::UnknownPage { step, name } => {
                write!(f, "step {step}: unknown page {name:?}")
            }
        }
    }
}

impl std::error::Error for ScriptError {}

impl Script {
    pub fn from_toml_str(source: &str) -> Result<Self, ScriptError> {
        let script: Script = toml::from_str(source).map_err(ScriptError::Parse)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let source = fs::read_to_string(path).map_err(ScriptError::Io)?;
        let script = Self::from_toml_str(&source)?;
        info!("Loaded {} step(s) from {}", script.steps.len(), path.display());
        Ok(script)
    }

    fn validate(&self) -> Result<(), ScriptError> {
        if self.steps.is_empty() {
            return Err(ScriptError::EmptyScript);
        }
        let Some(catalogue) = &self.pages else {
            return Ok(());
        };

        for (index, step) in self.steps.iter().enumerate() {
            let named: &[String] = match step {
                Step::Push { page, .. } => std::slice::from_ref(page),
                Step::Set { pages } => pages.as_slice(),
                _ => &[],
            };
            if let Some(name) = named.iter().find(|name| !catalogue.contains(*name)) {
                return Err(ScriptError::UnknownPage {
                    step: index + 1,
                    name: name.clone(),
                });
            }
        }
        Ok(())
    }
}

// ============================================================================
// Trace
// ============================================================================

/// One row of a replay: the step and the state it left behind.
#[derive(Debug, Clone, Serialize)]
pub struct TraceFrame {
    pub index: usize,
    pub step: String,
    pub outcome: Outcome,
    pub opaque_len: usize,
    /// Page names, with external entries shown as `*`.
    pub projected: Vec<String>,
    pub consistent: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Applied,
    Duplicate,
    Host,
}

impl From<Reduced> for Outcome {
    fn from(reduced: Reduced) -> Self {
        match reduced {
            Reduced::Duplicate => Outcome::Duplicate,
            Reduced::Applied | Reduced::Ignored => Outcome::Applied,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Trace {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    /// True if both paths had equal length after every step.
    pub fn is_consistent(&self) -> bool {
        self.frames.iter().all(|frame| frame.consistent)
    }

    pub fn last(&self) -> Option<&TraceFrame> {
        self.frames.last()
    }

    /// Plain-text table for terminals.
    pub fn render_table(&self) -> String {
        let step_width = self
            .frames
            .iter()
            .map(|frame| frame.step.len())
            .max()
            .unwrap_or(0)
            .max("step".len());

        let mut out = format!("run {} ({})\n", self.run_id, self.started_at.to_rfc3339());
        out.push_str(&format!(
            "{:>3}  {:<step_width$}  {:<9}  {:>3}  projected\n",
            "#", "step", "outcome", "len"
        ));
        for frame in &self.frames {
            let outcome = match frame.outcome {
                Outcome::Applied => "applied",
                Outcome::Duplicate => "duplicate",
                Outcome::Host => "host",
            };
            let marker = if frame.consistent { "" } else { "  (out of sync)" };
            out.push_str(&format!(
                "{:>3}  {:<step_width$}  {:<9}  {:>3}  [{}]{}\n",
                frame.index,
                frame.step,
                outcome,
                frame.opaque_len,
                frame.projected.join(", "),
                marker
            ));
        }
        out
    }
}

// ============================================================================
// Replay
// ============================================================================

/// Runs every step of `script` against a fresh router.
pub fn replay(script: &Script, default_allow_duplicates: bool) -> Trace {
    let router: Router<String> = Router::new();
    let mut trace = Trace {
        run_id: Uuid::new_v4(),
        started_at: Utc::now(),
        frames: Vec::with_capacity(script.steps.len()),
    };
    info!("Replay {} started with {} step(s)", trace.run_id, script.steps.len());

    for (index, step) in script.steps.iter().enumerate() {
        let outcome = apply_step(&router, step, default_allow_duplicates);
        let frame = TraceFrame {
            index: index + 1,
            step: step.to_string(),
            outcome,
            opaque_len: router.len(),
            projected: render_projected(&router),
            consistent: router.is_consistent(),
        };
        if !frame.consistent {
            warn!("Paths out of sync after step {}: {}", frame.index, frame.step);
        }
        debug!("{:?}", frame);
        trace.frames.push(frame);
    }
    trace
}

fn apply_step(router: &Router<String>, step: &Step, default_allow_duplicates: bool) -> Outcome {
    match step {
        Step::Push {
            page,
            allow_duplicates,
        } => router
            .reduce(NavigationAction::Push {
                page: page.clone(),
                allow_duplicates: allow_duplicates.unwrap_or(default_allow_duplicates),
            })
            .into(),
        Step::Set { pages } => router.reduce(NavigationAction::set(pages.iter().cloned())).into(),
        Step::RemoveLast { count } => router.reduce(NavigationAction::remove_last(*count)).into(),
        Step::Restore => {
            router.restore();
            Outcome::Applied
        }
        Step::HostPush { label } => {
            let element = AnyPage::new(label.clone().unwrap_or_else(|| "host".to_string()));
            router.opaque().mutate(|path| path.append(element));
            Outcome::Host
        }
        Step::HostPop { count } => {
            router.opaque().mutate(|path| path.remove_last(*count));
            Outcome::Host
        }
        Step::HostReplace { count } => {
            let elements = (0..*count).map(|i| AnyPage::new(format!("host-{i}"))).collect();
            router.opaque().set(elements);
            Outcome::Host
        }
    }
}

fn render_projected(router: &Router<String>) -> Vec<String> {
    router
        .projected_path()
        .iter()
        .map(|entry| match entry {
            ProjectedEntry::Known(page) => page.clone(),
            ProjectedEntry::External => EXTERNAL_MARKER.to_string(),
        })
        .collect()
}
