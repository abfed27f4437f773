//! Agent roster and subreddit routing
//!
//! Each thread is judged by one subreddit-specialized agent, picked by
//! matching the detected subreddit against each profile's patterns, plus
//! every platform-wide agent.
//!
//! ```text
//! r/programming ──► science specialist ─┐
//!                                       ├──► dispatch order: [specialist, platform...]
//!                   reddit-platform   ──┘
//! ```

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Where an agent's judgment applies
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AgentScope {
    /// Community rules of one subreddit family
    #[default]
    Subreddit,
    /// Reddit-wide content policy
    Platform,
}

impl AgentScope {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentScope::Subreddit => "subreddit",
            AgentScope::Platform => "platform",
        }
    }
}

impl std::fmt::Display for AgentScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Configuration of one moderation agent
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Community the agent speaks for (e.g. "science", "reddit")
    pub subreddit: String,
    /// Identifier passed to the agent backend
    pub agent_id: String,
    /// Subreddit name patterns routed to this agent (anchored, case-insensitive)
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub scope: AgentScope,
}

impl AgentProfile {
    pub fn specialist(
        subreddit: impl Into<String>,
        agent_id: impl Into<String>,
        patterns: &[&str],
    ) -> Self {
        Self {
            subreddit: subreddit.into(),
            agent_id: agent_id.into(),
            patterns: patterns.iter().map(|p| p.to_string()).collect(),
            scope: AgentScope::Subreddit,
        }
    }

    pub fn platform(subreddit: impl Into<String>, agent_id: impl Into<String>) -> Self {
        Self {
            subreddit: subreddit.into(),
            agent_id: agent_id.into(),
            patterns: Vec::new(),
            scope: AgentScope::Platform,
        }
    }
}

/// Errors building a roster from configuration
#[derive(Error, Debug)]
pub enum RosterError {
    #[error("invalid pattern '{pattern}' for agent {agent_id}: {source}")]
    InvalidPattern {
        agent_id: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("no subreddit agent configured")]
    NoSpecialist,

    #[error("default agent '{0}' is not a configured subreddit agent")]
    UnknownDefault(String),
}

/// Agents chosen for one thread, in dispatch order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentSelection {
    pub specialist: AgentProfile,
    pub platform: Vec<AgentProfile>,
}

impl AgentSelection {
    /// All agents in dispatch order: specialist first, then platform agents.
    pub fn in_dispatch_order(&self) -> Vec<&AgentProfile> {
        std::iter::once(&self.specialist)
            .chain(self.platform.iter())
            .collect()
    }

    /// Number of agents that will be dispatched.
    pub fn agent_count(&self) -> usize {
        1 + self.platform.len()
    }
}

/// Routing table from subreddit names to agents
#[derive(Debug, Clone)]
pub struct AgentRoster {
    specialists: Vec<(AgentProfile, Vec<Regex>)>,
    platform: Vec<AgentProfile>,
    default_index: usize,
}

impl AgentRoster {
    /// Build a roster. `default_subreddit` names the specialist used when no
    /// pattern matches; `None` picks the first specialist.
    pub fn new(
        profiles: Vec<AgentProfile>,
        default_subreddit: Option<&str>,
    ) -> Result<Self, RosterError> {
        let mut specialists = Vec::new();
        let mut platform = Vec::new();

        for profile in profiles {
            match profile.scope {
                AgentScope::Platform => platform.push(profile),
                AgentScope::Subreddit => {
                    let compiled = profile
                        .patterns
                        .iter()
                        .map(|p| {
                            Regex::new(&format!("(?i)^(?:{})$", p)).map_err(|source| {
                                RosterError::InvalidPattern {
                                    agent_id: profile.agent_id.clone(),
                                    pattern: p.clone(),
                                    source,
                                }
                            })
                        })
                        .collect::<Result<Vec<_>, _>>()?;
                    specialists.push((profile, compiled));
                }
            }
        }

        if specialists.is_empty() {
            return Err(RosterError::NoSpecialist);
        }

        let default_index = match default_subreddit {
            None => 0,
            Some(name) => specialists
                .iter()
                .position(|(p, _)| p.subreddit.eq_ignore_ascii_case(name))
                .ok_or_else(|| RosterError::UnknownDefault(name.to_string()))?,
        };

        Ok(Self {
            specialists,
            platform,
            default_index,
        })
    }

    /// Built-in roster covering the common subreddit families.
    pub fn builtin() -> Self {
        Self::new(Self::builtin_profiles(), Some("askreddit"))
            .expect("builtin roster patterns compile")
    }

    pub fn builtin_profiles() -> Vec<AgentProfile> {
        vec![
            AgentProfile::specialist(
                "science",
                "agent-science",
                &["science", "technology", "programming", "machinelearning", "futurology"],
            ),
            AgentProfile::specialist(
                "askreddit",
                "agent-askreddit",
                &["askreddit", "unpopularopinion", "changemyview", "amitheasshole"],
            ),
            AgentProfile::specialist(
                "worldnews",
                "agent-worldnews",
                &["worldnews", "politics", "geopolitics", "news"],
            ),
            AgentProfile::specialist(
                "askhistorians",
                "agent-askhistorians",
                &["askhistorians", "history", "wwii", "historymemes"],
            ),
            AgentProfile::platform("reddit", "agent-reddit-platform"),
        ]
    }

    /// Pick the agents for a subreddit. The first matching specialist wins.
    pub fn select(&self, subreddit: &str) -> AgentSelection {
        let specialist = self
            .specialists
            .iter()
            .find(|(_, patterns)| patterns.iter().any(|re| re.is_match(subreddit)))
            .map(|(profile, _)| profile)
            .unwrap_or(&self.specialists[self.default_index].0)
            .clone();

        AgentSelection {
            specialist,
            platform: self.platform.clone(),
        }
    }

    /// All configured profiles (specialists then platform agents).
    pub fn profiles(&self) -> impl Iterator<Item = &AgentProfile> {
        self.specialists
            .iter()
            .map(|(p, _)| p)
            .chain(self.platform.iter())
    }
}

impl Default for AgentRoster {
    fn default() -> Self {
        Self::builtin()
    }
}
