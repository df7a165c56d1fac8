use royale_simulation::{BounceRule, CollisionResolution};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub arena: ArenaConfig,
    pub population: PopulationConfig,
    pub entity: EntityConfig,
    pub rules: RulesConfig,
    pub tick: TickConfig,
    pub output: OutputConfig,
    pub debug: DebugConfig,
}

/// Arena size in pixels
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct ArenaConfig {
    pub width: u32,
    pub height: u32,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 350,
            height: 500,
        }
    }
}

/// Number of entities of each kind spawned at start
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(default)]
pub struct PopulationConfig {
    pub rock: usize,
    pub paper: usize,
    pub scissors: usize,
}

impl Default for PopulationConfig {
    fn default() -> Self {
        Self {
            rock: 20,
            paper: 20,
            scissors: 20,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct EntityConfig {
    pub radius: f32,
    pub velocity: f32,
}

impl Default for EntityConfig {
    fn default() -> Self {
        Self {
            radius: 8.0,
            velocity: 0.2,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct RulesConfig {
    pub bounce: BounceRule,
    pub collisions: CollisionResolution,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct TickConfig {
    /// Target cadence of the tick loop
    pub interval_ms: u64,
    /// Floor applied to the measured delta time
    pub min_delta_ms: f32,
    /// Stop after this many ticks even if no kind has won yet
    pub max_ticks: Option<u64>,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval_ms: 50,
            min_delta_ms: 1.0,
            max_ticks: None,
        }
    }
}

// --- Output Configuration ---

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SerializerType {
    #[default]
    Json,
    Binary,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SenderType {
    Stdio,
    File,
    #[default]
    Null,
}

/// Where per-tick records go and how often
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    pub serializer: SerializerType,
    pub sender: SenderType,
    /// Required by the file sender
    pub path: Option<PathBuf>,
    /// Send every Nth tick. The terminal tick is always sent.
    pub frequency: u32,
    /// Include every entity (kind, position, heading) in each record
    pub include_entities: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            serializer: SerializerType::default(),
            sender: SenderType::default(),
            path: None,
            frequency: 1,
            include_entities: false,
        }
    }
}

/// Diagnostic toggles, consumed by the runner only
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(default)]
pub struct DebugConfig {
    /// Log per-kind counts every tick
    pub team_counts: bool,
    /// Log entity headings every tick
    pub direction: bool,
    /// Log contacts that converted an entity
    pub hitboxes: bool,
    /// Record the population history and report it at the end of the run
    pub graph: bool,
}
