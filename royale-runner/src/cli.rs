use clap::{Parser, ValueEnum};
use royale_config::{Config, ConfigError, ConfigLoader, SenderType, SerializerType};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Binary,
}

impl From<OutputFormat> for SerializerType {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Json => SerializerType::Json,
            OutputFormat::Binary => SerializerType::Binary,
        }
    }
}

/// Rock Paper Scissors Battle Royale, headless.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a JSON or TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Arena width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Arena height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    #[arg(long)]
    pub rock: Option<usize>,

    #[arg(long)]
    pub paper: Option<usize>,

    #[arg(long)]
    pub scissors: Option<usize>,

    /// Entity radius in pixels
    #[arg(long)]
    pub radius: Option<f32>,

    /// Velocity scale
    #[arg(long)]
    pub velocity: Option<f32>,

    /// Milliseconds between ticks
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Stop after this many ticks
    #[arg(long)]
    pub max_ticks: Option<u64>,

    /// Write tick records here; `-` for standard output
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Record format
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Include every entity in each record
    #[arg(long)]
    pub entities: bool,

    /// Report the population history at the end of the run
    #[arg(long)]
    pub graph: bool,

    /// Log per-kind counts every tick
    #[arg(long)]
    pub team_counts: bool,

    /// Log entity headings every tick (trace level)
    #[arg(long)]
    pub direction: bool,

    /// Log contacts that converted an entity (debug level)
    #[arg(long)]
    pub hitboxes: bool,
}

impl Args {
    /// Load the config file (or defaults), apply command line overrides and validate.
    pub fn resolve_config(&self) -> Result<Config, ConfigError> {
        let mut config = match &self.config {
            Some(path) => ConfigLoader::from_file(path)?,
            None => Config::default(),
        };
        self.apply_overrides(&mut config);
        ConfigLoader::validate(&config)?;
        Ok(config)
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(width) = self.width {
            config.arena.width = width;
        }
        if let Some(height) = self.height {
            config.arena.height = height;
        }
        if let Some(rock) = self.rock {
            config.population.rock = rock;
        }
        if let Some(paper) = self.paper {
            config.population.paper = paper;
        }
        if let Some(scissors) = self.scissors {
            config.population.scissors = scissors;
        }
        if let Some(radius) = self.radius {
            config.entity.radius = radius;
        }
        if let Some(velocity) = self.velocity {
            config.entity.velocity = velocity;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.tick.interval_ms = interval_ms;
        }
        if self.max_ticks.is_some() {
            config.tick.max_ticks = self.max_ticks;
        }
        if let Some(output) = &self.output {
            if output.as_os_str() == "-" {
                config.output.sender = SenderType::Stdio;
                config.output.path = None;
            } else {
                config.output.sender = SenderType::File;
                config.output.path = Some(output.clone());
            }
        }
        if let Some(format) = self.format {
            config.output.serializer = format.into();
        }
        if self.entities {
            config.output.include_entities = true;
        }
        if self.graph {
            config.debug.graph = true;
        }
        if self.team_counts {
            config.debug.team_counts = true;
        }
        if self.direction {
            config.debug.direction = true;
        }
        if self.hitboxes {
            config.debug.hitboxes = true;
        }
    }
}
