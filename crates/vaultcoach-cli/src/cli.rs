//! CLI definition using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use vaultcoach_domain::model::{FieldValue, MeasurementInput};
use vaultcoach_types::{Locale, OutputFormat};

#[derive(Parser)]
#[command(name = "vaultcoach")]
#[command(author = "yuuji")]
#[command(version)]
#[command(about = "Pole-vault run-up analysis and AI technique coaching")]
#[command(long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Message language (ja, en). Uses config value if not specified.
    #[arg(long, global = true)]
    pub lang: Option<Locale>,

    /// Output format (json, table). Uses config value if not specified.
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Directory holding pole_resistance.csv and dj_mid_chart.csv
    #[arg(long, global = true)]
    pub reference_dir: Option<PathBuf>,

    /// Chat model override for coaching
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Verbose output (debug logs on stderr)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze one jump: pole, mid-mark, start position and feedback
    Analyze(AnalyzeArgs),

    /// List the nine technique phases
    Phases {
        /// Personal best (cm); also shows skill level and suggested questions
        #[arg(long)]
        best: Option<u32>,
    },

    /// Ask the ACT coach about selected phases
    Coach {
        /// Phase ids, comma separated (e.g. 1,2)
        #[arg(long, value_delimiter = ',')]
        phases: Vec<u8>,

        /// Personal best (cm)
        #[arg(long, default_value_t = 0)]
        best: u32,

        /// Question to ask; repeat for several turns. Omit for automatic advice.
        #[arg(long = "question", short = 'q')]
        questions: Vec<String>,

        /// Phase group label used for automatic advice (e.g. "助走")
        #[arg(long)]
        label: Option<String>,

        /// Print the assembled prompt instead of calling the API
        #[arg(long)]
        dry_run: bool,
    },

    /// Manage configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,

        /// Set default language
        #[arg(long)]
        set_locale: Option<Locale>,

        /// Set default output format
        #[arg(long)]
        set_output: Option<OutputFormat>,

        /// Set reference table directory
        #[arg(long)]
        set_reference_dir: Option<PathBuf>,

        /// Set coaching model
        #[arg(long)]
        set_model: Option<String>,

        /// Reset to defaults
        #[arg(long)]
        reset: bool,
    },
}

/// Measurement fields; flags override the JSON input file
#[derive(Args)]
pub struct AnalyzeArgs {
    /// JSON request body (camelCase fields)
    #[arg(long, short = 'i')]
    pub input: Option<PathBuf>,

    /// 使用ポール長 (ft)
    #[arg(long)]
    pub pole_length: Option<String>,

    /// 使用ポール硬さ (lbs)
    #[arg(long)]
    pub pole_weight: Option<String>,

    /// グリップ位置 - distance from the pole top (cm)
    #[arg(long)]
    pub grip: Option<String>,

    /// 踏切位置のズレ (m); positive = took off short
    #[arg(long, allow_hyphen_values = true)]
    pub takeoff_offset: Option<String>,

    /// 6歩前中間マーク (m)
    #[arg(long)]
    pub mid_mark: Option<String>,

    /// 湾曲: 少 / 普通 / 大 (less / normal / large)
    #[arg(long)]
    pub bend: Option<String>,

    /// 着地点: 手前 / 中央 / 奥 (front / center / back)
    #[arg(long)]
    pub landing: Option<String>,

    /// 助走スピード: 遅い / 普通 / 良い (slow / normal / good)
    #[arg(long)]
    pub speed: Option<String>,

    /// Free-form notes
    #[arg(long)]
    pub notes: Option<String>,
}

impl AnalyzeArgs {
    /// Flag values as a partial measurement
    pub fn to_input(&self) -> MeasurementInput {
        MeasurementInput {
            pole_length: self.pole_length.clone().map(FieldValue::from),
            pole_weight: self.pole_weight.clone().map(FieldValue::from),
            grip_position: self.grip.clone().map(FieldValue::from),
            takeoff_offset: self.takeoff_offset.clone().map(FieldValue::from),
            mid_mark: self.mid_mark.clone().map(FieldValue::from),
            pole_bend: self.bend.clone().map(FieldValue::from),
            landing_point: self.landing.clone().map(FieldValue::from),
            runup_speed: self.speed.clone().map(FieldValue::from),
            notes: self.notes.clone(),
        }
    }
}
