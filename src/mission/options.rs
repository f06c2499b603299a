use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::agent::SatMode;

#[derive(Clone, Debug, Parser)]
pub struct MissionOptions {
    #[arg(short, long)]
    pub log_level: Option<String>,

    /// When the risk computation may consult the SAT solver.
    #[arg(long, value_enum, default_value_t = SatMode::Auto)]
    pub sat: SatMode,

    /// Render the board after every action.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub display: bool,

    /// Pause briefly between actions so the rendering is watchable.
    /// Forced off when the display is off.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub temp: bool,

    /// Try the suit-insertion plan variants in phase 2.
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub costume_combinations: bool,

    /// Path to a world file in token notation; a built-in demo world is
    /// used when absent.
    #[arg(short, long)]
    pub map: Option<PathBuf>,
}

impl MissionOptions {
    /// Temporization only makes sense while something is being shown.
    pub fn pace(&self) -> Option<std::time::Duration> {
        (self.display && self.temp).then(|| std::time::Duration::from_millis(250))
    }
}
