use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "kpi", version, about = "Performance indicator monitoring")]
pub struct Cli {
    /// Indicator data file (overrides the view settings)
    #[arg(long, global = true)]
    pub data: Option<PathBuf>,
    /// View settings file
    #[arg(long, global = true, default_value = "kpi_view.json")]
    pub settings: PathBuf,
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the indicator screen (default)
    Gui,
    /// List indicators with their alert flag
    List {
        #[arg(long)]
        query: Option<String>,
        #[arg(long)]
        alerts_only: bool,
    },
    /// Print the chart layout of one indicator as JSON
    Show { id: u64 },
    AddIndicator {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        code: String,
        #[arg(long, default_value = "")]
        unit: String,
        #[arg(long, allow_hyphen_values = true)]
        objective: String,
        #[arg(long, allow_hyphen_values = true)]
        alert: String,
    },
    AddMeasurement {
        id: u64,
        #[arg(long, allow_hyphen_values = true)]
        value: String,
        /// YYYY-MM-DD, YYYY-MM or RFC 3339
        #[arg(long)]
        date: String,
        #[arg(long)]
        comment: Option<String>,
        #[arg(long, default_value = "manual")]
        mode: String,
    },
    /// Write the chart of one indicator to an SVG (or PNG) file
    Export {
        id: u64,
        path: PathBuf,
        #[arg(long)]
        png: bool,
    },
}
