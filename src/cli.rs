use clap::{Parser, Subcommand};

/// Routewise - AI traffic & route assistant.
#[derive(Parser, Debug)]
#[command(name = "routewise")]
#[command(version = "0.1.0")]
#[command(about = "AI traffic & route assistant for Mumbai roads.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Chat with the traffic assistant (interactive)
    Chat {
        /// Single message mode (don't enter interactive mode)
        #[arg(short, long)]
        message: Option<String>,
    },

    /// Plan a driving route between two places
    Route {
        /// Start location (free text; omit to use your detected location)
        #[arg(long)]
        from: Option<String>,

        /// Destination (free text)
        to: String,

        /// Skip alternative routes
        #[arg(long)]
        no_alternatives: bool,
    },

    /// Current synthetic traffic snapshot for a location
    Status {
        /// Location name
        location: String,
    },

    /// Traffic heat map around a center point
    Heatmap {
        /// Center latitude (defaults to detected/default location)
        #[arg(long)]
        lat: Option<f64>,

        /// Center longitude
        #[arg(long)]
        lon: Option<f64>,
    },

    /// Detect approximate location from this machine's network address
    Locate,

    /// Analyze a traffic image (stub models)
    Analyze {
        /// Path to the image file
        image: std::path::PathBuf,
    },
}
