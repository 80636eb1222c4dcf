use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, warn};

use ean_review::{
    gui::ice::init_gui,
    logging,
    settings::{load_or_default, validate, DEFAULT_SETTINGS_FILE},
};

/// Review supplier products one by one and mark them Y or N in the analysis sheet.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// JSON settings file, created from the defaults when saved from the window
    #[arg(long, default_value = DEFAULT_SETTINGS_FILE)]
    settings: PathBuf,

    /// Spreadsheet to open instead of the one in the settings
    #[arg(long)]
    sheet: Option<PathBuf>,

    /// Products per page
    #[arg(long)]
    page_size: Option<usize>,
}

fn main() -> ExitCode {
    if let Err(e) = logging::init() {
        eprintln!("{}", e);
    }

    let args = Args::parse();

    let mut settings = match load_or_default(&args.settings) {
        Ok(settings) => settings,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(sheet) = args.sheet {
        settings.sheet.path_to_sheet = sheet;
    }
    if let Some(page_size) = args.page_size {
        settings.view.page_size = page_size;
    }
    if let Err(e) = validate(&settings) {
        error!("{}", e);
        return ExitCode::FAILURE;
    }

    if let Err(e) = init_gui(settings, args.settings) {
        warn!("Window closed with an error: {}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
