use arcslider::config::{self, RangeOverrides};
use arcslider::gui::app::AppModel;
use arcslider::sys::runtime;
use clap::Parser;
use relm4::prelude::*;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Starting value, snapped into the range when the slider appears
    #[arg(short, long)]
    value: Option<f64>,

    /// Value at the left end of the arc
    #[arg(long)]
    min: Option<f64>,

    /// Value at the right end of the arc
    #[arg(long)]
    max: Option<f64>,

    /// Granularity of the value (at least 1)
    #[arg(short, long)]
    step: Option<f64>,

    /// Write the default config file and exit
    #[arg(long)]
    write_config: bool,
}

impl Args {
    fn overrides(&self) -> RangeOverrides {
        RangeOverrides {
            initial: self.value,
            min: self.min,
            max: self.max,
            step: self.step,
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.write_config {
        let path = config::config_path()?;
        if !config::write_default_config(&path)? {
            log::info!("{} already exists, leaving it alone", path.display());
        }
        println!("{}", path.display());
        return Ok(());
    }

    let overrides = args.overrides();
    let config = config::load_or_default(&overrides);

    let (tx, rx) = async_channel::bounded(32);

    // Start Background Services
    runtime::start_background_services(tx);

    let app = RelmApp::new("org.arcslider.demo").with_args(Vec::new());

    app.run::<AppModel>((config, overrides, rx));
    Ok(())
}
