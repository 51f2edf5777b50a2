use std::error::Error;

use clap::Parser;
use segmeter::{
    args::Args, config::MeterConfig, data::pairs::read_label_pairs, logging::setup_tracing,
    meter::confusion::ConfusionMeter,
};
use tracing::{error, info};

pub fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    let mut config = MeterConfig::read_config(Some(&args.config))?;
    if let Some(classes) = args.classes {
        config.classes = classes;
    }
    if args.normalized {
        config.normalized = true;
    }
    let _guard = setup_tracing(config.log_dir.as_deref())?;
    info!("Loaded configuration: {:?}", config);

    let mut meter = ConfusionMeter::from_config(&config)?;
    for input in &args.inputs {
        let pairs = read_label_pairs(input, config.has_headers, config.classes)?;
        if let Err(e) = meter.add(&pairs.predicted, &pairs.target) {
            error!("Rejected batch {}: {}", input.display(), e);
            return Err(e.into());
        }
        info!("Counted {} label pairs from {}", pairs.len(), input.display());
    }

    info!("Total observations: {}", meter.total());
    println!("{}", meter.value());
    Ok(())
}
