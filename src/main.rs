use std::fs::File;
use std::io::{BufWriter, Write};

use log::info;
use measure_time::info_time;

use roadside::config::{Config, OutputFormat};
use roadside::{Error, Path, Sample, Sampler, Srid};

fn usage() -> ! {
    eprintln!("usage: roadside <file.wkt | ->");
    std::process::exit(2)
}

fn read_road(source: &str) -> Result<Path, Error> {
    match source {
        "-" => Path::read_wkt(Srid::WGS84, std::io::stdin().lock()),
        file => Path::read_wkt(Srid::WGS84, File::open(file)?),
    }
}

fn write_samples(samples: &[Sample], format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = BufWriter::new(std::io::stdout().lock());

    match format {
        OutputFormat::Csv => {
            writeln!(out, "longitude,latitude,bearing")?;
            for sample in samples {
                writeln!(
                    out,
                    "{},{},{}",
                    sample.longitude, sample.latitude, sample.bearing
                )?;
            }
        }
        OutputFormat::Json => {
            for sample in samples {
                serde_json::to_writer(&mut out, sample)?;
                writeln!(out)?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "tracing")]
    roadside::util::trace::initialize_tracer();
    #[cfg(not(feature = "tracing"))]
    env_logger::init();

    let source = std::env::args().nth(1).unwrap_or_else(|| usage());
    let config = Config::from_env()?;

    let road = read_road(&source)?;
    let projected = config.projection.resolve(&road)?;
    info!("Sampling {source} every {}m through {projected}", config.interval);

    let samples = {
        info_time!("Sampled road");
        Sampler::new(projected, config.interval)?.sample(&road)?
    };

    write_samples(&samples, config.format)
}
