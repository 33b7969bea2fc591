//! homegoing: synthesize the trips home after a mass event.
//!
//! ```text
//! homegoing run  --network network.xml.gz --zones fans.geojson \
//!                [--mask residential.geojson] --output-dir out [--format matsim]
//! homegoing demo --output-dir out
//! ```
//!
//! Every synthesis parameter comes from `--config cfg.json` (or the built-in
//! defaults) and can be overridden on the command line.  Log verbosity follows
//! `RUST_LOG` (default `info`).

mod scenario;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use hg_core::SimTime;
use hg_network::{load_links_csv, load_matsim_network, Network};
use hg_output::{CsvWriter, MatsimPopulationWriter, PopulationWriter};
use hg_synth::{
    zone_counts, EmptyZonePolicy, Plan, ProgressLogger, RngStrategy, SamplingMethod, SynthBuilder,
    SynthConfig,
};
use hg_zones::{load_mask_geojson, load_zones_geojson, Area, ZoneSet};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "homegoing", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Synthesize plans from network and zone files.
    Run {
        /// MATSim network (`.xml`, `.xml.gz`) or link table (`.csv`, `.csv.gz`).
        #[arg(long)]
        network: PathBuf,

        /// GeoJSON zones carrying name and attendance properties.
        #[arg(long)]
        zones: PathBuf,

        /// GeoJSON residential areas; home links must end inside them.
        #[arg(long)]
        mask: Option<PathBuf>,

        #[command(flatten)]
        common: Common,
    },
    /// Synthesize plans for the built-in synthetic scenario.
    Demo {
        #[command(flatten)]
        common: Common,
    },
}

#[derive(Args, Debug)]
struct Common {
    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long, value_enum, default_value_t = Format::Csv)]
    format: Format,

    /// JSON file with synthesis parameters.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Number of agents to generate.
    #[arg(long)]
    agents: Option<u32>,

    #[arg(long)]
    seed: Option<u64>,

    /// Event end time (`HH:MM:SS`, `HH:MM` or seconds).
    #[arg(long)]
    event_end: Option<SimTime>,

    /// Departure window length in seconds.
    #[arg(long)]
    window: Option<u32>,

    #[arg(long, value_enum)]
    sampling: Option<Sampling>,

    /// Give every agent its own generator (enables parallel generation).
    #[arg(long, default_value_t = false)]
    per_agent_rng: bool,

    /// Log a progress line every N plans.
    #[arg(long, default_value_t = 10_000)]
    progress_every: usize,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Csv,
    Matsim,
    Sqlite,
    Parquet,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Sampling {
    Cumulative,
    Expanded,
}

impl Common {
    fn config(&self) -> Result<SynthConfig> {
        let mut config = match &self.config {
            Some(path) => SynthConfig::from_json_file(path)
                .with_context(|| format!("reading config {}", path.display()))?,
            None => SynthConfig::default(),
        };
        if let Some(n) = self.agents {
            config.agent_count = n;
        }
        if let Some(seed) = self.seed {
            config.seed = seed;
        }
        if let Some(end) = self.event_end {
            config.event_end_time = end;
        }
        if let Some(window) = self.window {
            config.departure_window_secs = window;
        }
        if let Some(sampling) = self.sampling {
            config.sampling = match sampling {
                Sampling::Cumulative => SamplingMethod::Cumulative,
                Sampling::Expanded => SamplingMethod::Expanded,
            };
        }
        if self.per_agent_rng {
            config.rng = RngStrategy::PerAgent;
        }
        config.validate()?;
        Ok(config)
    }
}

// ── Inputs ────────────────────────────────────────────────────────────────────

fn load_network(path: &Path) -> Result<Network> {
    let name = path.to_string_lossy().to_ascii_lowercase();
    let name = name.strip_suffix(".gz").unwrap_or(&name);
    let network = if name.ends_with(".xml") {
        load_matsim_network(path)?
    } else if name.ends_with(".csv") {
        load_links_csv(path)?
    } else {
        bail!("cannot tell the network format of {}; expected .xml or .csv", path.display());
    };
    log::info!(
        "network {}: {} nodes, {} links",
        path.display(),
        network.node_count(),
        network.link_count()
    );
    Ok(network)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn open_writer(format: Format, dir: &Path) -> Result<Box<dyn PopulationWriter>> {
    std::fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    let writer: Box<dyn PopulationWriter> = match format {
        Format::Csv => Box::new(CsvWriter::new(dir)?),
        Format::Matsim => Box::new(MatsimPopulationWriter::new(dir)?),
        #[cfg(feature = "sqlite")]
        Format::Sqlite => Box::new(hg_output::SqliteWriter::new(dir)?),
        #[cfg(feature = "parquet")]
        Format::Parquet => Box::new(hg_output::ParquetWriter::new(dir)?),
        #[allow(unreachable_patterns)]
        other => bail!("{other:?} output needs the `{}` feature", format!("{other:?}").to_lowercase()),
    };
    Ok(writer)
}

fn write_population(plans: &[Plan], common: &Common) -> Result<()> {
    let mut writer = open_writer(common.format, &common.output_dir)?;
    writer.write_plans(plans)?;
    writer.finish()?;

    log::info!("plans per home zone:");
    for (zone, count) in zone_counts(plans) {
        log::info!("  {zone:<24} {count:>8}");
    }
    Ok(())
}

// ── Pipeline ──────────────────────────────────────────────────────────────────

fn synthesize(
    config:  SynthConfig,
    network: Network,
    zones:   ZoneSet,
    mask:    Option<Area>,
    common:  &Common,
) -> Result<()> {
    log::info!(
        "synthesizing {} agents, seed {}, departures {} + {} s",
        config.agent_count,
        config.seed,
        config.event_end_time,
        config.departure_window_secs
    );
    let mut progress = ProgressLogger::new(common.progress_every);

    let t0 = Instant::now();
    let mut builder = SynthBuilder::new(config).network(network).zones(zones);
    if let Some(mask) = mask {
        builder = builder.mask(mask);
    }
    let synth = builder.build_with(&mut progress)?;
    let plans = synth.synthesize(&mut progress)?;
    log::info!("{} plans in {:.3} s", plans.len(), t0.elapsed().as_secs_f64());

    write_population(&plans, common)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Cli::parse().command {
        Command::Run { network, zones, mask, common } => {
            let config = common.config()?;
            let network = load_network(&network)?;
            let zones = load_zones_geojson(&zones, &config.zone_name_property, &config.zone_weight_property)
                .with_context(|| format!("reading zones {}", zones.display()))?;
            let mask = match mask {
                Some(path) => Some(
                    load_mask_geojson(&path).with_context(|| format!("reading mask {}", path.display()))?,
                ),
                None => None,
            };
            synthesize(config, network, zones, mask, &common)
        }
        Command::Demo { common } => {
            let mut config = common.config()?;
            if common.agents.is_none() {
                config.agent_count = 5_000;
            }
            // The demo forest district has no home links.
            config.empty_zone = EmptyZonePolicy::ExcludeFromPool;
            let (network, zones) = scenario::build_scenario()?;
            synthesize(config, network, zones, None, &common)
        }
    }
}

#[cfg(test)]
mod tests {
    use hg_synth::{NoopObserver, SynthBuilder, SynthConfig};

    use crate::scenario::build_scenario;

    #[test]
    fn demo_scenario_synthesizes() {
        let (network, zones) = build_scenario().unwrap();
        let config = SynthConfig {
            agent_count: 500,
            empty_zone: hg_synth::EmptyZonePolicy::ExcludeFromPool,
            ..SynthConfig::default()
        };
        let synth = SynthBuilder::new(config).network(network).zones(zones).build().unwrap();
        assert_eq!(hg_zones::empty_zones(synth.index(), synth.zones()), ["Grunewald"]);

        let plans = synth.synthesize(&mut NoopObserver).unwrap();
        assert_eq!(plans.len(), 500);
        assert!(plans.iter().all(|p| &*p.home_zone != "Grunewald"));
    }

    #[test]
    fn demo_fails_fast_without_reweighting() {
        let (network, zones) = build_scenario().unwrap();
        let config = SynthConfig { agent_count: 5_000, ..SynthConfig::default() };
        let synth = SynthBuilder::new(config).network(network).zones(zones).build().unwrap();
        assert!(matches!(
            synth.synthesize(&mut NoopObserver),
            Err(hg_synth::SynthError::EmptyZone { ref zone }) if zone == "Grunewald"
        ));
    }

    #[test]
    fn demo_writes_csv() {
        let dir = tempfile::tempdir().unwrap();
        let (network, zones) = build_scenario().unwrap();
        let config = SynthConfig {
            agent_count: 50,
            empty_zone: hg_synth::EmptyZonePolicy::ExcludeFromPool,
            ..SynthConfig::default()
        };
        let plans = SynthBuilder::new(config)
            .network(network)
            .zones(zones)
            .build()
            .unwrap()
            .synthesize(&mut NoopObserver)
            .unwrap();
        let mut w = hg_output::CsvWriter::new(dir.path()).unwrap();
        hg_output::PopulationWriter::write_plans(&mut w, &plans).unwrap();
        hg_output::PopulationWriter::finish(&mut w).unwrap();
        let text = std::fs::read_to_string(dir.path().join("plans.csv")).unwrap();
        assert_eq!(text.lines().count(), 51);
    }
}
