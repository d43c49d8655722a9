use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};
use pair_md::config::{Args, MdConfig};
use pair_md::io::{setup_output, write_history};
use pair_md::report::report_initial_state;
use std::fs::File;
use std::io::BufWriter;
use tracing::info;

pub struct MdApplication {
    args: Args,
    config: MdConfig,
}

impl MdApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let config = load_config(&args)?;
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        setup_output(self.args.output.as_ref());

        info!("{}", "=".repeat(70));
        info!("Two-Particle Molecular Dynamics Simulation in 2D Box");
        info!("{}", "=".repeat(70));

        let config = self.config.with_overrides(&self.args);
        config.validate().wrap_err("Invalid simulation parameters")?;
        info!("Configuration loaded:\n{:?}", config);
        info!("Random seed: {}", config.seed());

        let mut sim = config
            .build_simulation()
            .wrap_err("Failed to set up the initial state")?;
        report_initial_state(sim.particle1(), sim.particle2(), sim.potential());

        sim.run(config.n_steps(), config.record_interval())?;

        if let Some(path) = config.trajectory_path() {
            let file = File::create(path)
                .wrap_err_with(|| format!("Unable to create trajectory file: {}", path))?;
            let mut writer = BufWriter::new(file);
            write_history(&mut writer, sim.history())
                .wrap_err_with(|| format!("Failed to write trajectory to {}", path))?;
            info!("Trajectory ({} snapshots) written to {}", sim.history().len(), path);
        }

        Ok(())
    }
}

fn load_config(args: &Args) -> Result<MdConfig> {
    match args.config_file {
        Some(ref path) => {
            let content = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Unable to read configuration file: {}", path))?;
            let config =
                MdConfig::from_yaml(&content).wrap_err("Failed to parse configuration file")?;
            Ok(config)
        }
        None => Ok(MdConfig::default()),
    }
}
