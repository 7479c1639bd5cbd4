use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use avery_boost::{boost_file, BeamSetup, EnergyUpdate, Format, Options};
use clap::Parser;
use flexi_logger::Logger;
use log::{error, info};

/// Boost all particles in event files to the asymmetric beam setup
///
/// For each input file `dir/name.ext` the boosted events are written to
/// `dir/name-boosted.ext`, which must not exist yet.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Event files
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Event format, by default guessed from the file extension
    #[arg(short, long)]
    format: Option<Format>,

    /// Also overwrite the particle energies with the boosted values
    #[arg(long)]
    update_energy: bool,

    /// Only process the first N events of each file
    #[arg(long, value_name = "N")]
    max_events: Option<usize>,

    /// Continue with the remaining files if one fails
    #[arg(long)]
    keep_going: bool,

    /// More output, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.quiet {
            return "error";
        }
        match self.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    }

    fn options(&self) -> Options {
        Options {
            format: self.format,
            energy: if self.update_energy {
                EnergyUpdate::Boosted
            } else {
                EnergyUpdate::Keep
            },
            max_events: self.max_events,
        }
    }
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _logger = Logger::try_with_env_or_str(args.log_level())?
        .start()
        .context("Failed to initialise logging")?;

    let nfailed = run(&args)?;
    if nfailed > 0 {
        error!("{nfailed} of {} files failed", args.inputs.len());
        return Ok(ExitCode::FAILURE);
    }
    Ok(ExitCode::SUCCESS)
}

/// Boost all input files, returning the number of failed files
///
/// Without `--keep-going` the first failure is returned as error.
fn run(args: &Args) -> Result<usize> {
    let boost = BeamSetup::default()
        .lab_boost()
        .context("Failed to construct boost")?;
    info!("Boost velocity: {:?}", boost.beta());
    let options = args.options();

    let mut nfailed = 0;
    for input in &args.inputs {
        let res = boost_file(input, &boost, &options)
            .with_context(|| format!("Failed to boost events in {input:?}"));
        match res {
            Ok(report) => info!(
                "Wrote {} events with {} particles to {:?}",
                report.stats.events, report.stats.particles, report.output
            ),
            Err(err) if args.keep_going => {
                error!("{err:#}");
                nfailed += 1;
            }
            Err(err) => return Err(err),
        }
    }
    Ok(nfailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert()
    }

    #[test]
    fn inputs_required() {
        assert!(Args::try_parse_from(["boost-events"]).is_err());
    }

    #[test]
    fn parse_options() {
        let args = Args::try_parse_from([
            "boost-events",
            "--update-energy",
            "--max-events",
            "2",
            "-vv",
            "a.hepmc2",
            "b.lhe",
        ])
        .unwrap();
        assert_eq!(args.inputs, [PathBuf::from("a.hepmc2"), PathBuf::from("b.lhe")]);
        assert_eq!(args.log_level(), "trace");
        let options = args.options();
        assert_eq!(options.energy, EnergyUpdate::Boosted);
        assert_eq!(options.max_events, Some(2));
        assert_eq!(options.format, None);
    }

    #[cfg(feature = "lhef")]
    const NO_EVENTS: &str = r#"<LesHouchesEvents version="1.0">
<init>
11 -11 5.0e+02 5.0e+02 0 0 0 0 3 1
1.25e+00 1.0e-02 1.0e+00 1
</init>
</LesHouchesEvents>
"#;

    #[cfg(feature = "lhef")]
    fn missing_then_good(dir: &std::path::Path, keep_going: bool) -> Args {
        let good = dir.join("good.lhe");
        std::fs::write(&good, NO_EVENTS).unwrap();
        let mut cmd = vec![
            "boost-events".to_owned(),
            dir.join("missing.lhe").display().to_string(),
            good.display().to_string(),
        ];
        if keep_going {
            cmd.push("--keep-going".to_owned());
        }
        Args::try_parse_from(cmd).unwrap()
    }

    #[cfg(feature = "lhef")]
    #[test]
    fn abort_on_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = missing_then_good(dir.path(), false);
        assert!(run(&args).is_err());
        assert!(!dir.path().join("missing-boosted.lhe").exists());
        assert!(!dir.path().join("good-boosted.lhe").exists());
    }

    #[cfg(feature = "lhef")]
    #[test]
    fn keep_going_after_failure() {
        let dir = tempfile::tempdir().unwrap();
        let args = missing_then_good(dir.path(), true);
        assert_eq!(run(&args).unwrap(), 1);
        assert!(!dir.path().join("missing-boosted.lhe").exists());
        assert!(dir.path().join("good-boosted.lhe").exists());
    }
}
