//! Boost scattering events into the frame of a different beam setup
//!
//! Events generated for symmetric collisions are transformed with a
//! fixed Lorentz boost so that they describe collisions of beams with
//! the four-momenta given by a [BeamSetup]. Each particle's spatial
//! momentum is overwritten in place and all other event information is
//! passed through unchanged.
//!
//! ```no_run
//! use avery_boost::{boost_file, BeamSetup, Options};
//!
//! let boost = BeamSetup::default().lab_boost()?;
//! let report = boost_file("events.hepmc2".as_ref(), &boost, &Options::default())?;
//! println!("wrote {} events to {:?}", report.stats.events, report.output);
//! # Ok::<(), avery_boost::Error>(())
//! ```
pub mod boost;
pub mod error;
pub mod format;
#[cfg(feature = "hepmc2")]
pub mod hepmc2;
#[cfg(feature = "lhef")]
pub mod lhef;
pub mod record;
pub mod rewrite;

pub use crate::boost::{BeamSetup, Boost, FourMomentum};
pub use crate::error::Error;
pub use crate::format::Format;
pub use crate::rewrite::{boost_file, boosted_path, EnergyUpdate, FileReport, Options};
