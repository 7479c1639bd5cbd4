use std::{fmt, path::Path};

use crate::error::Error;

/// Supported event file formats
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Format {
    /// HepMC2 ASCII (`.hepmc`, `.hepmc2`)
    #[cfg(feature = "hepmc2")]
    #[value(name = "hepmc2")]
    HepMC2,
    /// Les Houches Event File (`.lhe`, `.lhef`)
    #[cfg(feature = "lhef")]
    #[value(name = "lhef")]
    Lhef,
}

impl Format {
    /// Guess the format from the file extension
    pub fn from_path(path: &Path) -> Result<Self, Error> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase());
        match ext.as_deref() {
            #[cfg(feature = "hepmc2")]
            Some("hepmc" | "hepmc2") => Ok(Self::HepMC2),
            #[cfg(feature = "lhef")]
            Some("lhe" | "lhef") => Ok(Self::Lhef),
            _ => Err(Error::UnknownFormat(path.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            #[cfg(feature = "hepmc2")]
            Self::HepMC2 => write!(f, "HepMC2"),
            #[cfg(feature = "lhef")]
            Self::Lhef => write!(f, "LHEF"),
        }
    }
}
