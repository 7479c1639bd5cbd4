//! Boost all particles of an event file into a new file
use std::{
    fs::{File, OpenOptions},
    io::{BufReader, BufWriter},
    path::{Path, PathBuf},
};

use log::{debug, info, trace};

use crate::{
    boost::{Boost, E, X, Y, Z},
    error::Error,
    format::Format,
    record::ParticleRecords,
};

/// Marker inserted in front of the extension of output file names
pub const BOOSTED_MARKER: &str = "-boosted";

/// Source of events
pub trait EventReader {
    type Event: ParticleRecords;

    /// Read the next event, `None` signals the end of the input
    fn read_event(&mut self) -> Result<Option<Self::Event>, Error>;
}

/// Destination of events
pub trait EventWriter<E> {
    fn write_event(&mut self, event: &E) -> Result<(), Error>;

    /// Finish writing, e.g. write footers
    fn finish(self) -> Result<(), Error>;
}

/// What to do with the boosted energy of a particle
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EnergyUpdate {
    /// Only overwrite the spatial momentum, keep the stored energy
    #[default]
    Keep,
    /// Overwrite both momentum and energy
    Boosted,
}

/// Settings for rewriting event files
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    /// Event format, guessed from the file extension if `None`
    pub format: Option<Format>,
    pub energy: EnergyUpdate,
    /// Stop after this many events
    pub max_events: Option<usize>,
}

/// Number of processed events and particles
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RewriteStats {
    pub events: usize,
    pub particles: usize,
}

/// Summary for one boosted file
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub format: Format,
    pub stats: RewriteStats,
}

/// Applies a boost to every particle of every event
#[derive(Copy, Clone, Debug)]
pub struct Rewriter<'a> {
    boost: &'a Boost,
    energy: EnergyUpdate,
    max_events: Option<usize>,
}

impl<'a> Rewriter<'a> {
    pub fn new(boost: &'a Boost, options: &Options) -> Self {
        Self {
            boost,
            energy: options.energy,
            max_events: options.max_events,
        }
    }

    /// Boost all particles of an event in place
    ///
    /// Returns the number of boosted particles.
    pub fn boost_event<T: ParticleRecords>(&self, event: &mut T) -> usize {
        let mut nparticles = 0;
        event.for_each_particle_mut(|particle| {
            let p = particle.four_momentum();
            let boosted = self.boost.apply(&p);
            trace!(
                "{:?}: {p:?} -> {boosted:?}",
                particle.particle_id()
            );
            particle.set_momentum([boosted[X], boosted[Y], boosted[Z]]);
            if self.energy == EnergyUpdate::Boosted {
                particle.set_energy(boosted[E]);
            }
            nparticles += 1;
        });
        nparticles
    }

    /// Read, boost, and write events until the reader is exhausted
    pub fn run<R, W>(&self, reader: &mut R, mut writer: W) -> Result<RewriteStats, Error>
    where
        R: EventReader,
        W: EventWriter<R::Event>,
    {
        let mut stats = RewriteStats::default();
        while self.max_events.map_or(true, |max| stats.events < max) {
            let Some(mut event) = reader.read_event()? else {
                break;
            };
            debug!("Event {}", stats.events);
            stats.particles += self.boost_event(&mut event);
            writer.write_event(&event)?;
            stats.events += 1;
        }
        writer.finish()?;
        Ok(stats)
    }
}

/// Name of the output file: `dir/stem.ext` becomes `dir/stem-boosted.ext`
pub fn boosted_path(input: &Path) -> Result<PathBuf, Error> {
    let Some(stem) = input.file_stem() else {
        return Err(Error::NoFileName(input.to_owned()));
    };
    let mut name = stem.to_os_string();
    name.push(BOOSTED_MARKER);
    if let Some(ext) = input.extension() {
        name.push(".");
        name.push(ext);
    }
    Ok(input.with_file_name(name))
}

/// Boost all events in `input` and write them to [boosted_path]
///
/// The output file must not exist yet. If an error occurs after the
/// output file was created, the incomplete file is left behind.
pub fn boost_file(input: &Path, boost: &Boost, options: &Options) -> Result<FileReport, Error> {
    let format = match options.format {
        Some(format) => format,
        None => Format::from_path(input)?,
    };
    let output = boosted_path(input)?;
    let rewriter = Rewriter::new(boost, options);
    info!("Reading {format} events from {input:?}");
    let stats = match format {
        #[cfg(feature = "hepmc2")]
        Format::HepMC2 => {
            let mut reader = crate::hepmc2::Source::from(open_input(input)?);
            info!("Will write: {output:?}");
            let writer = crate::hepmc2::Sink::new(create_output(&output)?)?;
            rewriter.run(&mut reader, writer)?
        }
        #[cfg(feature = "lhef")]
        Format::Lhef => {
            let mut reader = crate::lhef::Source::new(open_input(input)?)?;
            info!("Will write: {output:?}");
            let writer = crate::lhef::Sink::new(create_output(&output)?, &reader)?;
            rewriter.run(&mut reader, writer)?
        }
    };
    info!("N events: {}", stats.events);
    Ok(FileReport {
        input: input.to_owned(),
        output,
        format,
        stats,
    })
}

fn open_input(path: &Path) -> Result<BufReader<File>, Error> {
    let file = File::open(path).map_err(|source| Error::OpenInput {
        path: path.to_owned(),
        source,
    })?;
    Ok(BufReader::new(file))
}

fn create_output(path: &Path) -> Result<BufWriter<File>, Error> {
    let file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|source| Error::CreateOutput {
            path: path.to_owned(),
            source,
        })?;
    Ok(BufWriter::new(file))
}
