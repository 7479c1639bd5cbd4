use std::io::{BufRead, Write};

use itertools::izip;
use lhef::HEPEUP;
use particle_id::ParticleID;

use crate::{
    error::Error,
    record::{Kinematics, KinematicsMut, ParticleRecords},
    rewrite::{EventReader, EventWriter},
};

// LHEF momenta are stored as [px, py, pz, E, m]
const PUP_X: usize = 0;
const PUP_Y: usize = 1;
const PUP_Z: usize = 2;
const PUP_E: usize = 3;

/// Read-only view of one particle in an LHEF event
#[derive(Copy, Clone, Debug)]
pub struct ParticleRef<'a> {
    id: i32,
    pup: &'a [f64; 5],
}

/// Mutable view of one particle in an LHEF event
#[derive(Debug)]
pub struct ParticleMut<'a> {
    id: i32,
    pup: &'a mut [f64; 5],
}

impl Kinematics for ParticleRef<'_> {
    fn particle_id(&self) -> ParticleID {
        ParticleID::new(self.id)
    }

    fn energy(&self) -> f64 {
        self.pup[PUP_E]
    }

    fn momentum(&self) -> [f64; 3] {
        [self.pup[PUP_X], self.pup[PUP_Y], self.pup[PUP_Z]]
    }
}

impl Kinematics for ParticleMut<'_> {
    fn particle_id(&self) -> ParticleID {
        ParticleID::new(self.id)
    }

    fn energy(&self) -> f64 {
        self.pup[PUP_E]
    }

    fn momentum(&self) -> [f64; 3] {
        [self.pup[PUP_X], self.pup[PUP_Y], self.pup[PUP_Z]]
    }
}

impl KinematicsMut for ParticleMut<'_> {
    fn set_momentum(&mut self, p: [f64; 3]) {
        [self.pup[PUP_X], self.pup[PUP_Y], self.pup[PUP_Z]] = p;
    }

    fn set_energy(&mut self, e: f64) {
        self.pup[PUP_E] = e;
    }
}

impl ParticleRecords for HEPEUP {
    fn particle_count(&self) -> usize {
        self.PUP.len()
    }

    fn for_each_particle<F: FnMut(&dyn Kinematics)>(&self, mut f: F) {
        for (&id, pup) in izip!(&self.IDUP, &self.PUP) {
            f(&ParticleRef { id, pup })
        }
    }

    fn for_each_particle_mut<F: FnMut(&mut dyn KinematicsMut)>(&mut self, mut f: F) {
        for (&id, pup) in izip!(&self.IDUP, &mut self.PUP) {
            f(&mut ParticleMut { id, pup })
        }
    }
}

/// Reads LHEF events
pub struct Source<R: BufRead> {
    reader: lhef::Reader<R>,
}

impl<R: BufRead> Source<R> {
    /// Parse the LHEF headers and run information
    pub fn new(input: R) -> Result<Self, Error> {
        let reader = lhef::Reader::new(input).map_err(|err| Error::Read(err.into()))?;
        Ok(Self { reader })
    }
}

impl<R: BufRead> EventReader for Source<R> {
    type Event = HEPEUP;

    fn read_event(&mut self) -> Result<Option<Self::Event>, Error> {
        self.reader.hepeup().map_err(|err| Error::Read(err.into()))
    }
}

/// Writes LHEF events
pub struct Sink<W: Write> {
    writer: lhef::Writer<W>,
}

impl<W: Write> Sink<W> {
    /// Start a new LHEF file, copying headers and run information from
    /// `source`
    pub fn new<R: BufRead>(output: W, source: &Source<R>) -> Result<Self, Error> {
        let reader = &source.reader;
        let mut writer =
            lhef::Writer::new(output, reader.version()).map_err(|err| Error::Write(err.into()))?;
        let comment = comment_body(reader.header());
        if !comment.is_empty() {
            writer
                .header(comment)
                .map_err(|err| Error::Write(err.into()))?;
        }
        if let Some(xml) = reader.xml_header() {
            writer
                .xml_header(xml)
                .map_err(|err| Error::Write(err.into()))?;
        }
        writer
            .heprup(reader.heprup())
            .map_err(|err| Error::Write(err.into()))?;
        Ok(Self { writer })
    }
}

// The reader keeps the comment markers, the writer adds its own
fn comment_body(header: &str) -> &str {
    let header = header.trim();
    let header = header.strip_prefix("<!--").unwrap_or(header);
    let header = header.strip_suffix("-->").unwrap_or(header);
    header.trim_matches(|c| c == '\n' || c == '\r')
}

impl<W: Write> EventWriter<HEPEUP> for Sink<W> {
    fn write_event(&mut self, event: &HEPEUP) -> Result<(), Error> {
        self.writer
            .hepeup(event)
            .map_err(|err| Error::Write(err.into()))
    }

    fn finish(self) -> Result<(), Error> {
        let mut writer = self.writer;
        writer.finish().map_err(|err| Error::Write(err.into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn particle_views() {
        let mut pup = [0., 0., 100., 100.5, 0.105];
        let view = ParticleRef { id: 13, pup: &pup };
        assert_eq!(view.particle_id().id(), 13);
        assert_eq!(view.four_momentum(), [100.5, 0., 0., 100.]);

        let mut view = ParticleMut { id: 13, pup: &mut pup };
        view.set_momentum([1., 2., 3.]);
        assert_eq!(view.energy(), 100.5);
        view.set_energy(4.);
        assert_eq!(pup, [1., 2., 3., 4., 0.105]);
    }

    #[test]
    fn strip_comment_markers() {
        assert_eq!(comment_body("<!--\nmy comment\n-->"), "my comment");
        assert_eq!(comment_body("<!--\nline 1\nline 2\n-->\n"), "line 1\nline 2");
        assert_eq!(comment_body("plain"), "plain");
        assert_eq!(comment_body(""), "");
        assert_eq!(comment_body("<!--\n-->"), "");
    }
}
