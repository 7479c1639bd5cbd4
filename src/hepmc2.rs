use std::io::{BufRead, Write};

use hepmc2::event::Particle;
use particle_id::ParticleID;

use crate::{
    boost::{E, X, Y, Z},
    error::Error,
    record::{Kinematics, KinematicsMut, ParticleRecords},
    rewrite::{EventReader, EventWriter},
};

impl Kinematics for Particle {
    fn particle_id(&self) -> ParticleID {
        ParticleID::new(self.id)
    }

    fn energy(&self) -> f64 {
        self.p.0[E]
    }

    fn momentum(&self) -> [f64; 3] {
        let p = &self.p.0;
        [p[X], p[Y], p[Z]]
    }
}

impl KinematicsMut for Particle {
    fn set_momentum(&mut self, p: [f64; 3]) {
        let q = &mut self.p.0;
        [q[X], q[Y], q[Z]] = p;
    }

    fn set_energy(&mut self, e: f64) {
        self.p.0[E] = e;
    }
}

// Each particle is stored exactly once: either as an outgoing particle
// of its production vertex or, if it has none, as an incoming particle
// of its end vertex.
impl ParticleRecords for hepmc2::Event {
    fn particle_count(&self) -> usize {
        self.vertices
            .iter()
            .map(|vx| vx.particles_in.len() + vx.particles_out.len())
            .sum()
    }

    fn for_each_particle<F: FnMut(&dyn Kinematics)>(&self, mut f: F) {
        for vx in &self.vertices {
            for particle in vx.particles_in.iter().chain(&vx.particles_out) {
                f(particle)
            }
        }
    }

    fn for_each_particle_mut<F: FnMut(&mut dyn KinematicsMut)>(&mut self, mut f: F) {
        for vx in &mut self.vertices {
            for particle in vx.particles_in.iter_mut().chain(&mut vx.particles_out) {
                f(particle)
            }
        }
    }
}

/// Reads HepMC2 events
pub struct Source<R: BufRead> {
    reader: hepmc2::Reader<R>,
}

impl<R: BufRead> From<R> for Source<R> {
    fn from(input: R) -> Self {
        Self {
            reader: hepmc2::Reader::from(input),
        }
    }
}

impl<R: BufRead> EventReader for Source<R> {
    type Event = hepmc2::Event;

    fn read_event(&mut self) -> Result<Option<Self::Event>, Error> {
        self.reader
            .next()
            .transpose()
            .map_err(|err| Error::Read(err.into()))
    }
}

/// Writes HepMC2 events
pub struct Sink<W: Write> {
    writer: hepmc2::Writer<W>,
}

impl<W: Write> Sink<W> {
    /// Start a new HepMC2 event listing
    pub fn new(output: W) -> Result<Self, Error> {
        let writer = hepmc2::Writer::try_from(output).map_err(|err| Error::Write(err.into()))?;
        Ok(Self { writer })
    }
}

impl<W: Write> EventWriter<hepmc2::Event> for Sink<W> {
    fn write_event(&mut self, event: &hepmc2::Event) -> Result<(), Error> {
        self.writer
            .write(event)
            .map_err(|err| Error::Write(err.into()))
    }

    fn finish(self) -> Result<(), Error> {
        self.writer
            .finish()
            .map_err(|err| Error::Write(err.into()))
    }
}
