//! Read-only and mutable views of particle records
//!
//! Event formats store particles in their own way. These traits expose
//! only what boosting needs. Formats hand out a [KinematicsMut] view
//! exclusively through [ParticleRecords::for_each_particle_mut], so any
//! in-place modification is visible in the signature of the caller.
use particle_id::ParticleID;

use crate::boost::FourMomentum;

/// Read access to the kinematics of a particle record
pub trait Kinematics {
    /// Particle type
    fn particle_id(&self) -> ParticleID;

    /// Energy
    fn energy(&self) -> f64;

    /// Spatial momentum `[px, py, pz]`
    fn momentum(&self) -> [f64; 3];

    /// Four-momentum `[E, px, py, pz]`
    fn four_momentum(&self) -> FourMomentum {
        let [px, py, pz] = self.momentum();
        [self.energy(), px, py, pz]
    }
}

/// Write access to the kinematics of a particle record
pub trait KinematicsMut: Kinematics {
    /// Overwrite the spatial momentum, leaving everything else untouched
    fn set_momentum(&mut self, p: [f64; 3]);

    /// Overwrite the energy, leaving everything else untouched
    fn set_energy(&mut self, e: f64);
}

/// An event made up of particle records
pub trait ParticleRecords {
    /// Number of particle records
    fn particle_count(&self) -> usize;

    /// Visit each particle record in storage order
    fn for_each_particle<F: FnMut(&dyn Kinematics)>(&self, f: F);

    /// Visit each particle record in storage order, allowing modification
    fn for_each_particle_mut<F: FnMut(&mut dyn KinematicsMut)>(&mut self, f: F);
}
