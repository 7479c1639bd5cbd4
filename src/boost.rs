//! Lorentz boosts of four-momenta
//!
//! All four-vectors are ordered as `[E, px, py, pz]`.
use crate::error::Error;

/// Four-momentum `[E, px, py, pz]`
pub type FourMomentum = [f64; 4];

/// Convenience const for accessing the energy of a four-momentum
pub const E: usize = 0;
/// Convenience const for accessing the x component of a four-momentum
pub const X: usize = 1;
/// Convenience const for accessing the y component of a four-momentum
pub const Y: usize = 2;
/// Convenience const for accessing the z component of a four-momentum
pub const Z: usize = 3;

/// Component-wise sum of two four-momenta
pub fn add(p: FourMomentum, q: FourMomentum) -> FourMomentum {
    [p[E] + q[E], p[X] + q[X], p[Y] + q[Y], p[Z] + q[Z]]
}

/// Squared invariant mass E² - |p|²
pub fn mass_sq(p: &FourMomentum) -> f64 {
    p[E] * p[E] - p[X] * p[X] - p[Y] * p[Y] - p[Z] * p[Z]
}

/// A pure Lorentz boost
///
/// Applying `Boost::new(β)` to a particle at rest gives it the
/// velocity β.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Boost {
    beta: [f64; 3],
    gamma: f64,
}

impl Boost {
    /// Boost with velocity `beta`, in units of the speed of light
    pub fn new(beta: [f64; 3]) -> Result<Self, Error> {
        let b2 = beta.iter().map(|b| b * b).sum::<f64>();
        if !(b2 < 1.) {
            return Err(Error::InvalidBoost(beta));
        }
        let gamma = 1. / (1. - b2).sqrt();
        Ok(Self { beta, gamma })
    }

    /// The boost bringing `p` to its own rest frame
    ///
    /// Fails unless `p` is timelike with positive energy.
    pub fn to_rest_frame(p: &FourMomentum) -> Result<Self, Error> {
        if !(p[E] > 0.) {
            return Err(Error::NotTimelike(*p));
        }
        Self::new([-p[X] / p[E], -p[Y] / p[E], -p[Z] / p[E]])
            .map_err(|_| Error::NotTimelike(*p))
    }

    /// The opposite boost
    pub fn inverse(&self) -> Self {
        let [bx, by, bz] = self.beta;
        Self {
            beta: [-bx, -by, -bz],
            gamma: self.gamma,
        }
    }

    /// Boost velocity
    pub fn beta(&self) -> [f64; 3] {
        self.beta
    }

    /// Lorentz factor
    pub fn gamma(&self) -> f64 {
        self.gamma
    }

    /// Apply the boost to a four-momentum
    pub fn apply(&self, p: &FourMomentum) -> FourMomentum {
        let [bx, by, bz] = self.beta;
        let b2 = bx * bx + by * by + bz * bz;
        if b2 == 0. {
            return *p;
        }
        let bp = bx * p[X] + by * p[Y] + bz * p[Z];
        let gamma = self.gamma;
        let coeff = (gamma - 1.) * bp / b2 + gamma * p[E];
        [
            gamma * (p[E] + bp),
            p[X] + coeff * bx,
            p[Y] + coeff * by,
            p[Z] + coeff * bz,
        ]
    }
}

/// Four-momenta of the two colliding beams in GeV
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BeamSetup {
    pub beams: [FourMomentum; 2],
}

impl Default for BeamSetup {
    /// Asymmetric collisions of a 500 GeV beam along +z with a 31.3 GeV
    /// beam along -z
    fn default() -> Self {
        Self {
            beams: [[500., 0., 0., 500.], [31.3, 0., 0., -31.3]],
        }
    }
}

impl BeamSetup {
    /// Total four-momentum of both beams
    pub fn total(&self) -> FourMomentum {
        add(self.beams[0], self.beams[1])
    }

    /// The boost taking events from the centre-of-momentum frame to the
    /// frame of this beam setup
    pub fn lab_boost(&self) -> Result<Boost, Error> {
        Ok(Boost::to_rest_frame(&self.total())?.inverse())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: &FourMomentum, b: &FourMomentum, tol: f64) {
        for (a, b) in a.iter().zip(b.iter()) {
            let scale = a.abs().max(b.abs()).max(1.);
            assert!((a - b).abs() <= tol * scale, "{a:?} != {b:?}");
        }
    }

    #[test]
    fn default_lab_boost() {
        let boost = BeamSetup::default().lab_boost().unwrap();
        let [bx, by, bz] = boost.beta();
        assert_eq!(bx, 0.);
        assert_eq!(by, 0.);
        assert!((bz - 468.7 / 531.3).abs() < 1e-15);
        assert!(boost.gamma() > 1.);
    }

    #[test]
    fn deterministic() {
        let setup = BeamSetup::default();
        let b1 = setup.lab_boost().unwrap();
        let b2 = setup.lab_boost().unwrap();
        assert_eq!(b1, b2);
        let p = [100.5, 1., -2., 100.];
        assert_eq!(b1.apply(&p), b1.apply(&p));
    }

    #[test]
    fn invariant_mass_preserved() {
        let boost = BeamSetup::default().lab_boost().unwrap();
        let momenta = [
            [100.5, 0., 0., 100.],
            [10., 3., 4., -5.],
            [0.51099895e-3, 0., 0., 0.],
            [250., 100., -120., 40.],
        ];
        for p in momenta {
            let q = boost.apply(&p);
            let m2 = mass_sq(&p);
            let scale = p[E] * p[E] + q[E] * q[E];
            assert!((mass_sq(&q) - m2).abs() <= 1e-9 * scale);
        }
    }

    #[test]
    fn total_momentum_round_trip() {
        let setup = BeamSetup::default();
        let total = setup.total();
        let to_cm = Boost::to_rest_frame(&total).unwrap();
        let at_rest = to_cm.apply(&total);
        let sqrt_s = mass_sq(&total).sqrt();
        assert_close(&at_rest, &[sqrt_s, 0., 0., 0.], 1e-12);
        // the lab boost undoes the rest-frame boost
        let lab = setup.lab_boost().unwrap();
        assert_close(&lab.apply(&at_rest), &total, 1e-12);
    }

    #[test]
    fn symmetric_beams_already_at_rest() {
        let setup = BeamSetup {
            beams: [[500., 0., 0., 500.], [500., 0., 0., -500.]],
        };
        let boost = setup.lab_boost().unwrap();
        let p = [100.5, 0., 0., 100.];
        assert_eq!(boost.apply(&p), p);
    }

    #[test]
    fn regression_fixture() {
        let boost = BeamSetup::default().lab_boost().unwrap();
        let beta: f64 = 468.7 / 531.3;
        let gamma = 1. / (1. - beta * beta).sqrt();
        let expected = [
            gamma * (100.5 + beta * 100.),
            0.,
            0.,
            gamma * (100. + beta * 100.5),
        ];
        assert_close(&boost.apply(&[100.5, 0., 0., 100.]), &expected, 1e-12);
    }

    #[test]
    fn inverse_undoes_boost() {
        let boost = Boost::new([0.1, -0.3, 0.5]).unwrap();
        let p = [20., 1., 2., 3.];
        assert_close(&boost.inverse().apply(&boost.apply(&p)), &p, 1e-12);
    }

    #[test]
    fn superluminal_rejected() {
        assert!(Boost::new([0., 0., 1.]).is_err());
        assert!(Boost::new([0.8, 0.8, 0.]).is_err());
        assert!(Boost::new([f64::NAN, 0., 0.]).is_err());
    }

    #[test]
    fn rest_frame_needs_timelike_momentum() {
        for p in [[1., 0., 0., 1.], [-1., 0., 0., 0.], [0., 0., 0., 0.], [1., 2., 0., 0.]] {
            match Boost::to_rest_frame(&p) {
                Err(Error::NotTimelike(q)) => assert_eq!(q, p),
                res => panic!("unexpected result {res:?} for {p:?}"),
            }
        }
    }
}
