//! Camera rotation and parallel projection
use nalgebra::{Matrix3, Vector3 as NaVector3};

use crate::vector::Vector3;

/// Viewing angles in degrees
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ViewAngles {
    /// Rotation in the horizontal plane, from +x towards +y
    pub azimuth: f64,
    /// Tilt up from the horizontal plane towards +z
    pub altitude: f64,
    /// Clockwise roll of the camera about the viewing axis, which turns
    /// the picture counterclockwise on screen
    pub roll: f64,
}

impl ViewAngles {
    pub fn new(azimuth: f64, altitude: f64, roll: f64) -> Self {
        Self {
            azimuth,
            altitude,
            roll,
        }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotate by delta amounts (in degrees)
    pub fn rotate(&mut self, d_azimuth: f64, d_altitude: f64, d_roll: f64) {
        self.azimuth = wrap_degrees(self.azimuth + d_azimuth);
        self.altitude = wrap_degrees(self.altitude + d_altitude);
        self.roll = wrap_degrees(self.roll + d_roll);
    }
}

fn wrap_degrees(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(360.0);
    if wrapped > 180.0 {
        wrapped - 360.0
    } else {
        wrapped
    }
}

/// A fixed orthonormal camera basis for parallel projection.
///
/// The rows of `basis` are the camera's right (`ux`), up (`uy`) and
/// into-the-screen (`uz`) axes expressed in world coordinates. At all-zero
/// angles the camera looks along -x with +y to the right and +z up, so
/// `project(x, y, z) == (y, z, -x)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    angles: ViewAngles,
    basis: Matrix3<f64>,
}

impl Camera {
    /// Build the basis from azimuth, altitude and roll in degrees.
    pub fn new(azimuth: f64, altitude: f64, roll: f64) -> Self {
        Self::from_angles(ViewAngles::new(azimuth, altitude, roll))
    }

    pub fn from_angles(angles: ViewAngles) -> Self {
        let (sz, cz) = angles.azimuth.to_radians().sin_cos();
        let (sl, cl) = angles.altitude.to_radians().sin_cos();
        let (sr, cr) = angles.roll.to_radians().sin_cos();

        let ux0 = Vector3::new(0.0, 1.0, 0.0);
        let uy0 = Vector3::new(0.0, 0.0, 1.0);
        let uz0 = Vector3::new(-1.0, 0.0, 0.0);

        // Azimuth swings the right/forward pair about the vertical
        let ux1 = cz * ux0 + sz * uz0;
        let uy1 = uy0;
        let uz1 = -sz * ux0 + cz * uz0;

        // Altitude tips the up/forward pair, raising the eye towards +z
        let ux2 = ux1;
        let uy2 = cl * uy1 + sl * uz1;
        let uz2 = -sl * uy1 + cl * uz1;

        // Roll turns the right/up pair about the viewing axis
        let ux = cr * ux2 - sr * uy2;
        let uy = sr * ux2 + cr * uy2;
        let uz = uz2;

        #[rustfmt::skip]
        let basis = Matrix3::new(
            ux.x, ux.y, ux.z,
            uy.x, uy.y, uy.z,
            uz.x, uz.y, uz.z,
        );

        Self { angles, basis }
    }

    pub fn angles(&self) -> ViewAngles {
        self.angles
    }

    /// World-to-camera rotation; rows are `ux`, `uy`, `uz`.
    pub fn basis(&self) -> &Matrix3<f64> {
        &self.basis
    }

    pub fn ux(&self) -> Vector3 {
        self.row(0)
    }

    pub fn uy(&self) -> Vector3 {
        self.row(1)
    }

    pub fn uz(&self) -> Vector3 {
        self.row(2)
    }

    fn row(&self, i: usize) -> Vector3 {
        self.basis.row(i).transpose().into()
    }

    /// Project world coordinates onto the camera axes.
    ///
    /// The third component is the distance "into" the screen; larger values
    /// are farther from the viewer.
    pub fn project(&self, x: f64, y: f64, z: f64) -> (f64, f64, f64) {
        let p = self.basis * NaVector3::new(x, y, z);
        (p.x, p.y, p.z)
    }

    /// Invert a projection back to world coordinates.
    pub fn invert(&self, xp: f64, yp: f64, zp: f64) -> (f64, f64, f64) {
        let w = self.basis.transpose() * NaVector3::new(xp, yp, zp);
        (w.x, w.y, w.z)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_angles(ViewAngles::zero())
    }
}
