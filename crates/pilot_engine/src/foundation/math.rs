//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the handful of matrix builders the camera
//! and transform code need.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// World up axis (Y-up)
pub const WORLD_UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// 2 * Pi
    pub const TAU: f32 = 2.0 * PI;

    /// Pi / 2
    pub const HALF_PI: f32 = PI * 0.5;

    /// Pi / 3
    pub const THIRD_PI: f32 = PI / 3.0;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::constants;

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Wrap an angle into the half-open range (-PI, PI]
    pub fn wrap_angle(radians: f32) -> f32 {
        if radians > -constants::PI && radians <= constants::PI {
            return radians;
        }
        let wrapped = (radians + constants::PI).rem_euclid(constants::TAU) - constants::PI;
        if wrapped <= -constants::PI {
            wrapped + constants::TAU
        } else {
            wrapped
        }
    }
}

/// Convert a quaternion stored as `(x, y, z, w)` into a unit rotation.
///
/// A zero vector is treated as the identity rotation so that a freshly
/// zeroed record still produces a valid matrix.
pub fn quat_from_xyzw(q: &Vec4) -> Quat {
    let raw = Quaternion::new(q.w, q.x, q.y, q.z);
    if raw.norm_squared() <= f32::EPSILON {
        Quat::identity()
    } else {
        Quat::from_quaternion(raw)
    }
}

/// Compose a scale-rotate-translate matrix (`T * R * S`)
pub fn compose_trs(scale: &Vec3, rotation: &Vec4, translation: &Vec3) -> Mat4 {
    Mat4::new_translation(translation)
        * quat_from_xyzw(rotation).to_homogeneous()
        * Mat4::new_nonuniform_scaling(scale)
}

/// Extension trait for Mat4 with camera matrix builders
pub trait Mat4Ext {
    /// Create a perspective projection matrix
    ///
    /// View space looks down +Z; depth is mapped into `[0, 1]`.
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4;

    /// Create a view matrix looking from `eye` along an orthonormal basis
    ///
    /// Rows are `right`, `up` and `forward`, so the camera looks down +Z in
    /// view space with +X to the right of the screen.
    fn look_to(eye: &Vec3, right: &Vec3, up: &Vec3, forward: &Vec3) -> Mat4;
}

impl Mat4Ext for Mat4 {
    fn perspective(fov_y: f32, aspect: f32, near: f32, far: f32) -> Mat4 {
        // P = [1/(a*tan(φ/2))  0             0          0         ]
        //     [0               1/tan(φ/2)    0          0         ]
        //     [0               0             f/(f-n)    -nf/(f-n) ]
        //     [0               0             1          0         ]
        let tan_half_fovy = (fov_y * 0.5).tan();

        let mut result = Mat4::zeros();
        result[(0, 0)] = 1.0 / (aspect * tan_half_fovy);
        result[(1, 1)] = 1.0 / tan_half_fovy;
        result[(2, 2)] = far / (far - near);
        result[(2, 3)] = -(near * far) / (far - near);
        result[(3, 2)] = 1.0;
        result
    }

    fn look_to(eye: &Vec3, right: &Vec3, up: &Vec3, forward: &Vec3) -> Mat4 {
        Mat4::new(
            right.x, right.y, right.z, -right.dot(eye),
            up.x, up.y, up.z, -up.dot(eye),
            forward.x, forward.y, forward.z, -forward.dot(eye),
            0.0, 0.0, 0.0, 1.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_wrap_angle_range() {
        assert_relative_eq!(utils::wrap_angle(0.0), 0.0);
        assert_relative_eq!(utils::wrap_angle(constants::PI), constants::PI, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(-constants::PI), constants::PI, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(constants::TAU + 0.5), 0.5, epsilon = 1e-5);
        assert_relative_eq!(utils::wrap_angle(-constants::TAU - 0.5), -0.5, epsilon = 1e-5);
    }

    #[test]
    fn test_compose_trs_translation_column() {
        let matrix = compose_trs(
            &Vec3::new(1.0, 1.0, 1.0),
            &Vec4::new(0.0, 0.0, 0.0, 1.0),
            &Vec3::new(2.0, 0.0, 0.0),
        );

        assert_relative_eq!(matrix.column(3).into_owned(), Vec4::new(2.0, 0.0, 0.0, 1.0));
        assert_relative_eq!(matrix.fixed_view::<3, 3>(0, 0).into_owned(), Matrix3::identity());
    }

    #[test]
    fn test_zero_quaternion_is_identity() {
        let rotation = quat_from_xyzw(&Vec4::zeros());
        assert_relative_eq!(rotation, Quat::identity());
    }

    #[test]
    fn test_perspective_maps_near_and_far_to_unit_depth() {
        let projection = Mat4::perspective(constants::THIRD_PI, 1.5, 0.1, 100.0);

        let near = projection * Vec4::new(0.0, 0.0, 0.1, 1.0);
        let far = projection * Vec4::new(0.0, 0.0, 100.0, 1.0);

        assert_relative_eq!(near.z / near.w, 0.0, epsilon = 1e-5);
        assert_relative_eq!(far.z / far.w, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_look_to_moves_eye_to_origin() {
        let eye = Vec3::new(3.0, -2.0, 7.0);
        let view = Mat4::look_to(
            &eye,
            &Vec3::new(-1.0, 0.0, 0.0),
            &Vec3::new(0.0, 1.0, 0.0),
            &Vec3::new(0.0, 0.0, 1.0),
        );

        let transformed = view.transform_point(&nalgebra::Point3::from(eye));
        assert_relative_eq!(transformed.coords, Vec3::zeros(), epsilon = 1e-5);
    }
}
