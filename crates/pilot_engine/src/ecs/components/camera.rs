//! # Camera Component
//!
//! Perspective camera driven by pitch / yaw / roll angles.
//!
//! ## Update Contract
//! The mutators (`set_fov`, `set_clip_planes`, `set_aspect`, `set_pos`,
//! `set_pitch_yaw`, `translate`, `translate_world`, `rotate`) only stage
//! scalar state. Call [`CameraComponent::update`] after mutating and before
//! reading any of the cached vectors or matrices. Several mutations in one
//! frame then cost a single round of trigonometry.
//!
//! ## Coordinate System
//! World space is right-handed and Y-up. Yaw 0 / pitch 0 looks down +Z.
//! In view space the camera looks down +Z with +X to the right of the screen
//! and +Y up; projection maps depth into `[0, 1]`.
//!
//! ## Angle Policy
//! Pitch is clamped to ±0.995·π/2 so the forward vector never becomes
//! parallel to world up. Yaw wraps into (-π, π].

use crate::ecs::{Component, ComponentType};
use crate::foundation::math::{constants::HALF_PI, utils, Mat4, Mat4Ext, Vec3, WORLD_UP};

/// Largest pitch magnitude the camera accepts, in radians
pub const PITCH_LIMIT: f32 = 0.995 * HALF_PI;

/// ECS Camera component
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CameraComponent {
    /// Camera position in world space
    pub position: Vec3,
    /// Distance to near clipping plane
    pub near: f32,
    /// Distance to far clipping plane
    pub far: f32,
    /// Vertical field of view in radians
    pub fov: f32,
    /// Aspect ratio (width / height)
    pub aspect: f32,

    /// Cached world-to-view matrix
    pub view: Mat4,
    /// Cached projection matrix
    pub projection: Mat4,
    /// Cached view-to-world matrix
    pub transform: Mat4,

    /// Rotation about the right vector
    pub pitch: f32,
    /// Rotation about world up
    pub yaw: f32,
    /// Rotation about the forward vector
    pub roll: f32,

    /// Cached up vector
    pub up: Vec3,
    /// Cached forward vector
    pub forward: Vec3,
    /// Cached right vector
    pub right: Vec3,
}

impl Component for CameraComponent {
    const TYPE: ComponentType = ComponentType::Camera;
}

impl CameraComponent {
    /// Create a camera looking down +Z and compute its matrices
    pub fn new(position: Vec3, fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self::default();
        camera.configure(position, fov, aspect, near, far);
        camera
    }

    /// Reset every staged parameter, zero the angles, and update
    pub fn configure(&mut self, position: Vec3, fov: f32, aspect: f32, near: f32, far: f32) {
        self.position = position;
        self.fov = fov;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.pitch = 0.0;
        self.yaw = 0.0;
        self.roll = 0.0;
        self.update();
    }

    /// Stage a new vertical field of view (radians)
    pub fn set_fov(&mut self, fov: f32) {
        self.fov = fov;
    }

    /// Stage new clip plane distances
    pub fn set_clip_planes(&mut self, near: f32, far: f32) {
        self.near = near;
        self.far = far;
    }

    /// Stage a new aspect ratio
    pub fn set_aspect(&mut self, aspect: f32) {
        if (self.aspect - aspect).abs() > 0.01 {
            log::info!("Camera aspect ratio changed: {:.3} -> {:.3}", self.aspect, aspect);
        }
        self.aspect = aspect;
    }

    /// Stage a new position
    pub fn set_pos(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
    }

    /// Stage absolute pitch and yaw (radians)
    pub fn set_pitch_yaw(&mut self, pitch: f32, yaw: f32) {
        self.pitch = pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);
        self.yaw = utils::wrap_angle(yaw);
    }

    /// Move along the camera's own right / up / forward axes
    ///
    /// Uses the axes cached by the last [`update`](Self::update).
    pub fn translate(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += self.right * dx + self.up * dy + self.forward * dz;
    }

    /// Move along the world axes
    pub fn translate_world(&mut self, dx: f32, dy: f32, dz: f32) {
        self.position += Vec3::new(dx, dy, dz);
    }

    /// Add to pitch and yaw (radians)
    pub fn rotate(&mut self, dpitch: f32, dyaw: f32) {
        self.set_pitch_yaw(self.pitch + dpitch, self.yaw + dyaw);
    }

    /// Recompute the cached direction vectors and matrices
    pub fn update(&mut self) {
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();

        let forward = Vec3::new(cos_pitch * sin_yaw, sin_pitch, cos_pitch * cos_yaw).normalize();
        let right = forward.cross(&WORLD_UP).normalize();
        let up = right.cross(&forward);

        let (sin_roll, cos_roll) = self.roll.sin_cos();
        self.right = right * cos_roll + up * sin_roll;
        self.up = up * cos_roll - right * sin_roll;
        self.forward = forward;

        self.view = Mat4::look_to(&self.position, &self.right, &self.up, &self.forward);
        self.projection = Mat4::perspective(self.fov, self.aspect, self.near, self.far);

        // The view rotation is orthonormal, so its inverse is the transpose
        let rotation = self.view.fixed_view::<3, 3>(0, 0).transpose();
        let mut transform = Mat4::identity();
        transform.fixed_view_mut::<3, 3>(0, 0).copy_from(&rotation);
        transform.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.position);
        self.transform = transform;
    }

    /// Combined `projection * view`
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }
}
