//! Immediate-mode draw lists
//!
//! [`DrawList`] collects 2D commands through named layers. Commands are added
//! to a layer during the frame, and a layer only reaches the list when it is
//! submitted, so submission order decides paint order regardless of the
//! order commands were added in.
//!
//! [`DrawList3d`] collects world-space lines and triangles for debug drawing.

use crate::foundation::math::{Mat4, Vec2, Vec3, Vec4};

/// Index of a layer within the [`DrawList`] that issued it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(usize);

/// One 2D draw command in screen space
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DrawCommand {
    /// Line segment
    Line {
        /// Start point
        p0: Vec2,
        /// End point
        p1: Vec2,
        /// RGBA color
        color: Vec4,
        /// Width in pixels
        thickness: f32,
    },
    /// Solid triangle
    TriangleFilled {
        /// First corner
        p0: Vec2,
        /// Second corner
        p1: Vec2,
        /// Third corner
        p2: Vec2,
        /// RGBA color
        color: Vec4,
    },
}

/// Named staging buffer for 2D commands
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawLayer {
    name: String,
    commands: Vec<DrawCommand>,
}

impl DrawLayer {
    /// Layer name given at request time
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Commands added since the last submit
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }
}

/// 2D draw list made of layers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    layers: Vec<DrawLayer>,
    commands: Vec<DrawCommand>,
}

impl DrawList {
    /// Create an empty draw list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new named layer
    pub fn request_layer(&mut self, name: &str) -> LayerId {
        self.layers.push(DrawLayer {
            name: name.to_owned(),
            commands: Vec::new(),
        });
        log::debug!("Requested draw layer '{}'", name);
        LayerId(self.layers.len() - 1)
    }

    /// Look up a layer
    pub fn layer(&self, layer: LayerId) -> Option<&DrawLayer> {
        self.layers.get(layer.0)
    }

    /// Number of layers requested
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    fn push(&mut self, layer: LayerId, command: DrawCommand) {
        match self.layers.get_mut(layer.0) {
            Some(layer) => layer.commands.push(command),
            None => log::warn!("Draw command for unknown layer {:?} dropped", layer),
        }
    }

    /// Add a line to a layer
    pub fn add_line(&mut self, layer: LayerId, p0: Vec2, p1: Vec2, color: Vec4, thickness: f32) {
        self.push(
            layer,
            DrawCommand::Line {
                p0,
                p1,
                color,
                thickness,
            },
        );
    }

    /// Add a filled triangle to a layer
    pub fn add_triangle_filled(&mut self, layer: LayerId, p0: Vec2, p1: Vec2, p2: Vec2, color: Vec4) {
        self.push(layer, DrawCommand::TriangleFilled { p0, p1, p2, color });
    }

    /// Move a layer's commands to the end of the list
    pub fn submit_layer(&mut self, layer: LayerId) {
        if let Some(layer) = self.layers.get_mut(layer.0) {
            self.commands.append(&mut layer.commands);
        }
    }

    /// Submitted commands in paint order
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Drop submitted and pending commands, keeping the layers
    pub fn reset(&mut self) {
        self.commands.clear();
        for layer in &mut self.layers {
            layer.commands.clear();
        }
    }
}

/// World-space line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line3d {
    /// Start point
    pub p0: Vec3,
    /// End point
    pub p1: Vec3,
    /// RGBA color
    pub color: Vec4,
    /// Width in world units
    pub thickness: f32,
}

/// World-space solid triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle3d {
    /// First corner
    pub p0: Vec3,
    /// Second corner
    pub p1: Vec3,
    /// Third corner
    pub p2: Vec3,
    /// RGBA color
    pub color: Vec4,
}

/// 3D debug draw list
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DrawList3d {
    /// Lines in insertion order
    pub lines: Vec<Line3d>,
    /// Triangles in insertion order
    pub triangles: Vec<Triangle3d>,
}

impl DrawList3d {
    /// Create an empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a line
    pub fn add_3d_line(&mut self, p0: Vec3, p1: Vec3, color: Vec4, thickness: f32) {
        self.lines.push(Line3d {
            p0,
            p1,
            color,
            thickness,
        });
    }

    /// Add a filled triangle
    pub fn add_3d_triangle_filled(&mut self, p0: Vec3, p1: Vec3, p2: Vec3, color: Vec4) {
        self.triangles.push(Triangle3d { p0, p1, p2, color });
    }

    /// Add an axis gizmo for `transform`: X red, Y green, Z blue
    pub fn add_3d_transform(&mut self, transform: &Mat4, length: f32, thickness: f32) {
        let origin = transform.transform_point(&nalgebra::Point3::origin()).coords;
        let axes = [
            (Vec3::new(length, 0.0, 0.0), Vec4::new(1.0, 0.0, 0.0, 1.0)),
            (Vec3::new(0.0, length, 0.0), Vec4::new(0.0, 1.0, 0.0, 1.0)),
            (Vec3::new(0.0, 0.0, length), Vec4::new(0.0, 0.0, 1.0, 1.0)),
        ];

        for (axis, color) in axes {
            let end = transform.transform_point(&axis.into()).coords;
            self.add_3d_line(origin, end, color, thickness);
        }
    }

    /// Whether nothing has been added since the last clear
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.triangles.is_empty()
    }

    /// Remove all primitives
    pub fn clear(&mut self) {
        self.lines.clear();
        self.triangles.clear();
    }
}
