//! Pipeline and graphics-state flags

use bitflags::bitflags;

bitflags! {
    /// Fixed-function switches for a draw list submission
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct PipelineFlags: u32 {
        /// Test fragments against the depth buffer
        const DEPTH_TEST  = 1 << 0;
        /// Write fragment depth
        const DEPTH_WRITE = 1 << 1;
    }
}

bitflags! {
    /// Per-material render state and shader feature bits
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct GraphicsState: u64 {
        /// Material samples an albedo map
        const HAS_ALBEDO_MAP   = 1 << 0;
        /// Material samples a normal map
        const HAS_NORMAL_MAP   = 1 << 1;
        /// Material samples an emissive map
        const HAS_EMISSIVE_MAP = 1 << 2;
        /// Back faces are rendered
        const DOUBLE_SIDED     = 1 << 3;
        /// Fragments below the alpha cutoff are discarded
        const ALPHA_TEST       = 1 << 4;
        /// Depth testing enabled
        const DEPTH_TEST       = 1 << 5;
        /// Depth writes enabled
        const DEPTH_WRITE      = 1 << 6;
        /// Stencil written for outline rendering
        const STENCIL_OUTLINE  = 1 << 7;
    }
}
