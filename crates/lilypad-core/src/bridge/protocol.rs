/// SharedArrayBuffer layout.
/// Must stay in sync with TypeScript `protocol.ts`.
///
/// Layout (all values in f32 / 4 bytes):
/// ```text
/// [Header: 8 floats]
/// [Instances: max_instances × 8 floats]
/// ```
///
/// The instance capacity is written once into the header at init.
/// TypeScript reads it from the header to compute the section offset.

use crate::api::config::SimConfig;

/// Number of floats in the header section.
pub const HEADER_FLOATS: usize = 8;

/// Header field indices.
pub const HEADER_LOCK: usize = 0;
pub const HEADER_FRAME_COUNTER: usize = 1;
pub const HEADER_MAX_INSTANCES: usize = 2;
pub const HEADER_INSTANCE_COUNT: usize = 3;
pub const HEADER_SCROLL_X: usize = 4;
pub const HEADER_VIEWPORT_WIDTH: usize = 5;
pub const HEADER_VIEWPORT_HEIGHT: usize = 6;
pub const HEADER_PROTOCOL_VERSION: usize = 7;

/// Protocol version written into the header.
pub const PROTOCOL_VERSION: f32 = 1.0;

/// Floats per draw instance (wire format, never changes).
pub const INSTANCE_FLOATS: usize = 8;

/// Runtime-computed buffer layout for one frame of draw data.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameProtocol {
    /// Maximum draw instances.
    pub max_instances: usize,
    /// Size of the instance section in floats.
    pub instance_data_floats: usize,
    /// Offset (in floats) where instance data begins.
    pub instance_data_offset: usize,
    /// Total buffer size in floats.
    pub buffer_total_floats: usize,
    /// Total buffer size in bytes.
    pub buffer_total_bytes: usize,
}

impl FrameProtocol {
    /// Compute the layout for a given instance capacity.
    pub fn new(max_instances: usize) -> Self {
        let instance_data_floats = max_instances * INSTANCE_FLOATS;
        let instance_data_offset = HEADER_FLOATS;
        let buffer_total_floats = instance_data_offset + instance_data_floats;

        Self {
            max_instances,
            instance_data_floats,
            instance_data_offset,
            buffer_total_floats,
            buffer_total_bytes: buffer_total_floats * 4,
        }
    }

    /// Compute the layout from a SimConfig.
    pub fn from_config(config: &SimConfig) -> Self {
        Self::new(config.max_instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::frame::DrawInstance;

    #[test]
    fn from_default_config_matches_expected_sizes() {
        let layout = FrameProtocol::from_config(&SimConfig::default());

        assert_eq!(layout.max_instances, 512);
        assert_eq!(layout.instance_data_floats, 512 * 8);
        assert_eq!(layout.instance_data_offset, HEADER_FLOATS);
        assert_eq!(layout.buffer_total_floats, 8 + 512 * 8);
        assert_eq!(layout.buffer_total_bytes, (8 + 512 * 8) * 4);
    }

    #[test]
    fn custom_capacities_compute_correctly() {
        let layout = FrameProtocol::new(64);

        assert_eq!(layout.instance_data_floats, 64 * 8);
        assert_eq!(layout.buffer_total_floats, HEADER_FLOATS + 64 * 8);
    }

    #[test]
    fn wire_stride_matches_the_instance_struct() {
        assert_eq!(INSTANCE_FLOATS, DrawInstance::FLOATS);
        assert_eq!(HEADER_FLOATS * 4, 32);
    }
}
