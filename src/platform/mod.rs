//! Platform input mapping
//!
//! The browser delivers pointer positions in client pixels; the simulation
//! wants a normalized lane position. The mapping lives here so it can be
//! tested without a DOM.

/// Map a pointer's horizontal client position to the normalized steering
/// range [-1, 1]
///
/// Linear across the viewport: the left edge is -1, the right edge is 1.
/// Positions outside the viewport (possible mid-drag on touch devices) clamp
/// rather than steering the otter off the lane. A degenerate viewport width
/// maps everything to center.
pub fn normalized_lane_x(client_x: f32, viewport_width: f32) -> f32 {
    if viewport_width <= 0.0 {
        return 0.0;
    }
    ((client_x / viewport_width) * 2.0 - 1.0).clamp(-1.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edges_map_to_unit_range() {
        assert_eq!(normalized_lane_x(0.0, 800.0), -1.0);
        assert_eq!(normalized_lane_x(400.0, 800.0), 0.0);
        assert_eq!(normalized_lane_x(800.0, 800.0), 1.0);
    }

    #[test]
    fn test_out_of_viewport_clamps() {
        assert_eq!(normalized_lane_x(-50.0, 800.0), -1.0);
        assert_eq!(normalized_lane_x(1200.0, 800.0), 1.0);
    }

    #[test]
    fn test_degenerate_viewport_is_center() {
        assert_eq!(normalized_lane_x(100.0, 0.0), 0.0);
    }
}
