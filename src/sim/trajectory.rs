//! Aim line geometry for the pull-back preview
//!
//! The line is derived from the live gesture every frame and never stored:
//! it originates at the drag anchor and traces the pull-back (anchor toward
//! pointer, the slingshot band), grows with drag distance, and thickens as
//! launch power builds. The launch itself goes the opposite way.

use glam::Vec2;

use crate::consts::*;

use super::state::DragGesture;

/// Geometry for one frame of the aim line
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AimLine {
    /// Line origin (the drag anchor)
    pub origin: Vec2,
    /// Pull-back direction, radians, screen coordinates (+y down)
    pub angle: f32,
    /// Length in px, capped
    pub length: f32,
    /// Thickness in px; grows with launch power, capped
    pub thickness: f32,
}

/// Compute the aim line for the current gesture
///
/// Returns `None` inside the dead zone so a sloppy tap shows nothing.
pub fn aim_line(gesture: &DragGesture) -> Option<AimLine> {
    let displacement = gesture.displacement();
    let distance = displacement.length();

    if distance <= AIM_DEADZONE {
        return None;
    }

    let length = (distance * AIM_LENGTH_SCALE).min(AIM_MAX_LENGTH);
    // Displacement points along the launch; the band is drawn the other way
    let angle = (-displacement.y).atan2(-displacement.x);
    let power = (distance / AIM_POWER_DISTANCE).min(1.0);
    let thickness = AIM_BASE_THICKNESS + power * AIM_POWER_THICKNESS;

    Some(AimLine {
        origin: gesture.anchor,
        angle,
        length,
        thickness,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::FruitKind;

    fn gesture(anchor: Vec2, pointer: Vec2) -> DragGesture {
        DragGesture {
            kind: FruitKind::Apple,
            anchor,
            pointer,
        }
    }

    #[test]
    fn test_dead_zone_hides_line() {
        let g = gesture(Vec2::new(100.0, 100.0), Vec2::new(110.0, 100.0));
        assert!(aim_line(&g).is_none());

        // Exactly on the dead zone boundary is still hidden
        let g = gesture(Vec2::new(100.0, 100.0), Vec2::new(120.0, 100.0));
        assert!(aim_line(&g).is_none());
    }

    #[test]
    fn test_line_traces_the_pull() {
        // Pull 50px to the right: the band points right, toward the pointer
        let g = gesture(Vec2::new(100.0, 100.0), Vec2::new(150.0, 100.0));
        let line = aim_line(&g).unwrap();
        assert_eq!(line.origin, Vec2::new(100.0, 100.0));
        assert!(line.angle.abs() < 1e-6);
        assert_eq!(line.length, 100.0);
    }

    #[test]
    fn test_line_opposes_launch_direction() {
        let g = gesture(Vec2::new(100.0, 100.0), Vec2::new(100.0, 180.0));
        let line = aim_line(&g).unwrap();
        // Pull is downward (+y); launch displacement points up (-y)
        let launch = g.displacement();
        assert!(launch.y < 0.0);
        assert!((line.angle - std::f32::consts::FRAC_PI_2).abs() < 1e-6);
    }

    #[test]
    fn test_length_cap() {
        let g = gesture(Vec2::new(100.0, 100.0), Vec2::new(400.0, 100.0));
        let line = aim_line(&g).unwrap();
        assert_eq!(line.length, AIM_MAX_LENGTH);
    }

    #[test]
    fn test_thickness_grows_then_caps() {
        let thin = aim_line(&gesture(Vec2::ZERO, Vec2::new(30.0, 0.0))).unwrap();
        let thick = aim_line(&gesture(Vec2::ZERO, Vec2::new(90.0, 0.0))).unwrap();
        assert!(thick.thickness > thin.thickness);

        let capped = aim_line(&gesture(Vec2::ZERO, Vec2::new(500.0, 0.0))).unwrap();
        assert_eq!(
            capped.thickness,
            AIM_BASE_THICKNESS + AIM_POWER_THICKNESS
        );
    }
}
