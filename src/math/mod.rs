//! Math utilities shared by the maze, entities and the scene interface.
//!
//! # Module Organization
//!
//! - [`vec`] module contains the [`Vec3`] value type and its operators
//! - Angle helpers used for camera and facing calculations live at root level

pub mod vec;

pub use vec::Vec3;

/// Converts degrees to radians.
///
/// This handles angle wrapping by first normalizing the input to the range [0, 360).
///
/// # Example
/// ```
/// use cubemaze::math::deg_to_rad;
///
/// assert!((deg_to_rad(180.0) - std::f32::consts::PI).abs() < 1e-6);
/// assert!((deg_to_rad(540.0) - std::f32::consts::PI).abs() < 1e-6);
/// ```
pub fn deg_to_rad(degrees: f32) -> f32 {
    (degrees % 360.0) * (std::f32::consts::PI / 180.0)
}

/// Yaw in degrees (0° = +z, 90° = +x) of a horizontal direction.
pub fn yaw_of(direction: Vec3) -> f32 {
    direction.x().atan2(direction.z()).to_degrees()
}

/// Unit horizontal direction for a yaw in degrees. Inverse of [`yaw_of`].
pub fn direction_of_yaw(yaw: f32) -> Vec3 {
    let radians = deg_to_rad(yaw);
    Vec3::new(radians.sin(), 0.0, radians.cos())
}

/// Euler rotation `[pitch, yaw, roll]` in degrees for a camera at `from` looking at `to`.
///
/// Pitch is positive when looking down, matching the menu camera convention
/// (`(30, 0, 0)` tilts the view toward the maze).
pub fn look_rotation(from: Vec3, to: Vec3) -> Vec3 {
    let delta = to - from;
    let flat = delta.horizontal().length();
    let pitch = (-delta.y()).atan2(flat).to_degrees();
    Vec3::new(pitch, yaw_of(delta), 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yaw_round_trip_for_cardinals() {
        for yaw in [0.0_f32, 90.0, 180.0, -90.0] {
            let back = yaw_of(direction_of_yaw(yaw));
            let diff = ((back - yaw + 540.0) % 360.0) - 180.0;
            assert!(diff.abs() < 1e-3, "yaw {} came back as {}", yaw, back);
        }
    }

    #[test]
    fn test_look_rotation_points_down_at_target_below() {
        let rotation = look_rotation(Vec3::new(0.0, 5.0, -10.0), Vec3::ZERO);
        assert!(rotation.x() > 0.0);
        assert!(rotation.y().abs() < 1e-3);
    }
}
