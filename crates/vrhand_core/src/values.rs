use glam::{Quat, Vec3};

/// Values that can be blended between a current and a target pose.
pub trait Interpolatable: Copy + Sized {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self;
}

impl Interpolatable for f32 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start + (end - start) * t
    }
}

impl Interpolatable for Vec3 {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.lerp(end, t)
    }
}

impl Interpolatable for Quat {
    fn interpolate_linear(start: Self, end: Self, t: f32) -> Self {
        start.slerp(end, t)
    }
}

/// Linear interpolation with `t` clamped to [0, 1].
#[inline]
pub fn lerp_clamped<T: Interpolatable>(start: T, end: T, t: f32) -> T {
    T::interpolate_linear(start, end, t.clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f32 = 1e-5;

    #[test]
    fn clamps_factor_above_one() {
        assert!((lerp_clamped(2.0_f32, 4.0, 3.0) - 4.0).abs() < EPSILON);
    }

    #[test]
    fn clamps_factor_below_zero() {
        assert!((lerp_clamped(2.0_f32, 4.0, -1.0) - 2.0).abs() < EPSILON);
    }

    #[test]
    fn vec3_blends_componentwise() {
        let mid = lerp_clamped(Vec3::ZERO, Vec3::new(2.0, -4.0, 1.0), 0.5);
        assert!(mid.abs_diff_eq(Vec3::new(1.0, -2.0, 0.5), EPSILON));
    }

    #[test]
    fn quat_uses_slerp() {
        let a = Quat::IDENTITY;
        let b = Quat::from_rotation_y(std::f32::consts::FRAC_PI_2);
        let mid = lerp_clamped(a, b, 0.5);
        assert!(mid.angle_between(a.slerp(b, 0.5)) < 1e-4);
    }
}
