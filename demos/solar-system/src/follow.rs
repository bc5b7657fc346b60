/// Follow-mode camera controller.
///
/// Exponential smoothing toward `target + offset`: each frame closes the
/// fraction `alpha` of the remaining gap, so it never overshoots.

use glam::Vec3;
use orrery_engine::{Camera3D, CameraMode};

use crate::focus::FocusTarget;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraController {
    pub offset: Vec3,
    pub alpha: f32,
}

impl CameraController {
    pub fn new(offset: Vec3, alpha: f32) -> Self {
        Self { offset, alpha }
    }

    pub fn ideal_position(&self, target: Vec3) -> Vec3 {
        target + self.offset
    }

    /// Drive the camera for one frame. Acts only in follow mode with an active
    /// target; otherwise the pose belongs to the user controls.
    /// Returns true if the camera was moved.
    pub fn update(&self, camera: &mut Camera3D, focus: Option<&FocusTarget>) -> bool {
        if camera.mode() != CameraMode::Follow {
            return false;
        }
        let Some(target) = focus else {
            return false;
        };
        camera.approach(self.ideal_position(target.point), self.alpha);
        camera.look_at(target.point);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::FocusTrigger;
    use orrery_engine::Rng;

    fn armed() -> FocusTrigger {
        let mut trigger = FocusTrigger::new(5.0, 2.0);
        trigger.arm(2, 25.0, 0.0, &mut Rng::new(7));
        trigger
    }

    fn follow_camera() -> Camera3D {
        let mut cam = Camera3D::new(Vec3::new(0.0, 20.0, 40.0), Vec3::ZERO);
        cam.set_mode(CameraMode::Follow);
        cam
    }

    #[test]
    fn distance_to_ideal_strictly_decreases() {
        let trigger = armed();
        let target = trigger.active().unwrap();
        let ctrl = CameraController::new(Vec3::splat(8.0), 0.03);
        let ideal = ctrl.ideal_position(target.point);
        let mut cam = follow_camera();
        let mut last = cam.position.distance(ideal);
        for frame in 0..120 {
            assert!(ctrl.update(&mut cam, Some(target)));
            let d = cam.position.distance(ideal);
            assert!(d < last, "frame {}: {} !< {}", frame, d, last);
            last = d;
        }
    }

    #[test]
    fn never_overshoots() {
        let trigger = armed();
        let target = trigger.active().unwrap();
        let ctrl = CameraController::new(Vec3::splat(8.0), 0.5);
        let ideal = ctrl.ideal_position(target.point);
        let mut cam = follow_camera();
        let start = cam.position;
        for _ in 0..20 {
            ctrl.update(&mut cam, Some(target));
            // Stays on the segment between start and ideal.
            let along = (cam.position - start).dot(ideal - start) / (ideal - start).length_squared();
            assert!(along <= 1.0 + 1e-5, "overshoot {}", along);
        }
    }

    #[test]
    fn looks_at_target_each_frame() {
        let trigger = armed();
        let target = trigger.active().unwrap();
        let ctrl = CameraController::new(Vec3::splat(8.0), 0.03);
        let mut cam = follow_camera();
        ctrl.update(&mut cam, Some(target));
        assert_eq!(cam.target, target.point);
    }

    #[test]
    fn free_mode_is_untouched() {
        let trigger = armed();
        let ctrl = CameraController::new(Vec3::splat(8.0), 0.03);
        let mut cam = Camera3D::new(Vec3::new(0.0, 20.0, 40.0), Vec3::ZERO);
        assert!(!ctrl.update(&mut cam, trigger.active()));
        assert_eq!(cam.position, Vec3::new(0.0, 20.0, 40.0));
        assert_eq!(cam.target, Vec3::ZERO);
    }

    #[test]
    fn no_target_is_untouched() {
        let ctrl = CameraController::new(Vec3::splat(8.0), 0.03);
        let mut cam = follow_camera();
        assert!(!ctrl.update(&mut cam, None));
        assert_eq!(cam.position, Vec3::new(0.0, 20.0, 40.0));
    }
}
