use super::*;

fn default_camera() -> Camera {
    Camera::look_at(
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 1.0, 0.0),
        90.0,
        2.0,
    )
    .unwrap()
}

#[test]
fn center_ray_points_at_target() {
    let cam = default_camera();
    let r = cam.emit_ray_at(0.5, 0.5);
    assert_eq!(*r.origin(), Vec3::zeros());
    assert!((r.direction().normalize() - Vec3::new(0.0, 0.0, -1.0)).norm() < 1e-9);
}

#[test]
fn corners_follow_fov_and_aspect() {
    let cam = default_camera();
    // vfov 90 -> viewport height 2 at focal distance 1; aspect 2 -> width 4.
    let ll = cam.emit_ray_at(0.0, 0.0);
    assert!((ll.direction() - Vec3::new(-2.0, -1.0, -1.0)).norm() < 1e-9);
    let ur = cam.emit_ray_at(1.0, 1.0);
    assert!((ur.direction() - Vec3::new(2.0, 1.0, -1.0)).norm() < 1e-9);
}

#[test]
fn rejects_invalid_parameters() {
    let o = Vec3::zeros();
    let t = Vec3::new(0.0, 0.0, -1.0);
    let up = Vec3::new(0.0, 1.0, 0.0);
    assert!(Camera::look_at(o, t, up, 0.0, 1.0).is_err());
    assert!(Camera::look_at(o, t, up, 180.0, 1.0).is_err());
    assert!(Camera::look_at(o, t, up, 60.0, 0.0).is_err());
    assert!(Camera::look_at(o, o, up, 60.0, 1.0).is_err());
    assert!(Camera::look_at(o, Vec3::new(0.0, 5.0, 0.0), up, 60.0, 1.0).is_err());
}

#[test]
fn moved_translates_origin_and_target() {
    let cam = default_camera().moved(Vec3::new(1.0, 2.0, 3.0)).unwrap();
    assert_eq!(*cam.origin(), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(*cam.target(), Vec3::new(1.0, 2.0, 2.0));
}

#[test]
fn yaw_quarter_turn_looks_sideways() {
    let cam = default_camera().rotated(90.0, 0.0).unwrap();
    let dir = (cam.target() - cam.origin()).normalize();
    // Counter-clockwise around +y takes -z to -x.
    assert!((dir - Vec3::new(-1.0, 0.0, 0.0)).norm() < 1e-9);
}

#[test]
fn pitch_is_clamped_below_the_pole() {
    let cam = default_camera().rotated(0.0, 120.0).unwrap();
    let dir = (cam.target() - cam.origin()).normalize();
    let pitch = dir.y.asin().to_degrees();
    assert!((pitch - MAX_PITCH_DEG).abs() < 1e-6);
}

#[test]
fn with_aspect_keeps_placement_and_widens_viewport() {
    let cam = default_camera().with_aspect(1.0).unwrap();
    assert_eq!(cam.aspect(), 1.0);
    assert_eq!(*cam.origin(), Vec3::zeros());
    let ll = cam.emit_ray_at(0.0, 0.0);
    assert!((ll.direction() - Vec3::new(-1.0, -1.0, -1.0)).norm() < 1e-9);
    assert!(default_camera().with_aspect(0.0).is_err());
}

#[test]
fn arrow_keys_map_to_navigation_steps() {
    let none = ArrowKeys::default();
    assert!(none.navigation().is_empty());

    let keys = ArrowKeys {
        up: true,
        down: true,
        right: true,
        ..ArrowKeys::default()
    };
    assert_eq!(
        keys.navigation(),
        vec![Navigation::Forward, Navigation::TurnRight]
    );

    let keys = ArrowKeys {
        down: true,
        left: true,
        right: true,
        shift: true,
        ..ArrowKeys::default()
    };
    assert_eq!(
        keys.navigation(),
        vec![Navigation::Backward, Navigation::TurnLeft]
    );
    assert_eq!(ArrowKeys::from_bits(keys.to_bits()), keys);
}

#[test]
fn forward_and_backward_steps_follow_view_direction() {
    let cam = default_camera();
    let fwd = cam.navigated(Navigation::Forward, false, 0.5).unwrap();
    assert!((fwd.origin() - Vec3::new(0.0, 0.0, -0.5)).norm() < 1e-9);
    assert!((fwd.target() - Vec3::new(0.0, 0.0, -1.5)).norm() < 1e-9);

    let fast = cam.navigated(Navigation::Forward, true, 0.5).unwrap();
    assert!((fast.origin() - Vec3::new(0.0, 0.0, -2.5)).norm() < 1e-9);

    let back = cam.navigated(Navigation::Backward, true, 1.0).unwrap();
    assert!((back.origin() - Vec3::new(0.0, 0.0, 3.0)).norm() < 1e-9);
}

#[test]
fn turning_keeps_origin_and_yaws_toward_the_key() {
    let cam = default_camera();
    let left = cam.navigated(Navigation::TurnLeft, false, 1.0).unwrap();
    assert_eq!(left.origin(), cam.origin());
    let dir = left.target() - left.origin();
    assert!(dir.x < 0.0);
    assert!(dir.y.abs() < 1e-9);
    assert!((dir.x.atan2(-dir.z) + 0.75).abs() < 1e-9);

    let right = cam.navigated(Navigation::TurnRight, true, 1.0).unwrap();
    let dir = right.target() - right.origin();
    assert!((dir.x.atan2(-dir.z) - 1.5).abs() < 1e-9);
}

#[test]
fn navigation_rejects_bad_time_steps() {
    let cam = default_camera();
    assert!(cam.navigated(Navigation::Forward, false, -1.0).is_err());
    assert!(cam.navigated(Navigation::TurnLeft, false, f64::NAN).is_err());
}
