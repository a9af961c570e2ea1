use super::*;

#[test]
fn aspect_change_updates_projection() {
    let mut cam = PerspectiveCamera::new(75.0, 1920.0 / 1080.0, 0.1, 1000.0);
    let wide = cam.projection();
    cam.set_aspect(800.0 / 600.0);
    assert_eq!(cam.aspect, 800.0 / 600.0);
    assert_ne!(cam.projection(), wide);
    let expected = Mat4::perspective_rh(75f32.to_radians(), 800.0 / 600.0, 0.1, 1000.0);
    assert!(cam.projection().abs_diff_eq(expected, 1e-6));
}

#[test]
fn origin_projects_to_surface_center() {
    let mut cam = PerspectiveCamera::new(75.0, 2.0, 0.1, 1000.0);
    cam.position = Vec3::new(0.0, 0.0, 10.0);
    let p = project(cam.view_projection(), Vec3::ZERO, 200.0, 100.0).unwrap();
    assert!((p.x - 100.0).abs() < 1e-4);
    assert!((p.y - 50.0).abs() < 1e-4);

    let up = project(cam.view_projection(), Vec3::new(0.0, 1.0, 0.0), 200.0, 100.0).unwrap();
    assert!(up.y < 50.0);
}

#[test]
fn points_behind_camera_are_not_projected() {
    let mut cam = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
    cam.position = Vec3::new(0.0, 0.0, 10.0);
    assert!(project(cam.view_projection(), Vec3::new(0.0, 0.0, 20.0), 100.0, 100.0).is_none());
}
