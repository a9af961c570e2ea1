use glam::Vec3;

use super::*;
use crate::foundation::core::Rgb8;
use crate::scene::mesh::{SphereGeometry, WireframeMesh};

fn globe() -> (Scene, PerspectiveCamera) {
    let scene = Scene {
        globe: WireframeMesh::new(SphereGeometry::new(5.0, 16, 16), Rgb8::from_hex_u32(0x16a34a)),
    };
    let mut camera = PerspectiveCamera::new(75.0, 1.0, 0.1, 1000.0);
    camera.position = Vec3::new(0.0, 0.0, 10.0);
    (scene, camera)
}

#[test]
fn wireframe_lands_in_green_on_transparent() {
    let (scene, camera) = globe();
    let mut r = CpuRenderer::new(RenderSettings::default(), 64, 64).unwrap();
    r.render(&scene, &camera).unwrap();
    let frame = r.snapshot().unwrap();
    assert_eq!((frame.width, frame.height), (64, 64));
    assert_eq!(frame.data.len(), 64 * 64 * 4);
    assert!(frame.premultiplied);

    let corner = &frame.data[..4];
    assert_eq!(corner, &[0, 0, 0, 0]);
    let inked = frame
        .data
        .chunks_exact(4)
        .filter(|px| px[3] > 0)
        .collect::<Vec<_>>();
    assert!(!inked.is_empty());
    assert!(inked.iter().all(|px| px[1] >= px[0] && px[1] >= px[2]));
}

#[test]
fn clear_color_fills_background() {
    let (scene, camera) = globe();
    let settings = RenderSettings {
        clear_rgba: Some([255, 255, 255, 255]),
        ..RenderSettings::default()
    };
    let mut r = CpuRenderer::new(settings, 32, 32).unwrap();
    r.render(&scene, &camera).unwrap();
    let frame = r.snapshot().unwrap();
    assert_eq!(&frame.data[..4], &[255, 255, 255, 255]);
}

#[test]
fn oversized_or_empty_surfaces_are_rejected() {
    assert!(CpuRenderer::new(RenderSettings::default(), 70_000, 10).is_err());
    assert!(CpuRenderer::new(RenderSettings::default(), 0, 10).is_err());
}

#[test]
fn release_frees_pixels() {
    let (scene, camera) = globe();
    let mut r = CpuRenderer::new(RenderSettings::default(), 16, 16).unwrap();
    r.release();
    assert!(r.is_released());
    assert!(r.snapshot().is_none());
    assert!(r.render(&scene, &camera).is_err());
    r.set_size(16, 16).unwrap();
    assert!(!r.is_released());
}

#[test]
fn unpremultiply_restores_straight_color() {
    let mut frame = FrameRGBA {
        width: 1,
        height: 1,
        data: vec![64, 32, 0, 128],
        premultiplied: true,
    };
    frame.unpremultiply();
    assert!(!frame.premultiplied);
    assert_eq!(frame.data, vec![128, 64, 0, 128]);
}
