use super::*;

#[test]
fn sphere_vertices_lie_on_radius() {
    let g = SphereGeometry::new(5.0, 32, 32);
    assert_eq!(g.positions.len(), 33 * 33);
    for p in &g.positions {
        assert!((p.length() - 5.0).abs() < 1e-4);
    }
    // Pole rows contribute one triangle per quad, inner rows two.
    assert_eq!(g.indices.len(), (32 * 30 * 2 + 32 * 2) * 3);
}

#[test]
fn wireframe_edges_are_unique_and_in_range() {
    let g = SphereGeometry::new(1.0, 8, 6);
    let edges = g.wireframe_edges();
    let set: BTreeSet<_> = edges.iter().copied().collect();
    assert_eq!(set.len(), edges.len());
    for [a, b] in edges {
        assert!(a < b);
        assert!((b as usize) < g.positions.len());
    }
}

#[test]
fn segment_counts_are_clamped() {
    let g = SphereGeometry::new(1.0, 1, 1);
    assert_eq!(g.positions.len(), 4 * 3);

    let g = SphereGeometry::new(1.0, u32::MAX, u32::MAX);
    let side = MAX_SPHERE_SEGMENTS as usize + 1;
    assert_eq!(g.positions.len(), side * side);
    assert!(g.indices.iter().all(|&i| (i as usize) < g.positions.len()));
}

#[test]
fn model_matrix_follows_rotation() {
    let mut mesh = WireframeMesh::new(SphereGeometry::new(1.0, 8, 8), Rgb8::from_hex_u32(0x16a34a));
    assert_eq!(mesh.model_matrix(), Mat4::IDENTITY);
    mesh.rotation.y = PI / 2.0;
    let v = mesh.model_matrix().transform_point3(Vec3::X);
    assert!((v - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
}
