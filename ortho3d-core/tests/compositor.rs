use ortho3d_core::{
    Canvas, Color, DisplayList, Drawable, NodeId, Overlay, Point3, Primitive, Scene, SceneConfig,
    Segment3, Shape, Triangle3, ViewAngles,
};

fn scene(angles: Option<ViewAngles>) -> Scene<DisplayList> {
    let config = SceneConfig {
        scale: 0.05,
        angles,
        ..SceneConfig::default()
    };
    Scene::with_config(DisplayList::new(200, 200), &config)
}

fn triangle_at(x: f64) -> Triangle3 {
    Triangle3::new(
        &Point3::new(x, -1.0, 0.0),
        &Point3::new(x, 1.0, 0.0),
        &Point3::new(x, 0.0, 1.0),
    )
}

fn shape_of(scene: &Scene<DisplayList>, id: NodeId) -> Shape {
    let item = scene.item(id).expect("primitive is drawn");
    scene.canvas().get(item).cloned().expect("item is on the canvas")
}

fn assert_points_close(a: &[(f64, f64)], b: &[(f64, f64)]) {
    assert_eq!(a.len(), b.len());
    for (p, q) in a.iter().zip(b) {
        assert!((p.0 - q.0).abs() < 1e-9 && (p.1 - q.1).abs() < 1e-9, "{p:?} != {q:?}");
    }
}

#[test]
fn rasterizes_farthest_first() {
    // Looking along -x at zero angles, so depth is -x
    let mut scene = scene(Some(ViewAngles::zero()));
    let mut ids = Vec::new();
    for depth in [5.0, 1.0, 3.0] {
        let tri = triangle_at(-depth);
        assert_eq!(tri.depth(Some(scene.view())), depth);
        ids.push(scene.attach(tri));
    }
    scene.redraw();

    let painted: Vec<NodeId> = scene
        .canvas()
        .items()
        .iter()
        .filter_map(|(item, _)| ids.iter().copied().find(|id| scene.item(*id) == Some(*item)))
        .collect();
    assert_eq!(painted, vec![ids[0], ids[2], ids[1]]);
}

#[test]
fn rotating_the_camera_reorders() {
    let mut scene = scene(Some(ViewAngles::zero()));
    let near = scene.attach(triangle_at(4.0));
    let far = scene.attach(triangle_at(-4.0));
    scene.redraw();
    let top = scene.canvas().items().last().map(|(item, _)| *item);
    assert_eq!(top, scene.item(near));

    // Half a turn in azimuth puts the camera on the other side
    scene.set_camera(180.0, 0.0, 0.0);
    let top = scene.canvas().items().last().map(|(item, _)| *item);
    assert_eq!(top, scene.item(far));
}

#[test]
fn incremental_move_matches_full_redraw() {
    let angles = ViewAngles::new(37.0, -22.0, 64.0);
    let mut seg = Segment3::new(&Point3::new(1.0, 2.0, 3.0), &Point3::new(-2.0, 0.5, 1.0));
    seg.set_color(Color::CYAN);
    let shapes: Vec<Primitive> = vec![
        Point3::new(0.5, -0.5, 2.0).into(),
        seg.into(),
        triangle_at(1.5).into(),
    ];

    for primitive in shapes {
        let mut moved = scene(Some(angles));
        let id = moved.attach(primitive.clone());
        moved.redraw();
        assert!(moved.translate(id, 0.75, -1.25, 2.5));

        let mut reference = scene(Some(angles));
        let mut shifted = primitive.clone();
        shifted.translate(0.75, -1.25, 2.5);
        let rid = reference.attach(shifted);
        reference.redraw();

        assert_points_close(&shape_of(&moved, id).points(), &shape_of(&reference, rid).points());
    }
}

#[test]
fn move_depends_on_camera_orientation() {
    let delta_under = |azimuth: f64| {
        let mut scene = scene(Some(ViewAngles::new(azimuth, 0.0, 0.0)));
        let id = scene.attach(Point3::new(0.0, 0.0, 0.0));
        let before = shape_of(&scene, id).points()[0];
        scene.translate(id, 1.0, 0.0, 0.0);
        let after = shape_of(&scene, id).points()[0];
        (after.0 - before.0, after.1 - before.1)
    };

    let straight = delta_under(0.0);
    let turned = delta_under(90.0);
    // Moving along the viewing axis does not show on screen
    assert!(straight.0.abs() < 1e-9 && straight.1.abs() < 1e-9);
    assert!((turned.0 - -20.0).abs() < 1e-9, "{turned:?}");
    assert_ne!(straight, turned);
}

#[test]
fn overlay_stays_on_top_and_ignores_camera() {
    let mut scene = scene(Some(ViewAngles::new(10.0, 20.0, 30.0)));
    let mut hud = Overlay::new(-5.0, 5.0, -4.0, 4.0);
    hud.set_fill(Color::YELLOW);
    let hud = scene.attach(hud);
    scene.attach(triangle_at(0.0));
    scene.attach(triangle_at(-100.0));
    let before = shape_of(&scene, hud).points();

    scene.set_camera(-75.0, 10.0, 0.0);
    let top = scene.canvas().items().last().map(|(item, _)| *item);
    assert_eq!(top, scene.item(hud));
    assert_eq!(shape_of(&scene, hud).points(), before);
    assert_points_close(&before, &[(0.0, 0.0), (20.0, 20.0)]);
}

#[test]
fn edits_through_get_mut_show_after_redraw() {
    let mut scene = scene(None);
    let id = scene.attach(Point3::new(0.0, 0.0, 0.0));
    if let Some(Primitive::Point(p)) = scene.get_mut(id) {
        p.x = 1.0;
        p.set_fill(Color::RED);
    }
    scene.redraw();
    match shape_of(&scene, id) {
        Shape::Rectangle { p0, style, .. } => {
            assert_points_close(&[p0], &[(120.0, 100.0)]);
            assert_eq!(style.fill, Some(Color::RED));
        }
        other => panic!("unexpected shape {other:?}"),
    }
}

#[test]
fn clear_empties_scene_and_canvas() {
    let mut scene = scene(None);
    for x in 0..5 {
        scene.attach(triangle_at(x as f64));
    }
    let detached = scene.clear();
    assert_eq!(detached.len(), 5);
    assert!(scene.is_empty());
    assert!(scene.canvas().is_empty());
    assert_eq!(scene.canvas().width(), 200);
}
