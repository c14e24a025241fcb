//! Integration tests for the viewer session.
//!
//! Frames are driven by a `ManualScheduler` and drawn into a
//! `RecordingSurface`, so every draw call can be inspected.

use std::time::Duration;

use reconview::*;

fn raw(points: &[f32]) -> RawDataset {
    RawDataset::new(points.to_vec(), None)
}

fn every_point() -> ViewerOptions {
    ViewerOptions {
        decimation_stride: 1,
        ..ViewerOptions::default()
    }
}

fn fire(viewer: &mut Viewer, surface: &mut RecordingSurface) -> Option<FrameStats> {
    let token = viewer.scheduler_mut().fire_next()?;
    surface.reset();
    viewer.on_frame(token, surface)
}

fn disc_centers(surface: &RecordingSurface) -> Vec<Vec2> {
    surface.discs().map(|(center, _, _)| center).collect()
}

#[test]
fn test_single_nerf_point_renders_at_center() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);

    let mut surface = RecordingSurface::new(800.0, 600.0);
    let stats = fire(&mut viewer, &mut surface).unwrap();
    assert_eq!(stats.drawn, 1);

    assert_eq!(
        surface.commands()[0],
        DrawCommand::Clear(Color::from_hex(0x1A1A1A))
    );
    let discs: Vec<_> = surface.discs().collect();
    assert_eq!(discs.len(), 1);
    let (center, radius, color) = discs[0];
    assert_eq!(center, Vec2::new(400.0, 300.0));
    assert_eq!(radius, 3.0);
    assert_eq!(color, Color::from_hex(0x4F46E5));
}

#[test]
fn test_drag_then_render_uses_new_pose() {
    let mut viewer = Viewer::headless(every_point());
    viewer.set_datasets([("nerf".to_string(), raw(&[-1.0, 0.0, 0.0, 1.0, 0.0, 0.0]))]);

    viewer.handle_pointer(PointerEvent::Down {
        button: PointerButton::Primary,
        position: Vec2::ZERO,
    });
    let response = viewer.handle_pointer(PointerEvent::Move {
        position: Vec2::new(100.0, 0.0),
    });
    assert!(response.camera_changed);
    assert!((viewer.camera().rotation_y() - 1.0).abs() < 1e-6);
    assert_eq!(viewer.camera().rotation_x(), 0.0);

    let mut surface = RecordingSurface::new(800.0, 600.0);
    fire(&mut viewer, &mut surface).unwrap();
    let expected = 1.0f32.cos() * 80.0;
    let mut xs: Vec<f32> = disc_centers(&surface).iter().map(|c| c.x - 400.0).collect();
    xs.sort_by(f32::total_cmp);
    assert!((xs[0] + expected).abs() < 1e-3);
    assert!((xs[1] - expected).abs() < 1e-3);
}

#[test]
fn test_model_switch_recenters_on_new_bounds() {
    let mut viewer = Viewer::headless(every_point());
    viewer.set_datasets([
        ("nerf".to_string(), raw(&[0.0, 0.0, 0.0, 2.0, 0.0, 0.0])),
        (
            "gaussian_splatting".to_string(),
            raw(&[10.0, 10.0, 10.0, 10.0, 14.0, 10.0]),
        ),
    ]);
    assert_eq!(viewer.status().active_model.as_deref(), Some("gaussian_splatting"));

    let mut surface = RecordingSurface::new(800.0, 600.0);
    fire(&mut viewer, &mut surface).unwrap();
    let centers = disc_centers(&surface);
    assert_eq!(centers, vec![Vec2::new(400.0, 460.0), Vec2::new(400.0, 140.0)]);

    viewer.select_model("nerf").unwrap();
    fire(&mut viewer, &mut surface).unwrap();
    let centers = disc_centers(&surface);
    assert_eq!(centers, vec![Vec2::new(320.0, 300.0), Vec2::new(480.0, 300.0)]);
    assert!(surface
        .discs()
        .all(|(_, _, color)| color == Color::from_hex(0x4F46E5)));
}

#[test]
fn test_unknown_selection_keeps_active_model() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);

    let err = viewer.select_model("unknown").unwrap_err();
    assert!(matches!(err, ViewerError::InvalidSelection(_)));

    let status = viewer.status();
    assert_eq!(status.active_model.as_deref(), Some("nerf"));
    assert_eq!(status.active_label.as_deref(), Some("NeRF (MiDaS)"));
    assert!(status.error.is_some());
    assert_eq!(
        viewer.active_geometry().map(|g| g.model_name().to_string()),
        Some("nerf".to_string())
    );
}

#[test]
fn test_malformed_model_is_never_drawn() {
    let mut viewer = Viewer::headless(every_point());
    let accepted = viewer.set_datasets([
        ("nerf".to_string(), raw(&[0.0; 7])),
        ("gaussian_splatting".to_string(), raw(&[0.0, 0.0, 0.0])),
    ]);
    assert_eq!(accepted, 1);
    assert_eq!(
        viewer.model_error("nerf").map(ToString::to_string).as_deref(),
        Some("Invalid data length: 7")
    );
    assert_eq!(viewer.status().error.as_deref(), Some("Invalid data length: 7"));
    assert!(viewer.select_model("nerf").is_err());

    let mut surface = RecordingSurface::new(100.0, 100.0);
    let stats = fire(&mut viewer, &mut surface).unwrap();
    assert_eq!(stats.drawn, 1);
    assert!(surface
        .discs()
        .all(|(_, _, color)| color == Color::from_hex(0x10B981)));
}

#[test]
fn test_only_malformed_models_leave_viewer_idle() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    assert_eq!(viewer.set_datasets([("nerf".to_string(), raw(&[]))]), 0);
    assert!(matches!(
        viewer.model_error("nerf"),
        Some(ViewerError::EmptyDataset(_))
    ));
    assert!(!viewer.is_running());
    assert_eq!(viewer.scheduler_mut().pending(), 0);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    let stats = viewer.render(&mut surface);
    assert_eq!(stats.drawn, 0);
    assert_eq!(surface.commands().len(), 1);
}

#[test]
fn test_loop_reschedules_while_active() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);
    let mut surface = RecordingSurface::new(100.0, 100.0);

    for _ in 0..3 {
        assert!(fire(&mut viewer, &mut surface).is_some());
        assert_eq!(viewer.scheduler_mut().pending(), 1);
    }

    viewer.clear();
    assert!(!viewer.is_running());
    assert_eq!(viewer.scheduler_mut().pending(), 0);
    assert_eq!(viewer.status().active_model, None);
}

#[test]
fn test_stale_frame_is_ignored() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);
    let mut surface = RecordingSurface::new(100.0, 100.0);

    let pending = viewer.pending_frame().unwrap();
    let stale = FrameToken::from_raw(pending.raw() + 100);
    assert!(viewer.on_frame(stale, &mut surface).is_none());
    assert!(surface.commands().is_empty());
    assert_eq!(viewer.pending_frame(), Some(pending));
}

#[test]
fn test_teardown_cancels_pending_frame() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);
    let token = viewer.pending_frame().unwrap();

    viewer.teardown();
    assert!(!viewer.is_running());
    assert_eq!(viewer.scheduler_mut().pending(), 0);

    let mut surface = RecordingSurface::new(100.0, 100.0);
    assert!(viewer.on_frame(token, &mut surface).is_none());
    assert!(surface.commands().is_empty());

    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);
    assert!(!viewer.is_running());
}

#[test]
fn test_wheel_and_reset() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    let response = viewer.handle_pointer(PointerEvent::Wheel { delta_y: 3.0 });
    assert!(response.prevent_default);
    assert!((viewer.status().zoom - 72.0).abs() < 1e-4);

    viewer.handle_pointer(PointerEvent::Down {
        button: PointerButton::Secondary,
        position: Vec2::ZERO,
    });
    viewer.handle_pointer(PointerEvent::Move {
        position: Vec2::new(5.0, -5.0),
    });
    assert_eq!(viewer.camera().pan_x(), 5.0);

    viewer.reset_camera();
    assert_eq!(*viewer.camera(), CameraState::default());
}

#[test]
fn test_load_payload_envelope() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    let json = r#"{
        "success": true,
        "data": {
            "nerf": {"pointCloud": [0, 0, 0, 1, 1, 1], "numPoints": 2, "colors": [1, 0, 0, 0, 1, 0]},
            "gaussian_splatting": {"pointCloud": [0, 0, 0], "numPoints": 1, "colors": null}
        }
    }"#;
    assert_eq!(viewer.load_payload(json).unwrap(), 2);

    let status = viewer.status();
    assert_eq!(status.active_model.as_deref(), Some("gaussian_splatting"));
    assert_eq!(status.active_label.as_deref(), Some("Gaussian Splatting"));
    assert_eq!(status.available_models.len(), 2);
    assert_eq!(status.error, None);

    viewer.select_model("nerf").unwrap();
    let status = viewer.status();
    assert_eq!(status.num_points, 2);
    assert_eq!(status.color_count, 2);
}

#[test]
fn test_failed_payload_clears_viewer() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);

    let err = viewer
        .load_payload(r#"{"success": false, "error": "COLMAP failed"}"#)
        .unwrap_err();
    assert!(matches!(err, ViewerError::Payload(_)));
    let status = viewer.status();
    assert_eq!(status.active_model, None);
    assert!(status.error.unwrap().contains("COLMAP failed"));
    assert!(!viewer.is_running());
}

#[test]
fn test_background_preparation_publishes_geometry() {
    let options = ViewerOptions {
        prepare_in_background: true,
        ..ViewerOptions::default()
    };
    let mut viewer = Viewer::headless(options);
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);
    assert!(viewer.wait_for_geometry(Duration::from_secs(10)));

    let mut surface = RecordingSurface::new(100.0, 100.0);
    let stats = fire(&mut viewer, &mut surface).unwrap();
    assert_eq!(stats.drawn, 1);
}

#[test]
fn test_custom_profile_fallback_color() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.profiles_mut().register(
        "instant_ngp",
        ModelProfile::new("Instant-NGP", FallbackColor::Solid(Color::new(255, 128, 0))),
    );
    viewer.set_datasets([("instant_ngp".to_string(), raw(&[0.0, 0.0, 0.0]))]);

    assert_eq!(viewer.status().active_label.as_deref(), Some("Instant-NGP"));
    let mut surface = RecordingSurface::new(100.0, 100.0);
    fire(&mut viewer, &mut surface).unwrap();
    let (_, _, color) = surface.discs().next().unwrap();
    assert_eq!(color, Color::new(255, 128, 0));
}

#[test]
fn test_headless_png_export() {
    let mut viewer = Viewer::headless(ViewerOptions::default());
    viewer.set_datasets([("nerf".to_string(), raw(&[0.0, 0.0, 0.0]))]);

    let path = std::env::temp_dir().join(format!("reconview_test_{}.png", std::process::id()));
    render_to_file(&mut viewer, &path, 64, 48).unwrap();
    let image = image::open(&path).unwrap().to_rgba8();
    assert_eq!(image.dimensions(), (64, 48));
    assert_eq!(image.get_pixel(32, 24).0, [0x4F, 0x46, 0xE5, 255]);
    let _ = std::fs::remove_file(&path);
}
