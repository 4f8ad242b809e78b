use super::*;
use crate::module::read_render_count;

fn tiny() -> RenderSettings {
    RenderSettings {
        width: 16,
        height: 9,
        samples_per_pixel: 2,
        max_depth: 6,
        seed: 1,
    }
}

#[test]
fn demo_module_reports_default_dimensions() {
    let m = RaytracerModule::demo(RenderMode::default()).unwrap();
    assert_eq!((m.width(), m.height()), (384, 216));
    assert_eq!(m.output_buffer_pointer(), HEADER_BYTES);
    assert!(m.memory().size() >= HEADER_BYTES + 384 * 216 * 4);
}

#[test]
fn full_render_fills_output_region_with_opaque_pixels() {
    let mut m = RaytracerModule::demo_with_settings(tiny(), RenderMode::default()).unwrap();
    let len = m.canvas().rgba_len();
    assert!(
        m.memory()
            .read(m.output_buffer_pointer(), len)
            .unwrap()
            .iter()
            .all(|b| *b == 0)
    );

    m.render().unwrap();
    let out = m.memory().read(m.output_buffer_pointer(), len).unwrap();
    assert!(out.chunks_exact(4).all(|px| px[3] == 0xff));
    assert_eq!(read_render_count(m.memory()).unwrap(), 1);
    assert_eq!(m.renders(), 1);
}

#[test]
fn full_render_matches_direct_raytracer_output() {
    let settings = tiny();
    let mut m = RaytracerModule::demo_with_settings(settings, RenderMode::default()).unwrap();
    m.render().unwrap();
    let direct = m.raytracer.render(&m.scene, &RenderThreading::default()).unwrap();
    let out = m
        .memory()
        .read(m.output_buffer_pointer(), direct.data.len())
        .unwrap();
    assert_eq!(out, direct.data.as_slice());
}

#[test]
fn memory_growth_happens_before_each_render() {
    let mut m = RaytracerModule::demo_with_settings(tiny(), RenderMode::default())
        .unwrap()
        .with_memory_growth(2);
    let before = m.memory().pages();
    m.render().unwrap();
    m.render().unwrap();
    assert_eq!(m.memory().pages(), before + 4);
}

#[test]
fn progressive_mode_rejects_zero_budget() {
    let err = RaytracerModule::demo_with_settings(tiny(), RenderMode::Progressive { budget: 0 })
        .unwrap_err();
    assert!(err.to_string().contains("budget"));
}

#[test]
fn progressive_renders_refine_and_camera_change_resets() {
    let mut m =
        RaytracerModule::demo_with_settings(tiny(), RenderMode::Progressive { budget: 50 })
            .unwrap();
    m.render().unwrap();
    let progress = m.progressive.as_ref().unwrap().pass_progress();
    assert_eq!(progress, 50);

    let moved = m.camera().moved(crate::foundation::core::Vec3::new(0.0, 0.1, 0.0)).unwrap();
    m.set_camera(moved);
    assert_eq!(m.progressive.as_ref().unwrap().pass_progress(), 0);
}

#[test]
fn init_panic_hook_is_idempotent() {
    let mut m = RaytracerModule::demo_with_settings(tiny(), RenderMode::default()).unwrap();
    m.init_panic_hook();
    m.init_panic_hook();
}

#[test]
fn navigation_step_moves_camera_and_restarts_accumulation() {
    let mut m =
        RaytracerModule::demo_with_settings(tiny(), RenderMode::Progressive { budget: 40 })
            .unwrap();
    m.render().unwrap();
    assert_eq!(m.progressive.as_ref().unwrap().pass_progress(), 40);

    let before = m.camera().clone();
    m.navigate(Navigation::Forward, false, 0.25).unwrap();
    assert_eq!(m.progressive.as_ref().unwrap().pass_progress(), 0);

    let shift = m.camera().origin() - before.origin();
    assert!((shift.norm() - 0.25).abs() < 1e-9);
    assert!((m.camera().target() - before.target() - shift).norm() < 1e-9);

    let heading = |c: &Camera| (c.target() - c.origin()).normalize();
    assert!((heading(m.camera()) - heading(&before)).norm() < 1e-9);
}

#[test]
fn generated_module_renders_the_seeded_scene() {
    let mut m = RaytracerModule::generated(3, tiny(), RenderMode::default()).unwrap();
    let expected = generated_scene(3).unwrap();
    assert_eq!(m.scene.len(), expected.scene.len());
    m.render().unwrap();
    assert_eq!(m.renders(), 1);
}
