//! Sphere Eater entry point
//!
//! The playable game runs in the browser (see `web`). Natively this runs a
//! headless demo: the autopilot plays one seeded session and the outcome is
//! logged. Set `RUST_LOG=debug` to follow every absorption.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use sphere_eater::hud::HudReport;
    use sphere_eater::input::{InputState, Key};
    use sphere_eater::sim::{GameState, tick};

    const DEMO_SEED: u64 = 2024;
    const FRAME_DT: f32 = 1.0 / 60.0;

    env_logger::init();
    log::info!("Sphere Eater (native) starting headless demo...");

    let mut state = GameState::new(DEMO_SEED);
    let mut input = InputState::new();
    input.autopilot = true;
    input.resize(800.0, 600.0);
    input.press(Key::Space);

    // Time limit plus a margin for the frame that reports time up
    let max_frames = ((state.config.time_limit_secs + 2.0) / FRAME_DT) as u64;
    let mut frames = 0u64;
    while frames < max_frames && !state.is_over() {
        let frame = input.take_tick_input(FRAME_DT);
        tick(&mut state, &frame);
        frames += 1;
        if frames % 600 == 0 {
            let report = HudReport::from_state(&state);
            log::info!("{} | {} | {}", report.time, report.size, report.goal);
        }
    }

    match state.outcome() {
        Some(outcome) => log::info!(
            "Demo finished after {} frames: {} (radius {:.2})",
            frames,
            outcome.description(),
            state.player.radius
        ),
        None => log::warn!("Demo stopped after {} frames without an outcome", frames),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
