//! A ball moving at constant velocity across labelled axes.
//!
//! Optional arguments are key names fed to the keyboard handler before the
//! run, e.g. `cargo run --example linear_motion -- " " f`. The final frame is
//! printed to stdout as SVG.

use glam::dvec2;
use phy::{AxisSpec, KeyEvent, KeyOutcome, Particle, Scene, SceneConfig, shared};

fn main() -> miette::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut scene = Scene::new(SceneConfig::new().width(20.0))?;

    scene
        .make_x_axis(AxisSpec::new(-8.0, 8.0).step(2.0))?
        .suppress_zero(&mut scene)?;
    scene.make_y_axis(AxisSpec::new(-4.0, 4.0))?.suppress_zero(&mut scene)?;

    let ball = shared(Particle::new(
        &mut scene,
        dvec2(-8.0, 1.0),
        dvec2(2.0, 0.0),
        dvec2(0.0, 0.0),
    ));
    scene.add_to_update(&ball);
    let mut velocity = scene.make_arrow(dvec2(-8.0, 1.0), dvec2(2.0, 0.0));

    let keys = scene.setup_animation();
    let presses: Vec<String> = std::env::args().skip(1).collect();
    if presses.is_empty() {
        scene.play();
    }
    for name in &presses {
        if let KeyOutcome::PassThrough = keys.handle(&KeyEvent::named(name)) {
            tracing::warn!(key = %name, "key not bound");
        }
    }

    for _ in 0..240 {
        scene.tick()?;
        let p = ball.borrow().position;
        velocity.update_tail(&mut scene, p.x, p.y)?;
    }

    tracing::info!(
        time = scene.time(),
        x = ball.borrow().position.x,
        "finished"
    );
    println!("{}", scene.to_svg()?);
    Ok(())
}
