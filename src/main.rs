use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use fluids::diagnostics::{divergence_sq, kinetic_energy, peak, total_density};
use fluids::{config, logging, FluidGrid, FrameSnapshot};

/// Parse `--<name> <value>` from CLI args.
fn arg_value(args: &[String], name: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == name).map(|w| w[1].clone())
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();
    logging::init_logging(arg_value(&args, "--log").as_deref());

    let mut cfg = match arg_value(&args, "--config") {
        Some(path) => match config::load_from(Path::new(&path)) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::error!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => config::load(),
    };
    if let Some(steps) = arg_value(&args, "--steps") {
        match steps.parse() {
            Ok(n) => cfg.run.steps = n,
            Err(_) => log::warn!("ignoring invalid --steps {steps:?}"),
        }
    }

    let mut grid = FluidGrid::with_params(cfg.physics.size, cfg.solver_params());
    cfg.preset.apply(&mut grid);
    log::info!(
        "running {} frames on a {}x{} grid ({} step(s) per frame)",
        cfg.run.steps,
        grid.size(),
        grid.size(),
        cfg.run.steps_per_frame
    );

    let layout = grid.layout();
    let mut snap = FrameSnapshot::new_empty(layout);
    let started = Instant::now();
    let report_every = cfg.run.report_every.max(1);

    for frame in 0..cfg.run.steps {
        for _ in 0..cfg.run.steps_per_frame {
            grid.step();
        }
        if frame % report_every == 0 || frame + 1 == cfg.run.steps {
            grid.snapshot_into(&mut snap);
            let ((px, py), pv) = peak(layout, &snap.density);
            log::info!(
                "frame={} mass={:.6} KE={:.6e} div={:.3e} peak=({}, {})={:.4}",
                frame,
                total_density(layout, &snap.density),
                kinetic_energy(layout, &snap.vx, &snap.vy),
                divergence_sq(layout, &snap.vx, &snap.vy),
                px,
                py,
                pv
            );
        }
    }

    let elapsed = started.elapsed().as_secs_f64();
    let total_steps = cfg.run.steps * cfg.run.steps_per_frame;
    if total_steps > 0 {
        log::info!(
            "{} steps in {:.3}s ({:.3} ms/step)",
            total_steps,
            elapsed,
            1000.0 * elapsed / total_steps as f64
        );
    }
    ExitCode::SUCCESS
}
