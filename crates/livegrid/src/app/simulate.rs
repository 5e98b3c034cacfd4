//! Headless, deterministic run of a grid session.

use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, warn};

use crate::adapters::presenter::SessionSummary;
use crate::app::commands::SimulateArgs;
use crate::app::error::AppError;
use crate::app::session::GridSession;
use crate::domain::CellPosition;
use crate::infra::{GridConfig, ManualClock};

pub fn run_simulation(
    config: &GridConfig,
    args: &SimulateArgs,
    seed: u64,
) -> Result<SessionSummary, AppError> {
    config.validate()?;

    let clock = Arc::new(ManualClock::default());
    let mut session = GridSession::new(
        config,
        (args.view_rows, args.view_cols),
        clock.clone(),
        StdRng::seed_from_u64(seed),
        seed,
    );
    info!(
        seed,
        ticks = args.ticks,
        scroll_every = args.scroll_every,
        "Simulation started"
    );

    session.start();
    for tick in 1..=args.ticks {
        clock.advance(config.interval());
        session.poll_tick();

        if args.scroll_every > 0 && tick % args.scroll_every == 0 && !session.page(1) {
            session.scroll_to(CellPosition::new(0, 0));
        }

        let stray = session.stray_observers();
        if stray > 0 {
            warn!(tick, stray, "Observers registered outside bound slots");
        }
    }

    let summary = session.finish("simulate");
    info!(
        ticks = summary.ticks,
        mutations = summary.mutations,
        rebinds = summary.rebinds,
        leaked = summary.leaked_observers,
        "Simulation finished"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::commands::GridArgs;
    use crate::domain::RenderMode;
    use crate::infra::ConfigError;
    use std::time::Duration;

    fn args(ticks: u64, scroll_every: u64) -> SimulateArgs {
        SimulateArgs {
            grid: GridArgs::default(),
            ticks,
            view_rows: 4,
            view_cols: 3,
            scroll_every,
        }
    }

    fn config() -> GridConfig {
        GridConfig::builtin().with_rows(20).with_columns(5)
    }

    #[test]
    fn test_every_tick_mutates_a_non_empty_grid() {
        let summary = run_simulation(&config(), &args(25, 0), 1).unwrap();

        assert_eq!(summary.ticks, 25);
        assert_eq!(summary.mutations, 25);
        assert_eq!(summary.skipped, 0);
        assert_eq!(summary.visible_slots, 12);
        assert_eq!(summary.leaked_observers, 0);
    }

    #[test]
    fn test_scrolling_wraps_and_never_leaks() {
        let summary = run_simulation(&config(), &args(60, 2), 2).unwrap();

        // 20 rows in pages of 4: four pages down, then back to the top
        assert_eq!(summary.scrolls, 30);
        assert_eq!(summary.rebinds, 30 * 12);
        assert_eq!(summary.releases, 12);
        assert_eq!(summary.leaked_observers, 0);
    }

    #[test]
    fn test_same_seed_same_summary() {
        let a = run_simulation(&config(), &args(40, 3), 99).unwrap();
        let b = run_simulation(&config(), &args(40, 3), 99).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_redraw_mode_binds_nothing() {
        let config = config().with_render_mode(RenderMode::RedrawAll);
        let summary = run_simulation(&config, &args(10, 1), 5).unwrap();

        assert_eq!(summary.binds, 0);
        assert_eq!(summary.mode, "redraw-all");
        assert_eq!(summary.leaked_observers, 0);
        assert!(summary.renders >= 10 * 12);
    }

    #[test]
    fn test_empty_grid_skips_every_tick() {
        let config = config().with_rows(0);
        let summary = run_simulation(&config, &args(8, 0), 3).unwrap();

        assert_eq!(summary.skipped, 8);
        assert_eq!(summary.mutations, 0);
        assert_eq!(summary.renders, 0);
    }

    #[test]
    fn test_zero_interval_is_rejected() {
        let config = config().with_interval(Duration::ZERO);
        let err = run_simulation(&config, &args(1, 0), 0).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::ZeroInterval)));
    }
}
