//! One live grid on one surface.
//!
//! `GridSession` wires the grid, the viewport's slot pool, the terminal
//! surface, the binding controller and the mutation driver together. Both the
//! interactive loop and the headless simulation drive it the same way: poll
//! ticks, scroll, resize, and ask for a frame.

use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::adapters::presenter::SessionSummary;
use crate::domain::{CellPosition, GridModel, RenderMode};
use crate::infra::{FrameLayout, GridConfig, ScreenBuffer, TerminalSurface, Viewport};
use crate::usecases::ports::Clock;
use crate::usecases::{BindingController, MutationDriver, TickOutcome, ValueRange, redraw_slots};

const IDLE_WAKE: Duration = Duration::from_millis(250);

pub struct GridSession {
    grid: GridModel,
    viewport: Viewport,
    layout: FrameLayout,
    surface: Rc<TerminalSurface>,
    bindings: BindingController,
    driver: MutationDriver<StdRng>,
    mode: RenderMode,
    clock: Arc<dyn Clock>,
    seed: u64,
    scrolls: u64,
    last_change: Option<(CellPosition, String)>,
}

impl GridSession {
    pub fn new(
        config: &GridConfig,
        visible: (usize, usize),
        clock: Arc<dyn Clock>,
        rng: StdRng,
        seed: u64,
    ) -> Self {
        let grid = GridModel::filled(config.rows(), config.columns(), config.initial_value());
        let viewport = Viewport::new(config.rows(), config.columns(), visible.0, visible.1);
        let layout = FrameLayout::new(config.cell_width(), config.rows());
        let surface = Rc::new(TerminalSurface::new(Arc::clone(&clock), config.flash()));
        let bindings = BindingController::new(surface.clone());
        let driver = MutationDriver::new(config.interval(), rng)
            .with_values(ValueRange::new(0, config.max_value()));

        let mut session = Self {
            grid,
            viewport,
            layout,
            surface,
            bindings,
            driver,
            mode: config.render_mode(),
            clock,
            seed,
            scrolls: 0,
            last_change: None,
        };
        session.layout_slots();
        debug!(
            rows = config.rows(),
            columns = config.columns(),
            slots = session.viewport.slot_count(),
            mode = %session.mode,
            "Grid session created"
        );
        session
    }

    /// Points every slot at the cell it now shows. Slots past the end of the
    /// pool are released.
    fn layout_slots(&mut self) {
        let slot_count = self.viewport.slot_count();
        self.surface.resize_slots(slot_count);
        match self.mode {
            RenderMode::Push => {
                for (slot, position) in self.viewport.slots() {
                    if let Ok(item) = self.grid.at_position(position) {
                        self.bindings.bind(slot, item);
                    }
                }
                let released = self.bindings.release_from(slot_count);
                if released > 0 {
                    debug!(released, "Released slots outside the viewport");
                }
            }
            RenderMode::RedrawAll => {
                self.bindings.release_all();
                self.redraw();
            }
        }
    }

    fn redraw(&self) {
        let report = redraw_slots(&self.grid, self.viewport.slots(), &*self.surface);
        if report.missing > 0 {
            debug!(missing = report.missing, "Slots pointed outside the grid");
        }
    }

    pub fn start(&mut self) {
        self.driver.start(self.clock.now());
        info!(interval_ms = self.driver.interval().as_millis(), "Mutation timer started");
    }

    pub fn stop(&mut self) {
        self.driver.stop();
        info!("Mutation timer stopped");
    }

    /// Starts or stops the driver. Returns whether it is now running.
    pub fn toggle(&mut self) -> bool {
        if self.driver.is_running() {
            self.stop();
        } else {
            self.start();
        }
        self.driver.is_running()
    }

    pub fn is_running(&self) -> bool {
        self.driver.is_running()
    }

    /// Runs the driver if its interval elapsed.
    pub fn poll_tick(&mut self) -> Option<TickOutcome> {
        let outcome = self.driver.poll(&self.grid, self.clock.now())?;
        match &outcome {
            TickOutcome::Mutated { position, value } => {
                debug!(%position, value = %value, "Cell mutated");
                if self.mode == RenderMode::RedrawAll {
                    self.redraw();
                }
                self.last_change = Some((*position, value.clone()));
            }
            TickOutcome::Skipped(err) => {
                debug!(error = %err, kind = err.kind(), "Mutation tick skipped");
            }
            TickOutcome::Stopped => {}
        }
        Some(outcome)
    }

    pub fn scroll_by(&mut self, d_row: isize, d_col: isize) -> bool {
        let moved = self.viewport.scroll_by(d_row, d_col);
        if moved {
            self.after_scroll();
        }
        moved
    }

    /// Scrolls by whole screens vertically.
    pub fn page(&mut self, pages: isize) -> bool {
        let rows = isize::try_from(self.viewport.rows().max(1)).unwrap_or(isize::MAX);
        self.scroll_by(pages.saturating_mul(rows), 0)
    }

    pub fn scroll_to(&mut self, origin: CellPosition) -> bool {
        let moved = self.viewport.scroll_to(origin);
        if moved {
            self.after_scroll();
        }
        moved
    }

    fn after_scroll(&mut self) {
        self.scrolls += 1;
        debug!(origin = %self.viewport.origin(), "Viewport scrolled");
        self.layout_slots();
    }

    /// Fits the slot pool to a terminal of the given size.
    pub fn resize_terminal(&mut self, term_cols: u16, term_rows: u16) -> bool {
        let (rows, cols) = self.layout.visible_slots(term_cols, term_rows);
        let changed = self.viewport.resize(rows, cols);
        if changed {
            debug!(rows, cols, "Viewport resized");
            self.layout_slots();
        }
        changed
    }

    pub fn frame(&self) -> ScreenBuffer {
        self.surface
            .frame(&self.viewport, &self.layout, &self.status_line())
    }

    fn status_line(&self) -> String {
        let state = if self.is_running() { "running" } else { "paused" };
        let stats = self.driver.stats();
        let last = match &self.last_change {
            Some((position, value)) => format!("{position} <- {value}"),
            None => "-".to_string(),
        };
        format!(
            " {state} | {} | tick {} | last {last} | origin {} | space pause  q quit",
            self.mode,
            stats.ticks,
            self.viewport.origin()
        )
    }

    pub fn has_active_flash(&self) -> bool {
        self.surface.has_active_flash(self.clock.now())
    }

    /// How long the event loop may sleep before something needs attention.
    pub fn next_wake(&self) -> Duration {
        let now = self.clock.now();
        [
            self.driver.time_until_due(now),
            self.surface.next_flash_expiry(now),
        ]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(IDLE_WAKE)
        .min(IDLE_WAKE)
    }

    pub fn viewport(&self) -> &Viewport {
        &self.viewport
    }

    pub fn surface(&self) -> &TerminalSurface {
        &self.surface
    }

    pub fn bound_count(&self) -> usize {
        self.bindings.bound_count()
    }

    /// Observer registrations not owned by a bound slot.
    pub fn stray_observers(&self) -> usize {
        self.grid
            .observer_count()
            .saturating_sub(self.bindings.bound_count())
    }

    /// Stops the driver, releases every slot and reports the counters. Any
    /// observer still registered afterwards is a leak.
    pub fn finish(mut self, command: &'static str) -> SessionSummary {
        self.driver.stop();
        self.bindings.release_all();
        let leaked_observers = self.grid.observer_count();
        let driver = self.driver.stats();
        let surface = self.surface.stats();
        let bindings = self.bindings.stats();
        let columns = self.grid.column_count().unwrap_or(0);

        SessionSummary {
            command,
            seed: self.seed,
            mode: self.mode.to_string(),
            rows: self.grid.row_count(),
            columns,
            visible_slots: self.viewport.slot_count(),
            ticks: driver.ticks,
            mutations: driver.mutations,
            skipped: driver.skipped,
            renders: surface.renders,
            highlights: surface.highlights,
            binds: bindings.binds,
            rebinds: bindings.rebinds,
            releases: bindings.releases,
            scrolls: self.scrolls,
            leaked_observers,
        }
    }
}
