//! Stateful front end over [`derive`]: owns the inputs, routes events, and
//! tells a [`GridObserver`] what changed.
//!
//! The engine is the only writer of the container. Drag resizes and
//! auto-fit proposals are its two sources; auto-fit is ignored while a drag
//! is in progress.

use core::mem;

use whereat::At;

use crate::constraint::{ConfigError, Extent};
use crate::page::{Page, PaginationController};
use crate::plan::{GridConfig, GridInputs, GridPlan, derive};
use crate::resize::{PointerCapture, PointerEvent, ResizeEffect, ResizePhase, ResizeSession};

/// Receives change notifications. Every method defaults to a no-op.
pub trait GridObserver {
    /// The solved layout or the container it is placed in changed. Fired
    /// once per change, never for a recomputation that produced the same
    /// geometry.
    fn on_layout_change(&mut self, _plan: &GridPlan) {}

    /// The effective page differs from the last one reported, or a page
    /// request was clamped.
    fn on_page_change(&mut self, _page: Page) {}

    /// A drag proposed a container size. Fired on every pointer-move while
    /// a resize session is active.
    fn on_resize(&mut self, _container: Extent) {}
}

impl GridObserver for () {}

/// Grid layout engine.
pub struct GridEngine<C: PointerCapture = (), O: GridObserver = ()> {
    config: GridConfig,
    participants: usize,
    container: Extent,
    last_user_width: f64,
    pages: PaginationController,
    session: ResizeSession<C>,
    plan: GridPlan,
    observer: O,
}

impl<C: PointerCapture, O: GridObserver> GridEngine<C, O> {
    /// Validate `config` and compute the initial plan.
    ///
    /// `container` is clamped to the minimum tile size and becomes the
    /// initial last user-chosen width. No notifications fire during
    /// construction; read [`plan`](Self::plan) for the starting state.
    pub fn new(
        config: GridConfig,
        container: Extent,
        participants: usize,
        capture: C,
        observer: O,
    ) -> Result<Self, At<ConfigError>> {
        config.validate()?;
        let floor = config.constraints.min_size();
        let container = container.sanitized().clamp_min(floor);
        let total = config.effective_total(participants, container.width);
        let pages = PaginationController::new(config.page_capacity, total)?;
        let plan = derive(
            &config,
            &GridInputs {
                participants,
                container,
                page: pages.page().index,
            },
        );
        Ok(Self {
            config,
            participants,
            container,
            last_user_width: container.width,
            pages,
            session: ResizeSession::new(capture, floor),
            plan,
            observer,
        })
    }

    pub fn config(&self) -> &GridConfig {
        &self.config
    }

    /// The current derived plan.
    pub fn plan(&self) -> &GridPlan {
        &self.plan
    }

    pub fn container(&self) -> Extent {
        self.container
    }

    pub fn participants(&self) -> usize {
        self.participants
    }

    pub fn page(&self) -> Page {
        self.pages.page()
    }

    /// Width last set by a drag (or the initial width).
    pub fn last_user_width(&self) -> f64 {
        self.last_user_width
    }

    pub fn resize_phase(&self) -> ResizePhase {
        self.session.phase()
    }

    /// The current input snapshot.
    pub fn inputs(&self) -> GridInputs {
        GridInputs {
            participants: self.participants,
            container: self.container,
            page: self.pages.page().index,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Change the participant count from the control surface.
    ///
    /// Applies auto-fit when configured and no drag is active.
    pub fn set_participants(&mut self, participants: usize) {
        if participants == self.participants {
            return;
        }
        let previous = mem::replace(&mut self.participants, participants);

        if let Some(fit) = self.config.auto_fit
            && !self.session.is_active()
            && let Some(width) = fit.propose(
                previous,
                participants,
                self.container.width,
                self.last_user_width,
            )
        {
            let next = Extent::new(width, self.container.height)
                .clamp_min(self.config.constraints.min_size());
            if next != self.container {
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    previous,
                    participants,
                    from = self.container.width,
                    to = next.width,
                    "auto-fit applied"
                );
                self.container = next;
            }
        }
        self.refresh();
    }

    /// Request a 1-based page.
    pub fn set_page(&mut self, page: usize) {
        let change = self.pages.set_page(page);
        self.notify_page(change);
        self.refresh();
    }

    pub fn next_page(&mut self) {
        let change = self.pages.next_page();
        self.notify_page(change);
        self.refresh();
    }

    pub fn previous_page(&mut self) {
        let change = self.pages.previous_page();
        self.notify_page(change);
        self.refresh();
    }

    /// Feed a pointer event to the resize session.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> ResizeEffect {
        let effect = self.session.handle(event, self.container);
        if let ResizeEffect::Resized(size) = effect {
            self.container = size;
            self.last_user_width = size.width;
            self.observer.on_resize(size);
            self.refresh();
        }
        effect
    }

    /// Abort any drag in progress, releasing its pointer capture.
    pub fn cancel_resize(&mut self) -> bool {
        self.session.cancel()
    }

    fn notify_page(&mut self, change: Option<Page>) {
        if let Some(page) = change {
            self.observer.on_page_change(page);
        }
    }

    /// Re-derive from the current inputs and notify on changes.
    fn refresh(&mut self) {
        let total = self
            .config
            .effective_total(self.participants, self.container.width);
        let change = self.pages.set_total(total);
        self.notify_page(change);

        let plan = derive(&self.config, &self.inputs());
        let geometry_changed =
            plan.layout != self.plan.layout || plan.container != self.plan.container;
        self.plan = plan;
        if geometry_changed {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                rows = plan.layout.rows,
                cols = plan.layout.cols,
                tile_width = plan.layout.tile_width,
                tile_height = plan.layout.tile_height,
                "layout replaced"
            );
            self.observer.on_layout_change(&self.plan);
        }
    }
}

impl<C, O> core::fmt::Debug for GridEngine<C, O>
where
    C: PointerCapture + core::fmt::Debug,
    O: GridObserver,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("GridEngine")
            .field("config", &self.config)
            .field("participants", &self.participants)
            .field("container", &self.container)
            .field("last_user_width", &self.last_user_width)
            .field("pages", &self.pages)
            .field("session", &self.session)
            .field("plan", &self.plan)
            .finish_non_exhaustive()
    }
}
