//! Book aggregate: pages, their rigs and the scheduled tick.

use tracing::{debug, info, warn};

#[cfg(feature = "bevy")]
use bevy::prelude::Resource;

use crate::geometry::PageGeometry;
use crate::rig::BoneChain;
use crate::solver::{CurlProfile, CurvatureSolver};
use crate::stack::{PageStack, PageState};

/// One page of the book.
///
/// The rig is optional so that hosts can create pages before their render
/// resources are ready; ticks on an unrealized page are skipped.
#[derive(Debug, Clone)]
pub struct Page {
    state: PageState,
    rig: Option<BoneChain>,
}

impl Page {
    pub fn unrealized(index: usize) -> Self {
        Self {
            state: PageState::closed(index),
            rig: None,
        }
    }

    pub fn realized(index: usize, geometry: &PageGeometry) -> Self {
        let mut page = Self::unrealized(index);
        page.realize(geometry);
        page
    }

    /// Build the rig if it does not exist yet. An existing rig keeps its pose.
    pub fn realize(&mut self, geometry: &PageGeometry) {
        if self.rig.is_none() {
            self.rig = Some(BoneChain::from_geometry(geometry));
        }
    }

    pub fn is_realized(&self) -> bool {
        self.rig.is_some()
    }

    pub fn index(&self) -> usize {
        self.state.index
    }

    /// State applied on the most recent tick.
    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn rig(&self) -> Option<&BoneChain> {
        self.rig.as_ref()
    }

    /// Apply `state` and advance the rig by `dt` seconds.
    pub fn tick(&mut self, solver: &CurvatureSolver, state: PageState, dt: f32) {
        self.state = state;
        if let Some(rig) = self.rig.as_mut() {
            solver.tick(rig, &self.state, dt);
        }
    }

    pub fn settled(&self, solver: &CurvatureSolver) -> bool {
        self.rig
            .as_ref()
            .is_none_or(|rig| solver.settled(rig, &self.state))
    }
}

/// A stack of pages sharing one geometry and curl profile.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "bevy", derive(Resource))]
pub struct Book {
    geometry: PageGeometry,
    stack: PageStack,
    solver: CurvatureSolver,
    pages: Vec<Page>,
    current_page: usize,
}

impl Book {
    /// Create a book whose pages are realized immediately.
    pub fn new(geometry: PageGeometry, profile: CurlProfile, page_count: usize) -> Self {
        let mut book = Self::deferred(geometry, profile, page_count);
        book.realize_all();
        book
    }

    /// Create a book whose pages still need [`Book::realize_page`].
    pub fn deferred(geometry: PageGeometry, profile: CurlProfile, page_count: usize) -> Self {
        debug!("Creating book with {} pages", page_count);
        Self {
            geometry,
            stack: PageStack::new(page_count, geometry.depth()),
            solver: CurvatureSolver::new(profile),
            pages: (0..page_count).map(Page::unrealized).collect(),
            current_page: 0,
        }
    }

    pub fn realize_page(&mut self, index: usize) {
        let geometry = self.geometry;
        if let Some(page) = self.pages.get_mut(index) {
            page.realize(&geometry);
        }
    }

    pub fn realize_all(&mut self) {
        let geometry = self.geometry;
        for page in &mut self.pages {
            page.realize(&geometry);
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    pub fn stack(&self) -> &PageStack {
        &self.stack
    }

    pub fn solver(&self) -> &CurvatureSolver {
        &self.solver
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&Page> {
        self.pages.get(index)
    }

    /// Reading position applied on the most recent tick.
    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Open the book at `current` without animating or reporting a change.
    ///
    /// Pages take their states for `current` immediately; rigs keep their pose
    /// until the next tick.
    pub fn open_at(&mut self, current: usize) {
        let clamped = self.stack.clamp_index(current);
        self.current_page = clamped;
        for page in &mut self.pages {
            let state = self.stack.page_state(clamped, page.index());
            page.tick(&self.solver, state, 0.0);
        }
        debug!("Opened book at page {}", clamped);
    }

    /// Advance every page by `dt` seconds for the reading position `current`.
    ///
    /// `current` is clamped to `[0, page_count]`.
    pub fn tick(&mut self, current: usize, dt: f32) {
        let clamped = self.stack.clamp_index(current);
        if clamped != current && clamped != self.current_page {
            warn!(
                "Requested page {} is outside the book, clamping to {}",
                current, clamped
            );
        }
        if clamped != self.current_page {
            info!("Page changed: {} -> {}", self.current_page, clamped);
            self.current_page = clamped;
        }

        for page in &mut self.pages {
            let state = self.stack.page_state(clamped, page.index());
            page.tick(&self.solver, state, dt);
        }
    }

    /// Whether every realized page has reached its target pose.
    pub fn settled(&self) -> bool {
        self.pages.iter().all(|page| page.settled(&self.solver))
    }
}
