use crate::geometry::{Rect, Viewport};
use smallvec::SmallVec;

/// Measures the page regions particles must avoid.
///
/// Implementations push one rect per matching element and may push nothing.
pub trait ObstacleSource {
    fn measure(&self, out: &mut Vec<Rect>);
}

/// Snapshot storage; most pages have only a handful of obstacle blocks.
pub type ObstacleSnapshot = SmallVec<[Rect; 8]>;

/// Keeps the current obstacle snapshot and decides when to re-measure.
///
/// Resize/scroll handlers only call `mark_stale`; the frame loop asks
/// `should_refresh` and pays for measurement at most once per frame.
#[derive(Debug)]
pub struct ObstacleTracker {
    snapshot: ObstacleSnapshot,
    scratch: Vec<Rect>,
    stale: bool,
    last_refresh_ms: Option<f64>,
    max_age_ms: f64,
}

impl ObstacleTracker {
    pub fn new(max_age_ms: f64) -> Self {
        Self {
            snapshot: SmallVec::new(),
            scratch: Vec::new(),
            stale: true,
            last_refresh_ms: None,
            max_age_ms,
        }
    }

    #[inline]
    pub fn mark_stale(&mut self) {
        self.stale = true;
    }

    #[inline]
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// True when marked stale or when the snapshot is older than the bound.
    pub fn should_refresh(&self, now_ms: f64) -> bool {
        match self.last_refresh_ms {
            None => true,
            Some(last) => self.stale || now_ms - last > self.max_age_ms,
        }
    }

    /// Replace the snapshot wholesale with freshly measured rects.
    ///
    /// Zero-area rects and rects entirely above or below the viewport are
    /// dropped.
    pub fn refresh(&mut self, now_ms: f64, viewport: Viewport, source: &dyn ObstacleSource) {
        self.scratch.clear();
        source.measure(&mut self.scratch);
        self.snapshot.clear();
        self.snapshot.extend(
            self.scratch
                .iter()
                .copied()
                .filter(|r| r.area() > 0.0 && r.intersects_rows(viewport.height)),
        );
        self.stale = false;
        self.last_refresh_ms = Some(now_ms);
        log::debug!(
            "[obstacles] refreshed: {} measured, {} kept",
            self.scratch.len(),
            self.snapshot.len()
        );
    }

    pub fn snapshot(&self) -> &[Rect] {
        &self.snapshot
    }
}
