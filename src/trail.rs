// Pure trail logic: spawn decisions, scroll gating, and the FIFO removal
// queue. No web-sys here so the module stays host-testable.
use glam::Vec2;
use rand::Rng;
use std::collections::VecDeque;

/// Tunable constants for the effect. Fixed at startup; never mutated.
#[derive(Clone, Copy, Debug)]
pub struct TrailConfig {
    pub image_count: usize,
    pub image_lifespan_ms: f64,
    pub removal_delay_ms: f64,
    pub mouse_threshold_px: f32,
    pub scroll_threshold_ms: f64,
    pub idle_interval_ms: f64,
    pub in_duration_ms: u32,
    pub out_duration_ms: u32,
    pub move_debounce_ms: i32,
    pub rotation_span_deg: f32,
    pub scroll_jitter_px: f32,
}

impl Default for TrailConfig {
    fn default() -> Self {
        Self {
            image_count: 30,
            image_lifespan_ms: 750.0,
            removal_delay_ms: 50.0,
            mouse_threshold_px: 100.0,
            scroll_threshold_ms: 50.0,
            idle_interval_ms: 300.0,
            in_duration_ms: 750,
            out_duration_ms: 1000,
            move_debounce_ms: 100,
            rotation_span_deg: 50.0,
            scroll_jitter_px: 10.0,
        }
    }
}

/// Axis-aligned bounds of the trail container in client coordinates.
#[derive(Clone, Copy, Debug, Default)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    #[inline]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Which branch of the per-frame decision asked for an image.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpawnTrigger {
    Movement,
    Idle,
}

/// Cursor tracking plus the timing state that gates spawning. Single writer:
/// every mutation happens on the UI thread, from whichever callback is live.
pub struct TrailState {
    pub config: TrailConfig,
    pub mouse: Vec2,
    pub last_mouse: Vec2,
    pub is_moving: bool,
    pub in_container: bool,
    last_idle_spawn_ms: f64,
    last_scroll_ms: f64,
    is_scrolling: bool,
    scroll_ticking: bool,
}

impl TrailState {
    pub fn new(config: TrailConfig) -> Self {
        Self {
            config,
            mouse: Vec2::ZERO,
            last_mouse: Vec2::ZERO,
            is_moving: false,
            in_container: false,
            last_idle_spawn_ms: 0.0,
            last_scroll_ms: 0.0,
            is_scrolling: false,
            scroll_ticking: false,
        }
    }

    /// Record a pointer sample and recompute containment against the
    /// container rect as it is right now. Returns whether the cursor is
    /// inside, so the caller can (re)arm the moving debounce.
    pub fn pointer_moved(&mut self, x: f32, y: f32, container: Rect) -> bool {
        self.mouse = Vec2::new(x, y);
        self.in_container = container.contains(x, y);
        self.in_container
    }

    /// Recompute containment from the last known cursor position (scroll
    /// events move the container under a stationary cursor).
    pub fn recheck_container(&mut self, container: Rect) -> bool {
        self.in_container = container.contains(self.mouse.x, self.mouse.y);
        self.in_container
    }

    /// Strictly more than `mouse_threshold_px` since the last sampled point.
    #[inline]
    pub fn has_moved_enough(&self) -> bool {
        self.mouse.distance(self.last_mouse) > self.config.mouse_threshold_px
    }

    /// Per-frame spawn decision. At most one trigger per call; the movement
    /// branch resamples `last_mouse`, the idle branch stamps its interval.
    pub fn decide_spawn(&mut self, now_ms: f64) -> Option<SpawnTrigger> {
        if !self.in_container {
            return None;
        }
        if self.is_moving && self.has_moved_enough() {
            self.last_mouse = self.mouse;
            return Some(SpawnTrigger::Movement);
        }
        if !self.is_moving && now_ms - self.last_idle_spawn_ms >= self.config.idle_interval_ms {
            self.last_idle_spawn_ms = now_ms;
            return Some(SpawnTrigger::Idle);
        }
        None
    }

    /// Small random perturbation of the last sampled point, applied by the
    /// scroll motion listener so dwell under scroll reads as movement.
    pub fn scroll_jitter<R: Rng>(&mut self, rng: &mut R) {
        self.last_mouse.x += (rng.gen::<f32>() - 0.5) * self.config.scroll_jitter_px;
    }

    /// Scroll dispatcher bookkeeping. Returns true when the caller should
    /// request an animation frame for a scroll spawn: the event cleared the
    /// `scroll_threshold_ms` rate limit and no tick is already pending.
    pub fn note_scroll(&mut self, now_ms: f64) -> bool {
        self.is_scrolling = true;
        if now_ms - self.last_scroll_ms < self.config.scroll_threshold_ms {
            return false;
        }
        self.last_scroll_ms = now_ms;
        if self.scroll_ticking {
            return false;
        }
        self.scroll_ticking = true;
        true
    }

    /// Consume the pending scroll tick inside its animation frame. Returns
    /// whether a scroll spawn should happen now.
    pub fn take_scroll_tick(&mut self) -> bool {
        self.scroll_ticking = false;
        std::mem::take(&mut self.is_scrolling)
    }

    /// Kick `last_mouse` away from the cursor by more than the movement
    /// threshold on each axis, with a random sign. Fakes a large movement so
    /// the scroll spawn reads like the others; the caller resyncs afterwards.
    pub fn begin_scroll_jump<R: Rng>(&mut self, rng: &mut R) {
        let jump = self.config.mouse_threshold_px + 10.0;
        self.last_mouse.x += if rng.gen_bool(0.5) { jump } else { -jump };
        self.last_mouse.y += if rng.gen_bool(0.5) { jump } else { -jump };
    }

    pub fn resync_last_mouse(&mut self) {
        self.last_mouse = self.mouse;
    }
}

/// Uniform asset index and a rotation in +-(rotation_span/2) degrees.
#[inline]
pub fn spawn_params<R: Rng>(rng: &mut R, config: &TrailConfig) -> (usize, f32) {
    let index = rng.gen_range(0..config.image_count);
    let rotation = (rng.gen::<f32>() - 0.5) * config.rotation_span_deg;
    (index, rotation)
}

/// Asset pool is sequentially numbered from 1.
#[inline]
pub fn image_src(index: usize) -> String {
    format!("assets/images/img{}.jpg", index + 1)
}

/// One spawned image with its rotation and scheduled expiry. Generic over
/// the element handle; the web side uses `HtmlElement`.
pub struct TrailItem<T> {
    pub element: T,
    pub rotation_deg: f32,
    pub remove_at_ms: f64,
}

/// FIFO of live trail items. Lifespan is constant, so items expire in
/// creation order and only the front needs inspecting.
pub struct TrailQueue<T> {
    items: VecDeque<TrailItem<T>>,
    last_removal_ms: f64,
}

impl<T> TrailQueue<T> {
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
            last_removal_ms: 0.0,
        }
    }

    pub fn push(&mut self, item: TrailItem<T>) {
        self.items.push_back(item);
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Dequeue the oldest item iff it has expired and the removal rate limit
    /// allows it. At most one item per call; expired backlog drains one per
    /// qualifying frame.
    pub fn pop_expired(&mut self, now_ms: f64, removal_delay_ms: f64) -> Option<TrailItem<T>> {
        if now_ms - self.last_removal_ms < removal_delay_ms || self.items.is_empty() {
            return None;
        }
        if now_ms >= self.items.front()?.remove_at_ms {
            self.last_removal_ms = now_ms;
            return self.items.pop_front();
        }
        None
    }
}

impl<T> Default for TrailQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
