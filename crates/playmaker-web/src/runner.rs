use glam::{Mat4, Vec3};
use playmaker::{
    ChoreographyConfig, CourtKind, CourtSpace, EntityId, FrameBuffer, FrameClock, InputEvent,
    InputQueue, PathId, PathKind, Play, PlayChoreographer, PlayResult, RenderTarget,
    StrokeRecorder, TickReport,
};

/// View size used until the host reports its real canvas.
const INITIAL_VIEW: (f32, f32) = (1024.0, 768.0);

/// Drives one play from a browser frame loop.
///
/// The page keeps a single `thread_local!` runner and calls it through free
/// `#[wasm_bindgen]` functions. Pointer input is queued and applied at the next tick,
/// frame records are read back through [`frames_ptr`](Self::frames_ptr).
pub struct PlayRunner {
    play: Play,
    choreographer: PlayChoreographer,
    clock: FrameClock,
    input: InputQueue,
    stroke: StrokeRecorder,
    frames: FrameBuffer,
    /// `None` once every id up to `u32::MAX` is taken.
    next_path_id: Option<u32>,
    last_report: TickReport,
    playing: bool,
}

impl PlayRunner {
    pub fn new(config: ChoreographyConfig) -> Self {
        let court = CourtSpace::preset(CourtKind::FullCourt);
        let target = RenderTarget::screen(INITIAL_VIEW.0, INITIAL_VIEW.1);
        let choreographer = PlayChoreographer::new(court, target, config);
        let stroke = StrokeRecorder::new(choreographer.config().min_stroke_spacing);

        Self {
            play: Play::new(),
            choreographer,
            clock: FrameClock::new(),
            input: InputQueue::new(),
            stroke,
            frames: FrameBuffer::with_capacity(32),
            next_path_id: Some(1),
            last_report: TickReport::default(),
            playing: false,
        }
    }

    /// Build a runner from host-supplied config JSON. An empty string means defaults.
    pub fn from_config_json(json: &str) -> PlayResult<Self> {
        if json.trim().is_empty() {
            return Ok(Self::new(ChoreographyConfig::default()));
        }
        Ok(Self::new(ChoreographyConfig::from_json(json)?))
    }

    pub fn play_document(&self) -> &Play {
        &self.play
    }

    pub fn choreographer(&self) -> &PlayChoreographer {
        &self.choreographer
    }

    /// Replace the current play. Any run in progress is stopped first.
    pub fn load_play(&mut self, json: &str) -> PlayResult<usize> {
        let play = Play::from_json(json)?;
        self.stop();
        self.play = play;
        self.next_path_id = self.play.paths().map(|p| p.id().0).max().map_or(Some(1), |max| max.checked_add(1));
        self.frames.clear();
        let placed = self.choreographer.place_static(&self.play, &mut self.frames);
        log::info!("playmaker: loaded play with {} paths, {placed} entities", self.play.paths().count());
        Ok(placed)
    }

    pub fn set_court(&mut self, kind: CourtKind) {
        if self.choreographer.set_court(CourtSpace::preset(kind)) {
            self.choreographer.place_static(&self.play, &mut self.frames);
        }
    }

    pub fn set_screen_target(&mut self, width: f32, height: f32) {
        self.retarget(RenderTarget::screen(width, height));
    }

    /// Switch to an AR anchor given as 16 column-major floats.
    pub fn set_world_target(&mut self, anchor: &[f32], width_meters: f32, height_meters: f32) -> bool {
        let Some(cols) = anchor.get(..16) else {
            log::warn!("playmaker: world anchor needs 16 floats, got {}", anchor.len());
            return false;
        };
        self.retarget(RenderTarget::world(Mat4::from_cols_slice(cols), width_meters, height_meters));
        true
    }

    fn retarget(&mut self, target: RenderTarget) {
        if self.choreographer.set_render_target(target) {
            self.choreographer.place_static(&self.play, &mut self.frames);
        }
    }

    /// Arm the stroke recorder; the next pointer-down starts a new path.
    /// Returns `None` when no path id is left.
    pub fn begin_stroke(&mut self, kind: PathKind) -> Option<PathId> {
        let Some(id) = self.next_path_id else {
            log::warn!("playmaker: path ids exhausted, stroke not armed");
            return None;
        };
        self.next_path_id = id.checked_add(1);
        let id = PathId(id);
        self.stroke.arm(id, kind);
        Some(id)
    }

    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    pub fn assign(&mut self, entity: EntityId, path: PathId) -> bool {
        match self.choreographer.assign_path(&mut self.play, entity, path) {
            Ok(_) => true,
            Err(e) => {
                log::warn!("playmaker: assign failed: {e}");
                false
            }
        }
    }

    /// Drag an entity to a render-space point; its resting position follows.
    pub fn move_entity(&mut self, entity: EntityId, x: f32, y: f32, z: f32) -> bool {
        let point = self.choreographer.mapper().to_normalized(Vec3::new(x, y, z));
        match self.play.move_entity(entity, point) {
            Ok(()) => {
                self.choreographer.place_static(&self.play, &mut self.frames);
                true
            }
            Err(e) => {
                log::warn!("playmaker: move failed: {e}");
                false
            }
        }
    }

    /// Start (or replay) the play from the current clock reading. Entities moved by a
    /// previous run are put back first.
    pub fn play(&mut self) -> usize {
        let started = self.choreographer.start(&self.play, self.clock.now(), &mut self.frames);
        self.playing = true;
        self.last_report = TickReport::default();
        started
    }

    pub fn stop(&mut self) -> usize {
        self.playing = false;
        self.choreographer.stop(&mut self.frames)
    }

    /// Run one frame: apply queued input, then advance the running play.
    pub fn tick(&mut self, dt: f32) {
        let now = self.clock.advance(dt);

        for event in self.input.drain() {
            let Some(path) = self.stroke.handle(&event, self.choreographer.mapper()) else { continue };
            let id = path.id();
            if let Err(e) = self.play.add_path(path) {
                log::warn!("playmaker: stroke {id:?} dropped: {e}");
            }
        }

        if self.playing {
            self.last_report = self.choreographer.tick(now, &mut self.frames);
        }
    }

    /// Nearest path to a render-space point, or -1.
    pub fn select_path(&self, x: f32, y: f32, z: f32) -> i64 {
        self.choreographer
            .select_path(&self.play, Vec3::new(x, y, z), None)
            .best()
            .map_or(-1, |id| i64::from(id.0))
    }

    /// Nearest entity to a render-space point within the configured radius, or -1.
    pub fn select_entity(&self, x: f32, y: f32, z: f32) -> i64 {
        self.choreographer
            .select_entity(&self.play, Vec3::new(x, y, z), None)
            .map_or(-1, |m| i64::from(m.entity.0))
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn all_finished(&self) -> bool {
        self.choreographer.all_finished()
    }

    pub fn last_report(&self) -> TickReport {
        self.last_report
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn frames_ptr(&self) -> *const f32 {
        self.frames.frames_ptr()
    }

    pub fn frame_count(&self) -> u32 {
        self.frames.frame_count()
    }

    pub fn frames(&self) -> &FrameBuffer {
        &self.frames
    }
}

/// Court preset from the host's numeric code.
pub fn court_kind(code: u32) -> Option<CourtKind> {
    match code {
        0 => Some(CourtKind::FullCourt),
        1 => Some(CourtKind::HalfCourt),
        2 => Some(CourtKind::SoccerPitch),
        3 => Some(CourtKind::FootballField),
        _ => None,
    }
}

/// Path kind from the host's numeric code.
pub fn path_kind(code: u32) -> Option<PathKind> {
    match code {
        0 => Some(PathKind::Pen),
        1 => Some(PathKind::Arrow),
        _ => None,
    }
}
