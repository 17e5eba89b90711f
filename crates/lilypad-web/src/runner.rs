use lilypad_core::{
    build_course, build_frame, AssetError, BackgroundGrid, FixedTimestep, FrameBuffer,
    FrameProtocol, InputEvent, InputQueue, InputState, LevelLayout, SheetPixels, SimConfig,
    Simulation, SpriteLibrary, SpriteManifest,
};
use log::info;

/// Wires the platformer core to the browser loop.
///
/// JS drives it in stages: construct, feed the manifest, feed each
/// decoded sheet (and optionally a level layout), then `start`. After
/// that every animation frame calls `tick` with the elapsed seconds
/// and reads the draw data back through the pointer accessors.
pub struct GameRunner {
    manifest: Option<SpriteManifest>,
    layout: Option<LevelLayout>,
    images: Vec<SheetPixels>,
    sim: Option<Simulation>,
    background: Option<BackgroundGrid>,
    input: InputQueue,
    state: InputState,
    frame: FrameBuffer,
    timestep: FixedTimestep,
    protocol: FrameProtocol,
}

impl GameRunner {
    pub fn new() -> Self {
        let config = SimConfig::default();
        Self {
            manifest: None,
            layout: None,
            images: Vec::new(),
            sim: None,
            background: None,
            input: InputQueue::new(),
            state: InputState::new(),
            frame: FrameBuffer::with_capacity(config.max_instances),
            timestep: FixedTimestep::from_hz(config.tick_rate),
            protocol: FrameProtocol::from_config(&config),
        }
    }

    /// Parse and stash the manifest. Sheets may arrive before or after.
    pub fn load_manifest(&mut self, json: &str) -> Result<(), AssetError> {
        self.manifest = Some(SpriteManifest::from_json(json)?);
        Ok(())
    }

    /// Parse and stash a course layout. Without one, `start` builds the
    /// shipped course.
    pub fn load_level(&mut self, json: &str) -> Result<(), AssetError> {
        self.layout = Some(LevelLayout::from_json(json)?);
        Ok(())
    }

    /// Hand over one decoded image. A repeated path replaces the
    /// earlier upload.
    pub fn load_sheet(&mut self, path: &str, width: u32, height: u32, rgba: Vec<u8>) {
        self.images.retain(|p| p.path != path);
        self.images.push(SheetPixels {
            path: path.to_string(),
            width,
            height,
            rgba,
        });
    }

    /// Build the library and the course, then bring up the simulation.
    /// The stashed manifest and sheets stay put, so a failed start can
    /// be retried after the missing pieces arrive.
    pub fn start(&mut self) -> Result<(), AssetError> {
        let manifest = self
            .manifest
            .as_ref()
            .ok_or_else(|| AssetError::Parse("no manifest loaded".to_string()))?;

        let library = SpriteLibrary::build(manifest, &self.images)?;
        let config = manifest.config.clone();
        let layout = match &self.layout {
            Some(layout) => layout.clone(),
            None => LevelLayout::default_course(&config),
        };
        let (level, player) = build_course(&layout, &library, &config)?;

        self.background = Some(BackgroundGrid::cover(
            config.viewport(),
            library.background_tile(),
            library.background_sheet(),
        ));
        self.timestep = FixedTimestep::from_hz(config.tick_rate);
        self.protocol = FrameProtocol::from_config(&config);
        self.frame = FrameBuffer::with_capacity(config.max_instances);
        self.sim = Some(Simulation::new(config, level, player));

        info!("runner started");
        Ok(())
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one browser frame: fold queued input, step the simulation
    /// zero or more fixed ticks, and rebuild the draw data.
    pub fn tick(&mut self, dt: f32) {
        let Some(sim) = self.sim.as_mut() else {
            return;
        };

        for event in self.input.drain() {
            self.state.apply(event);
        }
        if !sim.is_running() {
            return;
        }

        let steps = self.timestep.accumulate(dt);
        for _ in 0..steps {
            sim.step(&self.state.take_tick());
            if !sim.is_running() {
                break;
            }
        }

        if let Some(background) = &self.background {
            build_frame(
                sim.level(),
                sim.player(),
                sim.camera(),
                background,
                &mut self.frame,
            );
        }
    }

    // ---- Pointer accessors for SharedArrayBuffer reads ----

    pub fn instances_ptr(&self) -> *const f32 {
        self.frame.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.frame.instance_count()
    }

    pub fn scroll_x(&self) -> f32 {
        self.sim.as_ref().map_or(0.0, |s| s.scroll_x())
    }

    pub fn viewport_width(&self) -> f32 {
        self.sim
            .as_ref()
            .map_or(SimConfig::default().viewport_width, |s| {
                s.config().viewport_width
            })
    }

    pub fn viewport_height(&self) -> f32 {
        self.sim
            .as_ref()
            .map_or(SimConfig::default().viewport_height, |s| {
                s.config().viewport_height
            })
    }

    pub fn is_running(&self) -> bool {
        self.sim.as_ref().is_some_and(|s| s.is_running())
    }

    // ---- Capacity accessors (read by TypeScript via wasm_bindgen exports) ----

    pub fn max_instances(&self) -> u32 {
        self.protocol.max_instances as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.protocol.buffer_total_floats as u32
    }
}

impl Default for GameRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lilypad_core::{InputEvent, Key};

    const MANIFEST: &str = r#"{
        "sheets": [
            { "character": "player", "state": "idle", "path": "idle.png", "frame_width": 32, "frame_height": 32, "directional": true },
            { "character": "player", "state": "run", "path": "run.png", "frame_width": 32, "frame_height": 32, "directional": true },
            { "character": "fire", "state": "off", "path": "off.png", "frame_width": 16, "frame_height": 32 },
            { "character": "fire", "state": "on", "path": "on.png", "frame_width": 16, "frame_height": 32 },
            { "character": "terrain", "state": "block", "path": "terrain.png", "frame_width": 48, "frame_height": 48 }
        ],
        "background": { "path": "bg.png", "tile_width": 64, "tile_height": 64 }
    }"#;

    const LEVEL: &str = r#"{
        "entries": [
            { "kind": "block", "x": 64.0, "y": 300.0 },
            { "kind": "block", "x": 160.0, "y": 300.0 }
        ]
    }"#;

    fn opaque(w: u32, h: u32) -> Vec<u8> {
        let mut rgba = vec![0u8; (w * h * 4) as usize];
        for px in 0..(w * h) as usize {
            rgba[px * 4 + 3] = 255;
        }
        rgba
    }

    fn loaded_runner() -> GameRunner {
        let mut runner = GameRunner::new();
        runner.load_manifest(MANIFEST).unwrap();
        runner.load_level(LEVEL).unwrap();
        runner.load_sheet("idle.png", 32, 32, opaque(32, 32));
        runner.load_sheet("run.png", 64, 32, opaque(64, 32));
        runner.load_sheet("off.png", 16, 32, opaque(16, 32));
        runner.load_sheet("on.png", 48, 32, opaque(48, 32));
        runner.load_sheet("terrain.png", 48, 48, opaque(48, 48));
        runner
    }

    #[test]
    fn start_needs_every_manifest_sheet() {
        let mut runner = GameRunner::new();
        runner.load_manifest(MANIFEST).unwrap();
        assert!(runner.start().is_err());

        // The stash survives the failure; retry succeeds once the
        // sheets arrive.
        runner.load_level(LEVEL).unwrap();
        runner.load_sheet("idle.png", 32, 32, opaque(32, 32));
        runner.load_sheet("run.png", 64, 32, opaque(64, 32));
        runner.load_sheet("off.png", 16, 32, opaque(16, 32));
        runner.load_sheet("on.png", 48, 32, opaque(48, 32));
        runner.load_sheet("terrain.png", 48, 48, opaque(48, 48));
        assert!(runner.start().is_ok());
    }

    #[test]
    fn tick_before_start_is_a_no_op() {
        let mut runner = GameRunner::new();
        runner.tick(1.0);
        assert_eq!(runner.instance_count(), 0);
        assert!(!runner.is_running());
    }

    #[test]
    fn frame_data_appears_after_the_first_tick() {
        let mut runner = loaded_runner();
        runner.start().unwrap();
        assert!(runner.is_running());

        runner.tick(1.0 / 60.0);
        // 208 background tiles, 2 blocks, the player.
        assert_eq!(runner.instance_count(), 211);
        assert_eq!(runner.scroll_x(), 0.0);
        assert_eq!(runner.viewport_width(), 1000.0);
        assert_eq!(runner.max_instances(), 512);
        assert_eq!(runner.buffer_total_floats(), 8 + 512 * 8);
    }

    #[test]
    fn one_browser_frame_can_run_several_ticks() {
        let mut runner = loaded_runner();
        runner.start().unwrap();

        runner.tick(3.5 / 60.0);
        let ticks = {
            let sim = runner.sim.as_ref().unwrap();
            sim.tick()
        };
        assert_eq!(ticks, 3);
    }

    #[test]
    fn held_key_reaches_the_simulation() {
        let mut runner = loaded_runner();
        runner.start().unwrap();

        runner.push_input(InputEvent::KeyDown(Key::Right));
        runner.tick(2.0 / 60.0);
        let player = runner.sim.as_ref().unwrap().player();
        assert_eq!(player.vel.x, 5.0);
    }

    #[test]
    fn quit_stops_the_loop() {
        let mut runner = loaded_runner();
        runner.start().unwrap();

        runner.push_input(InputEvent::Quit);
        runner.tick(1.0 / 60.0);
        assert!(!runner.is_running());

        // Later frames no longer advance the simulation.
        let frozen = runner.sim.as_ref().unwrap().tick();
        runner.tick(1.0 / 60.0);
        assert_eq!(runner.sim.as_ref().unwrap().tick(), frozen);
    }
}
