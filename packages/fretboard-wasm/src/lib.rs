use fretboard::drill::{
    AudioSink, DrillEngine, Effect, ModeRequest, Scheduler, SessionContext, TickHandle,
    TimedConfig, TriadHuntScope,
};
use fretboard::shapes::{ChordQuality, ChordSpec, ShapeResolver, TRIAD_SHAPES};
use fretboard::{
    clamp_fret_count, format_for_display, load_initial_selection, Accidentals, FretError,
    FretPosition, PageConfig, PitchClass, Tuning, STRING_COUNT,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt::Display;
use wasm_bindgen::prelude::*;

#[derive(Serialize)]
struct ErrorMessage {
    message: String,
}

fn js_error(e: impl Display) -> JsValue {
    let body = ErrorMessage { message: e.to_string() };
    JsValue::from_str(&serde_json::to_string(&body).unwrap_or_else(|_| e.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value).map_err(js_error)
}

fn accidentals(flat: bool) -> Accidentals {
    if flat {
        Accidentals::Flat
    } else {
        Accidentals::Sharp
    }
}

fn check_string(string: usize) -> Result<(), JsValue> {
    if string >= STRING_COUNT {
        return Err(js_error(FretError::InvalidPosition(format!("string {}", string))));
    }
    Ok(())
}

/// Note name at a cell, e.g. "F#" or "Gb"
#[wasm_bindgen]
pub fn note_name_at(string: usize, fret: usize, flat: bool) -> Result<String, JsValue> {
    check_string(string)?;
    let pc = Tuning::standard().note_name_at(string, fret);
    Ok(format_for_display(pc, accidentals(flat)).to_string())
}

/// Sounding pitch at a cell in sharp spelling, e.g. "C#3"
#[wasm_bindgen]
pub fn pitch_at(string: usize, fret: usize) -> Result<String, JsValue> {
    check_string(string)?;
    Ok(Tuning::standard().pitch_at(string, fret).to_string())
}

/// Respell a note name for the accidental preference
#[wasm_bindgen]
pub fn format_note(name: &str, flat: bool) -> Result<String, JsValue> {
    let pc: PitchClass = name.parse().map_err(js_error)?;
    Ok(format_for_display(pc, accidentals(flat)).to_string())
}

/// Chord highlight for one cell as JSON, or "null" when the cell is not drawn
#[wasm_bindgen]
pub fn resolve_cell(
    root: &str,
    quality: &str,
    strings: Vec<u32>,
    string: usize,
    fret: usize,
    fret_count: usize,
) -> Result<String, JsValue> {
    check_string(string)?;
    let root: PitchClass = root.parse().map_err(js_error)?;
    let quality: ChordQuality = quality.parse().map_err(js_error)?;
    let chord = ChordSpec::new(root, quality, strings.into_iter().map(|s| s as usize));

    let tuning = Tuning::standard();
    let resolver = ShapeResolver::new(&tuning, clamp_fret_count(fret_count));
    to_json(&resolver.resolve(&chord, FretPosition::new(string, fret)))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TriadShapeView {
    title: String,
    positions: [FretPosition; 3],
    #[serde(flatten)]
    shape: fretboard::shapes::TriadShape,
}

/// The triad catalog as a JSON array
#[wasm_bindgen]
pub fn triad_shapes() -> Result<String, JsValue> {
    let views: Vec<TriadShapeView> = TRIAD_SHAPES
        .iter()
        .map(|shape| TriadShapeView {
            title: shape.title(),
            positions: shape.positions(),
            shape: *shape,
        })
        .collect();
    to_json(&views)
}

fn page_config(slug: &str) -> Result<PageConfig, JsValue> {
    let page = fretboard_pages::get_page(slug)
        .ok_or_else(|| js_error(FretError::Config(format!("unknown page '{}'", slug))))?;
    PageConfig::from_yaml(page.content).map_err(js_error)
}

/// Slugs of the embedded landing pages as a JSON array
#[wasm_bindgen]
pub fn page_slugs() -> Result<String, JsValue> {
    to_json(&fretboard_pages::list_pages())
}

/// A landing page record as JSON
#[wasm_bindgen]
pub fn load_page(slug: &str) -> Result<String, JsValue> {
    to_json(&page_config(slug)?)
}

/// Positions a landing page starts with, as a JSON array of "string-fret"
#[wasm_bindgen]
pub fn initial_selection(slug: &str, fret_count: usize) -> Result<String, JsValue> {
    let config = page_config(slug)?;
    let cells = load_initial_selection(&config, &Tuning::standard(), clamp_fret_count(fret_count));
    to_json(&cells)
}

#[wasm_bindgen]
extern "C" {
    /// Browser-side collaborator: audio playback and timers.
    pub type TrainerHost;

    #[wasm_bindgen(method, js_name = playNote)]
    fn play_note(this: &TrainerHost, pitch: &str, string: u32);

    #[wasm_bindgen(method, js_name = playEffect)]
    fn play_effect(this: &TrainerHost, effect: &str);

    /// Returns an id the host passes back to `Trainer.onTimer`.
    #[wasm_bindgen(method)]
    fn schedule(this: &TrainerHost, delay_ms: f64) -> f64;

    #[wasm_bindgen(method)]
    fn cancel(this: &TrainerHost, handle: f64);
}

struct HostAudio<'a>(&'a TrainerHost);

impl AudioSink for HostAudio<'_> {
    fn play_note(&mut self, pitch: &str, string: usize) {
        self.0.play_note(pitch, string as u32);
    }

    fn play_effect(&mut self, effect: Effect) {
        self.0.play_effect(effect.name());
    }
}

struct HostScheduler<'a>(&'a TrainerHost);

impl Scheduler for HostScheduler<'_> {
    fn schedule(&mut self, delay_ms: u64) -> TickHandle {
        TickHandle(self.0.schedule(delay_ms as f64) as u64)
    }

    fn cancel(&mut self, handle: TickHandle) {
        self.0.cancel(handle.0 as f64);
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TrainerState<'a> {
    #[serde(flatten)]
    phase: fretboard::drill::Phase,
    score: u32,
    remaining_ms: Option<u64>,
    session: Option<&'a fretboard::drill::DrillSession>,
}

/// The drill engine, driven by a JS host object
#[wasm_bindgen]
pub struct Trainer {
    host: TrainerHost,
    engine: DrillEngine,
    tuning: Tuning,
    rng: StdRng,
}

impl Trainer {
    fn with_context<R>(
        &mut self,
        now_ms: f64,
        f: impl FnOnce(&mut DrillEngine, &mut SessionContext<'_>) -> R,
    ) -> R {
        let mut audio = HostAudio(&self.host);
        let mut scheduler = HostScheduler(&self.host);
        let mut ctx = SessionContext {
            tuning: &self.tuning,
            audio: &mut audio,
            scheduler: &mut scheduler,
            rng: &mut self.rng,
            now_ms: now_ms.max(0.0) as u64,
        };
        f(&mut self.engine, &mut ctx)
    }

    fn activate(&mut self, request: ModeRequest, now_ms: f64) -> Result<String, JsValue> {
        self.with_context(now_ms, |engine, ctx| engine.activate(request, ctx));
        self.state(now_ms)
    }
}

#[wasm_bindgen]
impl Trainer {
    #[wasm_bindgen(constructor)]
    pub fn new(host: TrainerHost) -> Trainer {
        Trainer {
            host,
            engine: DrillEngine::new(),
            tuning: Tuning::standard(),
            rng: StdRng::from_entropy(),
        }
    }

    #[wasm_bindgen(js_name = activateExplorer)]
    pub fn activate_explorer(&mut self, now_ms: f64) -> Result<String, JsValue> {
        self.activate(ModeRequest::Explorer, now_ms)
    }

    /// `config` is `{ seconds, stringLimit }`; values are clamped.
    #[wasm_bindgen(js_name = activateTimed)]
    pub fn activate_timed(&mut self, config: JsValue, now_ms: f64) -> Result<String, JsValue> {
        let config: TimedConfig = serde_wasm_bindgen::from_value(config).map_err(js_error)?;
        self.activate(ModeRequest::Timed(config), now_ms)
    }

    /// `positions` are "string-fret" strings.
    #[wasm_bindgen(js_name = activateRecall)]
    pub fn activate_recall(&mut self, positions: Vec<String>, now_ms: f64) -> Result<String, JsValue> {
        let candidates = positions
            .iter()
            .map(|p| p.parse::<FretPosition>())
            .collect::<Result<BTreeSet<_>, _>>()
            .map_err(js_error)?;
        self.activate(ModeRequest::WeightedRecall(candidates), now_ms)
    }

    /// `scope` is `{ scope: "full" }` or `{ scope: "selected", key, group }`.
    #[wasm_bindgen(js_name = activateTriadHunt)]
    pub fn activate_triad_hunt(&mut self, scope: JsValue, now_ms: f64) -> Result<String, JsValue> {
        let scope: TriadHuntScope = serde_wasm_bindgen::from_value(scope).map_err(js_error)?;
        self.activate(ModeRequest::TriadHunt(scope), now_ms)
    }

    /// Leave the current mode; returns the ended session or null.
    pub fn deactivate(&mut self, now_ms: f64) -> Result<String, JsValue> {
        let ended = self.with_context(now_ms, |engine, ctx| engine.deactivate(ctx));
        to_json(&ended)
    }

    /// Clear a finished session; returns it or null.
    pub fn dismiss(&mut self) -> Result<String, JsValue> {
        to_json(&self.engine.dismiss())
    }

    pub fn guess(&mut self, string: usize, fret: usize, now_ms: f64) -> Result<String, JsValue> {
        check_string(string)?;
        let pos = FretPosition::new(string, fret);
        let outcome = self.with_context(now_ms, |engine, ctx| engine.guess(pos, ctx));
        to_json(&outcome)
    }

    #[wasm_bindgen(js_name = onTimer)]
    pub fn on_timer(&mut self, handle: f64, now_ms: f64) -> Result<String, JsValue> {
        let handle = TickHandle(handle as u64);
        let outcome = self.with_context(now_ms, |engine, ctx| engine.on_timer(handle, ctx));
        to_json(&outcome)
    }

    pub fn state(&self, now_ms: f64) -> Result<String, JsValue> {
        let session = self.engine.session();
        to_json(&TrainerState {
            phase: self.engine.phase(),
            score: self.engine.score(),
            remaining_ms: session.and_then(|s| s.remaining_ms(now_ms.max(0.0) as u64)),
            session,
        })
    }
}
