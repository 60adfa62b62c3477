//! Per-node pointer state machine.
//!
//! Every node cycles through `Idle`, `Hovering` and `Dragging`. Hover reveal
//! is debounced: entering a node arms a deadline that later `Move` or `Tick`
//! events check against their timestamp. Releasing the pointer produces a
//! click only if the press never turned into a drag.
//!
//! Timestamps are milliseconds from any monotonic origin chosen by the caller.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InteractionState {
    Idle,
    Hovering,
    Dragging,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Enter { at: f64 },
    Leave,
    Down { x: f64, y: f64 },
    Move { x: f64, y: f64, at: f64 },
    Up,
    Tick { at: f64 },
}

impl PointerEvent {
    /// Decode an event named by the host page (`"enter"`, `"move"`, ...).
    pub fn from_parts(kind: &str, x: f64, y: f64, at: f64) -> Option<Self> {
        match kind {
            "enter" => Some(Self::Enter { at }),
            "leave" => Some(Self::Leave),
            "down" => Some(Self::Down { x, y }),
            "move" => Some(Self::Move { x, y, at }),
            "up" => Some(Self::Up),
            "tick" => Some(Self::Tick { at }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
pub enum Effect {
    RevealTooltip,
    HideTooltip,
    DragStarted,
    DragMoved { x: f64, y: f64 },
    DragEnded,
    Click,
}

#[derive(Debug, Clone, Copy)]
pub struct InteractionConfig {
    pub hover_delay_ms: f64,
    /// Pointer travel in pixels before a press becomes a drag.
    pub drag_threshold: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hover_delay_ms: 300.0,
            drag_threshold: 3.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NodeInteraction {
    config: InteractionConfig,
    state: InteractionState,
    /// Time the pointer entered while idle.
    armed_at: Option<f64>,
    /// Pointer-down origin.
    press: Option<(f64, f64)>,
}

impl NodeInteraction {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            state: InteractionState::Idle,
            armed_at: None,
            press: None,
        }
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    pub fn handle(&mut self, event: PointerEvent) -> Vec<Effect> {
        match event {
            PointerEvent::Enter { at } => {
                if self.state == InteractionState::Idle && self.press.is_none() {
                    self.armed_at = Some(at);
                }
                Vec::new()
            }
            PointerEvent::Leave => {
                self.armed_at = None;
                if self.state == InteractionState::Hovering {
                    self.state = InteractionState::Idle;
                    vec![Effect::HideTooltip]
                } else {
                    Vec::new()
                }
            }
            PointerEvent::Down { x, y } => {
                self.armed_at = None;
                self.press = Some((x, y));
                Vec::new()
            }
            PointerEvent::Move { x, y, at } => self.on_move(x, y, at),
            PointerEvent::Up => self.on_up(),
            PointerEvent::Tick { at } => self.check_hover(at).into_iter().collect(),
        }
    }

    fn on_move(&mut self, x: f64, y: f64, at: f64) -> Vec<Effect> {
        if self.state == InteractionState::Dragging {
            return vec![Effect::DragMoved { x, y }];
        }

        let Some((ox, oy)) = self.press else {
            return self.check_hover(at).into_iter().collect();
        };
        if (x - ox).hypot(y - oy) <= self.config.drag_threshold {
            return Vec::new();
        }

        let mut effects = Vec::new();
        if self.state == InteractionState::Hovering {
            effects.push(Effect::HideTooltip);
        }
        self.state = InteractionState::Dragging;
        effects.push(Effect::DragStarted);
        effects
    }

    fn on_up(&mut self) -> Vec<Effect> {
        let pressed = self.press.take().is_some();
        if self.state == InteractionState::Dragging {
            self.state = InteractionState::Idle;
            vec![Effect::DragEnded]
        } else if pressed {
            vec![Effect::Click]
        } else {
            Vec::new()
        }
    }

    fn check_hover(&mut self, at: f64) -> Option<Effect> {
        let armed = self.armed_at?;
        if self.state != InteractionState::Idle || at - armed < self.config.hover_delay_ms {
            return None;
        }
        self.armed_at = None;
        self.state = InteractionState::Hovering;
        Some(Effect::RevealTooltip)
    }
}

impl Default for NodeInteraction {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}
