pub mod context;
pub mod highlight;
pub mod interaction;
pub mod ir;
pub mod layout;
pub mod measure;
pub mod payload;
pub mod usage;

use wasm_bindgen::prelude::*;

use context::GraphContext;
use interaction::PointerEvent;
use ir::StepGraph;
use layout::{Canvas, LayoutMode, LayoutPlanner};
use payload::GraphPayload;

/// Initialize panic hook for better error messages in WASM
#[wasm_bindgen(start)]
pub fn init() {
    #[cfg(target_arch = "wasm32")]
    console_error_panic_hook::set_once();
}

fn parse_mode(mode: &str) -> Result<LayoutMode, String> {
    LayoutMode::from_str(mode).ok_or_else(|| format!("Unknown layout mode: {mode}"))
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| e.to_string())
}

/// Compute layout hints for a graph payload. Returns a JSON array of nodes.
#[wasm_bindgen(js_name = "computeLayout")]
pub fn compute_layout(
    payload_json: &str,
    mode: &str,
    width: f64,
    height: f64,
) -> Result<String, String> {
    let payload = GraphPayload::from_json(payload_json).map_err(|e| e.to_string())?;
    let mode = parse_mode(mode)?;
    let graph = StepGraph::from_payload(&payload);
    let layout = LayoutPlanner::default()
        .plan(&graph, mode, Canvas::new(width, height))
        .map_err(|e| e.to_string())?;
    to_json(&layout.nodes)
}

/// One loaded graph as seen by the host page.
#[wasm_bindgen]
pub struct GraphSession {
    ctx: GraphContext,
}

#[wasm_bindgen]
impl GraphSession {
    #[wasm_bindgen(constructor)]
    pub fn new(
        payload_json: &str,
        mode: &str,
        width: f64,
        height: f64,
    ) -> Result<GraphSession, String> {
        let payload = GraphPayload::from_json(payload_json).map_err(|e| e.to_string())?;
        let ctx = GraphContext::load(
            &payload,
            parse_mode(mode)?,
            Canvas::new(width, height),
            &LayoutPlanner::default(),
        )
        .map_err(|e| e.to_string())?;
        Ok(Self { ctx })
    }

    #[wasm_bindgen(js_name = "layoutJson")]
    pub fn layout_json(&self) -> Result<String, String> {
        to_json(self.ctx.layout())
    }

    /// Highlight the path of submission `uid`; returns the highlight as JSON.
    pub fn highlight(&mut self, uid: &str) -> Result<String, String> {
        let highlight = self
            .ctx
            .highlight_submission(uid)
            .map_err(|e| e.to_string())?;
        to_json(highlight)
    }

    #[wasm_bindgen(js_name = "clearHighlight")]
    pub fn clear_highlight(&mut self) {
        self.ctx.clear_highlight();
    }

    pub fn select(&mut self, id: u32) -> Result<Option<u32>, String> {
        self.ctx.select(id).map_err(|e| e.to_string())
    }

    #[wasm_bindgen(js_name = "nodeDetail")]
    pub fn node_detail(&self, id: u32) -> Result<String, String> {
        let detail = self.ctx.node_detail(id).map_err(|e| e.to_string())?;
        to_json(&detail)
    }

    /// Feed a pointer event for node `id`; returns the resulting effects as JSON.
    #[wasm_bindgen(js_name = "pointerEvent")]
    pub fn pointer_event(&mut self, id: u32, kind: &str, x: f64, y: f64) -> Result<String, String> {
        let at = js_sys::Date::now();
        let event = PointerEvent::from_parts(kind, x, y, at)
            .ok_or_else(|| format!("Unknown pointer event: {kind}"))?;
        let effects = self.ctx.pointer(id, event).map_err(|e| e.to_string())?;
        to_json(&effects)
    }
}
