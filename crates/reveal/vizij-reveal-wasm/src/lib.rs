use serde_wasm_bindgen as swb;
use wasm_bindgen::prelude::*;

use vizij_reveal_core::{Config, Engine, Inputs, Outputs, TargetId, TargetSpec, Viewport};

mod dom;
mod logging;

pub use dom::inline_load;
pub use logging::init_logging;

#[wasm_bindgen]
pub struct VizijReveal {
    core: Engine,
    /// Sub-millisecond remainder of host frame deltas not yet applied.
    carry_ms: f64,
}

fn jsvalue_is_undefined_or_null(v: &JsValue) -> bool {
    v.is_undefined() || v.is_null()
}

/// Parse and validate a JS config object; undefined/null yields defaults.
pub(crate) fn config_from_js(config: JsValue) -> Result<Config, JsError> {
    let cfg: Config = if jsvalue_is_undefined_or_null(&config) {
        Config::default()
    } else {
        swb::from_value(config).map_err(|e| JsError::new(&format!("config error: {e}")))?
    };
    cfg.validate().map_err(|e| JsError::new(&format!("config error: {e}")))?;
    Ok(cfg)
}

fn outputs_to_js(out: &Outputs) -> Result<JsValue, JsError> {
    swb::to_value(out).map_err(|e| JsError::new(&format!("outputs error: {e}")))
}

#[wasm_bindgen]
impl VizijReveal {
    /// Create a new engine instance. Pass a JSON config object or undefined/null for defaults.
    /// Example:
    ///   new VizijReveal({ scroll_delay_ms: 150, classes: { shown: "is-shown" } })
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<VizijReveal, JsError> {
        console_error_panic_hook::set_once();

        Ok(VizijReveal {
            core: Engine::new(config_from_js(config)?),
            carry_ms: 0.0,
        })
    }

    /// Record the viewport used by the next invoke; does not notify scroll watchers.
    #[wasm_bindgen(js_name = set_viewport)]
    pub fn set_viewport(&mut self, height: f32, scroll_top: f32) {
        self.core.set_viewport(Viewport::new(height, scroll_top));
    }

    /// Register a target from a JSON object matching TargetSpec
    /// (`{ inline, preview, intro, offset_top }`). Returns a target id (u32).
    #[wasm_bindgen]
    pub fn register(&mut self, target: JsValue) -> Result<u32, JsError> {
        let spec: TargetSpec = if jsvalue_is_undefined_or_null(&target) {
            TargetSpec::default()
        } else {
            swb::from_value(target).map_err(|e| JsError::new(&format!("target error: {e}")))?
        };
        Ok(self.core.register(spec).0)
    }

    /// Register a target from raw element data: its `class` attribute, its
    /// `data-intro` value and its document offset.
    #[wasm_bindgen(js_name = register_element)]
    pub fn register_element(
        &mut self,
        class_attr: &str,
        intro: Option<String>,
        offset_top: f32,
    ) -> u32 {
        let cfg = self.core.config();
        let spec = TargetSpec::from_attributes(class_attr, intro.as_deref(), offset_top, cfg);
        self.core.register(spec).0
    }

    /// Invoke one target. Returns the Outputs JSON produced immediately.
    #[wasm_bindgen]
    pub fn invoke(&mut self, target: u32) -> Result<JsValue, JsError> {
        let out = self
            .core
            .invoke(TargetId(target))
            .map_err(|e| JsError::new(&format!("invoke error: {e}")))?;
        outputs_to_js(out)
    }

    /// Invoke every target not yet invoked, in registration order.
    #[wasm_bindgen(js_name = invoke_all)]
    pub fn invoke_all(&mut self) -> Result<JsValue, JsError> {
        outputs_to_js(self.core.invoke_all())
    }

    /// Advance by dt (milliseconds, fractions carried over) with inputs JSON
    /// (`{ viewport_height?, scroll: [..] }`). Returns Outputs JSON.
    #[wasm_bindgen]
    pub fn update(&mut self, dt_ms: f64, inputs_json: JsValue) -> Result<JsValue, JsError> {
        if !dt_ms.is_finite() || dt_ms < 0.0 {
            return Err(JsError::new(&format!("update: invalid dt_ms {dt_ms}")));
        }
        let inputs: Inputs = if jsvalue_is_undefined_or_null(&inputs_json) {
            Inputs::default()
        } else {
            swb::from_value(inputs_json).map_err(|e| JsError::new(&format!("inputs error: {e}")))?
        };
        let total = self.carry_ms + dt_ms;
        let whole = total.floor();
        self.carry_ms = total - whole;
        let out = self.core.update(whole as u64, inputs);
        outputs_to_js(out)
    }

    /// Snapshot JSON (`{ target, state, phase, animation, trigger, invoked }`).
    #[wasm_bindgen]
    pub fn snapshot(&self, target: u32) -> Result<JsValue, JsError> {
        let snap = self
            .core
            .snapshot(TargetId(target))
            .map_err(|e| JsError::new(&format!("snapshot error: {e}")))?;
        swb::to_value(&snap).map_err(|e| JsError::new(&format!("snapshot error: {e}")))
    }

    /// Engine clock in milliseconds.
    #[wasm_bindgen(js_name = now_ms)]
    pub fn now_ms(&self) -> f64 {
        self.core.now_ms() as f64
    }

    /// Whether the target is still waiting for its first scroll crossing.
    #[wasm_bindgen(js_name = is_watching_scroll)]
    pub fn is_watching_scroll(&self, target: u32) -> bool {
        self.core.is_watching_scroll(TargetId(target))
    }
}

/// Numeric ABI version for compatibility checks at init.
#[wasm_bindgen]
pub fn abi_version() -> u32 {
    1
}
