use coalition::{
    CoalitionState, Event, Marker, PartyTable, StatsView, Weighting, reduce, sync_query,
};
use formats::PartyDocument;
use gloo_net::http::Request;
use std::cell::RefCell;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod config;
mod dom;

pub use config::{CONFIG_GLOBAL, ControllerConfig};

// Guard to prevent double-initialization of global state (relevant during hot reload).
static INITIALIZED: AtomicBool = AtomicBool::new(false);
static PANIC_HOOK_SET: OnceLock<()> = OnceLock::new();

#[derive(Debug, Default)]
struct ControllerState {
    config: ControllerConfig,
    table: PartyTable,
    coalition: CoalitionState,
    diagram_ready: bool,
    data_ready: bool,
}

thread_local! {
    static STATE: RefCell<ControllerState> = RefCell::new(ControllerState::default());
}

fn with_state<F, R>(f: F) -> R
where
    F: FnOnce(&RefCell<ControllerState>) -> R,
    R: Default,
{
    STATE.try_with(f).unwrap_or_default()
}

fn init_panic_hook() {
    PANIC_HOOK_SET.get_or_init(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = info.to_string();
            web_sys::console::error_1(&JsValue::from_str(&msg));
        }));
    });
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

/// What the DOM needs after one state transition. Built while the state is
/// borrowed, written out after the borrow is released.
struct Render {
    config: ControllerConfig,
    view: StatsView,
    marker: Option<Marker>,
    flags: Vec<bool>,
    search: String,
    diagram_ready: bool,
}

fn apply(event: Event, search: &str) -> Option<Render> {
    with_state(|state| {
        let mut state = state.borrow_mut();
        if !state.data_ready {
            return None;
        }
        let (next, stats) = reduce(&state.table, &state.coalition, event);
        state.coalition = next;
        let marker = stats
            .average_position
            .map(|avg| Marker::place(avg, &state.config.marker));
        Some(Render {
            config: state.config.clone(),
            view: StatsView::from_stats(&stats),
            marker,
            flags: state.coalition.selection.to_flags(state.table.len()),
            search: sync_query(search, &state.table, &state.coalition.selection),
            diagram_ready: state.diagram_ready,
        })
    })
}

type Step<'a, E> = (&'static str, Box<dyn FnOnce() -> Result<(), E> + 'a>);

fn step<'a, E>(name: &'static str, f: impl FnOnce() -> Result<(), E> + 'a) -> Step<'a, E> {
    (name, Box::new(f))
}

/// Runs every step in order, including those after a failure, and returns
/// the failures.
fn run_steps<E>(steps: Vec<Step<'_, E>>) -> Vec<(&'static str, E)> {
    steps
        .into_iter()
        .filter_map(|(name, step)| step().err().map(|err| (name, err)))
        .collect()
}

fn log_error(step: &str, err: &JsValue) {
    web_sys::console::error_1(&JsValue::from_str(&format!("{step} failed: {err:?}")));
}

/// Writes one transition to the page. The URL goes first so it always
/// mirrors the stored selection; a broken panel never blocks the rest.
fn render(render: &Render, sync_checkboxes: bool) {
    let steps = vec![
        step("query sync", || dom::replace_search(&render.search)),
        step("marker", || {
            if !render.diagram_ready {
                return Ok(());
            }
            match &render.marker {
                Some(marker) => dom::render_marker(&render.config, marker),
                None => dom::remove_marker(),
            }
        }),
        step("checkboxes", || {
            if sync_checkboxes {
                dom::set_checkboxes(&render.config, &render.flags)
            } else {
                Ok(())
            }
        }),
        step("stats", || dom::render_stats(&render.config, &render.view)),
    ];
    for (name, err) in run_steps(steps) {
        log_error(name, &err);
    }
}

fn dispatch(event: Event, sync_checkboxes: bool) -> Result<(), JsValue> {
    let search = dom::location_search()?;
    if let Some(r) = apply(event, &search) {
        render(&r, sync_checkboxes);
    }
    Ok(())
}

/// Inline error that must not stop the caller when its container is gone.
fn show_inline_error(container_id: &str, message: &str) {
    if let Err(err) = dom::show_error(container_id, message) {
        log_error("inline error", &err);
    }
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    // Avoid double-initialization (can happen during hot-reload edge cases).
    if INITIALIZED.swap(true, Ordering::SeqCst) {
        return Ok(());
    }
    init_panic_hook();
    Ok(())
}

/// Loads the diagram and party data, builds the checkbox list and restores
/// the selection from the URL.
#[wasm_bindgen]
pub fn mount() {
    spawn_local(async move {
        if let Err(err) = mount_inner().await {
            web_sys::console::error_1(&JsValue::from_str(&format!("mount error: {:?}", err)));
        }
    });
}

async fn mount_inner() -> Result<(), JsValue> {
    let config = ControllerConfig::from_window();
    with_state(|state| {
        let mut state = state.borrow_mut();
        state.config = config.clone();
        state.coalition.weighting = config.weighting;
    });

    // The diagram is optional for the read-out; a failure only loses the marker.
    let diagram_ready = match fetch_text(&config.diagram_url).await {
        Ok(svg) => match dom::mount_diagram(&config, &svg) {
            Ok(()) => true,
            Err(err) => {
                show_inline_error(
                    &config.diagram_container_id,
                    "Het kompas kon niet worden weergegeven.",
                );
                log_error("diagram mount", &err);
                false
            }
        },
        Err(err) => {
            show_inline_error(
                &config.diagram_container_id,
                "Het kompas kon niet worden geladen.",
            );
            log_error("diagram load", &err);
            false
        }
    };

    let document = match fetch_document(&config.data_url).await {
        Ok(doc) => doc,
        Err(err) => {
            show_inline_error(
                &config.party_list_id,
                "De partijgegevens konden niet worden geladen.",
            );
            return Err(err);
        }
    };
    let table = PartyTable::from_document(document);
    log(&format!(
        "loaded {} parties ({} seats) from {}",
        table.len(),
        table.house_seats(),
        config.data_url
    ));

    dom::render_party_list(&config, &table)?;
    with_state(|state| {
        let mut state = state.borrow_mut();
        state.table = table;
        state.diagram_ready = diagram_ready;
        state.data_ready = true;
    });

    if let Some(weighted) = dom::bind_weighted_toggle(&config)? {
        with_state(|state| {
            state.borrow_mut().coalition.weighting = Weighting::from_weighted(weighted);
        });
    }
    dom::bind_clear_button(&config)?;

    let search = dom::location_search()?;
    dispatch(Event::Restore { search }, true)
}

/// Change handler for the checkbox at `index`. The whole selection is
/// re-read from the checkboxes.
#[wasm_bindgen]
pub fn toggle_party(index: u32) -> Result<(), JsValue> {
    let (config, len) = with_state(|state| {
        let state = state.borrow();
        (Some(state.config.clone()), state.table.len())
    });
    let Some(config) = config else {
        return Ok(());
    };
    if index as usize >= len {
        return Err(JsValue::from_str(&format!(
            "party index {index} out of range (have {len})"
        )));
    }
    let flags = dom::checkbox_states(&config, len)?;
    dispatch(Event::CheckboxesChanged(flags), false)
}

#[wasm_bindgen]
pub fn set_weighted(weighted: bool) -> Result<(), JsValue> {
    dispatch(Event::SetWeighting(Weighting::from_weighted(weighted)), false)
}

#[wasm_bindgen]
pub fn clear_selection() -> Result<(), JsValue> {
    dispatch(Event::Clear, true)
}

/// Comma separated short names of the current selection, in table order.
#[wasm_bindgen]
pub fn selected_parties() -> String {
    with_state(|state| {
        let state = state.borrow();
        coalition::selected_short_names(&state.table, &state.coalition.selection).join(",")
    })
}

async fn fetch_text(url: &str) -> Result<String, JsValue> {
    let resp = Request::get(url)
        .send()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;

    if !resp.ok() {
        let status = resp.status();
        let body = resp.text().await.unwrap_or_else(|_| "".to_string());
        let body = body.trim();
        let msg = if body.is_empty() {
            format!("{url}: HTTP {status}")
        } else {
            format!("{url}: HTTP {status}: {body}")
        };
        return Err(JsValue::from_str(&msg));
    }

    resp.text()
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

async fn fetch_document(url: &str) -> Result<PartyDocument, JsValue> {
    let text = fetch_text(url).await?;
    PartyDocument::from_json_str(&text).map_err(|e| JsValue::from_str(&e.to_string()))
}
