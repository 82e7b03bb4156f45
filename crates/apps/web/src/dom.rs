//! DOM side of the controller. Nothing in here computes; it only reads
//! checkbox state and writes what `coalition` derived.

use coalition::{MARKER_ID, Marker, PartyTable, StatsView};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlInputElement, Window};

use crate::config::ControllerConfig;

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const INDEX_ATTR: &str = "data-party-index";

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn document() -> Result<Document, JsValue> {
    window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))
}

fn element_by_id(id: &str) -> Result<Element, JsValue> {
    document()?
        .get_element_by_id(id)
        .ok_or_else(|| JsValue::from_str(&format!("missing #{id}")))
}

/// Replaces the contents of `container_id` with an inline error message.
pub fn show_error(container_id: &str, message: &str) -> Result<(), JsValue> {
    let container = element_by_id(container_id)?;
    container.set_inner_html("");
    let p = document()?.create_element("p")?;
    p.set_class_name("compass-error");
    p.set_attribute("role", "alert")?;
    p.set_text_content(Some(message));
    container.append_child(&p)?;
    Ok(())
}

/// Inlines the diagram markup so its surface can be queried and drawn on.
pub fn mount_diagram(config: &ControllerConfig, svg: &str) -> Result<(), JsValue> {
    let container = element_by_id(&config.diagram_container_id)?;
    container.set_inner_html(svg);
    if container.query_selector(&config.surface_selector)?.is_none() {
        return Err(JsValue::from_str(&format!(
            "diagram has no element matching {}",
            config.surface_selector
        )));
    }
    Ok(())
}

fn party_label(name: &str, short: &str, seats: Option<u32>) -> String {
    let seats = match seats {
        Some(1) => "1 zetel".to_string(),
        Some(n) => format!("{n} zetels"),
        None => "geen zetels".to_string(),
    };
    if name.is_empty() || name == short {
        format!("{short} ({seats})")
    } else {
        format!("{name} ({short}, {seats})")
    }
}

/// One checkbox per party, in table order. Each change calls
/// [`crate::toggle_party`].
pub fn render_party_list(config: &ControllerConfig, table: &PartyTable) -> Result<(), JsValue> {
    let doc = document()?;
    let list = element_by_id(&config.party_list_id)?;
    list.set_inner_html("");

    for (idx, party) in table.iter() {
        let label = doc.create_element("label")?;
        label.set_class_name("compass-party");

        let input = doc
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()?;
        input.set_type("checkbox");
        input.set_id(&format!("compass-party-{idx}"));
        input.set_value(&party.short_name);
        input.set_attribute(INDEX_ATTR, &idx.to_string())?;

        let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            if let Err(err) = crate::toggle_party(idx) {
                web_sys::console::error_1(&err);
            }
        });
        input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
        on_change.forget();

        let text = doc.create_element("span")?;
        text.set_text_content(Some(&party_label(
            &party.name,
            &party.short_name,
            party.seats(),
        )));

        label.append_child(&input)?;
        label.append_child(&text)?;
        list.append_child(&label)?;
    }
    Ok(())
}

fn party_inputs(config: &ControllerConfig) -> Result<Vec<(usize, HtmlInputElement)>, JsValue> {
    let list = element_by_id(&config.party_list_id)?;
    let nodes = list.query_selector_all(&format!("input[{INDEX_ATTR}]"))?;
    let mut out = Vec::with_capacity(nodes.length() as usize);
    for i in 0..nodes.length() {
        let Some(node) = nodes.item(i) else {
            continue;
        };
        let Ok(input) = node.dyn_into::<HtmlInputElement>() else {
            continue;
        };
        let Some(idx) = input
            .get_attribute(INDEX_ATTR)
            .and_then(|v| v.parse::<usize>().ok())
        else {
            continue;
        };
        out.push((idx, input));
    }
    Ok(out)
}

/// Checked state of every party checkbox, indexed like the table.
pub fn checkbox_states(config: &ControllerConfig, len: usize) -> Result<Vec<bool>, JsValue> {
    let mut flags = vec![false; len];
    for (idx, input) in party_inputs(config)? {
        if let Some(flag) = flags.get_mut(idx) {
            *flag = input.checked();
        }
    }
    Ok(flags)
}

/// Sets every party checkbox from `flags`. Does not fire change events.
pub fn set_checkboxes(config: &ControllerConfig, flags: &[bool]) -> Result<(), JsValue> {
    for (idx, input) in party_inputs(config)? {
        input.set_checked(flags.get(idx).copied().unwrap_or(false));
    }
    Ok(())
}

fn optional_input(id: &str) -> Result<Option<HtmlInputElement>, JsValue> {
    if id.is_empty() {
        return Ok(None);
    }
    let Some(el) = document()?.get_element_by_id(id) else {
        return Ok(None);
    };
    Ok(el.dyn_into::<HtmlInputElement>().ok())
}

/// Wires the weighting checkbox, if the page has one, and returns its
/// initial state.
pub fn bind_weighted_toggle(config: &ControllerConfig) -> Result<Option<bool>, JsValue> {
    let Some(input) = optional_input(&config.weighted_toggle_id)? else {
        return Ok(None);
    };
    let target = input.clone();
    let on_change = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if let Err(err) = crate::set_weighted(target.checked()) {
            web_sys::console::error_1(&err);
        }
    });
    input.add_event_listener_with_callback("change", on_change.as_ref().unchecked_ref())?;
    on_change.forget();
    Ok(Some(input.checked()))
}

/// Wires the clear button, if the page has one.
pub fn bind_clear_button(config: &ControllerConfig) -> Result<(), JsValue> {
    if config.clear_button_id.is_empty() {
        return Ok(());
    }
    let Some(button) = document()?.get_element_by_id(&config.clear_button_id) else {
        return Ok(());
    };
    let on_click = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
        if let Err(err) = crate::clear_selection() {
            web_sys::console::error_1(&err);
        }
    });
    button.add_event_listener_with_callback("click", on_click.as_ref().unchecked_ref())?;
    on_click.forget();
    Ok(())
}

pub fn render_stats(config: &ControllerConfig, view: &StatsView) -> Result<(), JsValue> {
    let doc = document()?;
    let stats = element_by_id(&config.stats_id)?;
    stats.set_inner_html("");
    let dl = doc.create_element("dl")?;
    let rows = [
        ("Partijen", &view.parties),
        ("Zetels", &view.seats),
        ("Positie", &view.position),
        ("Links/rechts", &view.horizontal),
        ("Progressief/conservatief", &view.vertical),
    ];
    for (term, value) in rows {
        let dt = doc.create_element("dt")?;
        dt.set_text_content(Some(term));
        let dd = doc.create_element("dd")?;
        dd.set_text_content(Some(value));
        dl.append_child(&dt)?;
        dl.append_child(&dd)?;
    }
    stats.append_child(&dl)?;
    Ok(())
}

pub fn remove_marker() -> Result<(), JsValue> {
    if let Some(old) = document()?.get_element_by_id(MARKER_ID) {
        old.remove();
    }
    Ok(())
}

/// Draws `marker` on the surface inside the diagram container, replacing
/// any previous one. Without a container or surface this does nothing.
pub fn render_marker(config: &ControllerConfig, marker: &Marker) -> Result<(), JsValue> {
    let doc = document()?;
    let Some(container) = doc.get_element_by_id(&config.diagram_container_id) else {
        return Ok(());
    };
    let Some(surface) = container.query_selector(&config.surface_selector)? else {
        return Ok(());
    };
    remove_marker()?;

    let group = doc.create_element_ns(Some(SVG_NS), "g")?;
    group.set_id(MARKER_ID);
    group.set_attribute("pointer-events", "none")?;
    for circle in marker.layers() {
        let el = doc.create_element_ns(Some(SVG_NS), "circle")?;
        for (name, value) in circle.attributes() {
            el.set_attribute(name, &value)?;
        }
        group.append_child(&el)?;
    }
    surface.append_child(&group)?;
    Ok(())
}

pub fn location_search() -> Result<String, JsValue> {
    window()?.location().search()
}

/// Swaps the query string in place. No navigation, no history entry.
pub fn replace_search(search: &str) -> Result<(), JsValue> {
    let window = window()?;
    let location = window.location();
    if location.search()? == search {
        return Ok(());
    }
    let url = format!("{}{}{}", location.pathname()?, search, location.hash()?);
    window
        .history()?
        .replace_state_with_url(&JsValue::NULL, "", Some(&url))
}

#[cfg(test)]
mod tests {
    use super::party_label;

    #[test]
    fn party_labels() {
        assert_eq!(
            party_label("Democraten 66", "D66", Some(26)),
            "Democraten 66 (D66, 26 zetels)"
        );
        assert_eq!(party_label("", "Volt", Some(1)), "Volt (1 zetel)");
        assert_eq!(party_label("LPF", "LPF", None), "LPF (geen zetels)");
    }
}
