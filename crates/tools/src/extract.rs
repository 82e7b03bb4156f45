//! Scrapes party icons out of the hand-authored compass SVG.
//!
//! Each icon is an element carrying the icon class. Its accessible title
//! reads like `Democraten 66 (D66): 35% links, 60% progressief`; the
//! percentages become the party's political position and the icon's
//! offset inside the compass surface becomes its position.

use std::collections::HashSet;
use std::sync::OnceLock;

use formats::{
    AxisValue, Dimensions, Direction, ElectionResult, Party, PartyDocument, PoliticalPosition,
    Position, normalize_short_name,
};
use regex::Regex;
use roxmltree::{Document, Node};

use crate::seats::seats_for;

pub const DEFAULT_ICON_CLASS: &str = "party-icon";
pub const DEFAULT_SURFACE_CLASS: &str = "compass-surface";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractOptions {
    pub icon_class: String,
    pub surface_class: String,
    pub generated_at: String,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            icon_class: DEFAULT_ICON_CLASS.to_string(),
            surface_class: DEFAULT_SURFACE_CLASS.to_string(),
            generated_at: String::new(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("svg parse error: {0}")]
    Svg(#[from] roxmltree::Error),
    #[error("root element is <{0}>, expected <svg>")]
    NotSvg(String),
    #[error("svg has neither a viewBox nor a width/height")]
    MissingDimensions,
    #[error("no elements with class `{0}`")]
    NoIcons(String),
}

/// An icon that could not be turned into a party.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedIcon {
    pub label: String,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    pub document: PartyDocument,
    pub skipped: Vec<SkippedIcon>,
    /// Short names for which the seat table has no entry.
    pub without_seats: Vec<String>,
}

/// Coordinate frame of an SVG viewport: viewBox origin and extent.
#[derive(Debug, Copy, Clone, PartialEq)]
struct Frame {
    min_x: f64,
    min_y: f64,
    width: f64,
    height: f64,
}

impl Frame {
    fn of(node: Node<'_, '_>) -> Option<Self> {
        if let Some(vb) = node.attribute("viewBox").and_then(parse_viewbox) {
            return Some(vb);
        }
        let width = node.attribute("width").and_then(parse_length)?;
        let height = node.attribute("height").and_then(parse_length)?;
        Some(Self {
            min_x: 0.0,
            min_y: 0.0,
            width,
            height,
        })
    }

    fn x_percent(&self, raw: &str) -> Option<f64> {
        to_percent(raw, self.min_x, self.width)
    }

    fn y_percent(&self, raw: &str) -> Option<f64> {
        to_percent(raw, self.min_y, self.height)
    }
}

fn parse_viewbox(raw: &str) -> Option<Frame> {
    let nums: Vec<f64> = raw
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().ok())
        .collect::<Option<Vec<_>>>()?;
    let [min_x, min_y, width, height] = nums.as_slice() else {
        return None;
    };
    if *width <= 0.0 || *height <= 0.0 {
        return None;
    }
    Some(Frame {
        min_x: *min_x,
        min_y: *min_y,
        width: *width,
        height: *height,
    })
}

/// Absolute length such as `800` or `800px`. Percentages are not lengths.
fn parse_length(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let raw = raw.strip_suffix("px").unwrap_or(raw).trim();
    raw.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

fn to_percent(raw: &str, min: f64, extent: f64) -> Option<f64> {
    let raw = raw.trim();
    if let Some(pct) = raw.strip_suffix('%') {
        return pct.trim().parse::<f64>().ok().filter(|v| v.is_finite());
    }
    let raw = raw.strip_suffix("px").unwrap_or(raw).trim();
    let v = raw.parse::<f64>().ok().filter(|v| v.is_finite())?;
    if extent <= 0.0 {
        return None;
    }
    Some((v - min) * 100.0 / extent)
}

fn has_class(node: Node<'_, '_>, class: &str) -> bool {
    node.attribute("class")
        .unwrap_or_default()
        .split_whitespace()
        .any(|t| t == class)
}

fn translate_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"translate\(\s*([-+0-9.eE]+)(?:[\s,]+([-+0-9.eE]+))?\s*\)")
            .expect("translate regex")
    })
}

fn percent_direction_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)(\d+(?:[.,]\d+)?)\s*%\s*(links|rechts|progressief|conservatief)")
            .expect("percent regex")
    })
}

fn abbreviation_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"\(([^()]+)\)").expect("abbreviation regex")
    })
}

fn icon_position(icon: Node<'_, '_>, frame: &Frame) -> Option<Position> {
    if let (Some(x), Some(y)) = (icon.attribute("x"), icon.attribute("y")) {
        return Some(Position::new(frame.x_percent(x)?, frame.y_percent(y)?));
    }
    if let Some(caps) = icon
        .attribute("transform")
        .and_then(|t| translate_re().captures(t))
    {
        let x = caps.get(1)?.as_str();
        let y = caps.get(2).map(|m| m.as_str()).unwrap_or("0");
        return Some(Position::new(frame.x_percent(x)?, frame.y_percent(y)?));
    }
    let inner = icon
        .descendants()
        .skip(1)
        .find(|n| n.is_element() && n.has_attribute("x") && n.has_attribute("y"))?;
    Some(Position::new(
        frame.x_percent(inner.attribute("x")?)?,
        frame.y_percent(inner.attribute("y")?)?,
    ))
}

fn accessible_text(icon: Node<'_, '_>) -> Option<String> {
    let from_title = icon
        .children()
        .find(|n| n.has_tag_name("title"))
        .map(|title| {
            title
                .descendants()
                .filter_map(|n| if n.is_text() { n.text() } else { None })
                .collect::<String>()
        });
    let text = from_title
        .or_else(|| icon.attribute("aria-label").map(str::to_string))?
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    if text.is_empty() { None } else { Some(text) }
}

fn short_name(icon: Node<'_, '_>, title: Option<&str>) -> Option<String> {
    if let Some(s) = icon.attribute("data-party").map(str::trim).filter(|s| !s.is_empty()) {
        return Some(s.to_string());
    }
    if let Some(caps) = title.and_then(|t| abbreviation_re().captures(t)) {
        let s = caps[1].trim();
        if !s.is_empty() {
            return Some(s.to_string());
        }
    }
    let id = icon.attribute("id")?.trim();
    let stripped = match id.get(..6) {
        Some(prefix) if prefix.eq_ignore_ascii_case("party-") => &id[6..],
        _ => id,
    };
    if stripped.is_empty() { None } else { Some(stripped.to_string()) }
}

fn party_name(title: &str) -> &str {
    let end = [title.find(" ("), title.find(':')]
        .into_iter()
        .flatten()
        .min()
        .unwrap_or(title.len());
    title[..end].trim()
}

fn political_position(title: &str) -> PoliticalPosition {
    let mut out = PoliticalPosition::default();
    for caps in percent_direction_re().captures_iter(title) {
        let Ok(value) = caps[1].replace(',', ".").parse::<f64>() else {
            continue;
        };
        let Some(direction) = Direction::from_label(&caps[2]) else {
            continue;
        };
        let axis = direction.axis();
        // First mention per axis wins.
        if out.get(axis).is_none() {
            out.set(AxisValue::new(value, direction), axis);
        }
    }
    out
}

fn icon_label(icon: Node<'_, '_>) -> String {
    icon.attribute("id")
        .map(str::to_string)
        .unwrap_or_else(|| format!("<{}> at byte {}", icon.tag_name().name(), icon.range().start))
}

/// Parses `svg` and builds the party document.
pub fn extract_document(svg: &str, options: &ExtractOptions) -> Result<Extraction, ExtractError> {
    let doc = Document::parse(svg)?;
    let root = doc.root_element();
    if !root.has_tag_name("svg") {
        return Err(ExtractError::NotSvg(root.tag_name().name().to_string()));
    }
    let root_frame = Frame::of(root).ok_or(ExtractError::MissingDimensions)?;
    let frame = root
        .descendants()
        .find(|n| n.is_element() && has_class(*n, &options.surface_class))
        .and_then(Frame::of)
        .unwrap_or(root_frame);

    let icons: Vec<Node<'_, '_>> = root
        .descendants()
        .filter(|n| n.is_element() && has_class(*n, &options.icon_class))
        .collect();
    if icons.is_empty() {
        return Err(ExtractError::NoIcons(options.icon_class.clone()));
    }

    let mut parties: Vec<Party> = Vec::with_capacity(icons.len());
    let mut skipped: Vec<SkippedIcon> = Vec::new();
    let mut without_seats: Vec<String> = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();

    for icon in icons {
        let title = accessible_text(icon);
        let Some(short) = short_name(icon, title.as_deref()) else {
            skipped.push(SkippedIcon {
                label: icon_label(icon),
                reason: "no short name".to_string(),
            });
            continue;
        };
        if !seen.insert(normalize_short_name(&short)) {
            skipped.push(SkippedIcon {
                label: icon_label(icon),
                reason: format!("duplicate short name {short}"),
            });
            continue;
        }
        let Some(position) = icon_position(icon, &frame) else {
            skipped.push(SkippedIcon {
                label: icon_label(icon),
                reason: format!("no position for {short}"),
            });
            continue;
        };

        let name = title
            .as_deref()
            .map(party_name)
            .filter(|n| !n.is_empty())
            .unwrap_or(short.as_str())
            .to_string();
        let mut party = Party::new(name, short.clone(), position);
        if let Some(title) = &title {
            party.political_position = political_position(title);
        }
        match seats_for(&short) {
            Some(seats) => party.election_results_2025 = Some(ElectionResult::with_seats(seats)),
            None => without_seats.push(short),
        }
        parties.push(party);
    }

    let dimensions = Dimensions {
        width: root_frame.width,
        height: root_frame.height,
    };
    Ok(Extraction {
        document: PartyDocument::new(dimensions, parties, options.generated_at.clone()),
        skipped,
        without_seats,
    })
}
