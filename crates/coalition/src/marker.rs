use foundation::math::Vec2;
use serde::{Deserialize, Serialize};

/// Element id of the marker group inside the diagram surface.
pub const MARKER_ID: &str = "coalition-marker";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkerStyle {
    /// Half the party icon size, in percent. Party positions are icon
    /// corners; the marker sits on the icon center.
    pub icon_center_offset: f64,
    pub outer_radius: f64,
    pub outer_fill: String,
    pub outer_stroke: String,
    pub outer_stroke_width: f64,
    pub inner_radius: f64,
    pub inner_fill: String,
}

impl Default for MarkerStyle {
    fn default() -> Self {
        Self {
            icon_center_offset: 5.0,
            outer_radius: 14.0,
            outer_fill: "rgba(255, 255, 255, 0.85)".to_string(),
            outer_stroke: "#111827".to_string(),
            outer_stroke_width: 3.0,
            inner_radius: 6.0,
            inner_fill: "#dc2626".to_string(),
        }
    }
}

/// One `<circle>` of the marker, as SVG attribute values.
#[derive(Debug, Clone, PartialEq)]
pub struct Circle {
    pub class: &'static str,
    pub cx: String,
    pub cy: String,
    pub r: f64,
    pub fill: String,
    pub stroke: Option<(String, f64)>,
}

impl Circle {
    pub fn attributes(&self) -> Vec<(&'static str, String)> {
        let mut attrs = vec![
            ("class", self.class.to_string()),
            ("cx", self.cx.clone()),
            ("cy", self.cy.clone()),
            ("r", self.r.to_string()),
            ("fill", self.fill.clone()),
        ];
        if let Some((color, width)) = &self.stroke {
            attrs.push(("stroke", color.clone()));
            attrs.push(("stroke-width", width.to_string()));
        }
        attrs
    }
}

/// Coalition marker placed on the diagram surface.
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    /// Center in percent of the surface.
    pub center: Vec2,
    pub style: MarkerStyle,
}

impl Marker {
    /// Places the marker for an average icon position.
    pub fn place(average: Vec2, style: &MarkerStyle) -> Self {
        Self {
            center: average + Vec2::splat(style.icon_center_offset),
            style: style.clone(),
        }
    }

    /// Outer ring first, inner dot on top.
    pub fn layers(&self) -> [Circle; 2] {
        let cx = percent(self.center.x);
        let cy = percent(self.center.y);
        [
            Circle {
                class: "coalition-marker-ring",
                cx: cx.clone(),
                cy: cy.clone(),
                r: self.style.outer_radius,
                fill: self.style.outer_fill.clone(),
                stroke: Some((self.style.outer_stroke.clone(), self.style.outer_stroke_width)),
            },
            Circle {
                class: "coalition-marker-dot",
                cx,
                cy,
                r: self.style.inner_radius,
                fill: self.style.inner_fill.clone(),
                stroke: None,
            },
        ]
    }
}

fn percent(v: f64) -> String {
    format!("{v}%")
}

#[cfg(test)]
mod tests {
    use super::{Marker, MarkerStyle};
    use foundation::math::Vec2;
    use pretty_assertions::assert_eq;

    #[test]
    fn marker_sits_on_icon_center() {
        let marker = Marker::place(Vec2::new(45.0, 30.0), &MarkerStyle::default());
        assert_eq!(marker.center, Vec2::new(50.0, 35.0));

        let [ring, dot] = marker.layers();
        assert_eq!(ring.cx, "50%");
        assert_eq!(ring.cy, "35%");
        assert_eq!(dot.cx, "50%");
        assert!(ring.r > dot.r);
    }

    #[test]
    fn ring_carries_stroke_and_dot_does_not() {
        let marker = Marker::place(Vec2::ZERO, &MarkerStyle::default());
        let [ring, dot] = marker.layers();
        let ring_keys: Vec<&str> = ring.attributes().iter().map(|(k, _)| *k).collect();
        let dot_keys: Vec<&str> = dot.attributes().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            ring_keys,
            vec!["class", "cx", "cy", "r", "fill", "stroke", "stroke-width"]
        );
        assert_eq!(dot_keys, vec!["class", "cx", "cy", "r", "fill"]);
    }

    #[test]
    fn style_fields_default_individually() {
        let style: MarkerStyle = serde_json::from_str(r#"{ "inner_fill": "blue" }"#).unwrap();
        assert_eq!(style.inner_fill, "blue");
        assert_eq!(style.icon_center_offset, 5.0);
    }
}
