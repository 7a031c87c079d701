//! Projection and interaction state for the campaign map.
//!
//! The world view is a fixed Mercator framing of the Asia-Pacific region.
//! Zooming in cross-fades to a regional view whose projection is fitted to
//! the regional outline (or to the project markers when no outline is
//! loaded). Rendering is a pure function of [`MapScene`] and [`MapState`].

use std::f64::consts::{FRAC_PI_4, PI};
use std::fmt::Write;

use serde::Deserialize;
use thiserror::Error;

use crate::catalog::PROJECTS;
use crate::models::Project;

/// Latitude beyond which Mercator is clipped.
pub const MAX_LATITUDE: f64 = 85.051_128_78;

pub const FOCUS_COUNTRY: &str = "Sri Lanka";
const FOCUS_FILL: &str = "#C5192D";
const APAC_FILL: &str = "#fbbf24";
const BASE_FILL: &str = "#161618";
const FOCUS_GLOW: &str = "sl-glow";
const APAC_GLOW: &str = "apac-glow";

/// Names as they appear in the world atlas, including common aliases.
pub const APAC_COUNTRIES: &[&str] = &[
    "Afghanistan", "Australia", "Bangladesh", "Bhutan", "Brunei", "Cambodia",
    "China", "Fiji", "India", "Indonesia", "Japan", "Kazakhstan", "Kiribati",
    "Kyrgyzstan", "Laos", "Lao PDR", "Malaysia", "Maldives", "Marshall Islands", "Micronesia",
    "Mongolia", "Myanmar", "Nauru", "Nepal", "New Zealand", "North Korea", "Dem. Rep. Korea",
    "Pakistan", "Palau", "Papua New Guinea", "Philippines", "Samoa", "Singapore", "Solomon Islands",
    "South Korea", "Korea", "Republic of Korea", "Sri Lanka", "Taiwan", "Tajikistan", "Thailand",
    "Timor-Leste", "Tonga", "Turkmenistan", "Tuvalu", "Uzbekistan", "Vanuatu", "Vietnam", "Viet Nam",
];

pub fn is_apac(name: &str) -> bool {
    APAC_COUNTRIES.contains(&name)
}

#[derive(Debug, Error)]
pub enum MapError {
    #[error("geometry has no coordinates to fit")]
    EmptyGeometry,
    #[error("extent must have positive width and height")]
    EmptyExtent,
    #[error("viewport {width}x{height} must have positive width and height")]
    Viewport { width: f64, height: f64 },
    #[error("invalid GeoJSON: {0}")]
    GeoJson(#[from] serde_json::Error),
}

fn radians(degrees: f64) -> f64 {
    degrees * PI / 180.0
}

/// Unscaled spherical Mercator, y pointing north.
fn mercator_raw(lon: f64, lat: f64) -> (f64, f64) {
    let lat = lat.clamp(-MAX_LATITUDE, MAX_LATITUDE);
    (radians(lon), (FRAC_PI_4 + radians(lat) / 2.0).tan().ln())
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mercator {
    pub scale: f64,
    pub translate: (f64, f64),
    /// `(longitude, latitude)` mapped onto `translate`.
    pub center: (f64, f64),
}

impl Default for Mercator {
    fn default() -> Self {
        Self {
            scale: 961.0 / (2.0 * PI),
            translate: (480.0, 250.0),
            center: (0.0, 0.0),
        }
    }
}

impl Mercator {
    /// World framing: centred on the Asia-Pacific, scaled to the viewport width.
    pub fn world(width: f64, height: f64) -> Self {
        Self {
            scale: width / 2.2,
            translate: (width / 2.0, height / 2.0),
            center: (110.0, 15.0),
        }
    }

    pub fn project(&self, lon: f64, lat: f64) -> (f64, f64) {
        let (x, y) = mercator_raw(lon, lat);
        let (cx, cy) = mercator_raw(self.center.0, self.center.1);
        (
            self.translate.0 + self.scale * (x - cx),
            self.translate.1 - self.scale * (y - cy),
        )
    }

    /// Rescales and translates so that `points` fill `extent`, keeping the centre.
    pub fn fit_extent(
        self,
        extent: [(f64, f64); 2],
        points: impl IntoIterator<Item = (f64, f64)>,
    ) -> Result<Self, MapError> {
        let [(x0, y0), (x1, y1)] = extent;
        let (w, h) = (x1 - x0, y1 - y0);
        if w <= 0.0 || h <= 0.0 {
            return Err(MapError::EmptyExtent);
        }

        let reference = Self {
            scale: 150.0,
            translate: (0.0, 0.0),
            ..self
        };
        let bounds = points
            .into_iter()
            .map(|(lon, lat)| reference.project(lon, lat))
            .fold(None, |acc: Option<Bounds>, (x, y)| {
                Some(match acc {
                    None => Bounds::point(x, y),
                    Some(b) => b.include(x, y),
                })
            })
            .ok_or(MapError::EmptyGeometry)?;

        let (bw, bh) = (bounds.max.0 - bounds.min.0, bounds.max.1 - bounds.min.1);
        let k = match (bw > 0.0, bh > 0.0) {
            (true, true) => (w / bw).min(h / bh),
            (true, false) => w / bw,
            (false, true) => h / bh,
            (false, false) => 1.0,
        };

        Ok(Self {
            scale: 150.0 * k,
            translate: (
                x0 + (w - k * (bounds.max.0 + bounds.min.0)) / 2.0,
                y0 + (h - k * (bounds.max.1 + bounds.min.1)) / 2.0,
            ),
            center: self.center,
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min: (f64, f64),
    max: (f64, f64),
}

impl Bounds {
    fn point(x: f64, y: f64) -> Self {
        Self {
            min: (x, y),
            max: (x, y),
        }
    }

    fn include(self, x: f64, y: f64) -> Self {
        Self {
            min: (self.min.0.min(x), self.min.1.min(y)),
            max: (self.max.0.max(x), self.max.1.max(y)),
        }
    }
}

/// Inner 70% of the viewport, where the regional outline is drawn.
pub fn regional_extent(width: f64, height: f64) -> [(f64, f64); 2] {
    [
        (width * 0.15, height * 0.15),
        (width * 0.85, height * 0.85),
    ]
}

// GeoJSON, only as much as the map draws.

#[derive(Debug, Clone, Deserialize)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Option<serde_json::Map<String, serde_json::Value>>,
    pub geometry: Option<Geometry>,
}

type Ring = Vec<Vec<f64>>;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum Geometry {
    Polygon { coordinates: Vec<Ring> },
    MultiPolygon { coordinates: Vec<Vec<Ring>> },
    #[serde(other)]
    Unsupported,
}

impl Feature {
    pub fn name(&self) -> Option<&str> {
        self.properties.as_ref()?.get("name")?.as_str()
    }

    fn rings(&self) -> Vec<&Ring> {
        match &self.geometry {
            Some(Geometry::Polygon { coordinates }) => coordinates.iter().collect(),
            Some(Geometry::MultiPolygon { coordinates }) => {
                coordinates.iter().flatten().collect()
            }
            _ => Vec::new(),
        }
    }
}

impl FeatureCollection {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Every `(lon, lat)` vertex, for fitting a projection.
    pub fn positions(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.features
            .iter()
            .flat_map(|feature| feature.rings())
            .flatten()
            .filter_map(|position| match position.as_slice() {
                [lon, lat, ..] => Some((*lon, *lat)),
                _ => None,
            })
    }
}

/// SVG path data for one feature.
pub fn feature_path(feature: &Feature, projection: &Mercator) -> String {
    let mut d = String::new();
    for ring in feature.rings() {
        let mut first = true;
        for position in ring {
            let [lon, lat, ..] = position.as_slice() else {
                continue;
            };
            let (x, y) = projection.project(*lon, *lat);
            let _ = write!(d, "{}{x:.2},{y:.2}", if first { 'M' } else { 'L' });
            first = false;
        }
        if !first {
            d.push('Z');
        }
    }
    d
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapEvent {
    Hover(String),
    Leave,
    SetZoom(bool),
}

/// What the map is showing. Replaced wholesale on every event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MapState {
    pub zoomed: bool,
    pub hovered: Option<String>,
}

impl MapState {
    pub fn apply(self, event: MapEvent) -> Self {
        match event {
            MapEvent::Hover(name) => Self {
                hovered: Some(name),
                ..self
            },
            MapEvent::Leave => Self {
                hovered: None,
                ..self
            },
            MapEvent::SetZoom(zoomed) => Self { zoomed, ..self },
        }
    }

    pub fn hovering_apac(&self) -> bool {
        self.hovered.as_deref().is_some_and(is_apac)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegionStyle {
    pub fill: &'static str,
    pub glow: Option<&'static str>,
}

pub fn region_style(name: &str, state: &MapState) -> RegionStyle {
    if name == FOCUS_COUNTRY {
        RegionStyle {
            fill: FOCUS_FILL,
            glow: Some(FOCUS_GLOW),
        }
    } else if state.hovering_apac() && is_apac(name) {
        RegionStyle {
            fill: APAC_FILL,
            glow: Some(APAC_GLOW),
        }
    } else {
        RegionStyle {
            fill: BASE_FILL,
            glow: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverTip {
    pub label: String,
    pub apac: bool,
}

impl std::fmt::Display for HoverTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.apac {
            write!(f, "Hovering {} (Asia-Pacific)", self.label)
        } else {
            write!(f, "Hovering {}", self.label)
        }
    }
}

pub fn hover_tip(state: &MapState) -> Option<HoverTip> {
    state.hovered.as_ref().map(|name| HoverTip {
        label: name.clone(),
        apac: is_apac(name),
    })
}

/// Visual state of one map layer during the cross-fade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LayerStyle {
    pub opacity: f64,
    pub scale: f64,
    pub blur: f64,
}

impl LayerStyle {
    pub fn world(zoomed: bool) -> Self {
        if zoomed {
            Self {
                opacity: 0.0,
                scale: 2.5,
                blur: 40.0,
            }
        } else {
            Self {
                opacity: 1.0,
                scale: 1.0,
                blur: 0.0,
            }
        }
    }

    pub fn regional(zoomed: bool) -> Self {
        if zoomed {
            Self {
                opacity: 1.0,
                scale: 1.0,
                blur: 0.0,
            }
        } else {
            Self {
                opacity: 0.0,
                scale: 0.5,
                blur: 0.0,
            }
        }
    }

    /// Linear blend, `t` clamped to `[0, 1]`.
    pub fn interpolate(from: Self, to: Self, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let lerp = |a: f64, b: f64| a + (b - a) * t;
        Self {
            opacity: lerp(from.opacity, to.opacity),
            scale: lerp(from.scale, to.scale),
            blur: lerp(from.blur, to.blur),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub slug: &'static str,
    pub x: f64,
    pub y: f64,
    /// Period of the bobbing animation.
    pub float_seconds: f64,
}

pub fn project_markers(projects: &[Project], projection: &Mercator) -> Vec<Marker> {
    projects
        .iter()
        .enumerate()
        .map(|(i, project)| {
            let (x, y) = projection.project(project.longitude(), project.latitude());
            Marker {
                slug: project.slug,
                x,
                y,
                float_seconds: 3.0 + i as f64 * 0.7,
            }
        })
        .collect()
}

/// Geometry a map render draws from.
#[derive(Debug, Clone)]
pub struct MapScene {
    pub width: f64,
    pub height: f64,
    pub world: Option<FeatureCollection>,
    pub region: Option<FeatureCollection>,
}

impl MapScene {
    pub fn regional_projection(&self) -> Result<Mercator, MapError> {
        let extent = regional_extent(self.width, self.height);
        match &self.region {
            Some(region) => Mercator::default().fit_extent(extent, region.positions()),
            None => Mercator::default().fit_extent(
                extent,
                PROJECTS.iter().map(|p| (p.longitude(), p.latitude())),
            ),
        }
    }
}

fn escape_xml(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}

fn layer_attrs(style: LayerStyle) -> String {
    format!(
        "opacity=\"{:.2}\" data-scale=\"{:.2}\" data-blur=\"{:.0}\"",
        style.opacity, style.scale, style.blur
    )
}

pub fn render_svg(scene: &MapScene, state: &MapState) -> Result<String, MapError> {
    let (width, height) = (scene.width, scene.height);
    if !(width > 0.0 && height > 0.0) {
        return Err(MapError::Viewport { width, height });
    }
    let mut output = String::new();

    let _ = writeln!(
        output,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" viewBox=\"0 0 {width} {height}\" width=\"100%\" height=\"100%\">"
    );
    let _ = writeln!(output, "<defs>");
    for (id, deviation) in [(FOCUS_GLOW, 4), (APAC_GLOW, 6)] {
        let _ = writeln!(
            output,
            "<filter id=\"{id}\" x=\"-50%\" y=\"-50%\" width=\"200%\" height=\"200%\"><feGaussianBlur stdDeviation=\"{deviation}\" result=\"coloredBlur\"/><feMerge><feMergeNode in=\"coloredBlur\"/><feMergeNode in=\"SourceGraphic\"/></feMerge></filter>"
        );
    }
    let _ = writeln!(output, "</defs>");

    let world_projection = Mercator::world(width, height);
    let _ = writeln!(
        output,
        "<g class=\"world\" {}>",
        layer_attrs(LayerStyle::world(state.zoomed))
    );
    if let Some(world) = &scene.world {
        for feature in &world.features {
            let name = feature.name().unwrap_or_default();
            let style = region_style(name, state);
            let filter = style
                .glow
                .map(|id| format!(" filter=\"url(#{id})\""))
                .unwrap_or_default();
            let _ = writeln!(
                output,
                "<path class=\"country-path\" data-name=\"{}\" d=\"{}\" fill=\"{}\" stroke=\"#222\" stroke-width=\"0.5\"{filter}/>",
                escape_xml(name),
                feature_path(feature, &world_projection),
                style.fill,
            );
        }
    }
    let _ = writeln!(output, "</g>");

    let _ = writeln!(
        output,
        "<g class=\"regional\" {}>",
        layer_attrs(LayerStyle::regional(state.zoomed))
    );
    if state.zoomed {
        let projection = scene.regional_projection()?;
        if let Some(region) = &scene.region {
            for feature in &region.features {
                let _ = writeln!(
                    output,
                    "<path class=\"province\" d=\"{}\" fill=\"{FOCUS_FILL}\" fill-opacity=\"0.35\" stroke=\"#fff\" stroke-width=\"0.5\"/>",
                    feature_path(feature, &projection),
                );
            }
        }
        for marker in project_markers(PROJECTS, &projection) {
            let _ = writeln!(
                output,
                "<g class=\"pin-group\" data-slug=\"{}\" transform=\"translate({:.2}, {:.2})\" style=\"animation: float {:.1}s ease-in-out infinite\"><circle r=\"22\" fill=\"#1a1a1a\" stroke=\"#fff\" stroke-width=\"2\"/><circle r=\"20\" fill=\"{FOCUS_FILL}\"/></g>",
                marker.slug, marker.x, marker.y, marker.float_seconds
            );
        }
    }
    let _ = writeln!(output, "</g>");
    let _ = writeln!(output, "</svg>");

    tracing::debug!(zoomed = state.zoomed, bytes = output.len(), "rendered map");
    Ok(output)
}
