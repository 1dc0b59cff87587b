use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Base,
    Overlay,
}

#[derive(Debug, Clone, Serialize)]
pub struct TileLayer {
    pub name: String,
    pub kind: LayerKind,
    pub url: String, // {z}/{x}/{y} template handed to Leaflet as-is
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subdomains: Vec<String>,
    pub attribution: String,
    pub max_zoom: u8,
    pub opacity: f32,
    pub visible: bool,
}

impl TileLayer {
    fn base(name: &str, url: &str, attribution: &str, max_zoom: u8) -> Self {
        TileLayer {
            name: name.to_string(),
            kind: LayerKind::Base,
            url: url.to_string(),
            subdomains: Vec::new(),
            attribution: attribution.to_string(),
            max_zoom,
            opacity: 1.0,
            visible: false,
        }
    }

    pub fn overlay(name: &str, url: &str, opacity: f32) -> Self {
        TileLayer {
            name: name.to_string(),
            kind: LayerKind::Overlay,
            url: url.to_string(),
            subdomains: Vec::new(),
            attribution: String::new(),
            max_zoom: 18,
            opacity: opacity.clamp(0.0, 1.0),
            visible: true,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LayerSet {
    pub layers: Vec<TileLayer>,
    /// Substring identifying the overlay the opacity slider drives.
    pub opacity_target: String,
}

impl LayerSet {
    /// Satellite (default), topographic and OSM base maps.
    pub fn with_default_basemaps(opacity_target: &str) -> Self {
        let mut satellite = TileLayer::base(
            "Satellite",
            "https://{s}.google.com/vt/lyrs=s&x={x}&y={y}&z={z}",
            "&copy; Google",
            20,
        );
        satellite.subdomains = ["mt0", "mt1", "mt2", "mt3"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        satellite.visible = true;

        let topographic = TileLayer::base(
            "Topographic",
            "https://{s}.tile.opentopomap.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"https://opentopomap.org\">OpenTopoMap</a> (CC-BY-SA)",
            17,
        );
        let osm = TileLayer::base(
            "OpenStreetMap",
            "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png",
            "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors",
            19,
        );

        LayerSet {
            layers: vec![satellite, topographic, osm],
            opacity_target: opacity_target.to_string(),
        }
    }

    pub fn push_overlay(&mut self, layer: TileLayer) {
        self.layers.push(layer);
    }

    pub fn overlays(&self) -> impl Iterator<Item = &TileLayer> {
        self.layers
            .iter()
            .filter(|l| l.kind == LayerKind::Overlay)
    }

    /// Set the opacity of every overlay whose URL contains `needle`.
    /// Returns how many layers were touched.
    pub fn set_opacity_matching(&mut self, needle: &str, opacity: f32) -> usize {
        if needle.is_empty() {
            return 0;
        }
        let opacity = opacity.clamp(0.0, 1.0);
        let mut touched = 0;
        for layer in self
            .layers
            .iter_mut()
            .filter(|l| l.kind == LayerKind::Overlay && l.url.contains(needle))
        {
            layer.opacity = opacity;
            touched += 1;
        }
        touched
    }
}
