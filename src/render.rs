use std::io::Write;

use geojson::{FeatureCollection, JsonObject, JsonValue};

use crate::{controller::TrafficView, time_filter::TimeFilter};

/// The drawing side of the map. Implementations project station coordinates
/// and draw one circle per marker, matching markers to circles by station id.
pub trait RenderSurface {
    /// Draws a freshly computed view
    fn render(&mut self, view: &TrafficView);

    /// Called on viewport changes with the unchanged last view
    fn update_positions(&mut self, view: &TrafficView) {
        self.render(view);
    }

    /// Shows the selected time, or the any-time label when unset
    fn show_time(&mut self, _filter: &TimeFilter) {}
}

/// Writes every rendered view as one GeoJSON `FeatureCollection` per line
pub struct GeoJsonSurface<W: Write> {
    writer: W,
    frames: usize,
}

impl<W: Write> GeoJsonSurface<W> {
    pub fn new(writer: W) -> Self {
        GeoJsonSurface { writer, frames: 0 }
    }

    pub fn frames(&self) -> usize {
        self.frames
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_view(&mut self, view: &TrafficView) -> std::io::Result<()> {
        let mut foreign_members = JsonObject::new();
        foreign_members.insert(
            "timeFilter".to_string(),
            JsonValue::from(view.filter.slider_value()),
        );
        foreign_members.insert("label".to_string(), JsonValue::from(view.filter.to_string()));
        foreign_members.insert("tripCount".to_string(), JsonValue::from(view.trip_count));
        foreign_members.insert("maxTraffic".to_string(), JsonValue::from(view.domain_max));

        let collection = FeatureCollection {
            bbox: None,
            features: view.features(),
            foreign_members: Some(foreign_members),
        };

        serde_json::to_writer(&mut self.writer, &collection)?;
        writeln!(self.writer)?;
        self.writer.flush()
    }
}

impl<W: Write> RenderSurface for GeoJsonSurface<W> {
    fn render(&mut self, view: &TrafficView) {
        match self.write_view(view) {
            Ok(_) => self.frames += 1,
            Err(e) => log::error!("failed to write station features: {e}"),
        }
    }

    fn show_time(&mut self, filter: &TimeFilter) {
        log::info!("showing station traffic for {filter}");
    }
}
