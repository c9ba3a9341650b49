//! Console collaborators for the headless binary.
//!
//! `ConsoleMap` and `ConsoleView` print what a graphical front end would draw.
//! `FixedPosition` stands in for a position sensor with a configured spot.

use log::warn;
use shared::{Coords, Tier};
use std::io::{self, Stdout, Write};

use crate::backend::domain::models::VisitRecord;
use crate::backend::io::traits::{GeolocationError, GeolocationProvider, MapSurface, RecenterOptions, VisitView};

fn write_line<W: Write>(out: &mut W, line: std::fmt::Arguments) {
    if let Err(e) = writeln!(out, "{}", line) {
        warn!("Failed to write console output: {}", e);
    }
}

/// Position sensor reporting a configured position, or failing without one
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedPosition(pub Option<Coords>);

impl GeolocationProvider for FixedPosition {
    fn current_position(&self) -> Result<Coords, GeolocationError> {
        self.0
            .ok_or_else(|| GeolocationError::Unavailable("no home position configured".to_string()))
    }
}

/// Map that prints marker and camera changes
pub struct ConsoleMap<W: Write = Stdout> {
    out: W,
    markers: usize,
}

impl ConsoleMap<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleMap<W> {
    pub fn new(out: W) -> Self {
        Self { out, markers: 0 }
    }

    pub fn marker_count(&self) -> usize {
        self.markers
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MapSurface for ConsoleMap<W> {
    fn load_map(&mut self, center: Coords, zoom: u8) {
        write_line(&mut self.out, format_args!("Map centred on {} (zoom {})", center, zoom));
    }

    fn place_marker(&mut self, coords: Coords, tier: Tier, label: &str) {
        self.markers += 1;
        write_line(&mut self.out, format_args!("[{}] {} @ {}", tier, label, coords));
    }

    fn recenter(&mut self, coords: Coords, zoom: u8, options: RecenterOptions) {
        write_line(
            &mut self.out,
            format_args!(
                "Moving to {} (zoom {}, animate: {}, {:.1}s)",
                coords, zoom, options.animate, options.duration_secs
            ),
        );
    }

    fn clear_markers(&mut self) {
        self.markers = 0;
        write_line(&mut self.out, format_args!("Markers cleared"));
    }
}

/// Visit list that prints one block per visit
pub struct ConsoleView<W: Write = Stdout> {
    out: W,
    form_visible: bool,
}

impl ConsoleView<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            form_visible: false,
        }
    }

    pub fn is_form_visible(&self) -> bool {
        self.form_visible
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> VisitView for ConsoleView<W> {
    fn render_list_entry(&mut self, visit: &VisitRecord) {
        let entry = visit.to_list_entry();
        write_line(&mut self.out, format_args!("{} [{}]", entry.heading, entry.id));
        for line in [
            &entry.rating_line,
            &entry.bathroom_line,
            &entry.changing_line,
            &entry.feeding_line,
            &entry.summary_line,
        ] {
            write_line(&mut self.out, format_args!("  {}", line));
        }
    }

    fn clear_form(&mut self) {}

    fn show_form(&mut self) {
        self.form_visible = true;
    }

    fn hide_form(&mut self) {
        self.form_visible = false;
    }

    fn show_alert(&mut self, message: &str) {
        write_line(&mut self.out, format_args!("! {}", message));
    }

    fn reload(&mut self) {
        self.form_visible = false;
        write_line(&mut self.out, format_args!("--"));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::domain::models::VisitDraft;
    use chrono::{Local, TimeZone};

    #[test]
    fn test_fixed_position() {
        let home = Coords::new(51.5, -0.1);
        assert_eq!(FixedPosition(Some(home)).current_position(), Ok(home));
        assert!(matches!(
            FixedPosition(None).current_position(),
            Err(GeolocationError::Unavailable(_))
        ));
    }

    #[test]
    fn test_console_view_prints_entry() {
        let visit = VisitRecord::new_at(
            VisitDraft {
                coords: Coords::new(51.5, -0.1),
                title: "Park".to_string(),
                rating: 9,
                bathroom: "yes".to_string(),
                feeding: "no".to_string(),
                changing: "yes".to_string(),
                summary: "nice".to_string(),
            },
            Local.with_ymd_and_hms(2025, 3, 14, 12, 0, 0).unwrap(),
        );
        let mut view = ConsoleView::new(Vec::new());

        view.render_list_entry(&visit);
        view.show_alert("Could not get your position.");

        let output = String::from_utf8(view.into_inner()).unwrap();
        assert!(output.starts_with("Park on March 14 ["));
        assert!(output.contains("  Rating: 9\n"));
        assert!(output.contains("  Summary: nice\n"));
        assert!(output.ends_with("! Could not get your position.\n"));
    }

    #[test]
    fn test_console_view_tracks_form_visibility() {
        let mut view = ConsoleView::new(Vec::new());
        view.show_form();
        assert!(view.is_form_visible());
        view.hide_form();
        assert!(!view.is_form_visible());
    }

    #[test]
    fn test_console_map_counts_markers() {
        let mut map = ConsoleMap::new(Vec::new());
        map.load_map(Coords::new(0.0, 0.0), 15);
        map.place_marker(Coords::new(1.0, 2.0), Tier::Average, "Cafe");

        assert_eq!(map.marker_count(), 1);
        map.clear_markers();
        assert_eq!(map.marker_count(), 0);

        let output = String::from_utf8(map.into_inner()).unwrap();
        assert!(output.contains("[average] Cafe @ 1.00000, 2.00000"));
        assert!(output.ends_with("Markers cleared\n"));
    }
}
