//! Seed pages shown when the tool opens.

use crate::geometry::Point;
use crate::model::note::{Connection, Note};

/// Home page with two child pages.
pub fn sample_notes() -> Vec<Note> {
    vec![
        Note::with_id("1", "#ffcc80", Point::new(400.0, 100.0))
            .titled("Home Page")
            .described("Main landing page for the website"),
        Note::with_id("2", "#80deea", Point::new(200.0, 300.0))
            .titled("About Us")
            .described("Information about the company")
            .under("1"),
        Note::with_id("3", "#a5d6a7", Point::new(600.0, 300.0))
            .titled("Services")
            .described("List of services offered")
            .under("1"),
    ]
}

/// Connections mirroring the seed hierarchy.
pub fn sample_connections() -> Vec<Connection> {
    vec![Connection::new("1", "2"), Connection::new("1", "3")]
}
