use nalgebra::{Matrix4, Point2};

use crate::math::projection::project_to_viewport;
use crate::model::{Body, BodyID, InteractionState, Orrery, Selection};

// Labels float this many pixels above their body's centre
const LABEL_LIFT: f32 = 18.0;

// Info panel size and margin from the bottom-left corner, in pixels
const PANEL_WIDTH: f32 = 360.0;
const PANEL_HEIGHT: f32 = 140.0;
const PANEL_MARGIN: f32 = 20.0;

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
    pub id: BodyID,
    pub anchor: Point2<f32>,
    pub text: String,
    pub visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Point2<f32>,
    pub max: Point2<f32>,
}

impl Rect {
    pub fn contains(&self, p: &Point2<f32>) -> bool {
        self.min.x <= p.x && p.x <= self.max.x && self.min.y <= p.y && p.y <= self.max.y
    }
}

/// Label for every body, placed over wherever the body currently shows up on
/// screen. Only hovered and focused bodies get a visible label, and only the
/// hovered one gets the long version.
pub fn layout_labels(
    orrery: &Orrery,
    interaction: &InteractionState,
    transformation: &Matrix4<f32>,
    width: f32,
    height: f32,
) -> Vec<Label> {
    orrery
        .positions()
        .map(|(body, position)| {
            let projected = project_to_viewport(&position, transformation, width, height);
            let selected = interaction.selection(body.id) != Selection::Idle;
            let expanded = interaction.hovered() == Some(body.id);

            Label {
                id: body.id,
                anchor: projected
                    .map(|p| Point2::new(p.x, p.y - LABEL_LIFT))
                    .unwrap_or_else(Point2::origin),
                text: label_text(body, expanded),
                visible: selected && projected.is_some(),
            }
        })
        .collect()
}

pub fn label_text(body: &Body, expanded: bool) -> String {
    let info = &body.info;
    if !expanded {
        return info.name.clone();
    }

    format!(
        "{}
Size: {}
Distance: {}",
        info.name, info.details.size, info.details.distance,
    )
}

pub fn panel_text(body: &Body) -> String {
    let info = &body.info;
    format!(
        "{}
Size: {}
Distance from Sun: {}
Description: {}",
        info.name, info.details.size, info.details.distance, info.details.description,
    )
}

/// Where the info panel sits on screen.
pub fn panel_rect(height: f32) -> Rect {
    Rect {
        min: Point2::new(PANEL_MARGIN, height - PANEL_MARGIN - PANEL_HEIGHT),
        max: Point2::new(PANEL_MARGIN + PANEL_WIDTH, height - PANEL_MARGIN),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{Isometry3, Perspective3, Point3, Vector3};

    use super::*;
    use crate::config::ViewerConfig;
    use crate::model::{CameraPose, Registry};

    fn setup() -> (Orrery, Vec<BodyID>, Matrix4<f32>) {
        let config = ViewerConfig {
            random_initial_angles: false,
            ..ViewerConfig::default()
        };
        let orrery = Orrery::new(Registry::default_planets(), &config);
        let ids = orrery.registry().ids().collect();

        // Looking down on the plane of the orbits
        let projection = Perspective3::new(1.0, 75f32.to_radians(), 0.1, 1000.0);
        let eye = Point3::new(0.0, 200.0, 1.0);
        let view = Isometry3::look_at_rh(&eye, &Point3::origin(), &Vector3::y());
        (orrery, ids, projection.into_inner() * view.to_homogeneous())
    }

    #[test]
    fn test_only_selected_labels_show() {
        let (orrery, ids, transformation) = setup();
        let mut interaction = InteractionState::new();

        let labels = layout_labels(&orrery, &interaction, &transformation, 600.0, 600.0);
        assert_eq!(labels.len(), 8);
        assert!(labels.iter().all(|l| !l.visible));

        interaction.on_pointer_move(Some(ids[3]));
        let labels = layout_labels(&orrery, &interaction, &transformation, 600.0, 600.0);
        let visible: Vec<_> = labels.iter().filter(|l| l.visible).map(|l| l.id).collect();
        assert_eq!(visible, vec![ids[3]]);
    }

    #[test]
    fn test_label_follows_body() {
        let (orrery, ids, transformation) = setup();
        let mut interaction = InteractionState::new();
        interaction.on_pointer_move(Some(ids[0]));

        let labels = layout_labels(&orrery, &interaction, &transformation, 600.0, 600.0);
        let mercury = &labels[0];
        let pixel = project_to_viewport(
            &orrery.position(ids[0]).unwrap(),
            &transformation,
            600.0,
            600.0,
        )
        .unwrap();
        // Mercury starts on +x, which is to the right of centre from up here
        assert!(pixel.x > 300.0);
        assert_relative_eq!(mercury.anchor, Point2::new(pixel.x, pixel.y - LABEL_LIFT));
    }

    #[test]
    fn test_hover_expands_label() {
        let (orrery, ids, transformation) = setup();
        let config = ViewerConfig::default();
        let pose = CameraPose {
            eye: Point3::new(0.0, 200.0, 1.0),
            look_at: Point3::origin(),
        };
        let mut interaction = InteractionState::new();

        // Focus Mercury while hovering it: long label
        interaction.on_pointer_move(Some(ids[0]));
        interaction.on_click(Some(ids[0]), &orrery, &pose, &config);
        let labels = layout_labels(&orrery, &interaction, &transformation, 600.0, 600.0);
        assert_eq!(labels[0].text, "Mercury\nSize: 4,879 km\nDistance: 57.9M km");

        // Click Earth instead; Mercury's label goes back to its name and hides
        interaction.on_pointer_move(Some(ids[2]));
        interaction.on_click(Some(ids[2]), &orrery, &pose, &config);
        let labels = layout_labels(&orrery, &interaction, &transformation, 600.0, 600.0);
        assert_eq!(labels[0].text, "Mercury");
        assert!(!labels[0].visible);
        assert!(labels[2].visible);

        // Pointer wanders off; Earth is still focused, with a short label
        interaction.on_pointer_move(None);
        let labels = layout_labels(&orrery, &interaction, &transformation, 600.0, 600.0);
        assert_eq!(labels[2].text, "Earth");
        assert!(labels[2].visible);
    }

    #[test]
    fn test_panel_text() {
        let (orrery, ids, _) = setup();
        let saturn = orrery.get_body(ids[5]).unwrap();
        assert_eq!(
            panel_text(saturn),
            "Saturn\nSize: 116,460 km\nDistance from Sun: 1.43B km\nDescription: Famous for its rings."
        );
    }

    #[test]
    fn test_panel_rect() {
        let rect = panel_rect(600.0);
        assert!(rect.contains(&Point2::new(30.0, 500.0)));
        assert!(!rect.contains(&Point2::new(30.0, 100.0)));
        assert!(!rect.contains(&Point2::new(700.0, 500.0)));
    }
}
