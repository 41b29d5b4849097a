//! Virtual joystick geometry
//!
//! Turns a pointer position on an on-screen stick into the (angle, strength)
//! pair the simulation steers with. Drawing the stick is the host's job.

use glam::Vec2;

use crate::cartesian_to_polar;
use crate::sim::Directive;

/// A circular stick centered at `center` with knob travel `outer_radius`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Joystick {
    pub center: Vec2,
    pub outer_radius: f32,
}

impl Joystick {
    /// Stick sized to a widget of `width` x `height` (80% of the half-extent)
    pub fn for_widget(width: f32, height: f32) -> Self {
        Self {
            center: Vec2::new(width / 2.0, height / 2.0),
            outer_radius: width.min(height) / 2.0 * 0.8,
        }
    }

    /// Knob position for a pointer, pinned to the outer ring
    pub fn knob(&self, pointer: Vec2) -> Vec2 {
        let offset = pointer - self.center;
        if offset.length() <= self.outer_radius {
            pointer
        } else {
            self.center + offset.normalize_or_zero() * self.outer_radius
        }
    }

    /// Reading for a pointer held at `pointer`
    pub fn directive(&self, pointer: Vec2) -> Directive {
        if self.outer_radius <= 0.0 {
            return Directive::default();
        }
        let (distance, _) = cartesian_to_polar(pointer - self.center);
        let (_, angle) = cartesian_to_polar(self.knob(pointer) - self.center);
        Directive {
            angle,
            strength: (distance / self.outer_radius).min(1.0),
        }
    }

    /// Reading when the pointer lifts
    pub fn release(&self) -> Directive {
        Directive::default()
    }
}
