// SPDX-License-Identifier: MPL-2.0
//! Swipe detection sub-component.
//!
//! Tracks the first finger of a touch gesture and classifies the displacement
//! between press and lift into a [`Direction`]. The detector can be detached
//! while another gesture owner (e.g. the pan controller) needs the touches.

use iced::touch::{self, Finger};
use iced::Point;
use std::fmt;

/// Name of the generic notification raised for every resolved swipe.
pub const SWIPED: &str = "swiped";

/// Dominant direction of a swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Name of the direction-specific notification.
    #[must_use]
    pub fn event_name(self) -> &'static str {
        match self {
            Direction::Up => "swiped-up",
            Direction::Down => "swiped-down",
            Direction::Left => "swiped-left",
            Direction::Right => "swiped-right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// Classifies a displacement. Equal extents on both axes yield `None`.
#[must_use]
pub fn classify(dx: f32, dy: f32) -> Option<Direction> {
    let (ax, ay) = (dx.abs(), dy.abs());
    if ax > ay {
        Some(if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        })
    } else if ax < ay {
        Some(if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        })
    } else {
        None
    }
}

/// A notification raised for a resolved swipe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notification {
    /// Generic notification carrying the direction.
    Swiped(Direction),
    /// Notification for listeners of a single direction.
    Directional(Direction),
}

impl Notification {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Notification::Swiped(_) => SWIPED,
            Notification::Directional(direction) => direction.event_name(),
        }
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        match self {
            Notification::Swiped(direction) | Notification::Directional(direction) => *direction,
        }
    }
}

/// Swipe detector state.
#[derive(Debug, Clone, Default)]
pub struct State {
    attached: bool,
    finger: Option<Finger>,
    start: Option<Point>,
    end: Option<Point>,
}

/// Messages for the swipe detector.
#[derive(Debug, Clone)]
pub enum Message {
    Attach,
    Detach,
    Pressed { finger: Finger, position: Point },
    Lifted { finger: Finger, position: Point },
    /// The gesture was cancelled by the platform.
    Lost { finger: Finger },
}

impl Message {
    /// Maps a raw touch event; finger moves are irrelevant to classification.
    #[must_use]
    pub fn from_touch(event: &touch::Event) -> Option<Self> {
        match *event {
            touch::Event::FingerPressed { id, position } => Some(Message::Pressed {
                finger: id,
                position,
            }),
            touch::Event::FingerLifted { id, position } => Some(Message::Lifted {
                finger: id,
                position,
            }),
            touch::Event::FingerLost { id, .. } => Some(Message::Lost { finger: id }),
            touch::Event::FingerMoved { .. } => None,
        }
    }
}

/// Effects produced by the swipe detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    None,
    Swiped { direction: Direction },
}

impl Effect {
    /// The two notifications raised for a resolved swipe, generic first.
    #[must_use]
    pub fn notifications(&self) -> Vec<Notification> {
        match self {
            Effect::None => Vec::new(),
            Effect::Swiped { direction } => vec![
                Notification::Swiped(*direction),
                Notification::Directional(*direction),
            ],
        }
    }
}

impl State {
    /// A detector that is already listening.
    #[must_use]
    pub fn attached() -> Self {
        Self {
            attached: true,
            ..Self::default()
        }
    }

    #[allow(clippy::needless_pass_by_value)]
    pub fn handle(&mut self, msg: Message) -> Effect {
        match msg {
            Message::Attach => {
                self.attached = true;
                Effect::None
            }
            Message::Detach => {
                self.attached = false;
                self.clear();
                Effect::None
            }
            Message::Pressed { finger, position } => {
                if self.attached && self.finger.is_none() {
                    self.finger = Some(finger);
                    self.start = Some(position);
                    self.end = None;
                }
                Effect::None
            }
            Message::Lifted { finger, position } => {
                if !self.attached || self.finger != Some(finger) {
                    return Effect::None;
                }
                self.end = Some(position);
                let effect = match self.start {
                    Some(start) => classify(position.x - start.x, position.y - start.y)
                        .map_or(Effect::None, |direction| Effect::Swiped { direction }),
                    None => Effect::None,
                };
                self.finger = None;
                effect
            }
            Message::Lost { finger } => {
                if self.finger == Some(finger) {
                    self.clear();
                }
                Effect::None
            }
        }
    }

    fn clear(&mut self) {
        self.finger = None;
        self.start = None;
        self.end = None;
    }

    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Start and end points of the last tracked gesture.
    #[must_use]
    pub fn extent(&self) -> Option<(Point, Point)> {
        Some((self.start?, self.end?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swipe(state: &mut State, from: (f32, f32), to: (f32, f32)) -> Effect {
        state.handle(Message::Pressed {
            finger: Finger(1),
            position: Point::new(from.0, from.1),
        });
        state.handle(Message::Lifted {
            finger: Finger(1),
            position: Point::new(to.0, to.1),
        })
    }

    #[test]
    fn classify_matches_dominant_axis() {
        assert_eq!(classify(100.0, 10.0), Some(Direction::Right));
        assert_eq!(classify(-50.0, 5.0), Some(Direction::Left));
        assert_eq!(classify(5.0, 80.0), Some(Direction::Down));
        assert_eq!(classify(-5.0, -80.0), Some(Direction::Up));
    }

    #[test]
    fn equal_extents_emit_nothing() {
        assert_eq!(classify(50.0, 50.0), None);
        assert_eq!(classify(-30.0, 30.0), None);
        assert_eq!(classify(0.0, 0.0), None);

        let mut state = State::attached();
        assert_eq!(swipe(&mut state, (0.0, 0.0), (50.0, 50.0)), Effect::None);
    }

    #[test]
    fn resolved_swipe_raises_generic_then_specific_notification() {
        let mut state = State::attached();
        let effect = swipe(&mut state, (200.0, 100.0), (100.0, 110.0));

        assert_eq!(
            effect,
            Effect::Swiped {
                direction: Direction::Left
            }
        );
        let names: Vec<_> = effect.notifications().iter().map(Notification::name).collect();
        assert_eq!(names, vec!["swiped", "swiped-left"]);
        assert!(effect
            .notifications()
            .iter()
            .all(|n| n.direction() == Direction::Left));
    }

    #[test]
    fn detached_detector_ignores_touches() {
        let mut state = State::default();
        assert_eq!(swipe(&mut state, (0.0, 0.0), (100.0, 0.0)), Effect::None);

        state.handle(Message::Attach);
        state.handle(Message::Detach);
        assert_eq!(swipe(&mut state, (0.0, 0.0), (100.0, 0.0)), Effect::None);
    }

    #[test]
    fn attach_and_detach_are_idempotent() {
        let mut state = State::default();
        state.handle(Message::Attach);
        state.handle(Message::Attach);
        assert!(state.is_attached());
        assert!(matches!(
            swipe(&mut state, (0.0, 0.0), (0.0, -40.0)),
            Effect::Swiped {
                direction: Direction::Up
            }
        ));

        state.handle(Message::Detach);
        state.handle(Message::Detach);
        assert!(!state.is_attached());
    }

    #[test]
    fn only_first_finger_is_tracked() {
        let mut state = State::attached();
        state.handle(Message::Pressed {
            finger: Finger(1),
            position: Point::new(0.0, 0.0),
        });
        state.handle(Message::Pressed {
            finger: Finger(2),
            position: Point::new(500.0, 500.0),
        });

        let second = state.handle(Message::Lifted {
            finger: Finger(2),
            position: Point::new(0.0, 500.0),
        });
        assert_eq!(second, Effect::None);

        let first = state.handle(Message::Lifted {
            finger: Finger(1),
            position: Point::new(0.0, 60.0),
        });
        assert_eq!(
            first,
            Effect::Swiped {
                direction: Direction::Down
            }
        );
    }

    #[test]
    fn lift_without_press_is_ignored() {
        let mut state = State::attached();
        let effect = state.handle(Message::Lifted {
            finger: Finger(7),
            position: Point::new(90.0, 0.0),
        });
        assert_eq!(effect, Effect::None);
        assert!(state.extent().is_none());
    }

    #[test]
    fn lost_finger_cancels_gesture() {
        let mut state = State::attached();
        state.handle(Message::Pressed {
            finger: Finger(1),
            position: Point::new(0.0, 0.0),
        });
        state.handle(Message::Lost { finger: Finger(1) });

        let effect = state.handle(Message::Lifted {
            finger: Finger(1),
            position: Point::new(100.0, 0.0),
        });
        assert_eq!(effect, Effect::None);
    }

    #[test]
    fn touch_events_map_to_messages() {
        let pressed = touch::Event::FingerPressed {
            id: Finger(3),
            position: Point::new(1.0, 2.0),
        };
        assert!(matches!(
            Message::from_touch(&pressed),
            Some(Message::Pressed { finger: Finger(3), .. })
        ));

        let moved = touch::Event::FingerMoved {
            id: Finger(3),
            position: Point::new(1.0, 2.0),
        };
        assert!(Message::from_touch(&moved).is_none());
    }
}
