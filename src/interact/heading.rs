use std::time::Duration;

use crate::interact::{Effect, Event};

/// Pause between fading the old heading out and the new one in.
pub const SWAP_DELAY: Duration = Duration::from_millis(200);

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingEvent {
    /// The section's centre band started intersecting the viewport centre.
    Entered(String),
    /// The section's centre band stopped intersecting.
    Left(String),
    /// A scheduled swap is due. Carries the generation it was scheduled under.
    SwapDue(u64),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingEffect {
    SetText(String),
    /// Fade in and make visible.
    Show,
    /// Fade out and hide.
    Hide,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HeadingState {
    Hidden,
    Showing(String),
    /// Faded out, waiting for [`HeadingEvent::SwapDue`] to show `to`.
    Swapping { to: String },
}

/// The fixed CV heading that follows the section under the viewport centre.
///
/// Single writer: only [`StickyHeading::handle`] touches the displayed text.
/// Each swap bumps a generation counter, so a swap that was overtaken by a
/// newer one (or cancelled by its section leaving) is ignored when it fires.
#[derive(Debug)]
pub struct StickyHeading {
    state: HeadingState,
    /// Text currently in the element, kept while hidden.
    text: Option<String>,
    generation: u64,
}

impl StickyHeading {
    pub fn new() -> Self {
        Self {
            state: HeadingState::Hidden,
            text: None,
            generation: 0,
        }
    }

    pub fn state(&self) -> &HeadingState {
        &self.state
    }

    pub fn handle(&mut self, event: HeadingEvent) -> Vec<Effect> {
        match event {
            HeadingEvent::Entered(heading) => self.entered(heading),
            HeadingEvent::Left(heading) => self.left(&heading),
            HeadingEvent::SwapDue(generation) => self.swap_due(generation),
        }
    }

    fn entered(&mut self, heading: String) -> Vec<Effect> {
        match &self.state {
            HeadingState::Showing(current) if *current == heading => return vec![],
            HeadingState::Swapping { to } if *to == heading => return vec![],
            _ => {}
        }

        // the element still holds this text, no need to swap
        if self.state == HeadingState::Hidden && self.text.as_ref() == Some(&heading) {
            self.state = HeadingState::Showing(heading);
            return vec![Effect::Heading(HeadingEffect::Show)];
        }

        self.generation += 1;
        self.state = HeadingState::Swapping { to: heading };

        vec![
            Effect::Heading(HeadingEffect::Hide),
            Effect::Schedule {
                after: SWAP_DELAY,
                event: Event::Heading(HeadingEvent::SwapDue(self.generation)),
            },
        ]
    }

    fn left(&mut self, heading: &str) -> Vec<Effect> {
        let current = match &self.state {
            HeadingState::Showing(current) => current,
            HeadingState::Swapping { to } => to,
            HeadingState::Hidden => return vec![],
        };

        if current != heading {
            return vec![];
        }

        if matches!(self.state, HeadingState::Swapping { .. }) {
            self.generation += 1;
        }

        self.state = HeadingState::Hidden;
        vec![Effect::Heading(HeadingEffect::Hide)]
    }

    fn swap_due(&mut self, generation: u64) -> Vec<Effect> {
        if generation != self.generation {
            return vec![];
        }

        let HeadingState::Swapping { to } = &self.state else {
            return vec![];
        };

        let to = to.clone();
        self.text = Some(to.clone());
        self.state = HeadingState::Showing(to.clone());

        vec![
            Effect::Heading(HeadingEffect::SetText(to)),
            Effect::Heading(HeadingEffect::Show),
        ]
    }
}

impl Default for StickyHeading {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn due(effects: &[Effect]) -> Event {
        effects
            .iter()
            .find_map(|effect| match effect {
                Effect::Schedule { event, after } => {
                    assert_eq!(*after, SWAP_DELAY);
                    Some(event.clone())
                }
                _ => None,
            })
            .expect("no swap scheduled")
    }

    fn fire(heading: &mut StickyHeading, event: Event) -> Vec<Effect> {
        match event {
            Event::Heading(event) => heading.handle(event),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_first_section_fades_in() {
        let mut heading = StickyHeading::new();
        let effects = heading.handle(HeadingEvent::Entered("Exhibitions".into()));
        assert_eq!(effects[0], Effect::Heading(HeadingEffect::Hide));
        assert_eq!(
            *heading.state(),
            HeadingState::Swapping {
                to: "Exhibitions".into()
            }
        );

        let effects = fire(&mut heading, due(&effects));
        assert_eq!(
            effects,
            [
                Effect::Heading(HeadingEffect::SetText("Exhibitions".into())),
                Effect::Heading(HeadingEffect::Show),
            ]
        );
        assert_eq!(*heading.state(), HeadingState::Showing("Exhibitions".into()));
    }

    #[test]
    fn test_adjacent_sections_swap_without_flicker() {
        let mut heading = StickyHeading::new();
        let first = heading.handle(HeadingEvent::Entered("A".into()));
        fire(&mut heading, due(&first));

        // B enters the band while A is still in it
        let second = heading.handle(HeadingEvent::Entered("B".into()));
        assert!(heading.handle(HeadingEvent::Left("A".into())).is_empty());

        let effects = fire(&mut heading, due(&second));
        assert_eq!(effects[0], Effect::Heading(HeadingEffect::SetText("B".into())));
        assert_eq!(*heading.state(), HeadingState::Showing("B".into()));
    }

    #[test]
    fn test_overtaken_swap_is_ignored() {
        let mut heading = StickyHeading::new();
        let a = heading.handle(HeadingEvent::Entered("A".into()));
        let b = heading.handle(HeadingEvent::Entered("B".into()));

        assert!(fire(&mut heading, due(&a)).is_empty());
        assert_eq!(*heading.state(), HeadingState::Swapping { to: "B".into() });

        fire(&mut heading, due(&b));
        assert_eq!(*heading.state(), HeadingState::Showing("B".into()));
    }

    #[test]
    fn test_hides_only_for_current_section() {
        let mut heading = StickyHeading::new();
        let a = heading.handle(HeadingEvent::Entered("A".into()));
        fire(&mut heading, due(&a));

        assert!(heading.handle(HeadingEvent::Left("Z".into())).is_empty());
        assert_eq!(
            heading.handle(HeadingEvent::Left("A".into())),
            [Effect::Heading(HeadingEffect::Hide)]
        );
        assert_eq!(*heading.state(), HeadingState::Hidden);
        assert!(heading.handle(HeadingEvent::Left("A".into())).is_empty());
    }

    #[test]
    fn test_reentering_same_section_shows_immediately() {
        let mut heading = StickyHeading::new();
        let a = heading.handle(HeadingEvent::Entered("A".into()));
        fire(&mut heading, due(&a));
        heading.handle(HeadingEvent::Left("A".into()));

        assert_eq!(
            heading.handle(HeadingEvent::Entered("A".into())),
            [Effect::Heading(HeadingEffect::Show)]
        );
        assert_eq!(*heading.state(), HeadingState::Showing("A".into()));
    }

    #[test]
    fn test_leaving_during_swap_cancels_it() {
        let mut heading = StickyHeading::new();
        let a = heading.handle(HeadingEvent::Entered("A".into()));
        heading.handle(HeadingEvent::Left("A".into()));

        assert!(fire(&mut heading, due(&a)).is_empty());
        assert_eq!(*heading.state(), HeadingState::Hidden);
    }
}
